use quiz_core::model::{Part, QuizSession};

#[derive(Clone, Debug, PartialEq)]
pub struct OptionVm {
    pub value: String,
    pub selected: bool,
}

/// The question screen: one prompt, its options, and part progress.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionVm {
    /// 1-based, for display.
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub answered: usize,
    pub progress_pct: u32,
    pub at_first: bool,
    pub at_last: bool,
}

#[must_use]
pub fn map_question(part: &Part, session: &QuizSession) -> Option<QuestionVm> {
    let index = session.question_index();
    let question = part.questions().get(index)?;
    let selected = session.draft_answers().get(index).cloned().flatten();
    let (answered, total) = session.progress();

    let options = question
        .options()
        .iter()
        .map(|option| OptionVm {
            value: option.clone(),
            selected: selected.as_deref() == Some(option.as_str()),
        })
        .collect();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let progress_pct = if total == 0 {
        0
    } else {
        ((answered as f64 / total as f64) * 100.0).round() as u32
    };

    Some(QuestionVm {
        number: index + 1,
        total,
        prompt: question.prompt().to_string(),
        options,
        answered,
        progress_pct,
        at_first: index == 0,
        at_last: index + 1 == total,
    })
}
