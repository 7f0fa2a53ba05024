use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{PartKey, PartResult, QuizCatalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// What happened to the question pointer on [`QuizSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Moved,
    /// Already on the first question; `Prev` left the pointer in place.
    AtStart,
    /// Already on the last question; `Next` left the pointer in place.
    /// This is the point at which the UI prompts for submission.
    AtEnd,
}

/// A part whose answers were submitted and acknowledged by the backend.
///
/// Answers and the cached result live in one struct so a completed part can
/// never exist without its result (and vice versa).
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedPart {
    answers: Vec<String>,
    result: PartResult,
    completed_at: DateTime<Utc>,
}

impl CompletedPart {
    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    #[must_use]
    pub fn result(&self) -> &PartResult {
        &self.result
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

/// Mutable quiz session state for the life of the process.
///
/// All mutation funnels through these methods; nothing here touches the
/// network. The session does not retain the catalog: `open_part` snapshots
/// the question count into the draft, and navigation works off the draft
/// length from then on.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct QuizSession {
    active_part: Option<PartKey>,
    question_index: usize,
    draft_answers: Vec<Option<String>>,
    completed: BTreeMap<PartKey, CompletedPart>,
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active_part(&self) -> Option<&PartKey> {
        self.active_part.as_ref()
    }

    #[must_use]
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    #[must_use]
    pub fn draft_answers(&self) -> &[Option<String>] {
        &self.draft_answers
    }

    #[must_use]
    pub fn completed(&self) -> &BTreeMap<PartKey, CompletedPart> {
        &self.completed
    }

    #[must_use]
    pub fn is_completed(&self, key: &PartKey) -> bool {
        self.completed.contains_key(key)
    }

    /// Open a part for answering, discarding any unsaved draft for a
    /// previously open part. Re-opening a completed part starts a fresh
    /// draft; its completed entry stays until a new submission overwrites it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownPart` if the catalog has no such part;
    /// the session is left unchanged.
    pub fn open_part(&mut self, catalog: &QuizCatalog, key: &PartKey) -> Result<(), SessionError> {
        let part = catalog
            .get(key)
            .ok_or_else(|| SessionError::UnknownPart { key: key.clone() })?;
        self.active_part = Some(key.clone());
        self.question_index = 0;
        self.draft_answers = vec![None; part.question_count()];
        Ok(())
    }

    /// Record the chosen option for the current question. No-op when no part
    /// is open. Overwriting a previous choice is allowed; un-answering is not
    /// exposed (every selection sets a value).
    pub fn select_answer(&mut self, option: impl Into<String>) {
        if self.active_part.is_none() {
            return;
        }
        if let Some(slot) = self.draft_answers.get_mut(self.question_index) {
            *slot = Some(option.into());
        }
    }

    /// Move the question pointer by one, clamped to the draft range.
    pub fn advance(&mut self, direction: Direction) -> AdvanceOutcome {
        let last = self.draft_answers.len().saturating_sub(1);
        match direction {
            Direction::Next if self.question_index < last => {
                self.question_index += 1;
                AdvanceOutcome::Moved
            }
            Direction::Next => AdvanceOutcome::AtEnd,
            Direction::Prev if self.question_index > 0 => {
                self.question_index -= 1;
                AdvanceOutcome::Moved
            }
            Direction::Prev => AdvanceOutcome::AtStart,
        }
    }

    /// Answered and total question counts for the open part.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        let answered = self
            .draft_answers
            .iter()
            .filter(|slot| slot.is_some())
            .count();
        (answered, self.draft_answers.len())
    }

    #[must_use]
    pub fn first_unanswered(&self) -> Option<usize> {
        self.draft_answers.iter().position(Option::is_none)
    }

    /// Validate the draft for submission without touching the network.
    ///
    /// On success returns the part key and a complete copy of the answers;
    /// the session itself stays untouched until [`Self::record_submission`].
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActivePart` when nothing is open. Returns
    /// `SessionError::Unanswered` when a slot is still empty; the pointer
    /// is repositioned to that slot so the UI lands on the missing question.
    pub fn prepare_submission(&mut self) -> Result<(PartKey, Vec<String>), SessionError> {
        let key = self
            .active_part
            .clone()
            .ok_or(SessionError::NoActivePart)?;
        if let Some(index) = self.first_unanswered() {
            self.question_index = index;
            return Err(SessionError::Unanswered { index });
        }
        let answers = self.draft_answers.iter().flatten().cloned().collect();
        Ok((key, answers))
    }

    /// Freeze an acknowledged submission: the part becomes completed with its
    /// answers, server result, and timestamp, and the part (if still the
    /// active one) is closed, returning the user to the menu.
    pub fn record_submission(
        &mut self,
        key: PartKey,
        answers: Vec<String>,
        result: PartResult,
        completed_at: DateTime<Utc>,
    ) {
        if self.active_part.as_ref() == Some(&key) {
            self.active_part = None;
            self.question_index = 0;
            self.draft_answers.clear();
        }
        self.completed.insert(
            key,
            CompletedPart {
                answers,
                result,
                completed_at,
            },
        );
    }

    /// Remove a completed part. Idempotent; unknown keys are ignored.
    pub fn remove_completed(&mut self, key: &PartKey) {
        self.completed.remove(key);
    }

    /// Reset everything: completed parts, cached results, and any open part.
    pub fn clear_all(&mut self) {
        self.active_part = None;
        self.question_index = 0;
        self.draft_answers.clear();
        self.completed.clear();
    }

    /// The payload for the final profile request: every completed part's
    /// frozen answers, keyed by part.
    #[must_use]
    pub fn completed_answers(&self) -> BTreeMap<PartKey, Vec<String>> {
        self.completed
            .iter()
            .map(|(key, part)| (key.clone(), part.answers.to_vec()))
            .collect()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no such quiz part: {key}")]
    UnknownPart { key: PartKey },
    #[error("no part is open")]
    NoActivePart,
    #[error("question {} is unanswered", index + 1)]
    Unanswered { index: usize },
}
