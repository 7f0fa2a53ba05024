use quiz_core::model::{PartKey, QuizCatalog, QuizSession};

/// One card on the parts menu.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuPartVm {
    pub key: PartKey,
    pub name: String,
    pub description: String,
    pub question_count: usize,
    pub icon: &'static str,
    pub completed: bool,
}

#[must_use]
pub fn map_menu_parts(catalog: &QuizCatalog, session: &QuizSession) -> Vec<MenuPartVm> {
    catalog
        .iter()
        .map(|(key, part)| MenuPartVm {
            key: key.clone(),
            name: part.name().to_string(),
            description: part.description().to_string(),
            question_count: part.question_count(),
            icon: part_icon(key.as_str()),
            completed: session.is_completed(key),
        })
        .collect()
}

fn part_icon(key: &str) -> &'static str {
    match key {
        "house" => "\u{1F3E0}",
        "patronus" => "\u{1F98C}",
        "wand" => "\u{1FA84}",
        "bestie" => "\u{1F91D}",
        "enemy" => "\u{2694}\u{FE0F}",
        "skills" => "\u{1F4DA}",
        "quidditch" => "\u{1F3C6}",
        "extras" => "\u{1F393}",
        _ => "\u{2728}",
    }
}

/// One completed-part result card.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletedPartVm {
    pub key: PartKey,
    pub name: String,
    pub result_label: String,
    pub scores_pretty: String,
    pub completed_at_label: String,
}

#[must_use]
pub fn map_completed_parts(catalog: &QuizCatalog, session: &QuizSession) -> Vec<CompletedPartVm> {
    session
        .completed()
        .iter()
        .map(|(key, completed)| {
            let name = catalog
                .get(key)
                .map_or_else(|| key.to_string(), |part| part.name().to_string());
            let result = completed.result();
            CompletedPartVm {
                key: key.clone(),
                name,
                result_label: result.result_label().to_string(),
                scores_pretty: serde_json::to_string_pretty(&result.scores)
                    .unwrap_or_else(|_| "{}".to_string()),
                completed_at_label: completed
                    .completed_at()
                    .format("%Y-%m-%d %H:%M UTC")
                    .to_string(),
            }
        })
        .collect()
}
