use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Placeholder rendered for any server field that came back absent.
pub const PLACEHOLDER: &str = "\u{2014}";

/// Returns the string, or the em-dash placeholder when absent or blank.
#[must_use]
pub fn placeholder(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => PLACEHOLDER,
    }
}

/// Scoring outcome for a single submitted part.
///
/// Every field is defaulted: the client treats the body as opaque beyond
/// presence checks, and an OK response with an unparseable body degrades to
/// an empty result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartResult {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,
}

impl PartResult {
    #[must_use]
    pub fn result_label(&self) -> &str {
        placeholder(self.result.as_deref())
    }
}

/// Aggregate profile computed by the backend from all completed parts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinalProfile {
    #[serde(default)]
    pub house: Option<String>,
    #[serde(default)]
    pub house_desc: Option<String>,
    #[serde(default)]
    pub patronus: Option<String>,
    #[serde(default)]
    pub wand: Option<String>,
    #[serde(default)]
    pub bestie: Option<String>,
    #[serde(default)]
    pub enemy: Option<String>,
    #[serde(default)]
    pub skill: Option<String>,
    #[serde(default)]
    pub quidditch_role: Option<String>,
    #[serde(default)]
    pub house_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub extras: serde_json::Map<String, serde_json::Value>,
}

impl FinalProfile {
    #[must_use]
    pub fn house_score(&self, house: &str) -> f64 {
        self.house_scores.get(house).copied().unwrap_or(0.0)
    }
}
