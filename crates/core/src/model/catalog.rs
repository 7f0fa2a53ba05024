use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Validated part identifier (trimmed, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PartKey(String);

impl PartKey {
    /// Create a validated part key.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyKey` if the key is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, CatalogError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::EmptyKey);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for PartKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PartKey::new(raw).map_err(serde::de::Error::custom)
    }
}

/// A single-choice question.
///
/// The backend catalog encodes `options` either as a plain array of option
/// strings or as an object mapping option text to scoring weights; the client
/// only needs the option text, so both encodings collapse to an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    #[serde(alias = "q")]
    prompt: String,
    #[serde(deserialize_with = "options_as_list")]
    options: Vec<String>,
}

impl Question {
    #[must_use]
    pub fn new(prompt: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            prompt: prompt.into(),
            options,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }
}

fn options_as_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    struct OptionsVisitor;

    impl<'de> Visitor<'de> for OptionsVisitor {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an array of option strings or an object keyed by option text")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut options = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(option) = seq.next_element::<String>()? {
                options.push(option);
            }
            Ok(options)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            // Keys arrive in document order regardless of the backing map type.
            let mut options = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, _)) = map.next_entry::<String, serde_json::Value>()? {
                options.push(key);
            }
            Ok(options)
        }
    }

    deserializer.deserialize_any(OptionsVisitor)
}

/// One thematic sub-quiz with its own ordered question list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Part {
    name: String,
    #[serde(default, alias = "desc")]
    description: String,
    questions: Vec<Question>,
}

impl Part {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            questions,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// Immutable quiz definition: part keys to parts, in catalog document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizCatalog {
    parts: Vec<(PartKey, Part)>,
}

impl QuizCatalog {
    /// Build a catalog from an ordered list of parts.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NoParts` for an empty list,
    /// `CatalogError::DuplicateKey` for a repeated part key, and
    /// `CatalogError::NoQuestions` for a part with an empty question list.
    pub fn new(parts: Vec<(PartKey, Part)>) -> Result<Self, CatalogError> {
        if parts.is_empty() {
            return Err(CatalogError::NoParts);
        }
        for (idx, (key, part)) in parts.iter().enumerate() {
            if parts[..idx].iter().any(|(other, _)| other == key) {
                return Err(CatalogError::DuplicateKey { key: key.clone() });
            }
            if part.questions.is_empty() {
                return Err(CatalogError::NoQuestions { key: key.clone() });
            }
        }
        Ok(Self { parts })
    }

    /// Parse and validate a catalog from its JSON encoding (an object
    /// mapping part key to part definition).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Malformed` for invalid JSON or shape, plus the
    /// validation errors of [`QuizCatalog::new`].
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let parsed: CatalogDoc = serde_json::from_str(raw)?;
        Self::new(parsed.0)
    }

    #[must_use]
    pub fn get(&self, key: &PartKey) -> Option<&Part> {
        self.parts
            .iter()
            .find(|(other, _)| other == key)
            .map(|(_, part)| part)
    }

    #[must_use]
    pub fn contains(&self, key: &PartKey) -> bool {
        self.get(key).is_some()
    }

    /// Parts in catalog document order.
    pub fn iter(&self) -> impl Iterator<Item = (&PartKey, &Part)> {
        self.parts.iter().map(|(key, part)| (key, part))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

struct CatalogDoc(Vec<(PartKey, Part)>);

impl<'de> Deserialize<'de> for CatalogDoc {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DocVisitor;

        impl<'de> Visitor<'de> for DocVisitor {
            type Value = CatalogDoc;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping part keys to part definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut parts = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, part)) = map.next_entry::<PartKey, Part>()? {
                    parts.push((key, part));
                }
                Ok(CatalogDoc(parts))
            }
        }

        deserializer.deserialize_map(DocVisitor)
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("part key cannot be empty")]
    EmptyKey,
    #[error("catalog defines no parts")]
    NoParts,
    #[error("duplicate part key: {key}")]
    DuplicateKey { key: PartKey },
    #[error("part {key} has no questions")]
    NoQuestions { key: PartKey },
    #[error("malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),
}
