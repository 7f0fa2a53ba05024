use std::collections::BTreeMap;

use async_trait::async_trait;

use quiz_core::model::{FinalProfile, PartKey, PartResult};

use crate::error::SyncError;

/// The scoring backend seam: one call per REST endpoint, fire-and-once.
///
/// No retry, timeout, or backoff lives behind this trait; a failed call is
/// surfaced and the user re-triggers manually. Production uses
/// [`crate::HttpScoringBackend`]; tests substitute in-memory fakes.
#[async_trait]
pub trait ScoringBackend: Send + Sync {
    /// Score one part's answers.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Rejected` for a non-success response and
    /// `SyncError::Transport` when no response arrived.
    async fn submit_part(
        &self,
        part: &PartKey,
        answers: &[String],
    ) -> Result<PartResult, SyncError>;

    /// Compute the aggregate profile from all completed parts' answers.
    ///
    /// # Errors
    ///
    /// Same failure kinds as [`Self::submit_part`].
    async fn final_profile(
        &self,
        answers_by_part: &BTreeMap<PartKey, Vec<String>>,
    ) -> Result<FinalProfile, SyncError>;
}
