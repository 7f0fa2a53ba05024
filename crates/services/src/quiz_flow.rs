use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use quiz_core::Clock;
use quiz_core::model::{FinalProfile, PartKey, PartResult, QuizSession};

use crate::backend::ScoringBackend;
use crate::error::QuizFlowError;

/// Orchestrates the two synchronized operations: submit one part, compute
/// the final profile. Validation happens before any network call; session
/// state is mutated only after the backend acknowledged a submission.
///
/// At most one request per target (a part key, or the profile) may be
/// outstanding at a time; a concurrent second attempt fails fast with
/// `QuizFlowError::AlreadyInFlight` instead of racing.
#[derive(Clone)]
pub struct QuizFlowService {
    clock: Clock,
    backend: Arc<dyn ScoringBackend>,
    in_flight: Arc<Mutex<HashSet<Target>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Target {
    Part(PartKey),
    Profile,
}

impl Target {
    fn label(&self) -> String {
        match self {
            Target::Part(key) => format!("part {key}"),
            Target::Profile => "the final profile".to_string(),
        }
    }
}

impl QuizFlowService {
    #[must_use]
    pub fn new(backend: Arc<dyn ScoringBackend>) -> Self {
        Self {
            clock: Clock::default(),
            backend,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Validate and submit the open part's draft.
    ///
    /// On success the session freezes the part as completed (answers, cached
    /// result, timestamp) and returns to the menu.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::Session` without a network call when no part
    /// is open or a question is unanswered (the pointer is repositioned to
    /// the first unanswered question). Returns `AlreadyInFlight` while a
    /// submission for the same part is outstanding. Returns `Sync` for
    /// backend rejection or transport failure; the session is unchanged.
    pub async fn submit_active_part(
        &self,
        session: &mut QuizSession,
    ) -> Result<(PartKey, PartResult), QuizFlowError> {
        let (key, answers) = session.prepare_submission()?;
        let _guard = self.acquire(Target::Part(key.clone()))?;

        let result = self.backend.submit_part(&key, &answers).await?;
        session.record_submission(key.clone(), answers, result.clone(), self.clock.now());
        Ok((key, result))
    }

    /// Request the aggregate profile for every completed part.
    ///
    /// The profile is returned to the caller, not stored in the session.
    ///
    /// # Errors
    ///
    /// Returns `NothingToFinalize` without a network call when no part is
    /// completed. Returns `AlreadyInFlight` while a profile request is
    /// outstanding. Returns `Sync` for rejection or transport failure.
    pub async fn request_final_profile(
        &self,
        session: &QuizSession,
    ) -> Result<FinalProfile, QuizFlowError> {
        if session.completed().is_empty() {
            return Err(QuizFlowError::NothingToFinalize);
        }
        let _guard = self.acquire(Target::Profile)?;

        let answers_by_part = session.completed_answers();
        Ok(self.backend.final_profile(&answers_by_part).await?)
    }

    fn acquire(&self, target: Target) -> Result<InFlightGuard, QuizFlowError> {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(target.clone()) {
            return Err(QuizFlowError::AlreadyInFlight {
                target: target.label(),
            });
        }
        Ok(InFlightGuard {
            set: Arc::clone(&self.in_flight),
            target,
        })
    }
}

/// Releases the in-flight slot when the request finishes, on every path.
struct InFlightGuard {
    set: Arc<Mutex<HashSet<Target>>>,
    target: Target,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.target);
    }
}
