#![forbid(unsafe_code)]

pub mod backend;
pub mod error;
pub mod quiz_flow;
pub mod sync_client;

pub use quiz_core::Clock;

pub use backend::ScoringBackend;
pub use error::{ApiConfigError, QuizFlowError, SyncError};
pub use quiz_flow::QuizFlowService;
pub use sync_client::{ApiConfig, HttpScoringBackend};
