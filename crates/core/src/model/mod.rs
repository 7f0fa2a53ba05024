mod catalog;
mod result;
mod session;

pub use catalog::{CatalogError, Part, PartKey, Question, QuizCatalog};
pub use result::{FinalProfile, PartResult, placeholder};
pub use session::{AdvanceOutcome, CompletedPart, Direction, QuizSession, SessionError};
