pub mod error;
pub mod time_value;
pub mod types;

pub mod sip;

pub mod plan;

pub mod corpus;

pub mod planning;

#[cfg(feature = "scenarios")]
pub mod scenarios;

pub use error::CorpusError;
pub use planning::engine::{calculate_retirement_plan, RetirementPlanOutput};
pub use types::*;

/// Standard result type for all corpus operations
pub type CorpusResult<T> = Result<T, CorpusError>;
