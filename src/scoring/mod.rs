pub mod engine;
pub mod tier;
pub mod validation;

pub use engine::{evaluate, score_breakdown, AccountScore, EvaluationResult, QuestionContribution};
pub use tier::Tier;
pub use validation::validate_questions;
