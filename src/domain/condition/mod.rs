//! Condition evaluation for panel visibility, field logic and page flow.

mod evaluator;
pub mod logic;

pub use evaluator::{ConditionEvaluator, EvalContext, PageSelector};
pub use logic::EvaluationError;
