mod holdout_evaluator;

pub use holdout_evaluator::{DEFAULT_SEED, HoldoutEvaluation, HoldoutReport};
