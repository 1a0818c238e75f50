pub mod dummies;
pub mod logs;
pub mod stubs;

pub use logs::CapturedLogs;
pub use stubs::FixedVotesClassifier;
