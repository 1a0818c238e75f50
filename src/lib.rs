pub mod app;
pub mod classifiers;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod evaluation;
pub mod logging;
pub mod serving;
pub mod streams;
pub mod tasks;
pub mod utils;
pub mod web;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
