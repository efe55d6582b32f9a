//! Core of the diagnostic-accuracy benchmark: dataset and config loading,
//! prompt construction, LLM backends, response parsing, scoring and reports.

pub mod config;
pub mod engine;
pub mod errors;
pub mod model;
pub mod parse;
pub mod prompt;
pub mod providers;
pub mod report;
pub mod score;

pub use config::{load_config, load_dataset, EvalConfig};
pub use engine::Runner;
pub use providers::llm::LlmClient;
