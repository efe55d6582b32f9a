//! Evaluation engine: prompt construction per k, generation, scoring, persistence.

pub mod runner;

pub use runner::Runner;
