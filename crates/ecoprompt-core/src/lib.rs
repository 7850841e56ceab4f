//! EcoPrompt Core Library
//!
//! Domain models, configuration and errors shared by the optimizer and its
//! front ends.

pub mod config;
pub mod error;
pub mod optimization;

pub use config::OptimizerConfig;
pub use error::{EcoError, EcoResult};
pub use optimization::model::{CostEstimate, OptimizationResult, OptimizationStats, Strategy};
pub use optimization::{validate_prompt, MAX_PROMPT_CHARS};
