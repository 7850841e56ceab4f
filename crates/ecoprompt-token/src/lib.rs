//! # EcoPrompt Token
//!
//! Rule-based prompt shortening with token, quality and carbon accounting.
//!
//! Rewrites a prompt through a fixed pipeline of pattern substitutions,
//! then reports estimated tokens saved and the energy and CO2 that saving
//! represents under a fixed analytical cost model.

pub mod analyzer;
pub mod carbon;
pub mod optimize;
pub mod optimizer;
pub mod reporter;

pub use analyzer::{estimate_tokens, quality_score, word_count};
pub use carbon::{estimate, savings};
pub use optimize::{optimize, optimize_batch, optimize_batch_with_progress, optimize_with};
pub use optimizer::{catalog, rewrite, Rewrite, RuleInfo, Stage};
pub use reporter::BatchReport;
