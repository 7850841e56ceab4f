//! Rule-based prompt rewriting.
//!
//! The rewrite is a fixed pipeline of five stages, each a fold of its rule
//! table over the text. Stages always run, in order; a rule that does not
//! match leaves no trace in the log.

pub mod rules;

use ecoprompt_core::Strategy;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub use rules::{Rule, Stage};

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Text being rewritten plus the names of the rules applied so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rewrite {
    pub text: String,
    pub applied_rules: Vec<String>,
}

impl Rewrite {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            applied_rules: Vec::new(),
        }
    }

    fn apply_stage(self, stage: Stage, strategy: Strategy) -> Self {
        rules::for_stage(stage, strategy)
            .into_iter()
            .fold(self, |mut acc, rule| {
                if let Some(text) = rule.apply(&acc.text) {
                    tracing::debug!(stage = %stage, rule = rule.name(), "rule applied");
                    acc.text = text;
                    acc.applied_rules.push(rule.name().to_string());
                }
                acc
            })
    }
}

/// Rewrite a prompt into a shorter form.
///
/// Total over all strings. Input no rule matches comes back unchanged apart
/// from the final cleanup: whitespace runs collapsed, ends trimmed, one
/// leading `,` or `;` and one trailing `?` dropped.
pub fn rewrite(prompt: &str, strategy: Strategy) -> Rewrite {
    let mut rewrite = Stage::ALL
        .into_iter()
        .fold(Rewrite::new(prompt), |acc, stage| acc.apply_stage(stage, strategy));

    rewrite.text = cleanup(&rewrite.text);
    rewrite
}

fn cleanup(text: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    let trimmed = collapsed.trim();
    let trimmed = trimmed.strip_prefix([',', ';']).map_or(trimmed, str::trim_start);
    let trimmed = trimmed.strip_suffix('?').map_or(trimmed, str::trim_end);

    trimmed.to_string()
}

/// One entry of the rule catalog.
#[derive(Debug, Clone, Serialize)]
pub struct RuleInfo {
    pub stage: &'static str,
    pub name: &'static str,
}

/// Every rule that runs under `strategy`, in execution order.
pub fn catalog(strategy: Strategy) -> Vec<RuleInfo> {
    Stage::ALL
        .into_iter()
        .flat_map(|stage| {
            rules::for_stage(stage, strategy)
                .into_iter()
                .map(move |rule| RuleInfo {
                    stage: stage.label(),
                    name: rule.name(),
                })
        })
        .collect()
}
