//! Optimizer configuration.
//!
//! Defaults, overlaid by an optional TOML file, overlaid by CLI flags and
//! environment variables (resolved by the caller).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{EcoError, EcoResult};
use crate::optimization::model::Strategy;
use crate::optimization::MAX_PROMPT_CHARS;

/// Name of the per-directory config file.
pub const CONFIG_FILE_NAME: &str = "ecoprompt.toml";

/// Settings for the optimizer front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizerConfig {
    pub strategy: Strategy,
    pub max_prompt_chars: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            max_prompt_chars: MAX_PROMPT_CHARS,
        }
    }
}

impl OptimizerConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(content: &str) -> EcoResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> EcoResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| EcoError::config(format!("{}: {}", path.display(), e)))
    }

    /// Resolve the config file to use and load it.
    ///
    /// An explicit path must exist. Otherwise `ecoprompt.toml` in `dir` is
    /// tried, then `<config dir>/ecoprompt/config.toml`; with neither present
    /// the defaults are returned along with `None`.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> EcoResult<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(EcoError::config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let candidates = [
            Some(dir.join(CONFIG_FILE_NAME)),
            dirs::config_dir().map(|d| d.join("ecoprompt").join("config.toml")),
        ];

        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                tracing::debug!(path = %path.display(), "loading config");
                return Ok((Self::load(&path)?, Some(path)));
            }
        }

        Ok((Self::default(), None))
    }

    /// Apply flag or environment overrides on top of the loaded values.
    pub fn with_overrides(mut self, strategy: Option<Strategy>, max_prompt_chars: Option<usize>) -> EcoResult<Self> {
        if let Some(strategy) = strategy {
            self.strategy = strategy;
        }
        if let Some(max) = max_prompt_chars {
            self.max_prompt_chars = max;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> EcoResult<()> {
        if self.max_prompt_chars == 0 {
            return Err(EcoError::config("max_prompt_chars must be greater than 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OptimizerConfig::default();
        assert_eq!(config.strategy, Strategy::Balanced);
        assert_eq!(config.max_prompt_chars, 2000);
    }

    #[test]
    fn test_parse_partial_file() {
        let config = OptimizerConfig::from_toml_str("strategy = \"aggressive\"").unwrap();
        assert_eq!(config.strategy, Strategy::Aggressive);
        assert_eq!(config.max_prompt_chars, MAX_PROMPT_CHARS);

        let config = OptimizerConfig::from_toml_str("max_prompt_chars = 500").unwrap();
        assert_eq!(config.strategy, Strategy::Balanced);
        assert_eq!(config.max_prompt_chars, 500);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            OptimizerConfig::from_toml_str("strategy = \"extreme\""),
            Err(EcoError::Toml(_))
        ));
        assert!(matches!(
            OptimizerConfig::from_toml_str("max_prompt_chars = 0"),
            Err(EcoError::Config(_))
        ));
        assert!(OptimizerConfig::from_toml_str("colour = \"green\"").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let config = OptimizerConfig::default()
            .with_overrides(Some(Strategy::Conservative), Some(100))
            .unwrap();
        assert_eq!(config.strategy, Strategy::Conservative);
        assert_eq!(config.max_prompt_chars, 100);

        let unchanged = OptimizerConfig::default().with_overrides(None, None).unwrap();
        assert_eq!(unchanged, OptimizerConfig::default());
    }

    #[test]
    fn test_discover_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&file, "strategy = \"conservative\"\n").unwrap();

        let (config, path) = OptimizerConfig::discover(None, dir.path()).unwrap();
        assert_eq!(config.strategy, Strategy::Conservative);
        assert_eq!(path, Some(file));
    }

    #[test]
    fn test_strategy_name_is_case_insensitive() {
        let config = OptimizerConfig::from_toml_str("strategy = \"Aggressive\"").unwrap();
        assert_eq!(config.strategy, Strategy::Aggressive);

        let config = OptimizerConfig::from_toml_str("strategy = \" CONSERVATIVE \"").unwrap();
        assert_eq!(config.strategy, Strategy::Conservative);
    }

    #[test]
    fn test_discover_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            OptimizerConfig::discover(Some(&missing), Path::new(".")),
            Err(EcoError::Config(_))
        ));
    }
}
