//! CLI configuration.
//!
//! Resolved from `--config`, then `$IMPACT_CONFIG` (both via clap), then
//! `<config_dir>/impact/config.toml`, then built-in defaults. Every key is
//! optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use impact_finance::{IrrConfig, ModelConfig};
use impact_graph::{AggregationOrder, Aggregator};

use crate::error::{CliError, CliResult};

/// CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Session graph snapshot.
    pub graph_path: PathBuf,
    /// Annotation store file.
    pub notes_path: PathBuf,
    /// Default tracing filter; `RUST_LOG` takes precedence.
    pub log_filter: String,
    /// Rollup visiting order.
    pub aggregation_order: AggregationOrder,
    /// Lowest IRR searched (fraction).
    pub irr_lower_bound: f64,
    /// Highest IRR searched (fraction).
    pub irr_upper_bound: f64,
    /// IRR bracket width tolerance.
    pub irr_tolerance: f64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            graph_path: PathBuf::from("impact-graph.json"),
            notes_path: PathBuf::from("impact-notes.json"),
            log_filter: "warn,impact=info".to_string(),
            aggregation_order: AggregationOrder::Topological,
            irr_lower_bound: 0.0,
            irr_upper_bound: 10.0,
            irr_tolerance: 1e-4,
        }
    }
}

impl CliConfig {
    /// Loads the explicit file if given, else the default location if it
    /// exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&content).map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
    }

    /// Rollup engine for the configured order.
    pub fn aggregator(&self) -> Aggregator {
        Aggregator::new(self.aggregation_order)
    }

    /// Model settings with the configured IRR search range.
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig::default().with_irr(
            IrrConfig::default()
                .with_bounds(self.irr_lower_bound, self.irr_upper_bound)
                .with_tolerance(self.irr_tolerance),
        )
    }

    /// Renders the settings as TOML.
    pub fn to_toml_string(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }
}

/// `<config_dir>/impact/config.toml`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join("impact").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "graph_path = \"session.json\"\naggregation_order = \"level-descending\"\n",
        )
        .unwrap();

        let config = CliConfig::load(Some(&path)).unwrap();

        assert_eq!(config.graph_path, PathBuf::from("session.json"));
        assert_eq!(config.aggregation_order, AggregationOrder::LevelDescending);
        assert_eq!(config.irr_upper_bound, 10.0);
        assert_eq!(config.notes_path, PathBuf::from("impact-notes.json"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "colour = true\n").unwrap();

        assert!(matches!(
            CliConfig::load(Some(&path)),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CliConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_defaults_render_as_toml() {
        let rendered = CliConfig::default().to_toml_string().unwrap();
        let parsed: CliConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, CliConfig::default());
    }

    #[test]
    fn test_model_config_uses_bounds() {
        let config = CliConfig::default();
        let model = config.model_config();
        assert_eq!(model.irr.upper_bound, 10.0);
        assert_eq!(model.irr.tolerance, 1e-4);
    }
}
