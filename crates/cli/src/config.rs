use anyhow::{Context, Result};
use atlas_graph::GraphOptions;
use serde::Deserialize;
use std::path::Path;

/// Picked up from the working directory when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "atlas.toml";

/// Optional TOML config supplying default graph options; explicit CLI flags
/// always win over it.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CliConfig {
    pub graph: GraphOptions,
}

impl CliConfig {
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: CliConfig = toml::from_str(&raw)
            .with_context(|| format!("invalid config {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub(crate) fn graph_options(&self) -> GraphOptions {
        self.graph.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_in_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
            [graph]
            max_nodes = 25
            "#,
        )
        .unwrap();
        let opts = config.graph_options();
        assert_eq!(opts.max_nodes, 25);
        assert_eq!(opts.max_hops, GraphOptions::default().max_hops);
        assert!(opts.include_hierarchy);
    }

    #[test]
    fn test_allowed_types_parse_from_toml() {
        let config: CliConfig = toml::from_str(
            r#"
            [graph]
            allowed_types = ["organization", "entity"]
            "#,
        )
        .unwrap();
        assert_eq!(config.graph_options().allowed_types.len(), 2);
    }
}
