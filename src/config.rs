//! Reporter configuration
//!
//! The host passes two values through to the reporter: the global run
//! configuration and the reporter's own options. Neither is interpreted by
//! the renderer; they are loaded from a TOML file such as:
//!
//! ```toml
//! [global]
//! rootDir = "/work/project"
//!
//! [reporter]
//! verbose = true
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use toml::Table;

/// Configuration values handed to the reporter at construction
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReporterConfig {
    /// Global run configuration from the test engine
    #[serde(default)]
    pub global: Table,
    /// Reporter-specific options
    #[serde(default, rename = "reporter")]
    pub options: Table,
}

impl ReporterConfig {
    /// Parse a configuration file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse reporter config")
    }
}
