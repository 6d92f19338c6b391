//! Configuration loading and asset base URL resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Environment variable carrying the asset base URL
pub const ASSETS_BASE_URL_ENV: &str = "PETKEEP_ASSETS_BASE_URL";

/// Format flags applied when a run does not specify its own
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatDefaults {
    pub create_missing_fields: bool,
    pub populate_empty_fields: bool,
}

/// TOML configuration file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Absolute URL prefix the public image paths resolve against
    pub assets_base_url: Option<String>,
    pub format: FormatDefaults,
}

/// Load and parse a TOML configuration file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read config failed: {}", e)))?;
    toml::from_str(&content).map_err(|e| Error::Config(format!("Parse config failed: {}", e)))
}

/// Resolve the asset base URL following priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
///
/// The value must be an absolute http(s) URL prefix; it is read once at
/// startup and treated as read-only for the life of the process.
pub fn resolve_assets_base_url(
    cli_arg: Option<&str>,
    toml_config: Option<&TomlConfig>,
) -> Result<String> {
    let env_value = std::env::var(ASSETS_BASE_URL_ENV).ok();
    let toml_value = toml_config.and_then(|c| c.assets_base_url.as_deref());

    let mut sources = Vec::new();
    if cli_arg.is_some() {
        sources.push("command line");
    }
    if env_value.is_some() {
        sources.push("environment");
    }
    if toml_value.is_some() {
        sources.push("TOML");
    }
    if sources.len() > 1 {
        warn!(
            "Asset base URL found in multiple sources: {}. Using {} (highest priority).",
            sources.join(", "),
            sources[0]
        );
    }

    // Priority 1: Command-line argument
    if let Some(base) = cli_arg {
        return validate_assets_base_url(base);
    }

    // Priority 2: Environment variable
    if let Some(base) = env_value {
        return validate_assets_base_url(&base);
    }

    // Priority 3: TOML config file
    if let Some(base) = toml_value {
        return validate_assets_base_url(base);
    }

    Err(Error::Config(format!(
        "Asset base URL not configured. Set {} or assets_base_url in the config file",
        ASSETS_BASE_URL_ENV
    )))
}

/// Validate an asset base URL (absolute http(s) prefix)
fn validate_assets_base_url(base: &str) -> Result<String> {
    let trimmed = base.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(Error::Config(format!(
            "Asset base URL must be an absolute http(s) URL, got '{}'",
            base
        )))
    }
}
