use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{ChangelogError, Result};

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "genchangelog.toml";

/// File name looked up in the user config directory.
pub const USER_CONFIG_FILE: &str = ".genchangelog.toml";

/// Represents the complete configuration for gen-changelog.
///
/// Controls which tags mark releases, which tag bounds the history, and
/// which author addresses get rewritten in stanza headers.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Prefix of release tags, as in `GNET-1.2.3`
    #[serde(default = "default_release_tag_prefix")]
    pub release_tag_prefix: String,

    /// Name of the tag marking the oldest commit to include
    #[serde(default = "default_start_tag")]
    pub start_tag: String,

    /// Trailing header field replacements, keyed by the exact `<address>`
    #[serde(default = "default_author_rewrites")]
    pub author_rewrites: HashMap<String, String>,
}

/// Returns the default release tag prefix.
fn default_release_tag_prefix() -> String {
    "GNET".to_string()
}

/// Returns the default start tag name.
fn default_start_tag() -> String {
    "CHANGELOG_START".to_string()
}

/// Returns the default author address rewrites.
fn default_author_rewrites() -> HashMap<String, String> {
    let mut map = HashMap::new();
    map.insert(
        "<tpm@src.gnome.org>".to_string(),
        "<tim@centricular.net>".to_string(),
    );
    map
}

impl Default for Config {
    fn default() -> Self {
        Config {
            release_tag_prefix: default_release_tag_prefix(),
            start_tag: default_start_tag(),
            author_rewrites: default_author_rewrites(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `genchangelog.toml` in current directory
/// 3. `.genchangelog.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(LOCAL_CONFIG_FILE);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)
            .map_err(|e| ChangelogError::config(format!("Cannot read {}: {}", path, e)))?
    } else if local.exists() {
        fs::read_to_string(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(USER_CONFIG_FILE);
        if user_path.exists() {
            fs::read_to_string(user_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses a TOML document into a [Config], filling in defaults.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(config_str).map_err(|e| ChangelogError::config(e.to_string()))?;

    if config.release_tag_prefix.is_empty() {
        return Err(ChangelogError::config("release_tag_prefix must not be empty"));
    }
    if config.start_tag.is_empty() {
        return Err(ChangelogError::config("start_tag must not be empty"));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.release_tag_prefix, "GNET");
        assert_eq!(config.start_tag, "CHANGELOG_START");
        assert_eq!(
            config.author_rewrites.get("<tpm@src.gnome.org>"),
            Some(&"<tim@centricular.net>".to_string())
        );
    }

    #[test]
    fn test_parse_empty_document_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_partial_document() {
        let config = parse_config("release_tag_prefix = \"LIBABIGAIL\"").unwrap();
        assert_eq!(config.release_tag_prefix, "LIBABIGAIL");
        assert_eq!(config.start_tag, "CHANGELOG_START");
    }

    #[test]
    fn test_author_rewrites_replace_defaults() {
        let config = parse_config(
            r#"
[author_rewrites]
"<old@example.com>" = "<new@example.com>"
"#,
        )
        .unwrap();
        assert_eq!(config.author_rewrites.len(), 1);
        assert!(!config.author_rewrites.contains_key("<tpm@src.gnome.org>"));
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let err = parse_config("release_tag_prefix = \"\"").unwrap_err();
        assert!(err.to_string().contains("release_tag_prefix"));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = parse_config("start_tag = [").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
