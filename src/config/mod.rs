//! Configuration management for `duck.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [site] and [slug]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # Path resolution helpers
//! └── mod.rs         # QuackConfig (this file)
//! ```
//!
//! # Example
//!
//! ```toml
//! [site]
//! directory = "./out"
//!
//! [slug]
//! length = 6
//! ```

pub mod section;
pub mod types;
mod util;

use util::{normalize_path, resolve_dir};

pub use section::{SiteSectionConfig, SlugSectionConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{debug, log};
use anyhow::Result;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config filename, looked up in the working directory
pub const CONFIG_FILE: &str = "duck.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing duck.toml
#[derive(Debug, Clone, Deserialize)]
pub struct QuackConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Where redirect pages are written
    pub site: SiteSectionConfig,

    /// Slug generation settings
    pub slug: SlugSectionConfig,
}

impl QuackConfig {
    /// Load, validate and finalize the configuration at `path`.
    ///
    /// Relative site directories are resolved against the config file's
    /// parent directory.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::from_path(path)?;
        config.validate()?;

        config.config_path = normalize_path(path);
        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.finalize(&root);

        debug!("config"; "loaded {}", config.config_path.display());
        debug!("config"; "site directory: {}", config.site_dir().display());
        Ok(config)
    }

    /// Parse configuration from TOML string, without validation.
    #[cfg(test)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .map_err(|err| ConfigError::Toml(path.to_path_buf(), err))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), toml::de::Error> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            println!("- {field}");
        }
    }

    /// Resolve paths relative to the config file's directory.
    fn finalize(&mut self, root: &Path) {
        self.site.directory = resolve_dir(&self.site.directory, root);
    }

    /// Validate configuration values.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.slug.validate(&mut diag);

        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    /// Directory the redirect pages are written to
    pub fn site_dir(&self) -> &Path {
        &self.site.directory
    }

    /// Number of letters in a generated slug
    pub const fn slug_length(&self) -> usize {
        self.slug.length
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config content.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> QuackConfig {
    let (parsed, ignored) = QuackConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Build a config pointing at `site_dir` without reading `duck.toml`.
#[cfg(test)]
pub fn test_config(site_dir: &Path, slug_length: usize) -> QuackConfig {
    QuackConfig {
        config_path: PathBuf::new(),
        site: SiteSectionConfig {
            directory: site_dir.to_path_buf(),
        },
        slug: SlugSectionConfig {
            length: slug_length,
        },
    }
}

// ============================================================================
// tests
// ============================================================================
