//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! directory = "./out"   # Relative to duck.toml, `~` is expanded
//! ```

use serde::Deserialize;
use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSectionConfig {
    /// Output directory of the static site; redirect pages are written here.
    pub directory: PathBuf,
}

impl SiteSectionConfig {
    pub const DIRECTORY: FieldPath = FieldPath::new("site.directory");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.directory.as_os_str().is_empty() {
            diag.reject(
                Self::DIRECTORY,
                "site directory must not be empty",
                "point it at the root of your static site, e.g. \"./out\"",
            );
        }
    }
}
