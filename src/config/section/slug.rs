//! `[slug]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [slug]
//! length = 6   # Number of letters in a generated slug
//! ```

use serde::Deserialize;

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Deserialize)]
pub struct SlugSectionConfig {
    /// Length of generated slugs. Ignored when `--slug` is given.
    pub length: usize,
}

impl SlugSectionConfig {
    pub const LENGTH: FieldPath = FieldPath::new("slug.length");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.length == 0 {
            diag.reject(
                Self::LENGTH,
                "slug length must be at least 1",
                "6 letters give about 20 billion combinations",
            );
        }
    }
}
