//! Dotted `duck.toml` key names.

/// Dotted path of a `duck.toml` key, e.g. `slug.length`.
///
/// Each section declares its keys as constants and passes them to
/// [`ConfigDiagnostics::reject`](super::ConfigDiagnostics::reject).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(&'static str);

impl FieldPath {
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}
