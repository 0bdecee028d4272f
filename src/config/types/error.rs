//! Errors raised while loading `duck.toml`.

use super::FieldPath;
use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse `{0}`")]
    Toml(PathBuf, #[source] toml::de::Error),

    // No #[from]: the rejected fields are already in the message
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

/// A value that parsed fine but can't be used.
#[derive(Debug, Clone)]
struct Rejection {
    field: FieldPath,
    message: String,
    hint: &'static str,
}

/// Rejected values from every section, reported together.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    rejections: Vec<Rejection>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject `field`, telling the user how to fix it.
    pub fn reject(&mut self, field: FieldPath, message: impl Into<String>, hint: &'static str) {
        self.rejections.push(Rejection {
            field,
            message: message.into(),
            hint,
        });
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.rejections.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", "invalid duck.toml:".red().bold())?;
        for Rejection {
            field,
            message,
            hint,
        } in &self.rejections
        {
            write!(f, "\n  {}: {message}", field.as_str().cyan())?;
            write!(f, "\n    {} {hint}", "hint:".yellow())?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_error_names_file() {
        let err = ConfigError::Io(
            PathBuf::from("duck.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        assert!(err.to_string().contains("duck.toml"));
    }

    #[test]
    fn test_all_rejections_reported() {
        let mut diag = ConfigDiagnostics::new();
        diag.reject(FieldPath::new("site.directory"), "must not be empty", "use ./out");
        diag.reject(FieldPath::new("slug.length"), "must be at least 1", "try 6");

        let display = diag.into_result().unwrap_err().to_string();
        assert!(display.contains("site.directory"));
        assert!(display.contains("use ./out"));
        assert!(display.contains("slug.length"));
        assert!(display.contains("try 6"));
    }

    #[test]
    fn test_no_rejections_is_ok() {
        assert!(ConfigDiagnostics::new().into_result().is_ok());
    }
}
