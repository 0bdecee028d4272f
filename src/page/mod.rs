//! Redirect page rendering and writing.
//!
//! A redirect page is a minimal HTML document whose meta refresh tag sends
//! the browser to the target URL. Pages are created exclusively: an existing
//! file is never overwritten.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::debug;
use crate::slug::Slug;

/// The tag that performs the redirect. Also what duplicate detection looks for.
const REFRESH_TAG: &str = r#"<meta http-equiv="Refresh" content="0; url='__TARGET_URL__'" />"#;

/// Page written for every slug; `__REFRESH_TAG__` marks where the tag goes.
const REDIRECT_HTML: &str = include_str!("redirect.html");

/// Creating or writing a redirect page failed.
#[derive(Debug, Error)]
#[error("failed to save `{}`", .path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl WriteError {
    /// The page already existed when we tried to create it.
    pub fn already_exists(&self) -> bool {
        self.source.kind() == io::ErrorKind::AlreadyExists
    }
}

/// Render the meta refresh tag for `target`.
///
/// Every page written by [`write_redirect`] contains exactly this string.
pub fn refresh_tag(target: &str) -> String {
    REFRESH_TAG.replace("__TARGET_URL__", target)
}

/// Render the full redirect page for `target`.
pub fn render_redirect(target: &str) -> String {
    REDIRECT_HTML.replace("__REFRESH_TAG__", &refresh_tag(target))
}

/// Write `<dir>/<slug>.html` redirecting to `target`.
///
/// Fails if the file already exists. A partially written file is removed.
pub fn write_redirect(dir: &Path, slug: &Slug, target: &str) -> Result<PathBuf, WriteError> {
    let path = dir.join(slug.file_name());
    let html = render_redirect(target);

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|source| WriteError {
            path: path.clone(),
            source,
        })?;

    if let Err(source) = file.write_all(html.as_bytes()) {
        drop(file);
        let _ = fs::remove_file(&path);
        return Err(WriteError { path, source });
    }

    debug!("write"; "{} ({} bytes)", path.display(), html.len());
    Ok(path)
}
