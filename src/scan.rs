//! Collision checks against the site directory.
//!
//! Two kinds of collision are detected before a page is written:
//!
//! - **slug**: `<slug>.html` already exists in the site directory
//! - **target**: some `.html` file anywhere under the site directory already
//!   contains the exact refresh tag for the requested URL
//!
//! Target matching is a literal substring search on the rendered tag.
//! `https://example.com` and `https://example.com/` are different targets.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jwalk::{Parallelism, WalkDir};
use regex::bytes::Regex;
use thiserror::Error;

use crate::debug;
use crate::page::refresh_tag;
use crate::slug::{PAGE_EXTENSION, Slug};

/// The site directory could not be fully scanned.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to walk `{}`", .dir.display())]
    Walk {
        dir: PathBuf,
        #[source]
        source: jwalk::Error,
    },

    #[error("failed to open `{}` for duplicate checking", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to check whether `{}` exists", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to build the duplicate matcher")]
    Matcher(#[from] regex::Error),
}

/// An existing redirect page for the requested target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    /// File stem of the matching page
    pub slug: String,
    pub path: PathBuf,
}

/// Whether `<dir>/<slug>.html` is already present (any file type, including
/// dangling symlinks). Only `NotFound` means the slug is free.
pub fn slug_taken(dir: &Path, slug: &Slug) -> Result<bool, ScanError> {
    let path = dir.join(slug.file_name());
    match fs::symlink_metadata(&path) {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(ScanError::Stat { path, source }),
    }
}

/// Literal matcher for the refresh tag of `target`.
fn target_matcher(target: &str) -> Result<Regex, regex::Error> {
    Regex::new(&regex::escape(&refresh_tag(target)))
}

/// Find a page under `dir` that already redirects to `target`.
///
/// Walks `dir` recursively in sorted order and returns the first `.html`
/// entry whose content contains [`refresh_tag`]`(target)`. Any entry that
/// cannot be walked or read aborts the scan.
pub fn find_duplicate_target(target: &str, dir: &Path) -> Result<Option<Duplicate>, ScanError> {
    let matcher = target_matcher(target)?;
    let mut checked = 0usize;

    let walker = WalkDir::new(dir)
        .parallelism(Parallelism::Serial)
        .sort(true)
        .skip_hidden(false);

    for entry in walker {
        let entry = entry.map_err(|source| ScanError::Walk {
            dir: dir.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if !is_page(&path) {
            continue;
        }

        let content = fs::read(&path).map_err(|source| ScanError::Read {
            path: path.clone(),
            source,
        })?;
        checked += 1;

        if matcher.is_match(&content) {
            debug!("scan"; "target found in {} after {} page(s)", path.display(), checked);
            let slug = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            return Ok(Some(Duplicate { slug, path }));
        }
    }

    debug!("scan"; "no duplicate among {} page(s)", checked);
    Ok(None)
}

/// `.html` extension, case-sensitive
fn is_page(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == PAGE_EXTENSION)
}
