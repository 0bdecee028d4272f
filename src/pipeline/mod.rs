//! Shortlink creation pipeline.
//!
//! ```text
//! site dir exists? ─▶ pick slug ─▶ slug free? ─▶ target new? ─▶ write page
//!        │                             │              │
//!        ▼                             ▼              ▼
//!   MissingSiteDir              SlugCollision   AlreadyRedirected (ok)
//! ```
//!
//! Every stage runs once, in order. The first failure stops the pipeline;
//! nothing has been written at that point.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::QuackConfig;
use crate::page::{WriteError, write_redirect};
use crate::scan::{ScanError, find_duplicate_target, slug_taken};
use crate::debug;
use crate::slug::{Slug, SlugOrigin};

/// What the user asked for on the command line.
#[derive(Debug, Clone)]
pub struct Request<'a> {
    pub target: &'a str,
    /// `--slug`, if given
    pub slug: Option<&'a str>,
}

/// Successful result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new page was written.
    Created { slug: Slug, path: PathBuf },
    /// A page for this target already exists; nothing was written.
    AlreadyRedirected { slug: String, path: PathBuf },
}

impl Outcome {
    /// The slug to report: the new one, or the existing one for the target.
    pub fn slug(&self) -> &str {
        match self {
            Self::Created { slug, .. } => slug.as_str(),
            Self::AlreadyRedirected { slug, .. } => slug,
        }
    }

    /// The page that now redirects to the target.
    pub fn path(&self) -> &Path {
        match self {
            Self::Created { path, .. } | Self::AlreadyRedirected { path, .. } => path,
        }
    }

    /// The single line printed to stdout.
    pub fn message(&self) -> String {
        match self {
            Self::Created { .. } => format!("Success! Slug is {}", self.slug()),
            Self::AlreadyRedirected { .. } => {
                format!("This target already exists as slug {}", self.slug())
            }
        }
    }
}

/// Everything that makes a run fail.
#[derive(Debug, Error)]
pub enum QuackError {
    #[error("configured site directory `{}` doesn't exist", .0.display())]
    MissingSiteDir(PathBuf),

    #[error("{}", collision_message(.slug, .origin))]
    SlugCollision { slug: String, origin: SlugOrigin },

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

impl QuackError {
    /// Process exit code for this error.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::MissingSiteDir(_)
            | Self::SlugCollision { .. }
            | Self::Scan(_)
            | Self::Write(_) => 1,
        }
    }
}

fn collision_message(slug: &str, origin: &SlugOrigin) -> String {
    match origin {
        SlugOrigin::Manual => format!("slug '{slug}' already exists"),
        SlugOrigin::Generated => {
            format!("slug '{slug}' already exists, please re-run to generate a new one")
        }
    }
}

/// Create a redirect page for `request` in the configured site directory.
pub fn run(request: &Request<'_>, config: &QuackConfig) -> Result<Outcome, QuackError> {
    let site_dir = config.site_dir();
    ensure_site_dir(site_dir)?;

    let slug = Slug::from_request(request.slug, config.slug_length());
    debug!("slug"; "{} ({:?})", slug, slug.origin());

    if slug_taken(site_dir, &slug)? {
        return Err(QuackError::SlugCollision {
            slug: slug.to_string(),
            origin: slug.origin(),
        });
    }

    if let Some(duplicate) = find_duplicate_target(request.target, site_dir)? {
        return Ok(Outcome::AlreadyRedirected {
            slug: duplicate.slug,
            path: duplicate.path,
        });
    }

    let path = write_redirect(site_dir, &slug, request.target)?;
    debug!("write"; "{} -> {}", slug.file_name(), request.target);
    Ok(Outcome::Created { slug, path })
}

fn ensure_site_dir(dir: &Path) -> Result<(), QuackError> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(QuackError::MissingSiteDir(dir.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::page::refresh_tag;
    use std::fs;
    use tempfile::TempDir;

    fn html_files(dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.extension().is_some_and(|e| e == "html"))
            .collect();
        files.sort();
        files
    }

    fn request<'a>(target: &'a str, slug: Option<&'a str>) -> Request<'a> {
        Request { target, slug }
    }

    #[test]
    fn test_fresh_dir_creates_one_page() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path(), 6);

        let outcome = run(&request("https://example.com", None), &config).unwrap();

        let Outcome::Created { slug, path } = &outcome else {
            panic!("expected a new page, got {outcome:?}");
        };
        assert_eq!(slug.as_str().len(), 6);
        assert!(slug.as_str().chars().all(|c| c.is_ascii_alphabetic()));
        assert_eq!(path, &dir.path().join(format!("{slug}.html")));
        assert_eq!(html_files(dir.path()), vec![path.clone()]);

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains(&refresh_tag("https://example.com")));
        assert!(content.contains("url='https://example.com'"));
        assert_eq!(outcome.message(), format!("Success! Slug is {slug}"));
    }

    #[test]
    fn test_second_run_reports_first_slug() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path(), 6);

        let first = run(&request("https://example.com", None), &config).unwrap();
        let second = run(&request("https://example.com", None), &config).unwrap();

        assert!(matches!(second, Outcome::AlreadyRedirected { .. }));
        assert_eq!(second.slug(), first.slug());
        assert_eq!(second.path(), first.path());
        assert_eq!(html_files(dir.path()).len(), 1);
        assert_eq!(
            second.message(),
            format!("This target already exists as slug {}", first.slug())
        );
    }

    #[test]
    fn test_duplicate_wins_over_manual_slug() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path(), 6);

        run(&request("https://example.com", Some("first")), &config).unwrap();
        let outcome = run(&request("https://example.com", Some("second")), &config).unwrap();

        assert_eq!(outcome.slug(), "first");
        assert!(!dir.path().join("second.html").exists());
    }

    #[test]
    fn test_different_targets_get_different_pages() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path(), 8);

        let a = run(&request("https://example.com", None), &config).unwrap();
        let b = run(&request("https://example.com/", None), &config).unwrap();

        assert!(matches!(b, Outcome::Created { .. }));
        assert_ne!(a.slug(), b.slug());
        assert_eq!(html_files(dir.path()).len(), 2);
    }

    #[test]
    fn test_manual_slug_collision() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path(), 6);
        fs::write(dir.path().join("foo.html"), "existing").unwrap();

        let err = run(&request("https://example.com", Some("foo")), &config).unwrap_err();

        assert!(matches!(
            &err,
            QuackError::SlugCollision { slug, origin: SlugOrigin::Manual } if slug == "foo"
        ));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "slug 'foo' already exists");
        assert_eq!(html_files(dir.path()).len(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("foo.html")).unwrap(),
            "existing"
        );
    }

    #[test]
    fn test_collision_checked_before_duplicate() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path(), 6);
        run(&request("https://example.com", Some("foo")), &config).unwrap();

        // Same target, same slug: the slug collision is reported
        let err = run(&request("https://example.com", Some("foo")), &config).unwrap_err();
        assert!(matches!(err, QuackError::SlugCollision { .. }));
    }

    #[test]
    fn test_empty_manual_slug_generates_one() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path(), 4);

        let first = run(&request("https://example.com", Some("")), &config).unwrap();
        let Outcome::Created { slug, path } = &first else {
            panic!("expected a new page, got {first:?}");
        };
        assert_eq!(slug.origin(), SlugOrigin::Generated);
        assert_eq!(slug.as_str().len(), 4);
        assert!(!dir.path().join(".html").exists());

        // The page is found again by the duplicate scan
        let second = run(&request("https://example.com", None), &config).unwrap();
        assert!(matches!(second, Outcome::AlreadyRedirected { .. }));
        assert_eq!(second.slug(), slug.as_str());
        assert_eq!(html_files(dir.path()), vec![path.clone()]);
    }

    #[test]
    fn test_generated_slug_collision() {
        let dir = TempDir::new().unwrap();
        // Every one-letter slug is taken
        for letter in ('A'..='Z').chain('a'..='z') {
            fs::write(dir.path().join(format!("{letter}.html")), "").unwrap();
        }

        let config = test_config(dir.path(), 1);

        let err = run(&request("https://example.com", None), &config).unwrap_err();

        let QuackError::SlugCollision { slug, origin } = &err else {
            panic!("expected a slug collision, got {err:?}");
        };
        assert_eq!(*origin, SlugOrigin::Generated);
        assert_eq!(slug.len(), 1);
        assert!(err.to_string().contains("re-run"));
        assert_eq!(html_files(dir.path()).len(), 52);
    }

    #[cfg(unix)]
    #[test]
    fn test_slug_stat_error_stops_before_write() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a"), "").unwrap();

        let err = run(&request("https://example.com", Some("a/b")), &test_config(dir.path(), 6))
            .unwrap_err();

        assert!(matches!(err, QuackError::Scan(ScanError::Stat { .. })));
        assert!(html_files(dir.path()).is_empty());
    }

    #[test]
    fn test_generated_collision_message() {
        let message = collision_message("AbC", &SlugOrigin::Generated);
        assert!(message.contains("'AbC' already exists"));
        assert!(message.contains("re-run"));
    }

    #[test]
    fn test_missing_site_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("out");
        let config = test_config(&missing, 6);

        let err = run(&request("https://example.com", None), &config).unwrap_err();

        assert!(matches!(&err, QuackError::MissingSiteDir(p) if p == &missing));
        assert_eq!(err.exit_code(), 1);
        assert!(!missing.exists());
        assert!(html_files(dir.path()).is_empty());
    }

    #[test]
    fn test_site_dir_is_a_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("out");
        fs::write(&file, "").unwrap();

        let err = run(&request("https://example.com", None), &test_config(&file, 6)).unwrap_err();
        assert!(matches!(err, QuackError::MissingSiteDir(_)));
    }

    #[test]
    fn test_reported_slug_matches_file() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path(), 3);

        for i in 0..20 {
            let target = format!("https://example.com/{i}");
            match run(&request(&target, None), &config) {
                Ok(outcome) => {
                    let path = dir.path().join(format!("{}.html", outcome.slug()));
                    assert!(path.is_file());
                    assert!(fs::read_to_string(path).unwrap().contains(&refresh_tag(&target)));
                }
                // 3 letters over 20 runs may collide; that is reported, not retried
                Err(QuackError::SlugCollision { origin, .. }) => {
                    assert_eq!(origin, SlugOrigin::Generated);
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_page_stops_before_write() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path(), 6);
        std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("x.html"))
            .unwrap();

        let err = run(&request("https://example.com", Some("new")), &config).unwrap_err();

        assert!(matches!(err, QuackError::Scan(ScanError::Read { .. })));
        assert!(!dir.path().join("new.html").exists());
    }

    #[test]
    fn test_example_length_six() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();
        let config = test_config(&out, 6);

        let outcome = run(&request("https://example.com", None), &config).unwrap();
        let slug = outcome.slug().to_string();

        assert_eq!(slug.len(), 6);
        let content = fs::read_to_string(out.join(format!("{slug}.html"))).unwrap();
        assert!(content.contains("url='https://example.com'"));
        assert_eq!(outcome.message(), format!("Success! Slug is {slug}"));
    }
}
