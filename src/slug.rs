//! Slug generation.
//!
//! A slug names the redirect page: `<slug>.html` in the site directory.
//! Generated slugs are random ASCII letters; manual slugs are used verbatim.

use std::fmt;

/// Alphabet for generated slugs: `A-Z` followed by `a-z`.
const ALPHABET: &[u8; 52] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// File extension of redirect pages
pub const PAGE_EXTENSION: &str = "html";

/// Where a slug came from. Only affects how collisions are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugOrigin {
    /// Supplied with `--slug`
    Manual,
    /// Randomly generated from the configured length
    Generated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slug {
    value: String,
    origin: SlugOrigin,
}

impl Slug {
    /// Generate `length` letters, each drawn uniformly from [`ALPHABET`].
    ///
    /// Uses the thread-local RNG; uniqueness is not guaranteed and is
    /// checked against the site directory afterwards.
    pub fn generate(length: usize) -> Self {
        let value = std::iter::repeat_with(|| {
            ALPHABET[rand::random_range(0..ALPHABET.len())] as char
        })
        .take(length)
        .collect();
        Self {
            value,
            origin: SlugOrigin::Generated,
        }
    }

    /// Use a caller-supplied slug unchanged.
    pub fn manual(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            origin: SlugOrigin::Manual,
        }
    }

    /// `--slug` wins over generation. An empty `--slug ""` counts as absent,
    /// since `.html` would not be recognised as a page afterwards.
    pub fn from_request(manual: Option<&str>, length: usize) -> Self {
        match manual {
            Some(value) if !value.is_empty() => Self::manual(value),
            _ => Self::generate(length),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub const fn origin(&self) -> SlugOrigin {
        self.origin
    }

    /// File name of the redirect page, e.g. `AbCdEf.html`.
    pub fn file_name(&self) -> String {
        format!("{}.{PAGE_EXTENSION}", self.value)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
