//! Configuration section definitions.
//!
//! Each module corresponds to a section in `duck.toml`:
//!
//! | Module | TOML Section | Purpose                               |
//! |--------|--------------|---------------------------------------|
//! | `site` | `[site]`     | Directory the redirect pages live in  |
//! | `slug` | `[slug]`     | Generated slug settings               |

mod site;
mod slug;

pub use site::SiteSectionConfig;
pub use slug::SlugSectionConfig;
