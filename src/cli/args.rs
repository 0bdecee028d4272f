//! Command-line interface definitions.

use clap::Parser;

/// HTML-based URL shortener for static sites
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The target URL
    #[arg(value_hint = clap::ValueHint::Url)]
    pub url: String,

    /// Define the slug manually instead of generating one
    #[arg(long)]
    pub slug: Option<String>,
}
