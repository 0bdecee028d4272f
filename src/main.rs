//! Quack - an HTML-based URL shortener for static sites.

mod cli;
mod config;
mod logger;
mod page;
mod pipeline;
mod scan;
mod slug;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::{CONFIG_FILE, QuackConfig};
use pipeline::{Outcome, QuackError, Request};

fn main() -> ExitCode {
    logger::init_from_env();
    let cli = Cli::parse();

    match execute(&cli) {
        Ok(outcome) => {
            debug!("page"; "{}", outcome.path().display());
            println!("{}", outcome.message());
            ExitCode::SUCCESS
        }
        Err(err) => {
            log!("error"; "{:#}", err);
            if let Some(QuackError::Write(write)) = err.downcast_ref::<QuackError>()
                && write.already_exists()
            {
                log!("hint"; "the slug was taken by a concurrent run, please re-run");
            }
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Load `duck.toml` from the working directory and run the pipeline.
fn execute(cli: &Cli) -> Result<Outcome> {
    let config = QuackConfig::load(Path::new(CONFIG_FILE))?;

    let request = Request {
        target: &cli.url,
        slug: cli.slug.as_deref(),
    };
    Ok(pipeline::run(&request, &config)?)
}

/// Every failure exits with 1; config errors never reach the pipeline.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<QuackError>()
        .map_or(1, QuackError::exit_code)
}
