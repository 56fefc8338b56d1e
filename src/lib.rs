use std::io;

use anyhow::Context;
use clap::Parser;

pub use filter::{FilterCriterion, FilterParseError, FilterSet};
pub use library::{LibraryError, MusicLibrary};
pub use song::Song;
pub use workflow::{Confirm, DeletionWorkflow, Outcome, Settings, WorkflowError};

use crate::cli::Config;
use crate::http::HttpLibrary;
use crate::report::Reporter;

mod cli;

pub mod filter;
mod http;
pub mod library;
pub mod report;
pub mod song;
pub mod workflow;

impl Config {
    fn settings(&self) -> Settings {
        Settings {
            filters: self.filter_set(),
            dry_run: self.dry_run,
            confirm: !self.skip_confirmation(),
        }
    }
}

pub fn run() -> anyhow::Result<Outcome> {
    let config = Config::parse();

    if let Some(level) = config.client_log_level() {
        env_logger::Builder::new()
            .filter_module("library_purge::http", level)
            .parse_default_env()
            .init();
    }

    let library = HttpLibrary::new(config.server.clone())
        .with_context(|| format!("cannot use {}", config.server))?;
    let reporter = Reporter::new(config.report_level(), io::stderr());
    let mut confirm = Confirm::new(io::stdin().lock(), io::stdout());

    let outcome = DeletionWorkflow::new(library, reporter).run(
        &config.user,
        &config.pass,
        &config.settings(),
        &mut confirm,
    )?;

    Ok(outcome)
}
