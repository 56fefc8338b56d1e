use clap::Parser;
use reqwest::Url;

use crate::filter::{FilterCriterion, FilterSet};
use crate::report::Level;

/// Delete songs from a remote music library.
#[derive(Parser, Clone, Debug)]
#[command(version)]
pub struct Config {
    /// Your username or e-mail address.
    #[arg(short, long, value_name = "USERNAME", env = "LIBRARY_USER")]
    pub user: String,

    /// Your password.
    #[arg(short, long, value_name = "PASSWORD", env = "LIBRARY_PASS", hide_env_values = true)]
    pub pass: String,

    /// Base URL of the library service.
    #[arg(short, long, value_name = "URL", env = "LIBRARY_URL")]
    pub server: Url,

    /// Enable library client logging.
    #[arg(short, long)]
    pub log: bool,

    /// Output list of songs that would be deleted.
    #[arg(short, long)]
    pub dry_run: bool,

    /// Don't output status messages.
    /// With --log will display client warnings.
    /// With --dry-run will display song list.
    #[arg(short, long, verbatim_doc_comment)]
    pub quiet: bool,

    /// Filter songs by field:pattern pair (e.g. "artist:Muse").
    /// Songs can match any filter criteria.
    /// This option can be set multiple times.
    #[arg(short, long = "filter", value_name = "FILTER", verbatim_doc_comment)]
    pub filters: Vec<FilterCriterion>,

    /// Songs must match all filter criteria.
    #[arg(short, long)]
    pub all: bool,

    /// Delete songs without asking for confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

impl Config {
    pub fn filter_set(&self) -> FilterSet { FilterSet::new(self.filters.clone(), self.all) }

    pub fn report_level(&self) -> Level {
        match (self.quiet, self.log) {
            (true, _) => Level::Quiet,
            (false, true) => Level::Debug,
            (false, false) => Level::Info,
        }
    }

    /// Level for the client's own diagnostics, `None` when disabled.
    pub fn client_log_level(&self) -> Option<log::LevelFilter> {
        match (self.log, self.quiet) {
            (false, _) => None,
            (true, true) => Some(log::LevelFilter::Warn),
            (true, false) => Some(log::LevelFilter::Debug),
        }
    }

    pub fn skip_confirmation(&self) -> bool { self.yes || self.quiet }
}
