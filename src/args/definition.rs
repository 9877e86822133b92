//! Command-line argument definition and processing.

use clap::Parser;

use appmarket::config::{Settings, normalize_base_url};
use appmarket::state::{SortDirection, SortSpec, ViewQuery};

/// appmarket - Browse marketplace apps merged with their installed status
#[derive(Parser, Debug)]
#[command(name = "appmarket")]
#[command(version)]
#[command(about = "Browse marketplace apps merged with their installed status", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Server API base URL (overrides base_url in settings.conf)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Only list apps whose name contains this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Order names Z to A instead of A to Z
    #[arg(long)]
    pub desc: bool,

    /// Page number to show, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Apps per page (overrides items_per_page in settings.conf)
    #[arg(long)]
    pub per_page: Option<usize>,

    /// Keep running, apply app events read as JSON lines from stdin, and re-render on change
    #[arg(short, long)]
    pub watch: bool,

    /// Print the page as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}

/// What: Merge CLI overrides into the loaded settings.
///
/// Inputs:
/// - `args`: Parsed command-line arguments
/// - `settings`: Settings loaded from `settings.conf`
///
/// Output:
/// - Settings with `--base-url` and `--per-page` applied.
#[must_use]
pub fn apply_overrides(args: &Args, mut settings: Settings) -> Settings {
    if let Some(url) = args.base_url.as_deref() {
        settings.base_url = normalize_base_url(url);
    }
    if let Some(n) = args.per_page
        && n > 0
    {
        settings.items_per_page = n;
    }
    if args.desc {
        settings.sort_direction = SortDirection::Desc;
    }
    settings
}

/// What: Build the list view inputs from arguments and effective settings.
///
/// Inputs:
/// - `args`: Parsed command-line arguments
/// - `settings`: Effective settings (after [`apply_overrides`])
///
/// Output:
/// - `ViewQuery` whose offset is the first item of the requested page.
#[must_use]
pub fn view_query(args: &Args, settings: &Settings) -> ViewQuery {
    let per_page = settings.items_per_page.max(1);
    ViewQuery {
        filter_text: args.search.clone().unwrap_or_default(),
        sort: SortSpec {
            direction: settings.sort_direction,
            ..SortSpec::default()
        },
        page_offset: args.page.saturating_sub(1).saturating_mul(per_page),
        items_per_page: per_page,
    }
}
