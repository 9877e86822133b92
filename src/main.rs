//! appmarket binary entrypoint: one-shot listing or a live watch of the marketplace list.

mod args;

use std::io::Write as _;
use std::sync::{Arc, OnceLock};
use std::{fmt, time::SystemTime};

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use appmarket::controller::{MarketplaceController, TracingReporter};
use appmarket::events::{AppEvent, EventHub};
use appmarket::sources::HttpAppsApi;
use appmarket::state::ViewQuery;

struct AppmarketTimer;

impl tracing_subscriber::fmt::time::FormatTime for AppmarketTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let secs = SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX));
        let s = appmarket::util::ts_to_date(secs); // "YYYY-MM-DD HH:MM:SS"
        let ts = s.replacen(' ', "-T", 1); // "YYYY-MM-DD-T HH:MM:SS"
        w.write_str(&ts)
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Initialize tracing to `<config>/logs/appmarket.log`, falling back to stderr.
fn init_logging(level: &str) {
    let mut log_path = appmarket::config::logs_dir();
    log_path.push("appmarket.log");
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(AppmarketTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_timer(AppmarketTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

/// Print the current page in the requested format.
fn print_page<A, R>(controller: &MarketplaceController<A, R>, query: &ViewQuery, json: bool)
where
    A: appmarket::sources::AppsApi,
    R: appmarket::controller::ErrorReporter,
{
    let view = controller.view(query);
    let text = if json {
        match appmarket::ui::render_json(&view) {
            Ok(mut s) => {
                s.push('\n');
                s
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to encode page as JSON");
                return;
            }
        }
    } else {
        appmarket::ui::render_table(&view, query)
    };
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

/// What: Forward JSON-line events from stdin into the hub until EOF.
///
/// Inputs:
/// - `hub`: Event hub the controller listens on
///
/// Output:
/// - Completes at end of input or on a read error.
///
/// Details:
/// - Blank lines are skipped; undecodable lines are logged and skipped.
async fn pump_stdin_events(hub: Arc<EventHub>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match AppEvent::from_json_line(&line) {
                    Ok(ev) => {
                        let delivered = hub.dispatch(&ev);
                        tracing::debug!(event = ev.kind().wire_name(), delivered, "event read");
                    }
                    Err(e) => tracing::warn!(error = %e, line = %line, "ignoring undecodable event"),
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "stdin read failed; stopping watch");
                break;
            }
        }
    }
}

#[tokio::main]
async fn main() {
    let args = args::Args::parse();
    init_logging(&args::determine_log_level(&args));

    let settings = args::apply_overrides(&args, appmarket::config::settings());
    let query = args::view_query(&args, &settings);
    tracing::info!(base_url = %settings.base_url, watch = args.watch, "appmarket starting");

    let api = match HttpAppsApi::new(&settings) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("appmarket: invalid settings: {e}");
            tracing::error!(error = %e, "failed to build HTTP client");
            std::process::exit(2);
        }
    };

    let hub = Arc::new(EventHub::new());
    let mut controller = MarketplaceController::activate(api, TracingReporter, hub.as_ref()).await;
    if !controller.is_listening() {
        eprintln!("appmarket: could not load the marketplace list (see log for details)");
    }
    print_page(&controller, &query, args.json);

    if args.watch && controller.is_listening() {
        let (done_tx, done_rx) = tokio::sync::oneshot::channel::<()>();
        let pump_hub = Arc::clone(&hub);
        tokio::spawn(async move {
            pump_stdin_events(pump_hub).await;
            let _ = done_tx.send(());
        });
        let shutdown = async {
            let _ = done_rx.await;
        };
        controller
            .run_until(shutdown, |c| print_page(c, &query, args.json))
            .await;
    }

    let apps = controller.teardown(hub.as_ref());
    tracing::info!(count = apps.len(), "appmarket exited");
}
