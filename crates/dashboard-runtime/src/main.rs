//! Utility dashboard runtime.
//!
//! Boots one dashboard page against a backend (or the built-in mock usage
//! data), prints the rendered surface and keeps the page alive until Ctrl-C.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use dashboard_runtime::{ConfigLayer, Dashboard, DashboardConfig};
use dashboard_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};
use shared_bus::UserInput;

/// How long to wait for the initial data load before rendering anyway.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Utility Dashboard: household electricity and water usage
#[derive(Parser, Debug)]
#[command(name = "dashboard-runtime")]
#[command(about = "Boot a utility dashboard page and print its rendered surface")]
struct Args {
    /// Backend origin, e.g. http://192.168.219.100:8080 (empty: mock data)
    #[arg(long)]
    api_origin: Option<String>,

    /// User whose alerts are streamed
    #[arg(long)]
    user_id: Option<String>,

    /// Area label shown in the header
    #[arg(long)]
    area: Option<String>,

    /// Page to boot: home, cost, analytics, alerts, settings, log, goals, search
    #[arg(short, long)]
    page: Option<String>,

    /// Port shown in the connection toast address
    #[arg(long)]
    port: Option<String>,

    /// Preferences file
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Billing period to load (YYYY-MM, default: current month)
    #[arg(long)]
    period: Option<String>,

    /// Keep preferences in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Tear the page down right after the first render
    #[arg(long)]
    once: bool,

    /// Print Prometheus metrics on exit
    #[arg(long)]
    metrics: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Submit the savings goal form with this text after boot
    #[arg(long)]
    goal: Option<String>,

    /// Run a search after boot
    #[arg(long)]
    search: Option<String>,
}

impl Args {
    fn layer(&self) -> ConfigLayer {
        ConfigLayer {
            api_origin: self.api_origin.clone(),
            user_id: self.user_id.clone(),
            area: self.area.clone(),
            page: self.page.clone(),
            port: self.port.clone(),
            prefs_path: self.prefs.as_ref().map(|p| p.display().to_string()),
            period: self.period.clone(),
        }
    }

    fn inputs(&self) -> Vec<UserInput> {
        let mut inputs = Vec::new();
        if let Some(goal) = &self.goal {
            inputs.push(UserInput::GoalSubmit(goal.clone()));
        }
        if let Some(query) = &self.search {
            inputs.push(UserInput::Search(query.clone()));
        }
        inputs
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if args.verbose {
        telemetry = telemetry.verbose();
    }
    init_telemetry(&telemetry).context("initializing telemetry")?;

    let cli = args.layer();
    let env = ConfigLayer::from_env();
    // The preferences path cannot come from the preferences themselves.
    let mut bootstrap = DashboardConfig::resolve(&[&cli, &env]);
    if args.ephemeral {
        bootstrap.prefs_path = None;
    }
    let preferences = bootstrap
        .open_preferences()
        .context("opening preferences")?;
    let stored = ConfigLayer::from_preferences(preferences.as_ref());

    let mut config = DashboardConfig::resolve(&[&cli, &env, &stored]);
    config.prefs_path = bootstrap.prefs_path;
    info!(
        page = %config.page,
        api_origin = %config.api_origin,
        user_id = config.user_id,
        "Starting utility dashboard"
    );

    let mut dashboard = Dashboard::build(config, preferences).context("wiring dashboard")?;
    let report = dashboard.boot();
    for failure in &report.failures {
        warn!(feature = %failure.feature, stage = failure.stage.as_str(), error = %failure.error, "Feature failed during boot");
    }

    match tokio::time::timeout(SETTLE_TIMEOUT, dashboard.settle()).await {
        Ok(failures) => {
            for failure in failures {
                warn!(feature = %failure.feature, error = %failure.error, "Initial load failed");
            }
        }
        Err(_) => warn!(timeout_secs = SETTLE_TIMEOUT.as_secs(), "Initial load still running"),
    }

    for input in args.inputs() {
        let emitted = dashboard.send(input);
        if !emitted.is_clean() {
            warn!(failures = emitted.failures.len(), "Input handlers failed");
        }
    }

    println!("{}", dashboard.render());

    if !args.once {
        info!("Dashboard running, press Ctrl-C to unload");
        tokio::signal::ctrl_c()
            .await
            .context("waiting for Ctrl-C")?;
    }

    let teardown = dashboard.unload();
    if !teardown.is_clean() {
        warn!(failures = teardown.failures.len(), "Unload finished with failures");
    }

    if args.metrics {
        print!("{}", encode_metrics().context("encoding metrics")?);
    }
    Ok(())
}
