use clap::Parser;
use tracing::info;

use tilescope_dash::DashboardApp;

#[derive(Parser, Debug)]
#[command(name = "tilescope-dash", version, about = "Dashboard for a running tiling search process")]
struct Cli {
    /// Base URL of the search process API
    #[arg(long, env = "DASH_SERVER_URL", default_value = "http://localhost:8000")]
    server_url: String,

    /// Poll interval while a search is active, in milliseconds
    #[arg(long, env = "DASH_POLL_INTERVAL_MS", default_value_t = 1500)]
    poll_interval_ms: u64,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tilescope_dash=info")),
        )
        .init();

    let cli = Cli::parse();
    info!(server_url = %cli.server_url, poll_interval_ms = cli.poll_interval_ms, "starting dashboard");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Tiling Search Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "tilescope-dash",
        options,
        Box::new(move |cc| {
            Ok(Box::new(DashboardApp::new(
                cc,
                &cli.server_url,
                cli.poll_interval_ms,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to run dashboard: {e}"))
}
