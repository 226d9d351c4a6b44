//! Equiwatch CLI
//!
//! Terminal front end for the equipment dashboard:
//! - Load and render the current summary, alerts, risk map, and history
//! - Upload a measurement CSV and refresh
//! - Download the backend's PDF report
//! - Generate a default config file

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use equiwatch::api::ApiClient;
use equiwatch::config::{generate_default_config, Config};
use equiwatch::dashboard::{DashboardController, DashboardEvent, DashboardState};
use equiwatch::view;
use equiwatch::UploadFile;

#[derive(Parser)]
#[command(name = "equiwatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Chemical equipment monitoring dashboard client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Basic-auth username (overrides config)
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Basic-auth password (overrides config)
    #[arg(long, global = true)]
    pub pass: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load and render the dashboard
    Show,

    /// Upload a measurement CSV and refresh the dashboard
    Upload {
        /// Path to the CSV file
        path: PathBuf,
    },

    /// Show upload history and health trend
    History,

    /// Download the PDF report for the latest dataset
    Report {
        /// Output path
        #[arg(short, long, default_value = "equipment_report.pdf")]
        output: PathBuf,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_default();
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(user) = cli.user {
        config.api.username = user;
    }
    if let Some(pass) = cli.pass {
        config.api.password = pass;
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("equiwatch={}", config.logging.level)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing config to {:?}", path))?;
                println!("Wrote default config to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let client = Arc::new(ApiClient::new(&config.api)?);

    match cli.command {
        Commands::Show => {
            let controller = DashboardController::new(client);
            let mut events = controller.subscribe();

            let result = controller.load().await;
            drain_events(&mut events);
            result?;

            render_dashboard(&controller.state().await);
        }

        Commands::Upload { path } => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("reading {:?}", path))?;
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "upload.csv".to_string());

            let controller = DashboardController::new(client);
            let mut events = controller.subscribe();

            controller.select_file(UploadFile { filename, bytes }).await;
            let result = controller.upload().await;
            drain_events(&mut events);
            result?;

            render_dashboard(&controller.state().await);
        }

        Commands::History => {
            let controller = DashboardController::new(client);
            let mut events = controller.subscribe();

            let result = controller.load().await;
            drain_events(&mut events);
            result?;

            let state = controller.state().await;
            println!("Trend: {}", state.trend);
            render_history(&state);
        }

        Commands::Report { output } => {
            let bytes = client.download_report().await?;
            std::fs::write(&output, bytes)
                .with_context(|| format!("writing report to {:?}", output))?;
            println!("Saved report to {:?}", output);
        }

        Commands::Config { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Surface controller notifications as log lines
fn drain_events(events: &mut broadcast::Receiver<DashboardEvent>) {
    while let Ok(event) = events.try_recv() {
        match event {
            DashboardEvent::LoadFailed(message) => {
                tracing::error!("Backend not reachable / API error: {}", message)
            }
            DashboardEvent::UploadFailed(message) => tracing::error!("Upload failed: {}", message),
            DashboardEvent::UploadSucceeded => tracing::info!("Upload successful"),
            DashboardEvent::Refreshed => tracing::debug!("Dashboard refreshed"),
        }
    }
}

fn render_dashboard(state: &DashboardState) {
    println!("Chemical Equipment Dashboard");
    println!("============================");
    println!("Trend:  {}", state.trend);
    println!("{}", view::alert_banner(state.alert_count()));
    println!();

    let cards = view::summary_cards(state.summary.as_ref());
    if cards.is_empty() {
        println!("No summary yet");
    } else {
        println!("Summary");
        for card in cards {
            println!("  {:<16} {}", card.title, card.value);
        }
    }

    if let Some(summary) = &state.summary {
        if !summary.alerts.is_empty() {
            println!();
            println!("Alerts");
            for alert in &summary.alerts {
                println!("  {}", view::alert_line(alert));
            }
        }

        let risk = view::risk_rows(summary);
        if !risk.is_empty() {
            println!();
            println!("Risk Map");
            for row in risk {
                println!("  {:<10} {:>4}  [{}]", row.label, row.count, row.color);
            }
        }

        let types = view::type_distribution_rows(summary);
        if !types.is_empty() {
            println!();
            println!("Equipment Type Distribution");
            for (label, count) in types {
                println!("  {:<14} {}", label, "#".repeat(count as usize));
            }
        }
    }

    println!();
    render_history(state);
    println!();
    println!("Status: {}", state.status);
}

fn render_history(state: &DashboardState) {
    if state.history.is_empty() {
        println!("No history yet");
    } else {
        println!("Upload History");
        for item in &state.history {
            println!("  {}", view::history_line(item));
        }
    }
}
