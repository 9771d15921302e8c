//! `shortlink` command-line client.
//!
//! # Usage
//!
//! ```bash
//! # Create a short link, optionally under a custom alias
//! shortlink shorten https://example.com --alias docs
//!
//! # Statistics and redirect probe accept a code or a full short link
//! shortlink stats docs
//! shortlink probe http://localhost:3000/api/docs
//!
//! # Open the redirect endpoint in the default browser
//! shortlink open docs
//!
//! # One health check, or poll until Ctrl-C
//! shortlink health
//! shortlink watch --interval 10
//! ```
//!
//! Every failure is printed as a single normalized message and the process
//! exits with status 1.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use shortlink_client::application::services::{HealthMonitor, MonitorSnapshot, MonitorState};
use shortlink_client::config::{self, Config};
use shortlink_client::logging::init_logging;
use shortlink_client::{AppError, AppState};

/// Client for the short-code redirect service.
#[derive(Parser)]
#[command(name = "shortlink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// Absolute http(s) URL to shorten
        url: String,

        /// Custom short code to request
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Show click statistics of a short link
    Stats {
        /// Short code or full short link
        code: String,
    },

    /// Check where a short link redirects without following it
    Probe {
        /// Short code or full short link
        code: String,
    },

    /// Open a short link in the default browser
    Open {
        /// Short code or full short link
        code: String,
    },

    /// Run one health check
    Health,

    /// Poll service health until interrupted
    Watch {
        /// Seconds between checks (default: HEALTH_INTERVAL_SECS)
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..=3600))]
        interval: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "❌".red(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = config::load_from_env()?;
    init_logging(&config)?;

    let state = AppState::from_config(&config)?;

    let code = match cli.command {
        Commands::Shorten { url, alias } => finish(shorten(&state, &url, alias.as_deref()).await),
        Commands::Stats { code } => finish(stats(&state, &code).await),
        Commands::Probe { code } => finish(probe(&state, &code).await),
        Commands::Open { code } => open(&state, &code),
        Commands::Health => health(&state).await,
        Commands::Watch { interval } => {
            watch(&state, &config, interval).await?;
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}

fn finish(outcome: Result<(), AppError>) -> ExitCode {
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

/// Prints a normalized operation failure.
fn report(error: &AppError) {
    let envelope = error.envelope();
    match envelope.status_code {
        Some(status) => eprintln!(
            "{} {} {}",
            "❌".red(),
            envelope.message.red().bold(),
            format!("(HTTP {status})").bright_black()
        ),
        None => eprintln!("{} {}", "❌".red(), envelope.message.red().bold()),
    }
}

async fn shorten(state: &AppState, url: &str, alias: Option<&str>) -> Result<(), AppError> {
    let result = state.urls.shorten(url, alias).await?;

    println!("{}", "✅ Short link created".green().bold());
    println!();
    println!(
        "  Short URL: {}",
        result.short_url(&state.public_origin).bright_yellow().bold()
    );
    println!("  Code:      {}", result.short_code.as_str().cyan());
    println!("  Original:  {}", result.original_url.bright_white());
    println!();

    Ok(())
}

async fn stats(state: &AppState, raw: &str) -> Result<(), AppError> {
    let code = state.normalizer.resolve(raw)?;
    let stats = state.urls.get_stats(&code).await?;

    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();
    println!("  Code:    {}", stats.short_code.as_str().cyan());
    println!(
        "  Clicks:  {}",
        stats.click_count.to_string().bright_green().bold()
    );
    println!(
        "  Created: {}",
        stats
            .created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

async fn probe(state: &AppState, raw: &str) -> Result<(), AppError> {
    let code = state.normalizer.resolve(raw)?;
    let redirect = state.urls.test_redirect(&code).await?;

    println!("{}", "🔀 Redirect".bright_blue().bold());
    println!();
    println!(
        "  Status:   {}",
        redirect.status_code.to_string().bright_green().bold()
    );
    println!("  Location: {}", redirect.location.bright_white());
    println!();

    Ok(())
}

fn open(state: &AppState, raw: &str) -> ExitCode {
    match state.opener.open_input(raw) {
        Ok(()) => {
            println!("{}", "🌐 Opened in browser".green());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {}", "❌".red(), e.to_string().red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn health(state: &AppState) -> ExitCode {
    let status = state.urls.health().await;
    let healthy = status.is_healthy();
    print_health(&MonitorSnapshot::from(status));

    if healthy {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Polls until Ctrl-C, printing each state change.
async fn watch(state: &AppState, config: &Config, interval: Option<u64>) -> Result<()> {
    config.print_summary();

    let probe = Arc::new(state.urls.clone());
    let mut monitor = match interval {
        Some(secs) => HealthMonitor::new(probe, Duration::from_secs(secs)),
        None => HealthMonitor::from_config(probe, config),
    };

    let mut updates = monitor.subscribe();
    monitor.start();

    println!(
        "{} {}",
        "👀 Watching service health every".bright_blue(),
        format!("{}s (Ctrl-C to stop)", monitor.interval().as_secs()).bright_blue()
    );

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                print_health(&snapshot);
            }
            signal = &mut ctrl_c => {
                signal?;
                break;
            }
        }
    }

    monitor.stop();
    println!("{}", "Stopped".bright_black());

    Ok(())
}

fn print_health(snapshot: &MonitorSnapshot) {
    let now = chrono::Local::now().format("%H:%M:%S").to_string();

    match snapshot.state {
        MonitorState::Uninitialized | MonitorState::Checking => {
            println!("  {} {}", now.bright_black(), "checking...".yellow());
        }
        MonitorState::Healthy => {
            println!("  {} {}", now.bright_black(), "healthy".green().bold());
        }
        MonitorState::Unhealthy => {
            println!(
                "  {} {} {}",
                now.bright_black(),
                "unhealthy".red().bold(),
                snapshot.error.as_deref().unwrap_or_default().bright_black()
            );
        }
    }
}
