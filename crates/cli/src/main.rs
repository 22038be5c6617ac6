mod commands;
mod render;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use catalog_client::{ClientConfig, CatalogGateway, DEFAULT_API_BASE};
use clap::Parser;
use colored::Colorize;
use frontend::{Frontend, FrontendError, Outcome};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::commands::{Command, HELP};
use crate::render::{print_notice, print_profile, TerminalRenderer};

/// ReelRate - rate movies, get recommendations
#[derive(Parser)]
#[command(name = "reelrate")]
#[command(about = "Interactive movie rating session against a catalog service", long_about = None)]
struct Cli {
    /// Base URL of the catalog service
    #[arg(long, env = "REELRATE_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "REELRATE_TIMEOUT_SECS", default_value = "10")]
    timeout_secs: u64,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,
}

/// Whether the loop should keep reading
enum Flow {
    Continue,
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ClientConfig {
        api_base: cli.api_base,
        request_timeout: Duration::from_secs(cli.timeout_secs),
    };
    let frontend = Frontend::connect(&config)
        .context("Failed to set up the catalog client")?
        .add_renderer(TerminalRenderer);

    println!("{}", "ReelRate".bold().blue());
    frontend.start().await;
    flush_notices(&frontend);

    match cli.script {
        Some(path) => {
            let script = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read script {}", path.display()))?;
            info!("Running {} lines from {}", script.lines().count(), path.display());
            for line in script.lines() {
                println!("{} {}", ">".dimmed(), line);
                if let Flow::Quit = run_line(&frontend, line).await {
                    break;
                }
            }
        }
        None => {
            println!("Type 'help' for commands.");
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                if let Flow::Quit = run_line(&frontend, &line).await {
                    break;
                }
            }
        }
    }

    Ok(())
}

async fn run_line<G: CatalogGateway + ?Sized>(frontend: &Frontend<G>, line: &str) -> Flow {
    let command = match Command::parse(line) {
        Ok(Some(command)) => command,
        Ok(None) => return Flow::Continue,
        Err(e) => {
            println!("{} {:#}", "✗".red(), e);
            return Flow::Continue;
        }
    };

    let flow = execute(frontend, command).await;
    flush_notices(frontend);
    flow
}

async fn execute<G: CatalogGateway + ?Sized>(frontend: &Frontend<G>, command: Command) -> Flow {
    match command {
        Command::Search(query) => {
            if frontend.search(&query).await == Outcome::Skipped {
                println!("{}", "Enter a search term".dimmed());
            }
        }
        Command::Rate {
            movie_id,
            stars,
            title,
        } => {
            // Rejections arrive as notices
            let _ = frontend.rate(movie_id, &title, stars);
        }
        Command::Remove(movie_id) => {
            if !frontend.remove(movie_id) {
                println!("Movie {} was not rated", movie_id);
            }
        }
        Command::Details(movie_id) => {
            frontend.show_details(movie_id).await;
        }
        Command::Close => {
            frontend.close_modal();
        }
        Command::Dismiss(target) => {
            if !frontend.dismiss_modal(target) && frontend.surface().modal().is_open() {
                println!("{}", "Click landed inside the dialog".dimmed());
            }
        }
        Command::ModalRate(stars) => {
            if let Err(e) = frontend.rate_from_modal(stars) {
                warn!("Modal rating failed: {}", e);
                if matches!(e, FrontendError::ModalNotReady) {
                    println!("{} {}", "✗".red(), e);
                }
            }
        }
        Command::Recommend(strategy) => {
            frontend.request_recommendations(strategy).await;
        }
        Command::Stats => {
            frontend.load_stats().await;
        }
        Command::Popular => {
            frontend.load_popular().await;
        }
        Command::Profile => {
            let surface = frontend.surface();
            print_profile(surface.profile(), surface.visibility().show_analytics);
        }
        Command::Ratings => {
            let surface = frontend.surface();
            if surface.ratings().is_empty() {
                println!("{}", "No ratings yet".dimmed());
            }
            for rating in surface.ratings() {
                println!("  [{}] {} {}", rating.movie_id, rating.title, rating.rating);
            }
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

fn flush_notices<G: CatalogGateway + ?Sized>(frontend: &Frontend<G>) {
    for notice in frontend.take_notices() {
        print_notice(&notice);
    }
}
