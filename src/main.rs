use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use chapterdesk::api::{ApiClient, UnitId};
use chapterdesk::app::route::Route;
use chapterdesk::speech::SystemSpeaker;
use chapterdesk::{App, Config};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chapterdesk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the course API (overrides the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Path to open the TUI at
    #[arg(long, default_value = "/")]
    route: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available chapters
    Units,
    /// Check that the API server is up
    Health,
    /// Read a chapter aloud
    Speak {
        /// Unit id of the chapter
        id: UnitId,
    },
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "chapterdesk=info".into())
}

/// Log to stderr
fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

/// Log to a file, since the TUI owns the terminal
fn init_file_logging() -> Result<()> {
    let path = Config::log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .init();
    Ok(())
}

fn client(config: &Config, api_url: Option<&str>) -> Result<ApiClient> {
    let base_url = api_url.unwrap_or(&config.api_base_url);
    ApiClient::new(base_url, config.request_timeout())
        .with_context(|| format!("Invalid API URL {}", base_url))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.command.is_some() {
        init_stderr_logging();
    } else {
        init_file_logging()?;
    }

    let config = Config::load()?;
    let api_url = cli.api_url.as_deref();

    match cli.command {
        Some(Commands::Units) => {
            let units = client(&config, api_url)?.units().await.context("Failed to load units")?;
            if units.is_empty() {
                println!("No chapters found.");
            }
            for unit in units {
                println!("{}\t{}", unit.unit_id, unit.title);
            }
        }
        Some(Commands::Health) => {
            let health = client(&config, api_url)?.health().await.context("Health check failed")?;
            println!("{}", health.status);
        }
        Some(Commands::Speak { id }) => {
            let audio = client(&config, api_url)?
                .chapter_audio(id)
                .await
                .with_context(|| format!("Failed to load text for unit {}", id))?;
            if audio.text.trim().is_empty() {
                bail!("Unit {} has no text to read", id);
            }

            let speaker = SystemSpeaker::from_config(config.speech_command.as_deref())?;
            let status = speaker.spawn(&audio.text)?.wait().await?;
            if !status.success() {
                bail!("{} exited with {}", speaker.program().display(), status);
            }
        }
        None => {
            // Launch TUI
            let route = Route::parse(&cli.route)?;
            let mut app = App::new(config, api_url, route)?;
            app.run().await?;
        }
    }

    Ok(())
}
