//! folio CLI: Terminal portfolio page and chat assistant

use clap::{Parser, Subcommand};
use folio_engine::{
    ChatBackend, ChatConfig, ChatWidget, HttpBackend, Profile, SendOutcome, PROFILE_ENV,
};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "folio=info";

/// Where `folio init` writes when no path is given.
const DEFAULT_PROFILE_PATH: &str = "folio-profile.json";

/// Portfolio page with an AI assistant, in your terminal
#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Chat endpoint URL (overrides FOLIO_API_URL)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Profile JSON with the page copy (overrides FOLIO_PROFILE)
    #[arg(long, global = true)]
    profile: Option<PathBuf>,

    /// Append logs to this file
    #[arg(long, global = true, env = "FOLIO_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the portfolio page (default when no command specified)
    Tui,

    /// Ask the assistant one question and print the answer
    Ask {
        /// The question
        message: String,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Print the resolved configuration and probe the backend
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a profile file with the default page copy
    Init {
        /// Where to write the profile
        #[arg(default_value = DEFAULT_PROFILE_PATH)]
        path: PathBuf,
    },
}

fn main() {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let is_tui = matches!(cli.command, None | Some(Commands::Tui));
    if let Err(e) = init_logging(cli.log_file.as_deref(), is_tui) {
        eprintln!("Failed to set up logging: {e}");
        std::process::exit(1);
    }

    match cli.command {
        None | Some(Commands::Tui) => cmd_tui(cli.endpoint.as_deref(), cli.profile.as_deref()),
        Some(Commands::Ask { message, json }) => {
            cmd_ask(cli.endpoint.as_deref(), &message, json);
        }
        Some(Commands::Doctor { json }) => {
            cmd_doctor(cli.endpoint.as_deref(), cli.profile.as_deref(), json);
        }
        Some(Commands::Init { path }) => cmd_init(&path),
    }
}

/// Install the tracing subscriber.
///
/// Logs go to `log_file` when given. Without one they go to stderr, except
/// for the TUI which owns the terminal and logs nothing.
fn init_logging(
    log_file: Option<&Path>,
    is_tui: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()?;
        }
        None if is_tui => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()?;
        }
    }
    Ok(())
}

fn runtime() -> tokio::runtime::Runtime {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    }
}

fn backend(endpoint: Option<&str>) -> HttpBackend {
    let built = ChatConfig::resolve(endpoint).and_then(|config| HttpBackend::new(&config));
    match built {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    }
}

fn profile(path: Option<&Path>) -> Profile {
    match Profile::resolve(path) {
        Ok(profile) => profile,
        Err(e) => {
            eprintln!("Failed to load profile: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_tui(endpoint: Option<&str>, profile_path: Option<&Path>) {
    let backend = backend(endpoint);
    let profile = profile(profile_path);
    info!(endpoint = %backend.endpoint(), "starting terminal page");

    let rt = runtime();
    if let Err(e) = rt.block_on(folio_tui::run_tui(profile, Arc::new(backend))) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_ask(endpoint: Option<&str>, message: &str, json: bool) {
    let backend = backend(endpoint);
    let mut widget = ChatWidget::new();
    widget.set_draft(message);

    let Some(submission) = widget.submit() else {
        eprintln!("Nothing to send: the message is empty");
        std::process::exit(1);
    };

    let rt = runtime();
    let result = rt.block_on(backend.send(submission.request));

    if json {
        if let Ok(response) = &result {
            match serde_json::to_string_pretty(response) {
                Ok(text) => println!("{text}"),
                Err(e) => {
                    eprintln!("Failed to serialize response: {e}");
                    std::process::exit(1);
                }
            }
        }
    }

    match widget.complete(submission.id, result) {
        SendOutcome::Answered(answer) => {
            if !json {
                println!("{answer}");
            }
        }
        SendOutcome::Failed(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
        SendOutcome::Skipped | SendOutcome::Stale => {}
    }
}

fn cmd_doctor(endpoint: Option<&str>, profile_path: Option<&Path>, json: bool) {
    let backend = backend(endpoint);
    let profile = profile(profile_path);
    let profile_source = profile_path
        .map(|p| p.display().to_string())
        .or_else(|| std::env::var(PROFILE_ENV).ok().map(|p| format!("{p} (from {PROFILE_ENV})")))
        .unwrap_or_else(|| "built-in defaults".to_string());

    let rt = runtime();
    let health = rt.block_on(backend.health());
    let health_url = backend
        .health_url()
        .map(|u| u.to_string())
        .unwrap_or_default();

    if json {
        let report = serde_json::json!({
            "endpoint": backend.endpoint().as_str(),
            "health_url": health_url,
            "profile": profile_source,
            "title": profile.title,
            "healthy": health.as_ref().is_ok_and(|h| h.ok),
            "error": health.as_ref().err().map(ToString::to_string),
        });
        println!("{report:#}");
    } else {
        println!("folio configuration\n");
        println!("  Endpoint: {}", backend.endpoint());
        println!("  Health:   {health_url}");
        println!("  Profile:  {profile_source}");
        println!("  Title:    {}", profile.title);
        println!();
        match &health {
            Ok(status) if status.ok => println!("Backend is healthy"),
            Ok(_) => println!("Backend answered but reported itself unhealthy"),
            Err(e) => println!("Backend unreachable: {e}"),
        }
    }

    if !health.is_ok_and(|h| h.ok) {
        std::process::exit(1);
    }
}

fn cmd_init(path: &Path) {
    if path.exists() {
        println!("Profile already exists at {}", path.display());
        return;
    }

    match Profile::default().save(path) {
        Ok(()) => {
            println!("Created {}", path.display());
            println!("Edit it, then run: folio --profile {}", path.display());
        }
        Err(e) => {
            eprintln!("Failed to write profile: {e}");
            std::process::exit(1);
        }
    }
}
