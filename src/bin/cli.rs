//! Activity Sign-up CLI
//!
//! Command-line front-end for the activities API:
//! - List activities
//! - Log in / out as a teacher
//! - Sign students up or unregister them
//! - Generate a config file

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use activity_signup::config::generate_default_config;
use activity_signup::{
    logging, ClientController, Config, FileTokenStore, HttpBackend, TerminalView,
    UserAction,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "activity-signup")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse and manage Mergington High School activities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (overrides the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Where the auth token is kept between runs
    #[arg(long, global = true)]
    pub token_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all activities
    Activities,

    /// Log in as a teacher
    Login {
        username: String,
        /// Password (falls back to ACTIVITY_SIGNUP_PASSWORD, then a prompt)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored token
    Logout,

    /// Show who the stored token belongs to
    Whoami,

    /// Sign a student up for an activity
    Signup {
        /// Activity name, e.g. "Chess Club"
        activity: String,
        /// Student email
        email: String,
    },

    /// Remove a student from an activity
    Unregister {
        /// Activity name
        activity: String,
        /// Student email
        email: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // An explicit --config must load; a broken default file is reported once logging is up
    let (mut config, config_error) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, None),
        None => match Config::load_default() {
            Ok(config) => (config, None),
            Err(e) => (Config::from_env(), Some(e)),
        },
    };
    if let Some(url) = cli.base_url {
        config.client.base_url = url;
    }
    if let Some(path) = cli.token_file {
        config.session.token_file = path.to_string_lossy().to_string();
    }

    logging::init(&config.logging);
    if let Some(e) = config_error {
        tracing::warn!("{}; using defaults", e);
    }
    tracing::debug!(base_url = %config.client.base_url, "Starting");

    let page_load = matches!(cli.command, Commands::Activities);
    let action = match cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Wrote default config to {}", path.display());
                }
                None => print!("{}", content),
            }
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Activities => None,
        Commands::Whoami => None,
        Commands::Logout => Some(UserAction::Logout),
        Commands::Login { username, password } => {
            let password = password.or_else(|| std::env::var("ACTIVITY_SIGNUP_PASSWORD").ok());
            let password = match password {
                Some(password) => password,
                None => prompt("Password: ")?,
            };
            Some(UserAction::Login { username, password })
        }
        Commands::Signup { activity, email } => Some(UserAction::Signup { email, activity }),
        Commands::Unregister { activity, email } => {
            Some(UserAction::Unregister { activity, email })
        }
    };

    let backend = HttpBackend::new(&config.client)?;
    let store = FileTokenStore::new(&config.session.token_file);
    let mut controller = ClientController::new(
        backend,
        store,
        TerminalView::stdout(),
        config.client.banner_ttl(),
    );

    match action {
        // Full page load
        None if page_load => controller.start().await,
        None => {
            controller.init_auth().await;
        }
        // Logging in replaces whatever token was stored; no need to validate it first
        Some(action @ UserAction::Login { .. }) => controller.handle(action).await,
        Some(action) => {
            controller.init_auth().await;
            controller.handle(action).await;
        }
    }

    let view = controller.into_view();
    let failed = view.had_failure();
    view.finish()?;

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Read one line from stdin after printing `label`
fn prompt(label: &str) -> io::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", label)?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}
