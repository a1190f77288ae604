//! ems-console: interactive employee management for HR, employees and the manager.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use ems_console::clock::SystemClock;
use ems_console::config::ConfigLoader;
use ems_console::console::{self, AppState, Console, Role};
use ems_console::error::EmsResult;
use ems_console::store::{self, SqliteStore};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "ems-console", version, about)]
struct Args {
    /// Directory holding ems.yaml and departments.yaml.
    #[arg(long, env = "EMS_CONFIG", default_value = "./config")]
    config: PathBuf,

    /// SQLite database file, overriding `database.path`.
    #[arg(long, env = "EMS_DATABASE")]
    database: Option<PathBuf>,

    /// Start directly in one role's login instead of the main menu.
    #[arg(long, value_enum)]
    role: Option<Role>,
}

async fn run(args: Args) -> EmsResult<()> {
    let mut config = ConfigLoader::load(&args.config)?;
    if let Some(path) = args.database {
        config.settings_mut().database.path = path;
    }

    let db = SqliteStore::open(&config.settings().database.path).await?;
    let seed = &config.settings().bootstrap_manager;
    let seeded = store::seed_manager(&db, &seed.name, &seed.password).await?;

    let state = AppState::new(&db, &config, SystemClock);
    let mut terminal = Console::new(
        std::io::stdin().lock(),
        std::io::stdout().lock(),
        config.settings().console.color,
    );
    if let Some(manager) = seeded {
        terminal.info(format!(
            "Created manager account with ID {} (password from bootstrap_manager).",
            manager.id
        ))?;
    }

    console::run_app(&state, &mut terminal, args.role).await
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so they never interleave with the menus.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ems_console=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(config = %args.config.display(), "Starting ems-console");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "ems-console failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
