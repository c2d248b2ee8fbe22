use anyhow::Context;
use clap::{Parser, Subcommand};
use employee_api::config::Config;
use employee_api::{logging, server};
use employee_core::DatabaseManager;
use tracing::info;

#[derive(Parser)]
#[command(name = "employee-api")]
#[command(about = "HTTP API for managing employee records")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on (overrides config and environment)
        #[arg(long)]
        port: Option<u16>,
        /// Path to the TOML config file
        #[arg(long)]
        config: Option<String>,
    },
    /// Create or upgrade the SQLite schema
    Migrate {
        #[arg(long)]
        config: Option<String>,
    },
    /// Delete every employee row, keeping the schema
    ClearDatabase {
        #[arg(long)]
        config: Option<String>,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, config } => {
            let mut config = Config::load(config.as_deref())?;
            if let Some(port) = port {
                config.server.port = port;
            }
            let _guard = logging::init_logging(&config.logging)?;
            info!(
                backend = ?config.database.backend,
                "Starting employee API on {}",
                config.bind_address()
            );
            server::start_server(&config).await?;
        }
        Commands::Migrate { config } => {
            let config = Config::load(config.as_deref())?;
            let _guard = logging::init_logging(&config.logging)?;

            let db = DatabaseManager::open(&config.database.path)
                .with_context(|| format!("Failed to open {}", config.database.path))?;
            db.run_migrations().await?;
            println!("Migrations applied to {}", config.database.path);
        }
        Commands::ClearDatabase { config, yes } => {
            let config = Config::load(config.as_deref())?;
            let _guard = logging::init_logging(&config.logging)?;

            if !yes {
                println!("WARNING: This will delete ALL employees from {}", config.database.path);
                println!("Press Enter to continue or Ctrl+C to cancel...");
                let mut input = String::new();
                std::io::stdin().read_line(&mut input)?;
            }

            let db = DatabaseManager::open(&config.database.path)?;
            db.run_migrations().await?;
            db.clear_all_data().await?;
            println!("Database cleared");
        }
    }

    Ok(())
}
