use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};

use dailydev_domain::shared::{SystemClock, UserId};
use dailydev_infrastructure::config::TimeoutConfig;
use dailydev_infrastructure::logging;
use dailydev_lib::application::commands::handlers::ProvisionStreakCommandHandler;
use dailydev_lib::application::commands::{CommandHandler, ProvisionStreakCommand};
use dailydev_lib::presentation::auth::TokenService;
use dailydev_lib::presentation::{bootstrap, config::ServerConfig, server};

/// Daily reading streak service for developer profiles.
///
/// Every flag can also be set through the environment or a `.env` file.
#[derive(Parser, Debug)]
#[command(name = "dailydev", version, about)]
struct Cli {
    #[command(flatten)]
    config: ServerConfig,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default)
    Serve {
        /// Start without applying pending migrations
        #[arg(long)]
        skip_migrations: bool,
    },
    /// Apply pending migrations and exit
    Migrate,
    /// Create the empty streak record for a registered user
    Provision {
        #[arg(long)]
        user_id: String,
    },
    /// Mint an access token signed with the configured secret
    IssueToken {
        #[arg(long)]
        user_id: String,
        #[arg(long, default_value_t = 3600)]
        ttl_secs: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match logging::init_logger(cli.config.log_options()) {
        Ok(()) => {
            if let Some(dir) = logging::get_log_dir() {
                tracing::info!("📝 File logging initialized at: {}", dir.display());
            }
        }
        Err(e) => {
            eprintln!("⚠️  Failed to initialize file logging: {}", e);
            eprintln!("   Falling back to console logging only");
            logging::init_console_fallback();
        }
    }

    let timeouts = TimeoutConfig::default();
    let command = cli.command.unwrap_or(Command::Serve {
        skip_migrations: false,
    });

    match command {
        Command::Serve { skip_migrations } => {
            tracing::info!("🚀 dailydev {} starting", env!("CARGO_PKG_VERSION"));
            let db = bootstrap::connect_database(&cli.config, &timeouts, !skip_migrations).await?;
            let state = bootstrap::build_app_state(&cli.config, &db, &timeouts)?;
            server::run(&cli.config.bind, state.shared(), &timeouts).await?;
        }
        Command::Migrate => {
            bootstrap::connect_database(&cli.config, &timeouts, true).await?;
            println!("Migrations applied");
        }
        Command::Provision { user_id } => {
            let user_id = UserId::parse(&user_id)?;
            let db = bootstrap::connect_database(&cli.config, &timeouts, false).await?;
            let handler = ProvisionStreakCommandHandler::new(
                bootstrap::streak_repository(&db, &timeouts),
                Arc::new(SystemClock),
            );

            let result = handler
                .handle(ProvisionStreakCommand {
                    user_id: user_id.clone(),
                })
                .await
                .with_context(|| format!("Failed to provision streak for {}", user_id))?;

            if result.created {
                println!("Provisioned streak for {}", user_id);
            } else {
                println!("Streak for {} already exists", user_id);
            }
        }
        Command::IssueToken { user_id, ttl_secs } => {
            let user_id = UserId::parse(&user_id)?;
            let tokens = TokenService::new(cli.config.jwt_secret()?)?;
            let token = tokens.issue(&user_id, Utc::now(), Duration::from_secs(ttl_secs))?;
            println!("{}", token);
        }
    }

    Ok(())
}
