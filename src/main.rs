use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use club_engine::api::{build_router, state::AppState};
use club_engine::calculate::Analytics;
use club_engine::config::AppConfig;
use club_engine::models::{ClubId, GameId, MemberId, Period};
use club_engine::storage::{ClubStore, JsonlStore, StorageConfig};
use club_engine::voting::HighlightVoting;

#[derive(Parser)]
#[command(name = "club-engine")]
#[command(about = "Game analytics and player-of-the-match voting for clubs")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PeriodArgs {
    /// Club to report on
    club: String,

    /// Year, or "all"
    #[arg(long, default_value = "all")]
    year: String,

    /// Month 1-12, or "all"
    #[arg(long, default_value = "all")]
    month: String,
}

impl PeriodArgs {
    fn period(&self) -> Result<Period> {
        Ok(Period::parse(&self.year, &self.month)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },

    /// Print team standings
    TeamStats(PeriodArgs),

    /// Print the player scoring table
    PlayerStats(PeriodArgs),

    /// Print the participation ranking
    Participation(PeriodArgs),

    /// Inspect or manage a game's highlight voting
    Highlights {
        #[command(subcommand)]
        action: HighlightAction,
    },

    /// Cast a vote
    Vote {
        game: String,
        voter: String,
        voted_for: String,
    },
}

#[derive(Subcommand)]
enum HighlightAction {
    /// Show the voting summary
    Show { game: String },

    /// Initialize highlights from confirmed participants
    Open { game: String },

    /// Close voting and elect the winner
    Finalize {
        game: String,

        /// Member recorded as finalizer
        #[arg(long)]
        by: Option<String>,
    },

    /// Unlock a finalized game
    Reopen { game: String },

    /// Remove all votes and highlights of a game
    Delete { game: String },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level;
    }
    config.validate()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting club-engine v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn ClubStore> =
        Arc::new(JsonlStore::new(StorageConfig::new(config.data_dir.clone())));

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let state = AppState::new(store, config.server.cors_origin.clone());
            let app = build_router(state);
            let addr = config.server.addr();
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::TeamStats(args) => {
            let analytics = Analytics::new(store);
            let table = analytics
                .team_stats(&ClubId::from(args.club.as_str()), args.period()?)
                .await?;
            print_json(&table)?;
        }
        Commands::PlayerStats(args) => {
            let analytics = Analytics::new(store);
            let table = analytics
                .player_stats(&ClubId::from(args.club.as_str()), args.period()?)
                .await?;
            print_json(&table)?;
        }
        Commands::Participation(args) => {
            let analytics = Analytics::new(store);
            let table = analytics
                .participation_ranking(&ClubId::from(args.club.as_str()), args.period()?)
                .await?;
            print_json(&table)?;
        }
        Commands::Highlights { action } => {
            let voting = HighlightVoting::new(store);
            match action {
                HighlightAction::Show { game } => {
                    print_json(&voting.voting_summary(&GameId::from(game)).await?)?;
                }
                HighlightAction::Open { game } => {
                    let n = voting.open_voting(&GameId::from(game.as_str())).await?;
                    println!("Initialized {} highlights for game {}", n, game);
                }
                HighlightAction::Finalize { game, by } => {
                    let by = by.map(MemberId::from);
                    let control = voting
                        .finalize_voting(&GameId::from(game), by.as_ref())
                        .await?;
                    print_json(&control)?;
                }
                HighlightAction::Reopen { game } => {
                    print_json(&voting.reopen_voting(&GameId::from(game)).await?)?;
                }
                HighlightAction::Delete { game } => {
                    let (votes, highlights) =
                        voting.delete_voting(&GameId::from(game.as_str())).await?;
                    println!(
                        "Deleted {} votes and {} highlights for game {}",
                        votes, highlights, game
                    );
                }
            }
        }
        Commands::Vote {
            game,
            voter,
            voted_for,
        } => {
            let voting = HighlightVoting::new(store);
            let highlight = voting
                .vote_for_member(
                    &GameId::from(game),
                    &MemberId::from(voter),
                    &MemberId::from(voted_for),
                )
                .await?;
            print_json(&highlight)?;
        }
    }

    Ok(())
}
