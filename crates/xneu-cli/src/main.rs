//! X-Neu CLI - Gamification engine operations
//!
//! Runs the engine against Postgres, or replays check-ins in memory.

mod config;
mod output;

use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;
use uuid::Uuid;

use xneu::{level_from_xp, CheckinCalendar, UserGamificationState};
use xneu_gamification::adapters::{
    postgres, InMemoryGamificationRepository, ManualClock, PgGamificationRepository,
};
use xneu_gamification::{
    telemetry, BadgeAward, GamificationConfig, GamificationEvent, GamificationService,
};

use config::Config;

#[derive(Parser)]
#[command(name = "xneu")]
#[command(about = "X-Neu CLI - XP, streaks and badges", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,

    /// Create gamification state for a user
    Enroll {
        /// User ID
        user_id: Uuid,
    },

    /// Award XP to a user
    Xp {
        /// User ID
        user_id: Uuid,
        /// Amount of XP (positive)
        amount: u64,
        /// Reason, for the logs
        #[arg(short, long, default_value = "manual")]
        reason: String,
    },

    /// Award a catalog badge to a user
    Badge {
        /// User ID
        user_id: Uuid,
        /// Badge id (see `xneu badges`)
        badge_id: String,
    },

    /// Register today's check-in for a user
    Checkin {
        /// User ID
        user_id: Uuid,
    },

    /// Record a product event (analysis, checkin, report, match)
    Event {
        /// User ID
        user_id: Uuid,
        /// Event name
        event: GamificationEvent,
    },

    /// Show a user's progress
    Show {
        /// User ID
        user_id: Uuid,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the badge catalog
    Badges,

    /// Show the level reached with an XP total
    Level {
        /// Total XP
        xp: u64,
    },

    /// Replay daily check-ins for a fresh user, in memory
    Simulate {
        /// Number of days to replay
        #[arg(short, long, default_value = "7")]
        days: u32,
        /// Days (1-based) without a check-in, comma-separated
        #[arg(long, value_delimiter = ',')]
        skip: Vec<u32>,
    },

    /// Show or update configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Store settings in the config file
    Set {
        /// Postgres connection string
        #[arg(long)]
        database_url: Option<String>,
        /// Minutes east of UTC defining the check-in day
        #[arg(long, allow_hyphen_values = true)]
        utc_offset: Option<i32>,
    },
    /// Show effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Migrate => cmd_migrate().await,
        Commands::Enroll { user_id } => cmd_enroll(user_id).await,
        Commands::Xp {
            user_id,
            amount,
            reason,
        } => cmd_xp(user_id, amount, reason).await,
        Commands::Badge { user_id, badge_id } => cmd_badge(user_id, badge_id).await,
        Commands::Checkin { user_id } => cmd_checkin(user_id).await,
        Commands::Event { user_id, event } => cmd_event(user_id, event).await,
        Commands::Show { user_id, json } => cmd_show(user_id, json).await,
        Commands::Badges => {
            output::print_catalog();
            Ok(())
        }
        Commands::Level { xp } => cmd_level(xp),
        Commands::Simulate { days, skip } => cmd_simulate(days, skip).await,
        Commands::Config { action } => cmd_config(action),
    }
}

// ============================================
// Setup
// ============================================

type PgService = GamificationService<PgGamificationRepository>;

async fn connect(config: &GamificationConfig) -> Result<postgres::PgPool> {
    let url = config.require_database_url()?;
    let pool = postgres::connect(url, config.db_max_connections)
        .await
        .context("Could not connect to Postgres")?;
    Ok(pool)
}

async fn pg_service() -> Result<PgService> {
    let config = Config::load()?.effective()?;
    let pool = connect(&config).await?;
    Ok(GamificationService::new(
        Arc::new(PgGamificationRepository::new(pool)),
        config.calendar()?,
    ))
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_migrate() -> Result<()> {
    let config = Config::load()?.effective()?;
    let pool = connect(&config).await?;
    postgres::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    println!("{} Migrations applied", "✓".green());
    Ok(())
}

async fn cmd_enroll(user_id: Uuid) -> Result<()> {
    let service = pg_service().await?;
    let state = service.enroll(user_id).await?;
    println!(
        "{} User {} enrolled (level {}, {} XP)",
        "✓".green(),
        user_id,
        state.level,
        state.xp
    );
    Ok(())
}

async fn cmd_xp(user_id: Uuid, amount: u64, reason: String) -> Result<()> {
    let service = pg_service().await?;
    let award = service.try_award_xp(user_id, amount, &reason).await?;

    println!(
        "{} +{} XP → {} XP, level {}",
        "✓".green(),
        amount,
        award.new_xp,
        award.new_level
    );
    if award.level_up {
        println!("{}", format!("Level up! Now level {}", award.new_level).yellow().bold());
    }
    Ok(())
}

async fn cmd_badge(user_id: Uuid, badge_id: String) -> Result<()> {
    let service = pg_service().await?;

    match service.try_award_badge(user_id, &badge_id).await? {
        BadgeAward::Awarded(badge) => {
            println!("{} {} {} awarded", "✓".green(), badge.emoji, badge.name);
        }
        BadgeAward::AlreadyHeld => {
            println!("{} User already holds '{}'", "·".dimmed(), badge_id);
        }
    }
    Ok(())
}

async fn cmd_checkin(user_id: Uuid) -> Result<()> {
    let service = pg_service().await?;

    match service.try_update_streak(user_id).await? {
        Some(streak) => println!("{} Checked in, streak {} day(s)", "✓".green(), streak),
        None => println!("{} Already checked in today", "·".dimmed()),
    }
    Ok(())
}

async fn cmd_event(user_id: Uuid, event: GamificationEvent) -> Result<()> {
    let service = pg_service().await?;
    let outcome = service.try_record_event(user_id, event).await?;

    println!("{} Recorded {}", "✓".green(), event.to_string().cyan());
    if let Some(award) = outcome.xp {
        println!("  {} XP, level {}", award.new_xp, award.new_level);
    }
    if let Some(streak) = outcome.streak {
        println!("  Streak {} day(s)", streak);
    }
    Ok(())
}

async fn cmd_show(user_id: Uuid, json: bool) -> Result<()> {
    let service = pg_service().await?;
    let Some(snapshot) = service.progress(user_id).await? else {
        bail!("User {} is not enrolled", user_id);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        output::print_snapshot(&snapshot);
    }
    Ok(())
}

fn cmd_level(xp: u64) -> Result<()> {
    let progress = level_from_xp(xp);
    println!(
        "{} {} · {} XP to next level",
        progress.to_string().green(),
        output::progress_bar(&progress),
        progress.remaining_xp()
    );
    Ok(())
}

async fn cmd_simulate(days: u32, skip: Vec<u32>) -> Result<()> {
    let config = Config::load()?.effective()?;
    let calendar: CheckinCalendar = config.calendar()?;

    let repo = Arc::new(InMemoryGamificationRepository::new());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let service = GamificationService::with_clock(repo, clock.clone(), calendar);

    let user_id = Uuid::new_v4();
    let mut previous: UserGamificationState = service.enroll(user_id).await?;

    println!("{}", format!("Simulating {} day(s)", days).bold());
    for day in 1..=days {
        if skip.contains(&day) {
            println!("  Day {:>3}: {}", day, "skipped".dimmed());
        } else {
            service.update_streak(user_id).await;
            let snapshot = service
                .progress(user_id)
                .await?
                .context("Simulated user disappeared")?;

            let new_badges: Vec<String> = snapshot
                .badges
                .iter()
                .filter(|b| !previous.has_badge(b.id))
                .map(|b| format!("{} {}", b.emoji, b.name))
                .collect();

            println!(
                "  Day {:>3}: streak {:>3}, {:>5} XP, level {:>2} {}",
                day,
                snapshot.streak,
                snapshot.xp,
                snapshot.progress.level,
                new_badges.join(", ").yellow()
            );

            previous.badges = snapshot.badges;
        }
        clock.advance(Duration::days(1));
    }

    println!();
    if let Some(snapshot) = service.progress(user_id).await? {
        output::print_snapshot(&snapshot);
    }
    Ok(())
}

fn cmd_config(action: Option<ConfigAction>) -> Result<()> {
    let mut config = Config::load()?;

    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Set {
            database_url,
            utc_offset,
        } => {
            if let Some(url) = database_url {
                config.database_url = Some(url);
            }
            if let Some(offset) = utc_offset {
                CheckinCalendar::from_offset_minutes(offset)?;
                config.utc_offset_minutes = Some(offset);
            }
            config.save()?;
            println!("{} Config saved to {:?}", "✓".green(), Config::config_path()?);
        }
        ConfigAction::Show => {
            let effective = config.effective()?;
            println!("{}", "Configuration:".bold());
            println!("  File: {:?}", Config::config_path()?);
            println!(
                "  Database: {}",
                if effective.database_url.is_some() {
                    "configured".green()
                } else {
                    "not set".yellow()
                }
            );
            println!(
                "  Calendar offset: {} (UTC{})",
                effective.utc_offset_minutes,
                effective.calendar()?.offset()
            );
            println!("  Max connections: {}", effective.db_max_connections);
        }
    }

    Ok(())
}
