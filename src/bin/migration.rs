//! Schema maintenance for the PV module catalog
//!
//! Run with: cargo run --bin migration -- [up|down|status|fresh]
//!
//! Uses `APP__DATABASE_URL` (or `DATABASE_URL`), defaulting to the local
//! SQLite file the server uses.

use sea_orm::{ConnectOptions, Database, DbErr};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{error, info};

use pvmodules_api::migrator::Migrator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Up,
    Down,
    Status,
    Fresh,
}

impl Command {
    fn parse(arg: Option<&str>) -> Option<Self> {
        match arg.unwrap_or("up") {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "status" => Some(Self::Status),
            "fresh" => Some(Self::Fresh),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), DbErr> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let arg = std::env::args().nth(1);
    let Some(command) = Command::parse(arg.as_deref()) else {
        error!("Unknown command {:?}; expected up, down, status or fresh", arg);
        std::process::exit(2);
    };

    let database_url = std::env::var("APP__DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .unwrap_or_else(|_| "sqlite://pvmodules.db?mode=rwc".to_string());

    info!("Connecting to database: {}", database_url);

    let mut options = ConnectOptions::new(database_url);
    options
        .max_connections(1)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;

    match command {
        Command::Up => {
            Migrator::up(&db, None).await?;
            info!("Migration completed successfully");
        }
        Command::Down => {
            Migrator::down(&db, Some(1)).await?;
            info!("Rolled back the latest migration");
        }
        Command::Status => Migrator::status(&db).await?,
        Command::Fresh => {
            Migrator::fresh(&db).await?;
            info!("Schema dropped and recreated");
        }
    }

    Ok(())
}
