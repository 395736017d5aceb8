use anyhow::{bail, Context};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand, ValueEnum};
use gigbook_db::{DatabaseConfig, DirectoryStore};
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "gigbook", about = "Venue, artist and show directory")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply pending schema migrations
    Migrate,
    /// Print a record as JSON
    Get {
        kind: Kind,
        id: i32,
        /// Split past/upcoming shows at this instant instead of now
        #[arg(long)]
        at: Option<NaiveDateTime>,
    },
    /// Delete a record. Venues and artists take their shows with them.
    Delete { kind: Kind, id: i32 },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Venue,
    Artist,
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let db_config = DatabaseConfig::from_env();
    tracing::info!("connecting to database...");
    let db = gigbook_db::connect(&db_config)
        .await
        .context("failed to connect to database")?;

    match cli.command {
        Command::Migrate => {
            tracing::info!("running database migrations...");
            gigbook_migration::Migrator::up(&db, None)
                .await
                .context("failed to run migrations")?;
            tracing::info!("migrations complete");
        }
        Command::Get { kind, id, at } => {
            let store = DirectoryStore::new(db);
            let json = match (kind, at) {
                (Kind::Venue, Some(at)) => {
                    serde_json::to_string_pretty(&store.venue_record_at(id, at).await?)?
                }
                (Kind::Venue, None) => serde_json::to_string_pretty(&store.venue_record(id).await?)?,
                (Kind::Artist, Some(at)) => {
                    serde_json::to_string_pretty(&store.artist_record_at(id, at).await?)?
                }
                (Kind::Artist, None) => {
                    serde_json::to_string_pretty(&store.artist_record(id).await?)?
                }
                (Kind::Show, None) => serde_json::to_string_pretty(&store.show_record(id).await?)?,
                (Kind::Show, Some(_)) => bail!("--at only applies to venues and artists"),
            };
            println!("{json}");
        }
        Command::Delete { kind, id } => {
            let store = DirectoryStore::new(db);
            match kind {
                Kind::Venue => store.delete_venue(id).await?,
                Kind::Artist => store.delete_artist(id).await?,
                Kind::Show => store.delete_show(id).await?,
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_get_with_instant() {
        let cli = Cli::try_parse_from([
            "gigbook",
            "get",
            "venue",
            "3",
            "--at",
            "2025-01-01T00:00:00",
        ])
        .unwrap();
        match cli.command {
            Command::Get { kind, id, at } => {
                assert!(matches!(kind, Kind::Venue));
                assert_eq!(id, 3);
                assert_eq!(at.unwrap().to_string(), "2025-01-01 00:00:00");
            }
            _ => panic!("expected get command"),
        }
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::try_parse_from(["gigbook", "delete", "artist", "7"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Delete {
                kind: Kind::Artist,
                id: 7
            }
        ));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(Cli::try_parse_from(["gigbook", "get", "album", "1"]).is_err());
    }
}
