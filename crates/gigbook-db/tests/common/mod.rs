// Shared fixtures for store integration tests
use chrono::{NaiveDate, NaiveDateTime};
use gigbook_db::entities::{artist::NewArtist, venue::NewVenue};
use gigbook_db::sea_orm::{ConnectOptions, Database};
use gigbook_db::DirectoryStore;
use gigbook_migration::{Migrator, MigratorTrait};

/// A store backed by a migrated in-memory SQLite database.
///
/// One pooled connection only: every SQLite `:memory:` connection is its own
/// database.
pub async fn test_store() -> DirectoryStore {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt)
        .await
        .expect("failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    DirectoryStore::new(db)
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

pub fn fillmore() -> NewVenue {
    NewVenue {
        name: "The Fillmore".into(),
        genres: ["Rock", "Jazz"].into_iter().collect(),
        city: "San Francisco".into(),
        state: "CA".into(),
        address: "1805 Geary St".into(),
        phone: Some("4155671330".into()),
        facebook_link: Some("http://fb.com/fillmore".into()),
    }
}

pub fn dueling_pianos() -> NewVenue {
    NewVenue {
        name: "The Dueling Pianos Bar".into(),
        genres: ["Classical", "R&B", "Hip-Hop"].into_iter().collect(),
        city: "New York".into(),
        state: "NY".into(),
        address: "335 Delancey Street".into(),
        phone: Some("914-003-1132".into()),
        facebook_link: None,
    }
}

pub fn wild_sax() -> NewArtist {
    NewArtist {
        name: "The Wild Sax Band".into(),
        genres: ["Jazz"].into_iter().collect(),
        city: "Oakland".into(),
        state: "CA".into(),
        phone: Some("5105551234".into()),
        facebook_link: Some("http://fb.com/wildsax".into()),
    }
}

pub fn guns_n_petals() -> NewArtist {
    NewArtist {
        name: "Guns N Petals".into(),
        genres: ["Rock n Roll"].into_iter().collect(),
        city: "San Francisco".into(),
        state: "CA".into(),
        phone: Some("326-123-5000".into()),
        facebook_link: Some("https://www.facebook.com/GunsNPetals".into()),
    }
}
