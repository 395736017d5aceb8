//! Repository over venues, artists and shows.
//!
//! Every call reads through to the database; nothing is cached between calls.
//! Derived show lists are computed at call time against the current clock
//! unless an explicit instant is passed to one of the `*_at` variants.

use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Select, TransactionTrait,
};

use crate::entities::{artist, show, venue};
use crate::error::{StoreError, StoreResult};
use crate::records::{ArtistRecord, ArtistShow, ShowRecord, VenueRecord, VenueShow};
use crate::schedule::{self, ShowSchedule};
use crate::validation::Validate;

#[derive(Clone, Debug)]
pub struct DirectoryStore {
    db: DatabaseConnection,
}

fn update_missing(entity: &'static str, id: i32) -> impl FnOnce(DbErr) -> StoreError {
    move |e| match e {
        DbErr::RecordNotUpdated => StoreError::not_found(entity, id),
        other => StoreError::Database(other),
    }
}

impl DirectoryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    // ── Venues ────────────────────────────────────────────────────────

    pub async fn insert_venue(&self, new: venue::NewVenue) -> StoreResult<venue::Model> {
        new.validate()?;
        let model = new.into_active_model().insert(&self.db).await?;
        tracing::info!(venue_id = model.id, name = %model.name, "venue created");
        Ok(model)
    }

    /// Writes every field of `venue` onto the row with the same id.
    pub async fn update_venue(&self, venue: venue::Model) -> StoreResult<venue::Model> {
        venue.validate()?;
        let id = venue.id;
        let model = venue
            .into_active_model()
            .reset_all()
            .update(&self.db)
            .await
            .map_err(update_missing("venue", id))?;
        tracing::info!(venue_id = id, "venue updated");
        Ok(model)
    }

    /// Removes the venue together with every show booked there.
    pub async fn delete_venue(&self, id: i32) -> StoreResult<()> {
        let txn = self.db.begin().await?;
        let shows = show::Entity::delete_many()
            .filter(show::Column::VenueId.eq(id))
            .exec(&txn)
            .await?;
        let deleted = venue::Entity::delete_by_id(id).exec(&txn).await?;
        if deleted.rows_affected == 0 {
            txn.rollback().await?;
            return Err(StoreError::not_found("venue", id));
        }
        txn.commit().await?;
        tracing::info!(
            venue_id = id,
            shows_removed = shows.rows_affected,
            "venue deleted"
        );
        Ok(())
    }

    pub async fn find_venue(&self, id: i32) -> StoreResult<Option<venue::Model>> {
        Ok(venue::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// All venues, grouped by state then city.
    pub async fn list_venues(&self) -> StoreResult<Vec<venue::Model>> {
        Ok(venue::Entity::find()
            .order_by_asc(venue::Column::State)
            .order_by_asc(venue::Column::City)
            .order_by_asc(venue::Column::Name)
            .all(&self.db)
            .await?)
    }

    // ── Artists ───────────────────────────────────────────────────────

    pub async fn insert_artist(&self, new: artist::NewArtist) -> StoreResult<artist::Model> {
        new.validate()?;
        let model = new.into_active_model().insert(&self.db).await?;
        tracing::info!(artist_id = model.id, name = %model.name, "artist created");
        Ok(model)
    }

    pub async fn update_artist(&self, artist: artist::Model) -> StoreResult<artist::Model> {
        artist.validate()?;
        let id = artist.id;
        let model = artist
            .into_active_model()
            .reset_all()
            .update(&self.db)
            .await
            .map_err(update_missing("artist", id))?;
        tracing::info!(artist_id = id, "artist updated");
        Ok(model)
    }

    /// Removes the artist together with every show they are booked for.
    pub async fn delete_artist(&self, id: i32) -> StoreResult<()> {
        let txn = self.db.begin().await?;
        let shows = show::Entity::delete_many()
            .filter(show::Column::ArtistId.eq(id))
            .exec(&txn)
            .await?;
        let deleted = artist::Entity::delete_by_id(id).exec(&txn).await?;
        if deleted.rows_affected == 0 {
            txn.rollback().await?;
            return Err(StoreError::not_found("artist", id));
        }
        txn.commit().await?;
        tracing::info!(
            artist_id = id,
            shows_removed = shows.rows_affected,
            "artist deleted"
        );
        Ok(())
    }

    pub async fn find_artist(&self, id: i32) -> StoreResult<Option<artist::Model>> {
        Ok(artist::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn list_artists(&self) -> StoreResult<Vec<artist::Model>> {
        Ok(artist::Entity::find()
            .order_by_asc(artist::Column::Name)
            .order_by_asc(artist::Column::Id)
            .all(&self.db)
            .await?)
    }

    // ── Shows ─────────────────────────────────────────────────────────

    async fn ensure_show_refs(&self, venue_id: i32, artist_id: i32) -> StoreResult<()> {
        if self.find_venue(venue_id).await?.is_none() {
            return Err(StoreError::not_found("venue", venue_id));
        }
        if self.find_artist(artist_id).await?.is_none() {
            return Err(StoreError::not_found("artist", artist_id));
        }
        Ok(())
    }

    /// Books a show. A missing `start_time` is stamped from the same clock
    /// the past/upcoming split reads.
    pub async fn insert_show(&self, mut new: show::NewShow) -> StoreResult<show::Model> {
        new.validate()?;
        new.start_time.get_or_insert_with(schedule::now);
        self.ensure_show_refs(new.venue_id, new.artist_id).await?;
        let model = new.into_active_model().insert(&self.db).await?;
        tracing::info!(
            show_id = model.id,
            venue_id = model.venue_id,
            artist_id = model.artist_id,
            start_time = %model.start_time,
            "show booked"
        );
        Ok(model)
    }

    pub async fn update_show(&self, show: show::Model) -> StoreResult<show::Model> {
        show.validate()?;
        self.ensure_show_refs(show.venue_id, show.artist_id).await?;
        let id = show.id;
        let model = show
            .into_active_model()
            .reset_all()
            .update(&self.db)
            .await
            .map_err(update_missing("show", id))?;
        tracing::info!(show_id = id, "show updated");
        Ok(model)
    }

    pub async fn delete_show(&self, id: i32) -> StoreResult<()> {
        let deleted = show::Entity::delete_by_id(id).exec(&self.db).await?;
        if deleted.rows_affected == 0 {
            return Err(StoreError::not_found("show", id));
        }
        tracing::info!(show_id = id, "show deleted");
        Ok(())
    }

    pub async fn find_show(&self, id: i32) -> StoreResult<Option<show::Model>> {
        Ok(show::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn list_shows(&self) -> StoreResult<Vec<show::Model>> {
        Ok(show::Entity::find()
            .order_by_asc(show::Column::StartTime)
            .order_by_asc(show::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Shows booked at a venue, in booking order. The query is not run until
    /// executed and can be executed any number of times.
    pub fn shows_for_venue(&self, venue_id: i32) -> Select<show::Entity> {
        show::Entity::find()
            .filter(show::Column::VenueId.eq(venue_id))
            .order_by_asc(show::Column::Id)
    }

    /// Shows an artist is booked for, in booking order.
    pub fn shows_for_artist(&self, artist_id: i32) -> Select<show::Entity> {
        show::Entity::find()
            .filter(show::Column::ArtistId.eq(artist_id))
            .order_by_asc(show::Column::Id)
    }

    pub async fn venue_shows(&self, venue_id: i32) -> StoreResult<Vec<show::Model>> {
        Ok(self.shows_for_venue(venue_id).all(&self.db).await?)
    }

    pub async fn artist_shows(&self, artist_id: i32) -> StoreResult<Vec<show::Model>> {
        Ok(self.shows_for_artist(artist_id).all(&self.db).await?)
    }

    // ── Formatted records ─────────────────────────────────────────────

    pub async fn venue_record(&self, id: i32) -> StoreResult<VenueRecord> {
        self.venue_record_at(id, schedule::now()).await
    }

    pub async fn venue_record_at(&self, id: i32, now: NaiveDateTime) -> StoreResult<VenueRecord> {
        let venue = self
            .find_venue(id)
            .await?
            .ok_or_else(|| StoreError::not_found("venue", id))?;

        let rows = self
            .shows_for_venue(id)
            .find_also_related(artist::Entity)
            .all(&self.db)
            .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for (s, a) in rows {
            let a = a.ok_or_else(|| broken_reference(&s, "artist", s.artist_id))?;
            entries.push((s.start_time, VenueShow::new(&s, &a)));
        }

        let shows = ShowSchedule::partition(entries, |(start, _)| *start, now).map(|(_, e)| e);
        tracing::debug!(
            venue_id = id,
            past = shows.past_count(),
            upcoming = shows.upcoming_count(),
            "venue record built"
        );
        Ok(VenueRecord::new(venue, shows))
    }

    pub async fn artist_record(&self, id: i32) -> StoreResult<ArtistRecord> {
        self.artist_record_at(id, schedule::now()).await
    }

    pub async fn artist_record_at(
        &self,
        id: i32,
        now: NaiveDateTime,
    ) -> StoreResult<ArtistRecord> {
        let artist = self
            .find_artist(id)
            .await?
            .ok_or_else(|| StoreError::not_found("artist", id))?;

        let rows = self
            .shows_for_artist(id)
            .find_also_related(venue::Entity)
            .all(&self.db)
            .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for (s, v) in rows {
            let v = v.ok_or_else(|| broken_reference(&s, "venue", s.venue_id))?;
            entries.push((s.start_time, ArtistShow::new(&s, &v)));
        }

        let shows = ShowSchedule::partition(entries, |(start, _)| *start, now).map(|(_, e)| e);
        tracing::debug!(
            artist_id = id,
            past = shows.past_count(),
            upcoming = shows.upcoming_count(),
            "artist record built"
        );
        Ok(ArtistRecord::new(artist, shows))
    }

    pub async fn show_record(&self, id: i32) -> StoreResult<ShowRecord> {
        let s = self
            .find_show(id)
            .await?
            .ok_or_else(|| StoreError::not_found("show", id))?;
        let v = self
            .find_venue(s.venue_id)
            .await?
            .ok_or_else(|| broken_reference(&s, "venue", s.venue_id))?;
        let a = self
            .find_artist(s.artist_id)
            .await?
            .ok_or_else(|| broken_reference(&s, "artist", s.artist_id))?;
        Ok(ShowRecord::new(&s, &v, &a))
    }
}

fn broken_reference(s: &show::Model, entity: &'static str, id: i32) -> StoreError {
    tracing::warn!(show_id = s.id, entity, id, "show references a missing record");
    StoreError::BrokenReference {
        show_id: s.id,
        entity,
        id,
    }
}
