//! Serializable projections of directory entities.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::entities::{artist, show, venue};
use crate::schedule::ShowSchedule;

/// `2019-05-21T21:00:00`, with six fractional digits only when the
/// fraction is non-zero.
pub fn format_timestamp(at: &NaiveDateTime) -> String {
    if at.nanosecond() == 0 {
        at.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// A show as listed on a venue page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueShow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl VenueShow {
    pub fn new(show: &show::Model, artist: &artist::Model) -> Self {
        Self {
            artist_id: artist.id,
            artist_name: artist.name.clone(),
            artist_image_link: artist.image_link.clone(),
            start_time: format_timestamp(&show.start_time),
        }
    }
}

/// A show as listed on an artist page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

impl ArtistShow {
    pub fn new(show: &show::Model, venue: &venue::Model) -> Self {
        Self {
            venue_id: venue.id,
            venue_name: venue.name.clone(),
            venue_image_link: venue.image_link.clone(),
            start_time: format_timestamp(&show.start_time),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueRecord {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: Option<bool>,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenueRecord {
    pub fn new(v: venue::Model, shows: ShowSchedule<VenueShow>) -> Self {
        let past_shows_count = shows.past_count();
        let upcoming_shows_count = shows.upcoming_count();
        Self {
            id: v.id,
            name: v.name,
            genres: v.genres.into_vec(),
            address: v.address,
            city: v.city,
            state: v.state,
            phone: v.phone,
            website: v.website,
            facebook_link: v.facebook_link,
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_description,
            image_link: v.image_link,
            past_shows: shows.past,
            upcoming_shows: shows.upcoming,
            past_shows_count,
            upcoming_shows_count,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRecord {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistRecord {
    pub fn new(a: artist::Model, shows: ShowSchedule<ArtistShow>) -> Self {
        let past_shows_count = shows.past_count();
        let upcoming_shows_count = shows.upcoming_count();
        Self {
            id: a.id,
            name: a.name,
            genres: a.genres.into_vec(),
            city: a.city,
            state: a.state,
            phone: a.phone,
            website: a.website,
            facebook_link: a.facebook_link,
            seeking_venue: a.seeking_venue,
            seeking_description: a.seeking_description,
            image_link: a.image_link,
            past_shows: shows.past,
            upcoming_shows: shows.upcoming,
            past_shows_count,
            upcoming_shows_count,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowRecord {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl ShowRecord {
    pub fn new(show: &show::Model, venue: &venue::Model, artist: &artist::Model) -> Self {
        Self {
            venue_id: venue.id,
            venue_name: venue.name.clone(),
            artist_id: artist.id,
            artist_name: artist.name.clone(),
            artist_image_link: artist.image_link.clone(),
            start_time: format_timestamp(&show.start_time),
        }
    }
}
