//! Column constraints checked before every write.
//!
//! Postgres enforces `varchar(n)` on its own but SQLite does not, so the
//! limits live here as well to keep behaviour identical across backends.

use url::Url;

use crate::entities::{artist, show, venue, Genres};
use crate::error::{StoreError, StoreResult};

pub const SHORT_TEXT_MAX: usize = 120;
pub const IMAGE_LINK_MAX: usize = 500;

pub trait Validate {
    fn validate(&self) -> StoreResult<()>;
}

fn required(field: &'static str, value: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::validation(field, "must not be empty"));
    }
    Ok(())
}

fn max_len(field: &'static str, value: &str, max: usize) -> StoreResult<()> {
    if value.chars().count() > max {
        return Err(StoreError::validation(
            field,
            format!("exceeds {max} characters"),
        ));
    }
    Ok(())
}

fn short_text(field: &'static str, value: &str) -> StoreResult<()> {
    required(field, value)?;
    max_len(field, value, SHORT_TEXT_MAX)
}

fn optional_text(field: &'static str, value: Option<&str>) -> StoreResult<()> {
    match value {
        Some(v) => max_len(field, v, SHORT_TEXT_MAX),
        None => Ok(()),
    }
}

fn optional_link(field: &'static str, value: Option<&str>, max: usize) -> StoreResult<()> {
    let Some(link) = value else {
        return Ok(());
    };
    max_len(field, link, max)?;
    Url::parse(link).map_err(|e| StoreError::validation(field, format!("not a URL ({e})")))?;
    Ok(())
}

fn genres(value: &Genres) -> StoreResult<()> {
    if value.as_slice().iter().any(|g| g.trim().is_empty()) {
        return Err(StoreError::validation("genres", "contains an empty tag"));
    }
    Ok(())
}

impl Validate for venue::NewVenue {
    fn validate(&self) -> StoreResult<()> {
        required("name", &self.name)?;
        genres(&self.genres)?;
        short_text("city", &self.city)?;
        short_text("state", &self.state)?;
        short_text("address", &self.address)?;
        optional_text("phone", self.phone.as_deref())?;
        optional_link("facebook_link", self.facebook_link.as_deref(), SHORT_TEXT_MAX)
    }
}

impl Validate for venue::Model {
    fn validate(&self) -> StoreResult<()> {
        required("name", &self.name)?;
        genres(&self.genres)?;
        short_text("city", &self.city)?;
        short_text("state", &self.state)?;
        short_text("address", &self.address)?;
        optional_text("phone", self.phone.as_deref())?;
        optional_link("image_link", self.image_link.as_deref(), IMAGE_LINK_MAX)?;
        optional_link("facebook_link", self.facebook_link.as_deref(), SHORT_TEXT_MAX)?;
        optional_link("website", self.website.as_deref(), SHORT_TEXT_MAX)
    }
}

impl Validate for artist::NewArtist {
    fn validate(&self) -> StoreResult<()> {
        required("name", &self.name)?;
        genres(&self.genres)?;
        short_text("city", &self.city)?;
        short_text("state", &self.state)?;
        optional_text("phone", self.phone.as_deref())?;
        optional_link("facebook_link", self.facebook_link.as_deref(), SHORT_TEXT_MAX)
    }
}

impl Validate for artist::Model {
    fn validate(&self) -> StoreResult<()> {
        required("name", &self.name)?;
        genres(&self.genres)?;
        short_text("city", &self.city)?;
        short_text("state", &self.state)?;
        optional_text("phone", self.phone.as_deref())?;
        optional_link("image_link", self.image_link.as_deref(), IMAGE_LINK_MAX)?;
        optional_link("facebook_link", self.facebook_link.as_deref(), SHORT_TEXT_MAX)?;
        optional_link("website", self.website.as_deref(), SHORT_TEXT_MAX)
    }
}

// Shows carry only keys and a timestamp; referential checks happen in the store.
impl Validate for show::NewShow {
    fn validate(&self) -> StoreResult<()> {
        Ok(())
    }
}

impl Validate for show::Model {
    fn validate(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fillmore() -> venue::NewVenue {
        venue::NewVenue {
            name: "The Fillmore".into(),
            genres: ["Rock", "Jazz"].into_iter().collect(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1805 Geary St".into(),
            phone: Some("415-567-1330".into()),
            facebook_link: Some("http://fb.com/fillmore".into()),
        }
    }

    fn field_of(err: StoreError) -> &'static str {
        match err {
            StoreError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_venue_passes() {
        assert!(fillmore().validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut v = fillmore();
        v.name = "   ".into();
        assert_eq!(field_of(v.validate().unwrap_err()), "name");
    }

    #[test]
    fn test_city_at_limit_accepted() {
        let mut v = fillmore();
        v.city = "x".repeat(SHORT_TEXT_MAX);
        assert!(v.validate().is_ok());
    }

    #[test]
    fn test_city_over_limit_rejected() {
        let mut v = fillmore();
        v.city = "x".repeat(SHORT_TEXT_MAX + 1);
        assert_eq!(field_of(v.validate().unwrap_err()), "city");
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        let mut v = fillmore();
        v.address = "é".repeat(SHORT_TEXT_MAX);
        assert!(v.validate().is_ok());
    }

    #[test]
    fn test_malformed_facebook_link_rejected() {
        let mut v = fillmore();
        v.facebook_link = Some("fb.com/fillmore".into());
        assert_eq!(field_of(v.validate().unwrap_err()), "facebook_link");
    }

    #[test]
    fn test_empty_genre_tag_rejected() {
        let mut v = fillmore();
        v.genres = ["Rock", ""].into_iter().collect();
        assert_eq!(field_of(v.validate().unwrap_err()), "genres");
    }

    #[test]
    fn test_image_link_uses_wider_limit() {
        let model = venue::Model {
            id: 1,
            name: "The Fillmore".into(),
            genres: Genres::default(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1805 Geary St".into(),
            phone: None,
            image_link: Some(format!("https://img.example.com/{}", "a".repeat(300))),
            facebook_link: None,
            website: None,
            seeking_talent: None,
            seeking_description: None,
        };
        assert!(model.validate().is_ok());

        let mut too_long = model;
        too_long.image_link = Some(format!("https://img.example.com/{}", "a".repeat(500)));
        assert_eq!(field_of(too_long.validate().unwrap_err()), "image_link");
    }

    #[test]
    fn test_artist_missing_state_rejected() {
        let a = artist::NewArtist {
            name: "The Wild Sax Band".into(),
            genres: ["Jazz"].into_iter().collect(),
            city: "Oakland".into(),
            state: String::new(),
            phone: None,
            facebook_link: None,
        };
        assert_eq!(field_of(a.validate().unwrap_err()), "state");
    }
}
