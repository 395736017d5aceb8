use sea_orm::entity::prelude::*;
use sea_orm::IntoActiveModel;
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shows")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::venue::Entity",
        from = "Column::VenueId",
        to = "super::venue::Column::Id"
    )]
    Venue,
    #[sea_orm(
        belongs_to = "super::artist::Entity",
        from = "Column::ArtistId",
        to = "super::artist::Column::Id"
    )]
    Artist,
}

impl Related<super::venue::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Venue.def()
    }
}

impl Related<super::artist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Artist.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A show booking. Without a `start_time` the store stamps the booking time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShow {
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: Option<DateTime>,
}

impl IntoActiveModel<ActiveModel> for NewShow {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            venue_id: Set(self.venue_id),
            artist_id: Set(self.artist_id),
            start_time: self.start_time.map_or(NotSet, Set),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_new_show_without_start_time_defers_to_database() {
        let active = NewShow {
            venue_id: 1,
            artist_id: 2,
            start_time: None,
        }
        .into_active_model();
        assert!(active.start_time.is_not_set());
    }

    #[test]
    fn test_new_show_with_start_time() {
        let at = NaiveDate::from_ymd_opt(2019, 5, 21)
            .unwrap()
            .and_hms_opt(21, 0, 0)
            .unwrap();
        let active = NewShow {
            venue_id: 1,
            artist_id: 2,
            start_time: Some(at),
        }
        .into_active_model();
        assert_eq!(active.start_time, Set(at));
    }
}
