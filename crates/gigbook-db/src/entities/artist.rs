use sea_orm::entity::prelude::*;
use sea_orm::IntoActiveModel;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

use super::Genres;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "artists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub genres: Genres,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: Option<bool>,
    #[sea_orm(column_type = "Text", nullable)]
    pub seeking_description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::show::Entity")]
    Show,
}

impl Related<super::show::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Show.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArtist {
    pub name: String,
    pub genres: Genres,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub facebook_link: Option<String>,
}

impl IntoActiveModel<ActiveModel> for NewArtist {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            name: Set(self.name),
            genres: Set(self.genres),
            city: Set(self.city),
            state: Set(self.state),
            phone: Set(self.phone),
            facebook_link: Set(self.facebook_link),
            ..Default::default()
        }
    }
}
