use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A city that holds events.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cities")]
pub struct Model {
    /// An internal numeric ID.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The name of the city.
    pub name: String,
    /// The unique identifier of the city for use in URLs.
    ///
    /// See [`slugify`](crate::slugify).
    #[sea_orm(unique)]
    pub slug: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::events::Entity")]
    Events,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
