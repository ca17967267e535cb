use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A link attached to an event.
///
/// The URL is part of the primary key, so an event can't link the same URL twice.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_links")]
pub struct Model {
    /// The ID of the event.
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_id: i32,
    /// The URL of the link.
    #[sea_orm(primary_key, auto_increment = false)]
    pub url: String,
    /// The 0-based index of the link in the order of the event's links.
    pub index: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Events,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
