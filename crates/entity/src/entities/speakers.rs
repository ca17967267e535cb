use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A speaker giving talks.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "speakers")]
pub struct Model {
    /// An internal numeric ID.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The name of the speaker.
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::talk_speakers::Entity")]
    TalkSpeakers,
}

impl Related<super::talk_speakers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TalkSpeakers.def()
    }
}

impl Related<super::talks::Entity> for Entity {
    fn to() -> RelationDef {
        super::talk_speakers::Relation::Talks.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::talk_speakers::Relation::Speakers.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
