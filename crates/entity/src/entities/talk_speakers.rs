use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The association between talks and their speakers.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "talk_speakers")]
pub struct Model {
    /// The ID of the talk.
    #[sea_orm(primary_key, auto_increment = false)]
    pub talk_id: i32,
    /// The ID of the speaker.
    #[sea_orm(primary_key, auto_increment = false)]
    pub speaker_id: i32,
    /// The 0-based index of the speaker in the order of the talk's speakers.
    pub index: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::talks::Entity",
        from = "Column::TalkId",
        to = "super::talks::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Talks,
    #[sea_orm(
        belongs_to = "super::speakers::Entity",
        from = "Column::SpeakerId",
        to = "super::speakers::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Speakers,
}

impl Related<super::talks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Talks.def()
    }
}

impl Related<super::speakers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Speakers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
