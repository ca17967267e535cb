use sea_orm::{ActiveValue::Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// A talk.
///
/// A talk may not be bound to any event yet, for example while it waits to be scheduled.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "talks")]
pub struct Model {
    /// An internal numeric ID.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The title of the talk.
    pub title: String,
    /// The 0-based index of the talk in the order of talks within its event.
    pub index: i32,
    /// Whether this is a lightning talk.
    pub is_lightning: bool,
    /// The ID of the event the talk is given at.
    pub event_id: Option<i32>,
}

/// Returns the YouTube video ID of the first link among the provided ones that has any.
///
/// The links are expected in the order of the talk's links.
pub fn youtube_id<'a, I>(links: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a super::talk_links::Model>,
{
    links.into_iter().find_map(super::talk_links::Model::youtube_id)
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Events,
    #[sea_orm(has_many = "super::talk_speakers::Entity")]
    TalkSpeakers,
    #[sea_orm(has_many = "super::talk_links::Entity")]
    TalkLinks,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl Related<super::talk_speakers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TalkSpeakers.def()
    }
}

impl Related<super::talk_links::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TalkLinks.def()
    }
}

impl Related<super::speakers::Entity> for Entity {
    fn to() -> RelationDef {
        super::talk_speakers::Relation::Speakers.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::talk_speakers::Relation::Talks.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            is_lightning: Set(false),
            ..ActiveModelTrait::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ActiveModelBehavior as _, ActiveValue};

    use super::{ActiveModel, youtube_id};
    use crate::{talk_links, types::TalkLinkKind};

    fn link(url: &str, index: i32) -> talk_links::Model {
        talk_links::Model {
            talk_id: 1,
            url: url.to_owned(),
            index: Some(index),
            kind: Some(TalkLinkKind::Video),
        }
    }

    #[test]
    fn first_youtube_link_wins() {
        let links = [
            link("https://example.com/slides.pdf", 0),
            link("https://youtu.be/skipped", 1),
            link("http://www.youtube.com/watch?v=first_1", 2),
            link("http://www.youtube.com/watch?v=second", 3),
        ];
        assert_eq!(youtube_id(&links), Some("first_1"));
    }

    #[test]
    fn no_youtube_link() {
        let links = [link("https://example.com/slides.pdf", 0)];
        assert_eq!(youtube_id(&links), None);
        assert_eq!(youtube_id(&[] as &[talk_links::Model]), None);
    }

    #[test]
    fn new_talk_is_not_lightning() {
        let talk = ActiveModel::new();
        assert_eq!(talk.is_lightning, ActiveValue::Set(false));
        assert_eq!(talk.title, ActiveValue::NotSet);
    }
}
