use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::types::TalkLinkKind;

/// The only URL prefix recognized as a YouTube video link.
pub const YOUTUBE_PREFIX: &str = "http://www.youtube.com/watch?v=";

static YOUTUBE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^{}([-0-9a-zA-Z_]+)", regex::escape(YOUTUBE_PREFIX))).unwrap()
});

/// A link attached to a talk, like its slides or its recording.
///
/// The URL is part of the primary key, so a talk can't link the same URL twice.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "talk_links")]
pub struct Model {
    /// The ID of the talk.
    #[sea_orm(primary_key, auto_increment = false)]
    pub talk_id: i32,
    /// The URL of the link.
    #[sea_orm(primary_key, auto_increment = false)]
    pub url: String,
    /// The 0-based index of the link in the order of the talk's links.
    pub index: Option<i32>,
    /// The kind of the link.
    pub kind: Option<TalkLinkKind>,
}

impl Model {
    /// Returns the host name of the link URL, lowercased.
    ///
    /// Returns `None` if the URL can't be parsed or has no host.
    pub fn hostname(&self) -> Option<String> {
        let url = url::Url::parse(&self.url).ok()?;
        url.host_str().map(str::to_ascii_lowercase)
    }

    /// Returns the YouTube video ID of the link.
    ///
    /// Only URLs starting with [`YOUTUBE_PREFIX`] are recognized: `https` links, `youtu.be`
    /// links or links with other query parameters first give `None`.
    pub fn youtube_id(&self) -> Option<&str> {
        YOUTUBE_RE
            .captures(&self.url)
            .and_then(|captures| captures.get(1))
            .map(|id| id.as_str())
    }
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
}

impl Related<super::talks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Talks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
