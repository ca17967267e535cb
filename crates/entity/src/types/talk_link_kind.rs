use core::fmt;
use std::str::FromStr;

use sea_orm::{Iterable as _, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// The kind of a talk link.
///
/// [`TalkLinkKind::Talk`] is a link to the talk itself, the rest is supporting material.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum TalkLinkKind {
    #[sea_orm(string_value = "slides")]
    Slides,
    #[sea_orm(string_value = "video")]
    Video,
    #[sea_orm(string_value = "link")]
    Link,
    #[sea_orm(string_value = "writeup")]
    Writeup,
    #[sea_orm(string_value = "notes")]
    Notes,
    #[sea_orm(string_value = "talk")]
    Talk,
}

impl TalkLinkKind {
    /// Returns the value stored in the database for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Slides => "slides",
            Self::Video => "video",
            Self::Link => "link",
            Self::Writeup => "writeup",
            Self::Notes => "notes",
            Self::Talk => "talk",
        }
    }
}

impl fmt::Display for TalkLinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown talk link kind `{0}`, expected one of slides, video, link, writeup, notes, talk")]
pub struct TalkLinkKindParseError(pub String);

impl FromStr for TalkLinkKind {
    type Err = TalkLinkKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TalkLinkKindParseError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ActiveEnum as _, Iterable as _};

    use super::{TalkLinkKind, TalkLinkKindParseError};

    #[test]
    fn parse_every_kind() {
        for kind in TalkLinkKind::iter() {
            assert_eq!(kind.as_str().parse(), Ok(kind));
            assert_eq!(kind.to_value(), kind.as_str());
        }
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            "podcast".parse::<TalkLinkKind>(),
            Err(TalkLinkKindParseError("podcast".to_owned()))
        );
    }
}
