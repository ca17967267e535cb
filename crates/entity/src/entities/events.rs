use chrono::{Datelike as _, LocalResult, NaiveDateTime, NaiveTime, Offset as _, TimeDelta, TimeZone as _};
use chrono_tz::Tz;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The timezone every event takes place in.
pub const TIMEZONE: Tz = chrono_tz::Europe::Prague;

/// The start time of an event that doesn't have one recorded.
pub const DEFAULT_START_TIME: NaiveTime = match NaiveTime::from_hms_opt(19, 0, 0) {
    Some(time) => time,
    None => panic!("invalid default start time"),
};

/// An event.
///
/// There can be only one event in a city starting at a given date and time. This is enforced
/// by the `idx_events_city_date_start_time` unique index created by the migration.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    /// An internal numeric ID.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The general name of the event.
    pub name: String,
    /// The serial number of the event, if kept track of.
    pub number: Option<i32>,
    /// The topic of the event.
    pub topic: Option<String>,
    /// The description of the event.
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// The day the event takes place.
    pub date: Date,
    /// The local start time.
    ///
    /// See [`DEFAULT_START_TIME`] when it's missing.
    pub start_time: Option<Time>,
    /// The ID of the city holding the event.
    pub city_id: i32,
    /// The ID of the venue of the event.
    pub venue_id: i32,
}

impl Model {
    /// Returns the displayed title of the event.
    ///
    /// For example "Pražské Pyvo #42", "Pražské Pyvo – Django", or "Pražské Pyvo #42 Django"
    /// when both the number and the topic are set.
    pub fn title(&self) -> String {
        let topic = self.topic.as_deref().filter(|topic| !topic.is_empty());
        let mut parts = vec![self.name.clone()];
        match (self.number, topic) {
            (Some(number), _) => parts.push(format!("#{number}")),
            (None, Some(_)) => parts.push("–".to_owned()),
            (None, None) => (),
        }
        parts.extend(topic.map(str::to_owned));
        parts.join(" ")
    }

    /// Returns the start of the event, as a timezone-aware datetime.
    pub fn start(&self) -> chrono::DateTime<Tz> {
        let time = self.start_time.unwrap_or(DEFAULT_START_TIME);
        localize(self.date.and_time(time))
    }

    /// The year of the event date.
    #[inline]
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// The month of the event date, starting from 1.
    #[inline]
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// The day of month of the event date, starting from 1.
    #[inline]
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// Places a wall-clock time in the [`TIMEZONE`].
///
/// A time repeated when the clocks go back resolves to its first occurrence. A time skipped
/// when they go forward is read with the offset in effect before the change.
pub fn localize(naive: NaiveDateTime) -> chrono::DateTime<Tz> {
    match TIMEZONE.from_local_datetime(&naive) {
        LocalResult::Single(datetime) => datetime,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let offset = TIMEZONE
                .offset_from_utc_datetime(&(naive - TimeDelta::days(1)))
                .fix();
            let utc = naive - TimeDelta::seconds(offset.local_minus_utc().into());
            TIMEZONE.from_utc_datetime(&utc)
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cities::Entity",
        from = "Column::CityId",
        to = "super::cities::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Cities,
    #[sea_orm(
        belongs_to = "super::venues::Entity",
        from = "Column::VenueId",
        to = "super::venues::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Venues,
    #[sea_orm(has_many = "super::talks::Entity")]
    Talks,
    #[sea_orm(has_many = "super::event_links::Entity")]
    EventLinks,
}

impl Related<super::cities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cities.def()
    }
}

impl Related<super::venues::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Venues.def()
    }
}

impl Related<super::talks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Talks.def()
    }
}

impl Related<super::event_links::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventLinks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
