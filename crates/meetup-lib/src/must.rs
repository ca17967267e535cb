//! This module contains utility functions used to retrieve some objects from the database,
//! that must exist. This is why it is called `must`.
//!
//! When such an object doesn't exist, the returned value isn't `Option::None` but the
//! corresponding error (for example, [`MeetupError::CityNotFound`]). The error is meant to be
//! propagated to the caller as-is.

use entity::{cities, events, speakers, talks, venues};
use sea_orm::{ConnectionTrait, EntityTrait as _};

use crate::{
    city,
    error::{MeetupError, MeetupResult},
    venue,
};

/// Returns the city bound to the provided slug.
pub async fn have_city<C: ConnectionTrait>(conn: &C, slug: &str) -> MeetupResult<cities::Model> {
    city::get_by_slug(conn, slug)
        .await?
        .ok_or_else(|| MeetupError::CityNotFound(slug.to_owned()))
}

/// Returns the venue bound to the provided slug.
pub async fn have_venue<C: ConnectionTrait>(conn: &C, slug: &str) -> MeetupResult<venues::Model> {
    venue::get_by_slug(conn, slug)
        .await?
        .ok_or_else(|| MeetupError::VenueNotFound(slug.to_owned()))
}

/// Returns the event with the provided ID.
pub async fn have_event<C: ConnectionTrait>(conn: &C, event_id: i32) -> MeetupResult<events::Model> {
    events::Entity::find_by_id(event_id)
        .one(conn)
        .await?
        .ok_or(MeetupError::EventNotFound(event_id))
}

/// Returns the talk with the provided ID.
pub async fn have_talk<C: ConnectionTrait>(conn: &C, talk_id: i32) -> MeetupResult<talks::Model> {
    talks::Entity::find_by_id(talk_id)
        .one(conn)
        .await?
        .ok_or(MeetupError::TalkNotFound(talk_id))
}

/// Returns the speaker with the provided ID.
pub async fn have_speaker<C: ConnectionTrait>(
    conn: &C,
    speaker_id: i32,
) -> MeetupResult<speakers::Model> {
    speakers::Entity::find_by_id(speaker_id)
        .one(conn)
        .await?
        .ok_or(MeetupError::SpeakerNotFound(speaker_id))
}
