//! This module contains anything related to the speakers.

use entity::{speakers, talk_speakers, talks};
use sea_orm::{
    ActiveModelTrait as _, ActiveValue::Set, ColumnTrait as _, ConnectionTrait, EntityTrait as _,
    QueryFilter as _, QueryOrder as _, TransactionTrait,
};

use crate::{error::MeetupResult, talk};

/// Saves a new speaker.
#[tracing::instrument(skip(conn))]
pub async fn create<C: ConnectionTrait>(conn: &C, name: &str) -> MeetupResult<speakers::Model> {
    let speaker = speakers::ActiveModel {
        name: Set(name.to_owned()),
        ..Default::default()
    }
    .insert(conn)
    .await?;
    tracing::debug!(id = speaker.id, "Created speaker");
    Ok(speaker)
}

/// Returns the speakers with the provided name.
pub async fn find_by_name<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> MeetupResult<Vec<speakers::Model>> {
    let speakers = speakers::Entity::find()
        .filter(speakers::Column::Name.eq(name))
        .order_by_asc(speakers::Column::Id)
        .all(conn)
        .await?;
    Ok(speakers)
}

/// Returns the talks of the speaker.
pub async fn talks<C: ConnectionTrait>(conn: &C, speaker_id: i32) -> MeetupResult<Vec<talks::Model>> {
    let talks = talks::Entity::find()
        .inner_join(talk_speakers::Entity)
        .filter(talk_speakers::Column::SpeakerId.eq(speaker_id))
        .order_by_asc(talks::Column::Id)
        .all(conn)
        .await?;
    Ok(talks)
}

/// Makes the speaker a speaker of the talk.
///
/// The speaker goes last in the order of the speakers of the talk.
#[tracing::instrument(skip(conn))]
pub async fn add_talk<C>(
    conn: &C,
    speaker_id: i32,
    talk_id: i32,
) -> MeetupResult<talk_speakers::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    talk::append_speaker(conn, talk_id, speaker_id).await
}

/// Removes the speaker from the speakers of the talk.
#[tracing::instrument(skip(conn))]
pub async fn remove_talk<C>(
    conn: &C,
    speaker_id: i32,
    talk_id: i32,
) -> MeetupResult<talk_speakers::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    talk::remove_speaker(conn, talk_id, speaker_id).await
}
