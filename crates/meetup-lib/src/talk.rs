//! This module contains anything related to the talks, their speakers and their links.
//!
//! The speakers of a talk are stored as `talk_speakers` rows, each carrying the position of the
//! speaker. The functions here expose them as a plain ordered list of speakers: adding a speaker
//! to a talk creates the association row, and removing it deletes the row.

use entity::{speakers, talk_links, talk_speakers, talks, types::TalkLinkKind};
use itertools::Itertools as _;
use sea_orm::{
    ActiveModelBehavior as _, ActiveModelTrait as _, ActiveValue::Set, ColumnTrait as _,
    ConnectionTrait, EntityTrait as _, ModelTrait as _, QueryFilter as _, QueryOrder as _,
    TransactionTrait,
};

use crate::{
    error::{MeetupError, MeetupResult},
    must,
    ordering::{OrderingError, OrderingList, save_positions, sort_stored},
};

/// The data of a new talk.
#[derive(Debug, Clone, Default)]
pub struct NewTalk {
    /// The title of the talk.
    pub title: String,
    /// Whether this is a lightning talk.
    pub is_lightning: bool,
}

impl NewTalk {
    /// Returns the data of a regular talk with the provided title.
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            is_lightning: false,
        }
    }

    /// Returns the data of a lightning talk with the provided title.
    pub fn lightning<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            is_lightning: true,
        }
    }
}

pub(crate) async fn insert_row<C: ConnectionTrait>(
    conn: &C,
    talk: NewTalk,
    event_id: Option<i32>,
    index: i32,
) -> MeetupResult<talks::Model> {
    let mut row = talks::ActiveModel::new();
    row.title = Set(talk.title);
    row.is_lightning = Set(talk.is_lightning);
    row.event_id = Set(event_id);
    row.index = Set(index);
    Ok(row.insert(conn).await?)
}

/// Saves a new talk that isn't given at any event yet.
///
/// See [`event::assign_talk()`](crate::event::assign_talk) to schedule it later.
#[tracing::instrument(skip(conn))]
pub async fn create<C: ConnectionTrait>(conn: &C, talk: NewTalk) -> MeetupResult<talks::Model> {
    let talk = insert_row(conn, talk, None, 0).await?;
    tracing::debug!(id = talk.id, "Created pending talk");
    Ok(talk)
}

fn check_insert_position(position: usize, len: usize) -> Result<(), OrderingError> {
    if position > len {
        Err(OrderingError::OutOfRange { position, len })
    } else {
        Ok(())
    }
}

// --------
// --- Speakers
// --------

async fn stored_talk_speakers<C: ConnectionTrait>(
    conn: &C,
    talk_id: i32,
) -> MeetupResult<Vec<talk_speakers::Model>> {
    let mut rows = talk_speakers::Entity::find()
        .filter(talk_speakers::Column::TalkId.eq(talk_id))
        .order_by_asc(talk_speakers::Column::SpeakerId)
        .all(conn)
        .await?;
    sort_stored(&mut rows);
    Ok(rows)
}

async fn load_talk_speakers<C: ConnectionTrait>(
    conn: &C,
    talk_id: i32,
) -> MeetupResult<OrderingList<talk_speakers::Model>> {
    Ok(OrderingList::from_stored(stored_talk_speakers(conn, talk_id).await?))
}

fn speaker_position(
    list: &OrderingList<talk_speakers::Model>,
    talk_id: i32,
    speaker_id: i32,
) -> MeetupResult<usize> {
    list.position_of(|row| row.speaker_id == speaker_id)
        .ok_or(MeetupError::SpeakerNotInTalk(talk_id, speaker_id))
}

async fn insert_speaker_row<C: ConnectionTrait>(
    conn: &C,
    talk_id: i32,
    speaker_id: i32,
    index: usize,
) -> MeetupResult<talk_speakers::Model> {
    let row = talk_speakers::ActiveModel {
        talk_id: Set(talk_id),
        speaker_id: Set(speaker_id),
        index: Set(Some(index as _)),
    }
    .insert(conn)
    .await?;
    Ok(row)
}

/// Returns the speakers of the talk, in order.
pub async fn speakers<C: ConnectionTrait>(
    conn: &C,
    talk_id: i32,
) -> MeetupResult<Vec<speakers::Model>> {
    let mut rows = talk_speakers::Entity::find()
        .filter(talk_speakers::Column::TalkId.eq(talk_id))
        .find_also_related(speakers::Entity)
        .all(conn)
        .await?;
    rows.sort_by_key(|(row, _)| (row.index.is_none(), row.index, row.speaker_id));
    Ok(rows.into_iter().filter_map(|(_, speaker)| speaker).collect())
}

/// Returns the association rows between the talk and its speakers, in order, with their index
/// as stored.
pub async fn talk_speakers<C: ConnectionTrait>(
    conn: &C,
    talk_id: i32,
) -> MeetupResult<Vec<talk_speakers::Model>> {
    stored_talk_speakers(conn, talk_id).await
}

/// Adds the speaker at the end of the speakers of the talk.
///
/// This creates the association row between the talk and the speaker. If the speaker already
/// speaks at the talk, this fails with the primary key violation of the database.
#[tracing::instrument(skip(conn))]
pub async fn append_speaker<C>(
    conn: &C,
    talk_id: i32,
    speaker_id: i32,
) -> MeetupResult<talk_speakers::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let list = load_talk_speakers(&txn, talk_id).await?;
    let position = list.len();
    let row = insert_speaker_at(&txn, list, talk_id, position, speaker_id).await?;
    txn.commit().await?;
    Ok(row)
}

/// Adds the speaker at the provided position in the speakers of the talk.
#[tracing::instrument(skip(conn))]
pub async fn insert_speaker<C>(
    conn: &C,
    talk_id: i32,
    position: usize,
    speaker_id: i32,
) -> MeetupResult<talk_speakers::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let list = load_talk_speakers(&txn, talk_id).await?;
    let row = insert_speaker_at(&txn, list, talk_id, position, speaker_id).await?;
    txn.commit().await?;
    Ok(row)
}

async fn insert_speaker_at<C: ConnectionTrait>(
    conn: &C,
    mut list: OrderingList<talk_speakers::Model>,
    talk_id: i32,
    position: usize,
    speaker_id: i32,
) -> MeetupResult<talk_speakers::Model> {
    must::have_talk(conn, talk_id).await?;
    must::have_speaker(conn, speaker_id).await?;
    check_insert_position(position, list.len())?;

    let row = insert_speaker_row(conn, talk_id, speaker_id, position).await?;
    list.insert(position, row.clone())?;
    save_positions(conn, &list).await?;
    tracing::debug!(talk_id, speaker_id, position, "Added speaker to talk");
    Ok(row)
}

/// Removes the speaker from the speakers of the talk.
///
/// This deletes the association row, the speaker itself is kept.
#[tracing::instrument(skip(conn))]
pub async fn remove_speaker<C>(
    conn: &C,
    talk_id: i32,
    speaker_id: i32,
) -> MeetupResult<talk_speakers::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let mut list = load_talk_speakers(&txn, talk_id).await?;
    let position = speaker_position(&list, talk_id, speaker_id)?;
    let row = list.remove(position)?;
    row.clone().delete(&txn).await?;
    save_positions(&txn, &list).await?;
    txn.commit().await?;
    Ok(row)
}

/// Moves the speaker to another position, and returns the association rows in their new order.
#[tracing::instrument(skip(conn))]
pub async fn move_speaker<C>(
    conn: &C,
    talk_id: i32,
    speaker_id: i32,
    to: usize,
) -> MeetupResult<Vec<talk_speakers::Model>>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let mut list = load_talk_speakers(&txn, talk_id).await?;
    let from = speaker_position(&list, talk_id, speaker_id)?;
    list.move_item(from, to)?;
    save_positions(&txn, &list).await?;
    txn.commit().await?;
    Ok(list.into_vec())
}

/// Replaces the speakers of the talk with the provided ones, in this order.
///
/// The association rows of the speakers that are kept are preserved, the others are deleted,
/// and the rows of the new speakers are created.
#[tracing::instrument(skip(conn))]
pub async fn set_speakers<C>(
    conn: &C,
    talk_id: i32,
    speaker_ids: &[i32],
) -> MeetupResult<Vec<talk_speakers::Model>>
where
    C: ConnectionTrait + TransactionTrait,
{
    if !speaker_ids.iter().all_unique() {
        return Err(OrderingError::NotAPermutation.into());
    }

    let txn = conn.begin().await?;
    must::have_talk(&txn, talk_id).await?;
    let mut list = load_talk_speakers(&txn, talk_id).await?;

    while let Some(position) = list.position_of(|row| !speaker_ids.contains(&row.speaker_id)) {
        let row = list.remove(position)?;
        tracing::debug!(talk_id, speaker_id = row.speaker_id, "Removing speaker from talk");
        row.delete(&txn).await?;
    }

    for &speaker_id in speaker_ids {
        if list.position_of(|row| row.speaker_id == speaker_id).is_none() {
            must::have_speaker(&txn, speaker_id).await?;
            let row = insert_speaker_row(&txn, talk_id, speaker_id, list.len()).await?;
            list.push(row);
        }
    }

    // The kept rows still carry their stored index, so stale ones get rewritten.
    list.reorder(speaker_ids, |row| row.speaker_id)?;
    save_positions(&txn, &list).await?;
    txn.commit().await?;
    Ok(list.into_vec())
}

// --------
// --- Links
// --------

async fn stored_links<C: ConnectionTrait>(
    conn: &C,
    talk_id: i32,
) -> MeetupResult<Vec<talk_links::Model>> {
    let mut links = talk_links::Entity::find()
        .filter(talk_links::Column::TalkId.eq(talk_id))
        .order_by_asc(talk_links::Column::Url)
        .all(conn)
        .await?;
    sort_stored(&mut links);
    Ok(links)
}

async fn load_links<C: ConnectionTrait>(
    conn: &C,
    talk_id: i32,
) -> MeetupResult<OrderingList<talk_links::Model>> {
    Ok(OrderingList::from_stored(stored_links(conn, talk_id).await?))
}

fn link_position(
    list: &OrderingList<talk_links::Model>,
    talk_id: i32,
    url: &str,
) -> MeetupResult<usize> {
    list.position_of(|link| link.url == url)
        .ok_or_else(|| MeetupError::TalkLinkNotFound(talk_id, url.to_owned()))
}

/// Returns the links of the talk, in order, with their index as stored.
pub async fn links<C: ConnectionTrait>(
    conn: &C,
    talk_id: i32,
) -> MeetupResult<Vec<talk_links::Model>> {
    stored_links(conn, talk_id).await
}

/// Adds a link at the end of the links of the talk.
///
/// If the talk already links the URL, this fails with the primary key violation of the
/// database.
#[tracing::instrument(skip(conn))]
pub async fn append_link<C>(
    conn: &C,
    talk_id: i32,
    url: &str,
    kind: Option<TalkLinkKind>,
) -> MeetupResult<talk_links::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let list = load_links(&txn, talk_id).await?;
    let position = list.len();
    let link = insert_link_at(&txn, list, talk_id, position, url, kind).await?;
    txn.commit().await?;
    Ok(link)
}

/// Adds a link at the provided position in the links of the talk.
#[tracing::instrument(skip(conn))]
pub async fn insert_link<C>(
    conn: &C,
    talk_id: i32,
    position: usize,
    url: &str,
    kind: Option<TalkLinkKind>,
) -> MeetupResult<talk_links::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let list = load_links(&txn, talk_id).await?;
    let link = insert_link_at(&txn, list, talk_id, position, url, kind).await?;
    txn.commit().await?;
    Ok(link)
}

async fn insert_link_at<C: ConnectionTrait>(
    conn: &C,
    mut list: OrderingList<talk_links::Model>,
    talk_id: i32,
    position: usize,
    url: &str,
    kind: Option<TalkLinkKind>,
) -> MeetupResult<talk_links::Model> {
    must::have_talk(conn, talk_id).await?;
    check_insert_position(position, list.len())?;

    let link = talk_links::ActiveModel {
        talk_id: Set(talk_id),
        url: Set(url.to_owned()),
        index: Set(Some(position as _)),
        kind: Set(kind),
    }
    .insert(conn)
    .await?;
    list.insert(position, link.clone())?;
    save_positions(conn, &list).await?;
    Ok(link)
}

/// Removes the link to the URL from the links of the talk.
#[tracing::instrument(skip(conn))]
pub async fn remove_link<C>(conn: &C, talk_id: i32, url: &str) -> MeetupResult<talk_links::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let mut list = load_links(&txn, talk_id).await?;
    let position = link_position(&list, talk_id, url)?;
    let link = list.remove(position)?;
    link.clone().delete(&txn).await?;
    save_positions(&txn, &list).await?;
    txn.commit().await?;
    Ok(link)
}

/// Moves the link to the URL to another position, and returns the links in their new order.
#[tracing::instrument(skip(conn))]
pub async fn move_link<C>(
    conn: &C,
    talk_id: i32,
    url: &str,
    to: usize,
) -> MeetupResult<Vec<talk_links::Model>>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let mut list = load_links(&txn, talk_id).await?;
    let from = link_position(&list, talk_id, url)?;
    list.move_item(from, to)?;
    save_positions(&txn, &list).await?;
    txn.commit().await?;
    Ok(list.into_vec())
}

/// Returns the YouTube video ID of the first link of the talk that has one.
pub async fn youtube_id<C: ConnectionTrait>(conn: &C, talk_id: i32) -> MeetupResult<Option<String>> {
    let links = links(conn, talk_id).await?;
    Ok(talks::youtube_id(&links).map(str::to_owned))
}
