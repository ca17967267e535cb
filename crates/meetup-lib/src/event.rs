//! This module contains anything related to the events, and to their ordered collections of
//! talks and links.
//!
//! Every function mutating a collection runs in its own transaction, and leaves the index of
//! each member equal to its position in the collection.

use chrono::{Months, NaiveDate, NaiveTime};
use entity::{event_links, events, talks};
use sea_orm::{
    ActiveModelTrait as _, ActiveValue::Set, ColumnTrait as _, Condition, ConnectionTrait,
    EntityTrait as _, IntoActiveModel as _, ModelTrait as _, QueryFilter as _, QueryOrder as _,
    TransactionTrait,
};

use crate::{
    error::{MeetupError, MeetupResult},
    must,
    ordering::{OrderingError, OrderingList, save_positions, sort_stored},
    talk::{self, NewTalk},
};

/// The data of a new event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// The general name of the event.
    pub name: String,
    /// The serial number of the event.
    pub number: Option<i32>,
    /// The topic of the event.
    pub topic: Option<String>,
    /// The description of the event.
    pub description: Option<String>,
    /// The day the event takes place.
    pub date: NaiveDate,
    /// The local start time, if not the default one.
    pub start_time: Option<NaiveTime>,
    /// The ID of the city holding the event.
    pub city_id: i32,
    /// The ID of the venue of the event.
    pub venue_id: i32,
}

/// Saves a new event.
///
/// If the city already holds an event at the same date and start time, this fails with the
/// unique constraint violation of the database.
#[tracing::instrument(skip(conn))]
pub async fn create<C: ConnectionTrait>(conn: &C, event: NewEvent) -> MeetupResult<events::Model> {
    let event = events::ActiveModel {
        name: Set(event.name),
        number: Set(event.number),
        topic: Set(event.topic),
        description: Set(event.description),
        date: Set(event.date),
        start_time: Set(event.start_time),
        city_id: Set(event.city_id),
        venue_id: Set(event.venue_id),
        ..Default::default()
    }
    .insert(conn)
    .await?;
    tracing::debug!(id = event.id, title = %event.title(), "Created event");
    Ok(event)
}

/// Returns the event held in the city at the provided date and start time.
pub async fn get<C: ConnectionTrait>(
    conn: &C,
    city_id: i32,
    date: NaiveDate,
    start_time: Option<NaiveTime>,
) -> MeetupResult<Option<events::Model>> {
    let start_time = match start_time {
        Some(time) => events::Column::StartTime.eq(time),
        None => events::Column::StartTime.is_null(),
    };
    let event = events::Entity::find()
        .filter(events::Column::CityId.eq(city_id))
        .filter(events::Column::Date.eq(date))
        .filter(start_time)
        .one(conn)
        .await?;
    Ok(event)
}

fn held_between(from: NaiveDate, until: NaiveDate) -> Condition {
    Condition::all()
        .add(events::Column::Date.gte(from))
        .add(events::Column::Date.lt(until))
}

/// Returns the condition matching the events held during the provided year.
pub fn in_year(year: i32) -> MeetupResult<Condition> {
    let invalid = || MeetupError::InvalidDate(format!("year {year}"));
    let from = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
    let until = from
        .checked_add_months(Months::new(12))
        .ok_or_else(invalid)?;
    Ok(held_between(from, until))
}

/// Returns the condition matching the events held during the provided month.
///
/// The month starts from 1.
pub fn in_month(year: i32, month: u32) -> MeetupResult<Condition> {
    let invalid = || MeetupError::InvalidDate(format!("month {month} of year {year}"));
    let from = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let until = from.checked_add_months(Months::new(1)).ok_or_else(invalid)?;
    Ok(held_between(from, until))
}

/// Returns the condition matching the events held on the provided day.
pub fn on_day(date: NaiveDate) -> Condition {
    Condition::all().add(events::Column::Date.eq(date))
}

async fn list_where<C: ConnectionTrait>(
    conn: &C,
    condition: Condition,
) -> MeetupResult<Vec<events::Model>> {
    let events = events::Entity::find()
        .filter(condition)
        .order_by_asc(events::Column::Date)
        .order_by_asc(events::Column::StartTime)
        .order_by_asc(events::Column::Id)
        .all(conn)
        .await?;
    Ok(events)
}

/// Returns the events held during the provided year, in chronological order.
pub async fn list_in_year<C: ConnectionTrait>(
    conn: &C,
    year: i32,
) -> MeetupResult<Vec<events::Model>> {
    list_where(conn, in_year(year)?).await
}

/// Returns the events held during the provided month, in chronological order.
pub async fn list_in_month<C: ConnectionTrait>(
    conn: &C,
    year: i32,
    month: u32,
) -> MeetupResult<Vec<events::Model>> {
    list_where(conn, in_month(year, month)?).await
}

/// Returns the events held on the provided day, in chronological order.
pub async fn list_on_day<C: ConnectionTrait>(
    conn: &C,
    date: NaiveDate,
) -> MeetupResult<Vec<events::Model>> {
    list_where(conn, on_day(date)).await
}

// --------
// --- Talks
// --------

async fn stored_talks<C: ConnectionTrait>(
    conn: &C,
    event_id: i32,
) -> MeetupResult<Vec<talks::Model>> {
    let mut talks = talks::Entity::find()
        .filter(talks::Column::EventId.eq(event_id))
        .order_by_asc(talks::Column::Id)
        .all(conn)
        .await?;
    sort_stored(&mut talks);
    Ok(talks)
}

async fn load_talks<C: ConnectionTrait>(
    conn: &C,
    event_id: i32,
) -> MeetupResult<OrderingList<talks::Model>> {
    Ok(OrderingList::from_stored(stored_talks(conn, event_id).await?))
}

fn talk_position(
    list: &OrderingList<talks::Model>,
    event_id: i32,
    talk_id: i32,
) -> MeetupResult<usize> {
    list.position_of(|talk| talk.id == talk_id)
        .ok_or(MeetupError::TalkNotInEvent(talk_id, event_id))
}

/// Returns the talks given at the event, in order.
///
/// The talks keep their index as stored. Every mutation of the talks of the event leaves each
/// index equal to the position of its talk.
pub async fn talks<C: ConnectionTrait>(conn: &C, event_id: i32) -> MeetupResult<Vec<talks::Model>> {
    stored_talks(conn, event_id).await
}

/// Returns the talks that aren't given at any event yet.
pub async fn pending_talks<C: ConnectionTrait>(conn: &C) -> MeetupResult<Vec<talks::Model>> {
    let talks = talks::Entity::find()
        .filter(talks::Column::EventId.is_null())
        .order_by_asc(talks::Column::Id)
        .all(conn)
        .await?;
    Ok(talks)
}

/// Saves a new talk at the end of the talks of the event.
#[tracing::instrument(skip(conn))]
pub async fn append_talk<C>(conn: &C, event_id: i32, talk: NewTalk) -> MeetupResult<talks::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let list = load_talks(&txn, event_id).await?;
    let position = list.len();
    let talk = insert_talk_at(&txn, list, event_id, position, talk).await?;
    txn.commit().await?;
    Ok(talk)
}

/// Saves a new talk at the provided position in the talks of the event.
///
/// The talks from this position are shifted to the end.
#[tracing::instrument(skip(conn))]
pub async fn insert_talk<C>(
    conn: &C,
    event_id: i32,
    position: usize,
    talk: NewTalk,
) -> MeetupResult<talks::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let list = load_talks(&txn, event_id).await?;
    let talk = insert_talk_at(&txn, list, event_id, position, talk).await?;
    txn.commit().await?;
    Ok(talk)
}

async fn insert_talk_at<C: ConnectionTrait>(
    conn: &C,
    mut list: OrderingList<talks::Model>,
    event_id: i32,
    position: usize,
    talk: NewTalk,
) -> MeetupResult<talks::Model> {
    must::have_event(conn, event_id).await?;
    if position > list.len() {
        return Err(OrderingError::OutOfRange {
            position,
            len: list.len(),
        }
        .into());
    }

    let talk = talk::insert_row(conn, talk, Some(event_id), position as _).await?;
    list.insert(position, talk.clone())?;
    let shifted = save_positions(conn, &list).await?;
    tracing::debug!(talk_id = talk.id, position, shifted, "Inserted talk");
    Ok(talk)
}

/// Puts a talk that isn't given at any event yet in the talks of the event.
///
/// The talk is placed at the provided position, or at the end if `None`.
#[tracing::instrument(skip(conn))]
pub async fn assign_talk<C>(
    conn: &C,
    event_id: i32,
    talk_id: i32,
    position: Option<usize>,
) -> MeetupResult<talks::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    must::have_event(&txn, event_id).await?;
    let talk = must::have_talk(&txn, talk_id).await?;
    if let Some(current) = talk.event_id {
        return Err(MeetupError::TalkAlreadyAssigned(talk_id, current));
    }

    let mut list = load_talks(&txn, event_id).await?;
    let position = position.unwrap_or(list.len());
    if position > list.len() {
        return Err(OrderingError::OutOfRange {
            position,
            len: list.len(),
        }
        .into());
    }

    let mut talk = talk.into_active_model();
    talk.event_id = Set(Some(event_id));
    talk.index = Set(position as _);
    let talk = talk.update(&txn).await?;

    list.insert(position, talk.clone())?;
    save_positions(&txn, &list).await?;
    txn.commit().await?;

    Ok(talk)
}

/// Removes a talk from the talks of the event.
///
/// The talk itself is kept, without any event. The following talks are shifted back.
#[tracing::instrument(skip(conn))]
pub async fn remove_talk<C>(conn: &C, event_id: i32, talk_id: i32) -> MeetupResult<talks::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let mut list = load_talks(&txn, event_id).await?;
    let position = talk_position(&list, event_id, talk_id)?;
    let talk = list.remove(position)?;

    let mut talk = talk.into_active_model();
    talk.event_id = Set(None);
    talk.index = Set(0);
    let talk = talk.update(&txn).await?;

    let shifted = save_positions(&txn, &list).await?;
    txn.commit().await?;

    tracing::debug!(talk_id, position, shifted, "Removed talk from event");
    Ok(talk)
}

/// Moves a talk of the event to another position, and returns the talks in their new order.
#[tracing::instrument(skip(conn))]
pub async fn move_talk<C>(
    conn: &C,
    event_id: i32,
    talk_id: i32,
    to: usize,
) -> MeetupResult<Vec<talks::Model>>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let mut list = load_talks(&txn, event_id).await?;
    let from = talk_position(&list, event_id, talk_id)?;
    list.move_item(from, to)?;
    save_positions(&txn, &list).await?;
    txn.commit().await?;
    Ok(list.into_vec())
}

/// Sets the order of the talks of the event.
///
/// The provided IDs must be those of every talk of the event, each exactly once.
#[tracing::instrument(skip(conn))]
pub async fn reorder_talks<C>(
    conn: &C,
    event_id: i32,
    talk_ids: &[i32],
) -> MeetupResult<Vec<talks::Model>>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let mut list = load_talks(&txn, event_id).await?;
    list.reorder(talk_ids, |talk| talk.id)?;
    save_positions(&txn, &list).await?;
    txn.commit().await?;
    Ok(list.into_vec())
}

// --------
// --- Links
// --------

async fn stored_links<C: ConnectionTrait>(
    conn: &C,
    event_id: i32,
) -> MeetupResult<Vec<event_links::Model>> {
    let mut links = event_links::Entity::find()
        .filter(event_links::Column::EventId.eq(event_id))
        .order_by_asc(event_links::Column::Url)
        .all(conn)
        .await?;
    sort_stored(&mut links);
    Ok(links)
}

async fn load_links<C: ConnectionTrait>(
    conn: &C,
    event_id: i32,
) -> MeetupResult<OrderingList<event_links::Model>> {
    Ok(OrderingList::from_stored(stored_links(conn, event_id).await?))
}

fn link_position(
    list: &OrderingList<event_links::Model>,
    event_id: i32,
    url: &str,
) -> MeetupResult<usize> {
    list.position_of(|link| link.url == url)
        .ok_or_else(|| MeetupError::EventLinkNotFound(event_id, url.to_owned()))
}

/// Returns the links of the event, in order, with their index as stored.
pub async fn links<C: ConnectionTrait>(
    conn: &C,
    event_id: i32,
) -> MeetupResult<Vec<event_links::Model>> {
    stored_links(conn, event_id).await
}

/// Adds a link at the end of the links of the event.
///
/// If the event already links the URL, this fails with the primary key violation of the
/// database.
#[tracing::instrument(skip(conn))]
pub async fn append_link<C>(conn: &C, event_id: i32, url: &str) -> MeetupResult<event_links::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let list = load_links(&txn, event_id).await?;
    let position = list.len();
    let link = insert_link_at(&txn, list, event_id, position, url).await?;
    txn.commit().await?;
    Ok(link)
}

/// Adds a link at the provided position in the links of the event.
#[tracing::instrument(skip(conn))]
pub async fn insert_link<C>(
    conn: &C,
    event_id: i32,
    position: usize,
    url: &str,
) -> MeetupResult<event_links::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let list = load_links(&txn, event_id).await?;
    let link = insert_link_at(&txn, list, event_id, position, url).await?;
    txn.commit().await?;
    Ok(link)
}

async fn insert_link_at<C: ConnectionTrait>(
    conn: &C,
    mut list: OrderingList<event_links::Model>,
    event_id: i32,
    position: usize,
    url: &str,
) -> MeetupResult<event_links::Model> {
    must::have_event(conn, event_id).await?;
    if position > list.len() {
        return Err(OrderingError::OutOfRange {
            position,
            len: list.len(),
        }
        .into());
    }

    let link = event_links::ActiveModel {
        event_id: Set(event_id),
        url: Set(url.to_owned()),
        index: Set(Some(position as _)),
    }
    .insert(conn)
    .await?;
    list.insert(position, link.clone())?;
    save_positions(conn, &list).await?;
    Ok(link)
}

/// Removes the link to the URL from the links of the event.
#[tracing::instrument(skip(conn))]
pub async fn remove_link<C>(conn: &C, event_id: i32, url: &str) -> MeetupResult<event_links::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let mut list = load_links(&txn, event_id).await?;
    let position = link_position(&list, event_id, url)?;
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
    event_id: i32,
    url: &str,
    to: usize,
) -> MeetupResult<Vec<event_links::Model>>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let mut list = load_links(&txn, event_id).await?;
    let from = link_position(&list, event_id, url)?;
    list.move_item(from, to)?;
    save_positions(&txn, &list).await?;
    txn.commit().await?;
    Ok(list.into_vec())
}
