//! This module contains anything related to the venues of the events.

use entity::{events, slugify, venues};
use sea_orm::{
    ActiveModelTrait as _, ActiveValue::Set, ColumnTrait as _, ConnectionTrait, EntityTrait as _,
    QueryFilter as _, QueryOrder as _,
};

use crate::error::MeetupResult;

/// The data of a new venue.
#[derive(Debug, Clone, Default)]
pub struct NewVenue {
    /// The name of the venue, also used to generate its slug.
    pub name: String,
    /// The city of the venue, as free text.
    pub city: String,
    /// The address, possibly on several lines.
    pub address: Option<String>,
    /// The longitude of the location.
    pub longitude: String,
    /// The latitude of the location.
    pub latitude: String,
}

/// Returns the venue bound to the provided slug.
pub async fn get_by_slug<C: ConnectionTrait>(
    conn: &C,
    slug: &str,
) -> MeetupResult<Option<venues::Model>> {
    let venue = venues::Entity::find()
        .filter(venues::Column::Slug.eq(slug))
        .one(conn)
        .await?;
    Ok(venue)
}

/// Saves a new venue, with a slug generated from its name.
#[tracing::instrument(skip(conn))]
pub async fn create<C: ConnectionTrait>(conn: &C, venue: NewVenue) -> MeetupResult<venues::Model> {
    let venue = venues::ActiveModel {
        slug: Set(slugify(&venue.name)),
        name: Set(venue.name),
        city: Set(venue.city),
        address: Set(venue.address),
        longitude: Set(venue.longitude),
        latitude: Set(venue.latitude),
        ..Default::default()
    }
    .insert(conn)
    .await?;
    tracing::debug!(id = venue.id, slug = %venue.slug, "Created venue");
    Ok(venue)
}

/// Returns the events held at the venue, the most recent first.
pub async fn events<C: ConnectionTrait>(
    conn: &C,
    venue_id: i32,
) -> MeetupResult<Vec<events::Model>> {
    let events = events::Entity::find()
        .filter(events::Column::VenueId.eq(venue_id))
        .order_by_desc(events::Column::Date)
        .order_by_desc(events::Column::StartTime)
        .all(conn)
        .await?;
    Ok(events)
}
