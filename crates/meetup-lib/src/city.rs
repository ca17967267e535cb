//! This module contains anything related to the cities holding events.

use entity::{cities, events, slugify};
use sea_orm::{
    ActiveModelTrait as _, ActiveValue::Set, ColumnTrait as _, ConnectionTrait, EntityTrait as _,
    QueryFilter as _, QueryOrder as _,
};

use crate::error::MeetupResult;

/// Returns the city bound to the provided slug.
pub async fn get_by_slug<C: ConnectionTrait>(
    conn: &C,
    slug: &str,
) -> MeetupResult<Option<cities::Model>> {
    let city = cities::Entity::find()
        .filter(cities::Column::Slug.eq(slug))
        .one(conn)
        .await?;
    Ok(city)
}

/// Saves a new city, with a slug generated from its name.
///
/// If another city already has the same slug, this fails with the unique constraint violation
/// of the database.
#[tracing::instrument(skip(conn))]
pub async fn create<C: ConnectionTrait>(conn: &C, name: &str) -> MeetupResult<cities::Model> {
    let city = cities::ActiveModel {
        name: Set(name.to_owned()),
        slug: Set(slugify(name)),
        ..Default::default()
    }
    .insert(conn)
    .await?;
    tracing::debug!(id = city.id, slug = %city.slug, "Created city");
    Ok(city)
}

/// Returns the events held in the city, the most recent first.
pub async fn events<C: ConnectionTrait>(conn: &C, city_id: i32) -> MeetupResult<Vec<events::Model>> {
    let events = events::Entity::find()
        .filter(events::Column::CityId.eq(city_id))
        .order_by_desc(events::Column::Date)
        .order_by_desc(events::Column::StartTime)
        .all(conn)
        .await?;
    Ok(events)
}
