#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use entity::{cities, events, talks, venues};
use meetup_lib::{
    Database, city,
    event::{self, NewEvent},
    talk::NewTalk,
    venue::{self, NewVenue},
};
use test_env::IntoResult;

pub async fn with_db<F, R>(test: F) -> anyhow::Result<<R as IntoResult>::Out>
where
    F: AsyncFnOnce(Database) -> R,
    R: IntoResult,
{
    test_env::wrap(test).await
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub async fn brno(db: &Database) -> anyhow::Result<(cities::Model, venues::Model)> {
    let city = city::create(&db.sql_conn, "Brno").await?;
    let venue = venue::create(
        &db.sql_conn,
        NewVenue {
            name: "Studentský klub U Kachničky".to_owned(),
            city: "Brno".to_owned(),
            address: Some("Božetěchova 2\n612 00 Brno".to_owned()),
            longitude: "16.5963".to_owned(),
            latitude: "49.2266".to_owned(),
        },
    )
    .await?;
    Ok((city, venue))
}

pub fn new_event(city: &cities::Model, venue: &venues::Model, date: NaiveDate) -> NewEvent {
    NewEvent {
        name: "Brněnské Pyvo".to_owned(),
        number: None,
        topic: None,
        description: None,
        date,
        start_time: None,
        city_id: city.id,
        venue_id: venue.id,
    }
}

/// Creates an event in Brno, with the talks of the provided titles.
pub async fn event_with_talks(
    db: &Database,
    titles: &[&str],
) -> anyhow::Result<(events::Model, Vec<talks::Model>)> {
    let (city, venue) = brno(db).await?;
    let event = event::create(&db.sql_conn, new_event(&city, &venue, date(2016, 1, 27))).await?;
    let mut talks = Vec::with_capacity(titles.len());
    for title in titles {
        talks.push(event::append_talk(&db.sql_conn, event.id, NewTalk::new(*title)).await?);
    }
    Ok((event, talks))
}

pub fn titles(talks: &[talks::Model]) -> Vec<&str> {
    talks.iter().map(|talk| talk.title.as_str()).collect()
}

pub fn indexes(talks: &[talks::Model]) -> Vec<i32> {
    talks.iter().map(|talk| talk.index).collect()
}
