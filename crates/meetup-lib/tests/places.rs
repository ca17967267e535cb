use entity::{cities, venues};
use meetup_lib::{
    city,
    error::MeetupError,
    event, must,
    venue::{self, NewVenue},
};
use sea_orm::{EntityTrait as _, PaginatorTrait as _};

mod base;

#[tokio::test]
async fn city_slug_from_name() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let city = city::create(&db.sql_conn, "Hradec Králové").await?;
        assert_eq!(city.name, "Hradec Králové");
        assert_eq!(city.slug, "hradec-kralove");

        let found = city::get_by_slug(&db.sql_conn, "hradec-kralove").await?;
        assert_eq!(found, Some(city.clone()));
        assert_eq!(must::have_city(&db.sql_conn, "hradec-kralove").await?, city);

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn city_duplicate_slug() -> anyhow::Result<()> {
    base::with_db(async |db| {
        city::create(&db.sql_conn, "Praha").await?;
        let res = city::create(&db.sql_conn, "PRAHA").await;
        assert!(matches!(res, Err(MeetupError::DbError(_))), "{res:?}");
        assert_eq!(cities::Entity::find().count(&db.sql_conn).await?, 1);

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn city_not_found() -> anyhow::Result<()> {
    base::with_db(async |db| {
        assert_eq!(city::get_by_slug(&db.sql_conn, "ostrava").await?, None);
        let res = must::have_city(&db.sql_conn, "ostrava").await;
        assert!(matches!(res, Err(MeetupError::CityNotFound(slug)) if slug == "ostrava"));

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn venue_slug_and_address() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let (_, venue) = base::brno(&db).await?;
        assert_eq!(venue.slug, "studentsky-klub-u-kachnicky");
        assert_eq!(venue.short_address(), Some("Božetěchova 2"));

        let found = must::have_venue(&db.sql_conn, "studentsky-klub-u-kachnicky").await?;
        assert_eq!(found, venue);

        let res = must::have_venue(&db.sql_conn, "nowhere").await;
        assert!(matches!(res, Err(MeetupError::VenueNotFound(_))));

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn venue_without_address() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let venue = venue::create(
            &db.sql_conn,
            NewVenue {
                name: "Pivnice U Čápa".to_owned(),
                city: "Praha".to_owned(),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(venue.address, None);
        assert_eq!(venue.short_address(), None);
        assert_eq!(venues::Entity::find().count(&db.sql_conn).await?, 1);

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn city_and_venue_events_most_recent_first() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let (city, venue) = base::brno(&db).await?;
        let other_city = city::create(&db.sql_conn, "Praha").await?;

        for date in [
            base::date(2016, 1, 27),
            base::date(2016, 3, 30),
            base::date(2015, 12, 16),
        ] {
            event::create(&db.sql_conn, base::new_event(&city, &venue, date)).await?;
        }
        event::create(
            &db.sql_conn,
            base::new_event(&other_city, &venue, base::date(2016, 2, 17)),
        )
        .await?;

        let dates: Vec<_> = city::events(&db.sql_conn, city.id)
            .await?
            .into_iter()
            .map(|event| event.date)
            .collect();
        assert_eq!(
            dates,
            [
                base::date(2016, 3, 30),
                base::date(2016, 1, 27),
                base::date(2015, 12, 16),
            ]
        );

        let at_venue = venue::events(&db.sql_conn, venue.id).await?;
        assert_eq!(at_venue.len(), 4);
        assert_eq!(at_venue[0].date, base::date(2016, 3, 30));

        anyhow::Ok(())
    })
    .await
}
