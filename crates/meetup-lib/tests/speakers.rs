use entity::talk_speakers;
use meetup_lib::{error::MeetupError, ordering::OrderingError, speaker, talk};
use sea_orm::{EntityTrait as _, PaginatorTrait as _};

mod base;

fn names(speakers: &[entity::speakers::Model]) -> Vec<&str> {
    speakers.iter().map(|speaker| speaker.name.as_str()).collect()
}

#[tokio::test]
async fn append_creates_association() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let (_, talks) = base::event_with_talks(&db, &["Asyncio"]).await?;
        let talk_id = talks[0].id;
        let ada = speaker::create(&db.sql_conn, "Ada").await?;
        let bob = speaker::create(&db.sql_conn, "Bob").await?;

        let row = talk::append_speaker(&db.sql_conn, talk_id, ada.id).await?;
        assert_eq!((row.talk_id, row.speaker_id, row.index), (talk_id, ada.id, Some(0)));
        assert_eq!(talk_speakers::Entity::find().count(&db.sql_conn).await?, 1);

        talk::append_speaker(&db.sql_conn, talk_id, bob.id).await?;
        assert_eq!(talk_speakers::Entity::find().count(&db.sql_conn).await?, 2);
        assert_eq!(names(&talk::speakers(&db.sql_conn, talk_id).await?), ["Ada", "Bob"]);

        let res = talk::append_speaker(&db.sql_conn, talk_id, ada.id).await;
        assert!(matches!(res, Err(MeetupError::DbError(_))), "{res:?}");
        assert_eq!(talk_speakers::Entity::find().count(&db.sql_conn).await?, 2);

        let res = talk::append_speaker(&db.sql_conn, talk_id, 999).await;
        assert!(matches!(res, Err(MeetupError::SpeakerNotFound(999))));

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn speaker_side_appends_to_talk() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let (_, talks) = base::event_with_talks(&db, &["Asyncio", "Django"]).await?;
        let ada = speaker::create(&db.sql_conn, "Ada").await?;
        let bob = speaker::create(&db.sql_conn, "Bob").await?;

        talk::append_speaker(&db.sql_conn, talks[0].id, ada.id).await?;
        let row = speaker::add_talk(&db.sql_conn, bob.id, talks[0].id).await?;
        assert_eq!(row.index, Some(1));
        speaker::add_talk(&db.sql_conn, bob.id, talks[1].id).await?;

        assert_eq!(
            names(&talk::speakers(&db.sql_conn, talks[0].id).await?),
            ["Ada", "Bob"]
        );
        let bob_talks = speaker::talks(&db.sql_conn, bob.id).await?;
        assert_eq!(base::titles(&bob_talks), ["Asyncio", "Django"]);
        assert_eq!(
            base::titles(&speaker::talks(&db.sql_conn, ada.id).await?),
            ["Asyncio"]
        );

        speaker::remove_talk(&db.sql_conn, bob.id, talks[0].id).await?;
        assert_eq!(names(&talk::speakers(&db.sql_conn, talks[0].id).await?), ["Ada"]);
        assert_eq!(speaker::find_by_name(&db.sql_conn, "Bob").await?, [bob]);

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn insert_remove_and_move_speakers() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let (_, talks) = base::event_with_talks(&db, &["Asyncio"]).await?;
        let talk_id = talks[0].id;
        let mut ids = Vec::new();
        for name in ["Ada", "Bob", "Cyd"] {
            let speaker = speaker::create(&db.sql_conn, name).await?;
            talk::append_speaker(&db.sql_conn, talk_id, speaker.id).await?;
            ids.push(speaker.id);
        }

        let dee = speaker::create(&db.sql_conn, "Dee").await?;
        let row = talk::insert_speaker(&db.sql_conn, talk_id, 1, dee.id).await?;
        assert_eq!(row.index, Some(1));
        assert_eq!(
            names(&talk::speakers(&db.sql_conn, talk_id).await?),
            ["Ada", "Dee", "Bob", "Cyd"]
        );

        talk::remove_speaker(&db.sql_conn, talk_id, ids[0]).await?;
        let rows = talk::talk_speakers(&db.sql_conn, talk_id).await?;
        let indexes: Vec<_> = rows.iter().map(|row| row.index).collect();
        assert_eq!(indexes, [Some(0), Some(1), Some(2)]);

        let rows = talk::move_speaker(&db.sql_conn, talk_id, ids[2], 0).await?;
        let order: Vec<_> = rows.iter().map(|row| row.speaker_id).collect();
        assert_eq!(order, [ids[2], dee.id, ids[1]]);
        assert_eq!(
            names(&talk::speakers(&db.sql_conn, talk_id).await?),
            ["Cyd", "Dee", "Bob"]
        );

        let res = talk::remove_speaker(&db.sql_conn, talk_id, ids[0]).await;
        assert!(matches!(res, Err(MeetupError::SpeakerNotInTalk(_, id)) if id == ids[0]));
        // The speaker itself is still there.
        assert_eq!(speaker::find_by_name(&db.sql_conn, "Ada").await?.len(), 1);

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn set_speakers() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let (_, talks) = base::event_with_talks(&db, &["Asyncio"]).await?;
        let talk_id = talks[0].id;
        let mut ids = Vec::new();
        for name in ["Ada", "Bob", "Cyd"] {
            ids.push(speaker::create(&db.sql_conn, name).await?.id);
        }
        talk::append_speaker(&db.sql_conn, talk_id, ids[0]).await?;
        talk::append_speaker(&db.sql_conn, talk_id, ids[1]).await?;

        let rows = talk::set_speakers(&db.sql_conn, talk_id, &[ids[2], ids[0]]).await?;
        let order: Vec<_> = rows.iter().map(|row| (row.speaker_id, row.index)).collect();
        assert_eq!(order, [(ids[2], Some(0)), (ids[0], Some(1))]);
        assert_eq!(
            names(&talk::speakers(&db.sql_conn, talk_id).await?),
            ["Cyd", "Ada"]
        );
        assert_eq!(talk_speakers::Entity::find().count(&db.sql_conn).await?, 2);

        let res = talk::set_speakers(&db.sql_conn, talk_id, &[ids[1], ids[1]]).await;
        assert!(matches!(
            res,
            Err(MeetupError::Ordering(OrderingError::NotAPermutation))
        ));
        assert_eq!(
            names(&talk::speakers(&db.sql_conn, talk_id).await?),
            ["Cyd", "Ada"]
        );

        talk::set_speakers(&db.sql_conn, talk_id, &[]).await?;
        assert!(talk::speakers(&db.sql_conn, talk_id).await?.is_empty());

        anyhow::Ok(())
    })
    .await
}
