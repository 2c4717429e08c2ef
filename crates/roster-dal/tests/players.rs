use futures::TryStreamExt as _;
use roster_dal::{
    ListingParams,
    filter::PlayerFilter,
    player::{
        CreatePlayer, NewPlayer, PlayerOrder, PlayerRepositoryImpl, Profession, Race,
        UpdatePlayer,
    },
};
use sqlx::Executor;

const TEST_DATA: &str = r#"
INSERT INTO player (id, name, title, race, profession, birthday, banned, experience, level, until_next_level)
VALUES (1, 'Ragnar', 'Of the North', 'HUMAN', 'WARRIOR', 1000000000000, 0, 100, 1, 200);
INSERT INTO player (id, name, title, race, profession, birthday, banned, experience, level, until_next_level)
VALUES (2, 'Gimli', 'Axe Master', 'DWARF', 'WARRIOR', 1100000000000, 1, 150, 1, 150);
INSERT INTO player (id, name, title, race, profession, birthday, banned, experience, level, until_next_level)
VALUES (3, 'Legolas', 'Keen Eye', 'ELF', 'ROGUE', 1200000000000, 0, 200, 1, 100);
INSERT INTO player (id, name, title, race, profession, birthday, banned, experience, level, until_next_level)
VALUES (4, 'ragnarok', 'Doom', 'GIANT', 'SORCERER', 1300000000000, 0, 5000, 9, 500);
INSERT INTO player (id, name, title, race, profession, birthday, banned, experience, level, until_next_level)
VALUES (5, 'Frodo', 'Ring Bearer', 'HOBBIT', 'ROGUE', 1400000000000, 0, 0, 0, 100);
"#;

async fn init_db() -> sqlx::Pool<sqlx::Sqlite> {
    const DB_URL: &str = "sqlite::memory:";
    let conn = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect(DB_URL)
        .await
        .unwrap();
    roster_dal::migrate(&conn).await.unwrap();

    conn.execute_many(TEST_DATA)
        .try_collect::<Vec<_>>()
        .await
        .unwrap();

    conn
}

fn ids(players: &[roster_dal::player::Player]) -> Vec<i64> {
    players.iter().map(|p| p.id).collect()
}

#[tokio::test]
async fn test_list_experience_range() {
    let conn = init_db().await;
    let repo = PlayerRepositoryImpl::new(conn);

    let filter = PlayerFilter {
        min_experience: Some(100),
        max_experience: Some(200),
        ..Default::default()
    };
    let players = repo.list(&filter, ListingParams::default()).await.unwrap();
    assert_eq!(vec![1, 2, 3], ids(&players));
    assert_eq!(3, repo.count(&filter).await.unwrap());

    let all = repo
        .list(&PlayerFilter::default(), ListingParams::default())
        .await
        .unwrap();
    assert_eq!(5, all.len());
    assert_eq!(5, repo.count(&PlayerFilter::default()).await.unwrap());
}

#[tokio::test]
async fn test_name_is_case_sensitive_substring() {
    let conn = init_db().await;
    let repo = PlayerRepositoryImpl::new(conn);

    let filter = PlayerFilter {
        name: Some("agnar".to_string()),
        ..Default::default()
    };
    let players = repo.list(&filter, ListingParams::default()).await.unwrap();
    assert_eq!(vec![1, 4], ids(&players));

    let filter = PlayerFilter {
        name: Some("Ragnar".to_string()),
        ..Default::default()
    };
    let players = repo.list(&filter, ListingParams::default()).await.unwrap();
    assert_eq!(vec![1], ids(&players));

    let filter = PlayerFilter {
        name: Some("%".to_string()),
        ..Default::default()
    };
    assert_eq!(0, repo.count(&filter).await.unwrap());
}

#[tokio::test]
async fn test_title_is_case_sensitive_substring() {
    let conn = init_db().await;
    let repo = PlayerRepositoryImpl::new(conn);

    let filter = PlayerFilter {
        title: Some("e".to_string()),
        ..Default::default()
    };
    let players = repo.list(&filter, ListingParams::default()).await.unwrap();
    assert_eq!(vec![1, 2, 3, 5], ids(&players));

    let filter = PlayerFilter {
        title: Some("Eye".to_string()),
        ..Default::default()
    };
    let players = repo.list(&filter, ListingParams::default()).await.unwrap();
    assert_eq!(vec![3], ids(&players));

    let filter = PlayerFilter {
        title: Some("eye".to_string()),
        ..Default::default()
    };
    assert_eq!(0, repo.count(&filter).await.unwrap());
}

#[tokio::test]
async fn test_half_open_ranges() {
    let conn = init_db().await;
    let repo = PlayerRepositoryImpl::new(conn);

    let filter = PlayerFilter {
        min_experience: Some(200),
        ..Default::default()
    };
    let players = repo.list(&filter, ListingParams::default()).await.unwrap();
    assert_eq!(vec![3, 4], ids(&players));

    let filter = PlayerFilter {
        max_experience: Some(100),
        ..Default::default()
    };
    let players = repo.list(&filter, ListingParams::default()).await.unwrap();
    assert_eq!(vec![1, 5], ids(&players));

    let filter = PlayerFilter {
        min_level: Some(1),
        ..Default::default()
    };
    let players = repo.list(&filter, ListingParams::default()).await.unwrap();
    assert_eq!(vec![1, 2, 3, 4], ids(&players));
    assert_eq!(4, repo.count(&filter).await.unwrap());

    let filter = PlayerFilter {
        max_level: Some(0),
        ..Default::default()
    };
    assert_eq!(1, repo.count(&filter).await.unwrap());
}

#[tokio::test]
async fn test_exact_filters() {
    let conn = init_db().await;
    let repo = PlayerRepositoryImpl::new(conn);

    let filter = PlayerFilter {
        profession: Some(Profession::Rogue),
        banned: Some(false),
        ..Default::default()
    };
    let players = repo.list(&filter, ListingParams::default()).await.unwrap();
    assert_eq!(vec![3, 5], ids(&players));

    let filter = PlayerFilter {
        race: Some(Race::Dwarf),
        ..Default::default()
    };
    let players = repo.list(&filter, ListingParams::default()).await.unwrap();
    assert_eq!(vec![2], ids(&players));
    assert!(players[0].banned);

    let filter = PlayerFilter {
        min_level: Some(1),
        max_level: Some(1),
        before: Some(1_150_000_000_000),
        ..Default::default()
    };
    assert_eq!(2, repo.count(&filter).await.unwrap());
}

#[tokio::test]
async fn test_empty_birthday_range() {
    let conn = init_db().await;
    let repo = PlayerRepositoryImpl::new(conn);

    let filter = PlayerFilter {
        after: Some(0),
        before: Some(0),
        ..Default::default()
    };
    let players = repo.list(&filter, ListingParams::default()).await.unwrap();
    assert!(players.is_empty());
    assert_eq!(0, repo.count(&filter).await.unwrap());
}

#[tokio::test]
async fn test_paging_and_order() {
    let conn = init_db().await;
    let repo = PlayerRepositoryImpl::new(conn);
    let filter = PlayerFilter::default();

    let first = repo.list(&filter, ListingParams::page(0, 3)).await.unwrap();
    assert_eq!(vec![1, 2, 3], ids(&first));
    let second = repo.list(&filter, ListingParams::page(1, 3)).await.unwrap();
    assert_eq!(vec![4, 5], ids(&second));
    let third = repo.list(&filter, ListingParams::page(2, 3)).await.unwrap();
    assert!(third.is_empty());

    let by_name = repo
        .list(
            &filter,
            ListingParams::page(0, 10).with_order(PlayerOrder::Name),
        )
        .await
        .unwrap();
    // binary collation, upper case first
    assert_eq!(vec![5, 2, 3, 1, 4], ids(&by_name));

    let by_level = repo
        .list(
            &filter,
            ListingParams::page(0, 10).with_order(PlayerOrder::Level),
        )
        .await
        .unwrap();
    assert_eq!(vec![5, 1, 2, 3, 4], ids(&by_level));
}

#[tokio::test]
async fn test_create_save_delete() {
    let conn = init_db().await;
    let repo = PlayerRepositoryImpl::new(conn);

    let payload = CreatePlayer {
        name: Some("Aragorn".to_string()),
        title: Some("King".to_string()),
        race: Some(Race::Human),
        profession: Some(Profession::Paladin),
        birthday: Some(1_050_000_000_000),
        banned: None,
        experience: Some(300),
    };
    let new_player = NewPlayer::try_from(payload).unwrap();
    let mut player = repo.create(new_player).await.unwrap();
    assert_eq!(6, player.id);
    assert!(!player.banned);
    assert_eq!(2, player.level);
    assert_eq!(300, player.until_next_level);

    player.apply(UpdatePlayer {
        title: Some("King of Gondor".to_string()),
        ..Default::default()
    });
    let saved = repo.save(&player).await.unwrap();
    assert_eq!(player, saved);
    assert_eq!(saved, repo.get(6).await.unwrap());

    repo.delete(6).await.unwrap();
    let res = repo.get(6).await;
    assert!(matches!(res, Err(roster_dal::Error::RecordNotFound(_))));
    let res = repo.delete(6).await;
    assert!(matches!(res, Err(roster_dal::Error::RecordNotFound(_))));
}
