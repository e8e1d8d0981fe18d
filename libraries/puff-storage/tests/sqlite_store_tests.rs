mod test_helpers;

use puff_core::KeyValueStore;
use puff_storage::{create_pool, run_migrations, SqliteStore};
use test_helpers::TestDb;

#[tokio::test]
async fn test_get_missing_key() {
    let db = TestDb::new().await;
    assert_eq!(db.store.get("missing").await.unwrap(), None);
}

#[tokio::test]
async fn test_set_and_overwrite() {
    let db = TestDb::new().await;

    db.store.set("puff.tracks", "[]").await.unwrap();
    db.store.set("puff.tracks", "[1]").await.unwrap();

    assert_eq!(
        db.store.get("puff.tracks").await.unwrap().as_deref(),
        Some("[1]")
    );
}

#[tokio::test]
async fn test_set_many_writes_every_key() {
    let db = TestDb::new().await;

    db.store
        .set_many(&[("a", "1".to_string()), ("b", "2".to_string())])
        .await
        .unwrap();

    assert_eq!(db.store.get("a").await.unwrap().as_deref(), Some("1"));
    assert_eq!(db.store.get("b").await.unwrap().as_deref(), Some("2"));
}

#[tokio::test]
async fn test_remove_ignores_missing_keys() {
    let db = TestDb::new().await;
    db.store.set("a", "1").await.unwrap();

    db.store.remove(&["a", "never-written"]).await.unwrap();

    assert_eq!(db.store.get("a").await.unwrap(), None);
}

#[tokio::test]
async fn test_values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("puff.db").display());

    {
        let pool = create_pool(&url).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteStore::new(pool.clone())
            .set("puff.last_played", "abc")
            .await
            .unwrap();
        pool.close().await;
    }

    let pool = create_pool(&url).await.unwrap();
    run_migrations(&pool).await.unwrap();
    let store = SqliteStore::new(pool);

    assert_eq!(
        store.get("puff.last_played").await.unwrap().as_deref(),
        Some("abc")
    );
}

#[tokio::test]
async fn test_in_memory_pool() {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    let store = SqliteStore::new(pool);

    store.set("k", "v").await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
}
