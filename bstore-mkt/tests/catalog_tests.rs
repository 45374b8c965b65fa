//! Catalog query integration tests
//!
//! Home/detail/profile view composition: result caps, orderings and
//! their tie-breaks, related-beat selection, read idempotence.

use bstore_mkt::services::{Marketplace, MediaStore};
use bstore_mkt::validators::{BeatSubmission, UploadedBlob};
use tempfile::TempDir;
use uuid::Uuid;

async fn test_marketplace() -> (Marketplace, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    bstore_common::config::ensure_root_layout(dir.path()).unwrap();

    let db_path = bstore_common::config::database_path(dir.path());
    let pool = bstore_common::db::init_database(&db_path).await.unwrap();

    let media = MediaStore::new(bstore_common::config::media_dir(dir.path()));
    (Marketplace::new(pool, media), dir)
}

fn submission(title: &str, genre: &str) -> BeatSubmission {
    BeatSubmission {
        title: Some(title.to_string()),
        genre: Some(genre.to_string()),
        bpm: Some("120".to_string()),
        audio: Some(UploadedBlob::new(Some("loop.mp3".to_string()), vec![5u8; 256])),
        ..Default::default()
    }
}

async fn seed_beats(marketplace: &Marketplace, producer: Uuid, genre: &str, count: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let id = marketplace
            .submit_beat(producer, submission(&format!("{} #{}", genre, i + 1), genre))
            .await
            .unwrap();
        ids.push(id);
    }
    ids
}

async fn set_plays(marketplace: &Marketplace, id: i64, plays: i64) {
    sqlx::query("UPDATE beats SET plays = ? WHERE id = ?")
        .bind(plays)
        .bind(id)
        .execute(marketplace.db())
        .await
        .unwrap();
}

async fn set_featured(marketplace: &Marketplace, id: i64) {
    sqlx::query("UPDATE beats SET is_featured = 1 WHERE id = ?")
        .bind(id)
        .execute(marketplace.db())
        .await
        .unwrap();
}

#[tokio::test]
async fn home_view_respects_caps() {
    let (marketplace, _root) = test_marketplace().await;
    let producer = marketplace.register("prolific").await.unwrap();
    let ids = seed_beats(&marketplace, producer, "Trap", 12).await;

    for id in ids.iter().take(6) {
        set_featured(&marketplace, *id).await;
    }

    let home = marketplace.browse_home().await.unwrap();
    assert_eq!(home.latest.len(), 8, "latest is capped at 8");
    assert_eq!(home.popular.len(), 8, "popular is capped at 8");
    assert_eq!(home.featured.len(), 4, "featured is capped at 4");
    assert!(home.featured.iter().all(|b| b.is_featured));
}

#[tokio::test]
async fn latest_orders_newest_first() {
    let (marketplace, _root) = test_marketplace().await;
    let producer = marketplace.register("steady").await.unwrap();
    let ids = seed_beats(&marketplace, producer, "House", 10).await;

    let home = marketplace.browse_home().await.unwrap();
    let got: Vec<i64> = home.latest.iter().map(|b| b.id).collect();
    let expected: Vec<i64> = ids.iter().rev().take(8).copied().collect();
    assert_eq!(got, expected);
}

#[tokio::test]
async fn popular_orders_by_plays_with_id_tiebreak() {
    let (marketplace, _root) = test_marketplace().await;
    let producer = marketplace.register("steady").await.unwrap();
    let ids = seed_beats(&marketplace, producer, "Drill", 4).await;

    set_plays(&marketplace, ids[0], 5).await;
    set_plays(&marketplace, ids[1], 5).await;
    set_plays(&marketplace, ids[2], 9).await;

    let home = marketplace.browse_home().await.unwrap();
    let got: Vec<i64> = home.popular.iter().map(|b| b.id).collect();
    // 9 plays first; the 5-play tie resolves newest-id-first; the
    // zero-play beat trails
    assert_eq!(got, vec![ids[2], ids[1], ids[0], ids[3]]);
}

#[tokio::test]
async fn featured_keeps_insertion_order() {
    let (marketplace, _root) = test_marketplace().await;
    let producer = marketplace.register("curated").await.unwrap();
    let ids = seed_beats(&marketplace, producer, "Pop", 8).await;

    for pick in [ids[6], ids[1], ids[4]] {
        set_featured(&marketplace, pick).await;
    }

    let home = marketplace.browse_home().await.unwrap();
    let got: Vec<i64> = home.featured.iter().map(|b| b.id).collect();
    assert_eq!(got, vec![ids[1], ids[4], ids[6]]);
}

#[tokio::test]
async fn detail_view_finds_related_by_genre() {
    let (marketplace, _root) = test_marketplace().await;
    let first = marketplace.register("first").await.unwrap();
    let second = marketplace.register("second").await.unwrap();

    let lofi_a = marketplace
        .submit_beat(first, submission("Late Night", "Lo-fi"))
        .await
        .unwrap();
    let lofi_b = marketplace
        .submit_beat(second, submission("Rainy Window", "Lo-fi"))
        .await
        .unwrap();
    let trap = marketplace
        .submit_beat(second, submission("Hard Eight", "Trap"))
        .await
        .unwrap();

    let detail = marketplace.browse_detail(lofi_a).await.unwrap();
    let related_ids: Vec<i64> = detail.related.iter().map(|b| b.id).collect();

    assert_eq!(related_ids, vec![lofi_b], "related picks share the genre across producers");
    assert!(!related_ids.contains(&lofi_a), "a beat is never related to itself");
    assert!(!related_ids.contains(&trap));
    assert!(detail.related.iter().all(|b| b.genre == detail.beat.genre));
}

#[tokio::test]
async fn related_picks_cap_at_four() {
    let (marketplace, _root) = test_marketplace().await;
    let producer = marketplace.register("ambient-only").await.unwrap();
    let ids = seed_beats(&marketplace, producer, "Ambient", 6).await;

    let detail = marketplace.browse_detail(ids[5]).await.unwrap();
    let related_ids: Vec<i64> = detail.related.iter().map(|b| b.id).collect();

    // Store-default order: the four earliest entries, requested beat excluded
    assert_eq!(related_ids, vec![ids[0], ids[1], ids[2], ids[3]]);
}

#[tokio::test]
async fn detail_of_missing_beat_is_not_found() {
    let (marketplace, _root) = test_marketplace().await;

    let err = marketplace.browse_detail(4242).await.unwrap_err();
    assert!(matches!(err, bstore_common::Error::NotFound(_)));
}

#[tokio::test]
async fn browse_results_are_idempotent_without_writes() {
    let (marketplace, _root) = test_marketplace().await;
    let producer = marketplace.register("steady").await.unwrap();
    let ids = seed_beats(&marketplace, producer, "Trap", 5).await;

    let home_a = serde_json::to_value(marketplace.browse_home().await.unwrap()).unwrap();
    let home_b = serde_json::to_value(marketplace.browse_home().await.unwrap()).unwrap();
    assert_eq!(home_a, home_b);

    let detail_a = serde_json::to_value(marketplace.browse_detail(ids[0]).await.unwrap()).unwrap();
    let detail_b = serde_json::to_value(marketplace.browse_detail(ids[0]).await.unwrap()).unwrap();
    assert_eq!(detail_a, detail_b);
}

#[tokio::test]
async fn profile_view_lists_own_beats_newest_first() {
    let (marketplace, _root) = test_marketplace().await;
    let producer = marketplace.register("owner").await.unwrap();
    let other = marketplace.register("other").await.unwrap();

    let ids = seed_beats(&marketplace, producer, "Rnb", 3).await;
    seed_beats(&marketplace, other, "Rnb", 2).await;

    let view = marketplace.browse_profile(producer).await.unwrap();
    assert_eq!(view.profile.account_guid, producer);

    let got: Vec<i64> = view.beats.iter().map(|b| b.id).collect();
    let expected: Vec<i64> = ids.iter().rev().copied().collect();
    assert_eq!(got, expected, "own catalog only, newest first, unbounded");
}

#[tokio::test]
async fn profile_update_round_trips() {
    let (marketplace, _root) = test_marketplace().await;
    let account = marketplace.register("editor").await.unwrap();

    let before = marketplace.browse_profile(account).await.unwrap().profile;
    assert!(before.bio.is_none());

    let changes = bstore_mkt::db::profiles::ProfileUpdate {
        bio: Some("trap since 2014".to_string()),
        soundcloud: Some("editor-beats".to_string()),
        ..Default::default()
    };
    marketplace.edit_profile(account, &changes).await.unwrap();

    let after = marketplace.browse_profile(account).await.unwrap().profile;
    assert_eq!(after.bio.as_deref(), Some("trap since 2014"));
    assert_eq!(after.soundcloud.as_deref(), Some("editor-beats"));
    assert!(after.updated_at >= before.updated_at);

    let err = marketplace
        .edit_profile(Uuid::new_v4(), &Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, bstore_common::Error::NotFound(_)));
}
