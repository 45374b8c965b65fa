//! Catalog query service
//!
//! Read-only views composed from fixed-parameter catalog listings.
//! Repeated calls with no intervening writes return identical results.

use crate::db::{beats, profiles};
use crate::db::beats::{BeatFilter, BeatOrder};
use bstore_common::db::models::{Beat, Profile};
use bstore_common::{Error, Result};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Latest beats shown on the home view
pub const HOME_LATEST_COUNT: u32 = 8;
/// Most-played beats shown on the home view
pub const HOME_POPULAR_COUNT: u32 = 8;
/// Curated featured beats shown on the home view
pub const HOME_FEATURED_COUNT: u32 = 4;
/// Same-genre picks shown next to a beat's detail view
pub const RELATED_COUNT: u32 = 4;

#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub latest: Vec<Beat>,
    pub popular: Vec<Beat>,
    pub featured: Vec<Beat>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailView {
    pub beat: Beat,
    /// Up to four beats sharing the genre, never the beat itself
    pub related: Vec<Beat>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub profile: Profile,
    pub beats: Vec<Beat>,
}

/// Home view: latest 8, most-played 8, featured up to 4
pub async fn home_view(pool: &SqlitePool) -> Result<HomeView> {
    let latest = beats::list_beats(
        pool,
        BeatFilter::default(),
        BeatOrder::CreatedDesc,
        Some(HOME_LATEST_COUNT),
    )
    .await?;

    let popular = beats::list_beats(
        pool,
        BeatFilter::default(),
        BeatOrder::PlaysDesc,
        Some(HOME_POPULAR_COUNT),
    )
    .await?;

    let featured = beats::list_beats(
        pool,
        BeatFilter {
            featured: Some(true),
            ..Default::default()
        },
        BeatOrder::Default,
        Some(HOME_FEATURED_COUNT),
    )
    .await?;

    Ok(HomeView {
        latest,
        popular,
        featured,
    })
}

/// Detail view: the beat plus its same-genre related picks
pub async fn detail_view(pool: &SqlitePool, id: i64) -> Result<DetailView> {
    let beat = beats::get_beat(pool, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("beat {}", id)))?;

    let related = beats::list_beats(
        pool,
        BeatFilter {
            genre: Some(beat.genre),
            exclude_id: Some(beat.id),
            ..Default::default()
        },
        BeatOrder::Default,
        Some(RELATED_COUNT),
    )
    .await?;

    Ok(DetailView { beat, related })
}

/// Profile view: the account's profile and its full catalog, newest first
pub async fn profile_view(pool: &SqlitePool, account: Uuid) -> Result<ProfileView> {
    let profile = profiles::get_profile(pool, account)
        .await?
        .ok_or_else(|| Error::NotFound(format!("profile for account {}", account)))?;

    let beats = beats::list_beats(
        pool,
        BeatFilter {
            producer: Some(account),
            ..Default::default()
        },
        BeatOrder::CreatedDesc,
        None,
    )
    .await?;

    Ok(ProfileView { profile, beats })
}
