//! Marketplace facade
//!
//! The one component the outside binds to. A submission runs validate →
//! persist media → insert catalog row; validation failures return before
//! anything is written. Reads delegate to the catalog query service.
//!
//! Every operation takes the acting account explicitly — the
//! authenticated principal is a parameter, never ambient state.

use crate::db::{beats, profiles};
use crate::db::beats::NewBeat;
use crate::db::profiles::ProfileUpdate;
use crate::services::catalog::{self, DetailView, HomeView, ProfileView};
use crate::services::media::MediaStore;
use crate::validators::{validate_submission, BeatSubmission, ValidationError};
use sqlx::SqlitePool;
use std::path::Path;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Outcome of a failed submission
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The submission was rejected before any persistence attempt
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The media or catalog store failed; propagated unchanged
    #[error(transparent)]
    Storage(#[from] bstore_common::Error),
}

#[derive(Clone)]
pub struct Marketplace {
    db: SqlitePool,
    media: MediaStore,
}

impl Marketplace {
    pub fn new(db: SqlitePool, media: MediaStore) -> Self {
        Self { db, media }
    }

    pub fn db(&self) -> &SqlitePool {
        &self.db
    }

    pub fn media_root(&self) -> &Path {
        self.media.root()
    }

    /// Registration intake: create the account and its empty profile
    pub async fn register(&self, username: &str) -> bstore_common::Result<Uuid> {
        let account = profiles::create_account(&self.db, username).await?;
        info!("Registered account {} ({})", username.trim(), account);
        Ok(account)
    }

    /// Submit a beat on behalf of `producer`
    ///
    /// Fail-fast: the validator sees the whole submission before the
    /// media store or the catalog is touched. Storage failures propagate
    /// unchanged; there are no compensating deletes.
    pub async fn submit_beat(
        &self,
        producer: Uuid,
        submission: BeatSubmission,
    ) -> Result<i64, SubmitError> {
        let validated = validate_submission(submission)?;

        let (audio_file, audio_sha256) = self.media.store_audio(&validated.audio).await?;
        let cover_image = match &validated.cover {
            Some(blob) => Some(self.media.store_cover(blob).await?),
            None => None,
        };

        let new_beat = NewBeat {
            title: validated.title,
            audio_file,
            audio_sha256,
            cover_image,
            price: validated.price,
            genre: validated.genre,
            bpm: validated.bpm,
            description: validated.description,
            tags: validated.tags,
            free_download: validated.free_download,
        };

        let id = beats::insert_beat(&self.db, &new_beat, producer).await?;
        info!("Catalog entry {} created by producer {}", id, producer);
        Ok(id)
    }

    /// Home view: latest, most played, featured
    pub async fn browse_home(&self) -> bstore_common::Result<HomeView> {
        catalog::home_view(&self.db).await
    }

    /// Detail view for one beat
    pub async fn browse_detail(&self, id: i64) -> bstore_common::Result<DetailView> {
        catalog::detail_view(&self.db, id).await
    }

    /// The caller's own profile and catalog
    pub async fn browse_profile(&self, account: Uuid) -> bstore_common::Result<ProfileView> {
        catalog::profile_view(&self.db, account).await
    }

    /// Replace the caller's profile fields
    pub async fn edit_profile(
        &self,
        account: Uuid,
        changes: &ProfileUpdate,
    ) -> bstore_common::Result<()> {
        profiles::update_profile(&self.db, account, changes).await
    }
}
