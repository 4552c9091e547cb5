//! Student profile service.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use myark_core::error::AppError;
use myark_database::repositories::ProfileRepository;
use myark_entity::gamification::ProfileSync;
use myark_entity::profile::{ProfileCompletion, PublicStudentProfile, StudentProfile};

use super::completion::completion;
use super::validation::{ProfileUpdate, is_valid_slug};
use crate::context::RequestContext;
use crate::gamification::GamificationService;

/// A profile with its completion summary and public path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub profile: StudentProfile,
    pub completion: ProfileCompletion,
    pub shareable_path: Option<String>,
}

impl From<StudentProfile> for ProfileView {
    fn from(profile: StudentProfile) -> Self {
        Self {
            completion: completion(&profile),
            shareable_path: profile.shareable_path(),
            profile,
        }
    }
}

/// Creates, edits, and syncs student profiles.
#[derive(Debug, Clone)]
pub struct ProfileService {
    repo: Arc<ProfileRepository>,
    gamification: Arc<GamificationService>,
}

impl ProfileService {
    /// Creates a new profile service.
    pub fn new(repo: Arc<ProfileRepository>, gamification: Arc<GamificationService>) -> Self {
        Self { repo, gamification }
    }

    /// The caller's profile, created as a private profile on first access.
    pub async fn get(&self, ctx: &RequestContext) -> Result<ProfileView, AppError> {
        Ok(self.ensure(ctx).await?.into())
    }

    /// Apply a validated partial update, then mirror the result into the
    /// caller's gamification record.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        update: ProfileUpdate,
    ) -> Result<ProfileView, AppError> {
        let mut profile = self.ensure(ctx).await?;
        update.apply_to(&mut profile)?;
        profile.updated_at = Utc::now();

        let saved = self.repo.save(&profile).await?;
        let view = ProfileView::from(saved);
        info!(
            uid = %ctx.user_id,
            completion = view.completion.percent,
            "Student profile updated"
        );

        self.sync(&view).await;
        Ok(view)
    }

    /// The public profile behind `/student/{slug}`.
    ///
    /// Malformed slugs, unknown slugs and non-public profiles are all
    /// reported as not found.
    pub async fn public_by_slug(&self, raw_slug: &str) -> Result<PublicStudentProfile, AppError> {
        let slug = lookup_slug(raw_slug).ok_or_else(profile_not_found)?;
        self.repo
            .find_by_slug(&slug)
            .await?
            .and_then(|profile| profile.to_public())
            .ok_or_else(profile_not_found)
    }

    async fn ensure(&self, ctx: &RequestContext) -> Result<StudentProfile, AppError> {
        if let Some(profile) = self.repo.find_by_uid(&ctx.user_id).await? {
            return Ok(profile);
        }
        let profile = StudentProfile::new(&ctx.user_id, ctx.display_name(), Utc::now());
        let created = self.repo.insert_if_missing(&profile).await?;
        info!(uid = %ctx.user_id, "Student profile created");
        Ok(created)
    }

    async fn sync(&self, view: &ProfileView) {
        let profile = &view.profile;
        let sync = ProfileSync {
            display_name: Some(profile.display_name.clone()),
            photo_url: profile.photo_url.clone(),
            school_id: profile.school_id.clone(),
            school_name: profile.school_info.school_name.clone(),
            profile_completion: i32::try_from(view.completion.percent).ok(),
        };
        if let Err(e) = self.gamification.sync_profile(&profile.uid, sync).await {
            warn!(uid = %profile.uid, error = %e, "Failed to sync profile into gamification");
        }
    }
}

fn profile_not_found() -> AppError {
    AppError::not_found("Profile not found")
}

/// Normalise a slug taken from a public link; `None` when it cannot exist.
fn lookup_slug(raw: &str) -> Option<String> {
    let slug = raw.trim().to_lowercase();
    is_valid_slug(&slug).then_some(slug)
}
