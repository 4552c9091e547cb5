//! Student profile repository.

use sqlx::PgPool;

use myark_core::error::{AppError, ErrorKind};
use myark_core::result::AppResult;
use myark_entity::profile::StudentProfile;

use super::is_unique_violation;

/// Repository for student portfolio profiles.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a profile by user id.
    pub async fn find_by_uid(&self, uid: &str) -> AppResult<Option<StudentProfile>> {
        sqlx::query_as::<_, StudentProfile>("SELECT * FROM student_profiles WHERE uid = $1")
            .bind(uid)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find profile", e))
    }

    /// Find a profile by its lowercase public slug.
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<StudentProfile>> {
        sqlx::query_as::<_, StudentProfile>("SELECT * FROM student_profiles WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find profile by slug", e)
            })
    }

    /// Insert `profile` unless the user already has one; returns the stored row.
    pub async fn insert_if_missing(&self, profile: &StudentProfile) -> AppResult<StudentProfile> {
        sqlx::query(
            "INSERT INTO student_profiles (uid, display_name, visibility, settings, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) ON CONFLICT (uid) DO NOTHING",
        )
        .bind(&profile.uid)
        .bind(&profile.display_name)
        .bind(profile.visibility)
        .bind(&profile.settings)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create profile", e))?;

        self.find_by_uid(&profile.uid)
            .await?
            .ok_or_else(|| AppError::internal(format!("Profile for {} vanished", profile.uid)))
    }

    /// Write every editable field of a profile.
    ///
    /// Fails with `Conflict` when the slug belongs to another profile.
    pub async fn save(&self, profile: &StudentProfile) -> AppResult<StudentProfile> {
        sqlx::query_as::<_, StudentProfile>(
            "UPDATE student_profiles SET display_name = $2, tagline = $3, bio = $4, photo_url = $5, \
             location = $6, interests = $7, visibility = $8, slug = $9, school_id = $10, \
             school_info = $11, academic_history = $12, achievements = $13, competitions = $14, \
             extracurriculars = $15, settings = $16, updated_at = $17 \
             WHERE uid = $1 RETURNING *",
        )
        .bind(&profile.uid)
        .bind(&profile.display_name)
        .bind(&profile.tagline)
        .bind(&profile.bio)
        .bind(&profile.photo_url)
        .bind(&profile.location)
        .bind(&profile.interests)
        .bind(profile.visibility)
        .bind(&profile.slug)
        .bind(&profile.school_id)
        .bind(&profile.school_info)
        .bind(&profile.academic_history)
        .bind(&profile.achievements)
        .bind(&profile.competitions)
        .bind(&profile.extracurriculars)
        .bind(&profile.settings)
        .bind(profile.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("That profile link is already taken")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to save profile", e)
            }
        })?
        .ok_or_else(|| AppError::not_found(format!("Profile for {} not found", profile.uid)))
    }
}
