//! Student profile entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

/// Who may see a student profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "profile_visibility", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProfileVisibility {
    #[default]
    Private,
    Teachers,
    Public,
}

/// School details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchoolInfo {
    pub school_name: Option<String>,
    pub board: Option<String>,
    pub class_name: Option<String>,
}

/// A subject and the score obtained in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectScore {
    pub name: String,
    #[serde(default)]
    pub score: Option<f64>,
}

/// One academic year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicYear {
    pub year: String,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub subjects: Vec<SubjectScore>,
}

/// An award or recognition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

/// A competition the student took part in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub name: String,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

/// An extracurricular activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extracurricular {
    pub activity: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Profile display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettings {
    pub allow_download: bool,
    pub show_progress_bar: bool,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            allow_download: false,
            show_progress_bar: true,
        }
    }
}

/// A student's portfolio profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub uid: String,
    pub display_name: String,
    pub tagline: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub location: Option<String>,
    pub interests: Vec<String>,
    pub visibility: ProfileVisibility,
    /// Lowercase public link slug, unique across profiles.
    pub slug: Option<String>,
    pub school_id: Option<String>,
    pub school_info: Json<SchoolInfo>,
    pub academic_history: Json<Vec<AcademicYear>>,
    pub achievements: Json<Vec<Achievement>>,
    pub competitions: Json<Vec<Competition>>,
    pub extracurriculars: Json<Vec<Extracurricular>>,
    pub settings: Json<ProfileSettings>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StudentProfile {
    /// A new private profile.
    pub fn new(uid: impl Into<String>, display_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            uid: uid.into(),
            display_name: display_name.into(),
            tagline: None,
            bio: None,
            photo_url: None,
            location: None,
            interests: Vec::new(),
            visibility: ProfileVisibility::Private,
            slug: None,
            school_id: None,
            school_info: Json(SchoolInfo::default()),
            academic_history: Json(Vec::new()),
            achievements: Json(Vec::new()),
            competitions: Json(Vec::new()),
            extracurriculars: Json(Vec::new()),
            settings: Json(ProfileSettings::default()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Public path of the profile, if it has a slug.
    pub fn shareable_path(&self) -> Option<String> {
        self.slug.as_ref().map(|s| format!("/student/{}", s.to_lowercase()))
    }
}

/// The part of a profile shown at its public link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicStudentProfile {
    pub display_name: String,
    pub slug: String,
    pub tagline: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub school_info: SchoolInfo,
    pub academic_highlights: Vec<AcademicYear>,
    pub achievements: Vec<Achievement>,
    pub competitions: Vec<Competition>,
    pub extracurriculars: Vec<Extracurricular>,
    pub interests: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StudentProfile {
    /// The public projection, or `None` unless the profile is public and
    /// has a slug.
    pub fn to_public(&self) -> Option<PublicStudentProfile> {
        if self.visibility != ProfileVisibility::Public {
            return None;
        }
        let slug = self.slug.as_deref().filter(|s| !s.is_empty())?;
        let display_name = if self.display_name.trim().is_empty() {
            "Student".to_string()
        } else {
            self.display_name.clone()
        };
        Some(PublicStudentProfile {
            display_name,
            slug: slug.to_lowercase(),
            tagline: self.tagline.clone(),
            bio: self.bio.clone(),
            photo_url: self.photo_url.clone(),
            school_info: self.school_info.0.clone(),
            academic_highlights: self.academic_history.0.clone(),
            achievements: self.achievements.0.clone(),
            competitions: self.competitions.0.clone(),
            extracurriculars: self.extracurriculars.0.clone(),
            interests: self.interests.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Completion summary shown on the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCompletion {
    pub percent: u32,
    pub completed_steps: Vec<String>,
    pub total_steps: u32,
}
