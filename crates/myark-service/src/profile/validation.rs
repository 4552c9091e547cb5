//! Student profile update payload and its validation.

use serde::{Deserialize, Deserializer};
use sqlx::types::Json;

use myark_core::error::AppError;
use myark_entity::profile::{
    AcademicYear, Achievement, Competition, Extracurricular, ProfileSettings, ProfileVisibility,
    SchoolInfo, StudentProfile,
};

pub const MAX_INTERESTS: usize = 20;
pub const MAX_HISTORY_ITEMS: usize = 12;
pub const MAX_ACHIEVEMENTS: usize = 60;
pub const MAX_COMPETITIONS: usize = 60;
pub const MAX_EXTRACURRICULARS: usize = 60;

const SLUG_MIN: usize = 3;
const SLUG_MAX: usize = 60;
const INTEREST_MAX: usize = 40;

/// Maps an explicit `null` to `Some(None)` so it can clear a field.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial school details.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SchoolInfoUpdate {
    #[serde(default, deserialize_with = "nullable")]
    pub school_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub board: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub class_name: Option<Option<String>>,
}

/// Partial display settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SettingsUpdate {
    pub allow_download: Option<bool>,
    pub show_progress_bar: Option<bool>,
}

/// A partial profile update. Absent fields are left alone; `null` or an
/// empty string clears an optional field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub tagline: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub photo_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
    pub interests: Option<Vec<String>>,
    pub visibility: Option<ProfileVisibility>,
    #[serde(default, deserialize_with = "nullable")]
    pub slug: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub school_id: Option<Option<String>>,
    pub school_info: Option<SchoolInfoUpdate>,
    pub academic_history: Option<Vec<AcademicYear>>,
    pub achievements: Option<Vec<Achievement>>,
    pub competitions: Option<Vec<Competition>>,
    pub extracurriculars: Option<Vec<Extracurricular>>,
    pub settings: Option<SettingsUpdate>,
}

/// Whether `slug` is lowercase alphanumeric words joined by single hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    (SLUG_MIN..=SLUG_MAX).contains(&slug.len())
        && slug.split('-').all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

/// Lowercase and check a requested slug; blank clears it.
pub fn normalize_slug(raw: Option<&str>) -> Result<Option<String>, AppError> {
    let normalized = raw.map(|s| s.trim().to_lowercase()).unwrap_or_default();
    if normalized.is_empty() {
        return Ok(None);
    }
    if !is_valid_slug(&normalized) {
        return Err(AppError::validation(format!(
            "Profile link must be {SLUG_MIN}-{SLUG_MAX} lowercase letters, digits or single hyphens"
        )));
    }
    Ok(Some(normalized))
}

/// Trim an optional text field; blank becomes `None`.
fn clean_text(field: &str, value: Option<&str>, max: usize) -> Result<Option<String>, AppError> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max {
        return Err(AppError::validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(Some(trimmed.to_string()))
}

/// Trim, drop blanks, dedupe in order, and cap at [`MAX_INTERESTS`].
pub fn clean_interests(interests: &[String]) -> Result<Vec<String>, AppError> {
    let mut cleaned: Vec<String> = Vec::new();
    for interest in interests.iter().map(|i| i.trim()).filter(|i| !i.is_empty()) {
        if interest.chars().count() > INTEREST_MAX {
            return Err(AppError::validation(format!(
                "Interests must be at most {INTEREST_MAX} characters"
            )));
        }
        if !cleaned.iter().any(|c| c == interest) {
            cleaned.push(interest.to_string());
        }
    }
    cleaned.truncate(MAX_INTERESTS);
    Ok(cleaned)
}

fn check_len<T>(field: &str, items: &[T], max: usize) -> Result<(), AppError> {
    if items.len() > max {
        return Err(AppError::validation(format!(
            "{field} can hold at most {max} entries"
        )));
    }
    Ok(())
}

impl ProfileUpdate {
    /// Validate the payload and write it into `profile`.
    ///
    /// Nothing is written when validation fails.
    pub fn apply_to(self, profile: &mut StudentProfile) -> Result<(), AppError> {
        let mut next = profile.clone();

        if let Some(name) = self.display_name {
            next.display_name = clean_text("displayName", Some(&name), 160)?
                .ok_or_else(|| AppError::validation("displayName must not be empty"))?;
        }
        if let Some(v) = self.tagline {
            next.tagline = clean_text("tagline", v.as_deref(), 180)?;
        }
        if let Some(v) = self.bio {
            next.bio = clean_text("bio", v.as_deref(), 2000)?;
        }
        if let Some(v) = self.photo_url {
            next.photo_url = clean_text("photoUrl", v.as_deref(), 2048)?;
        }
        if let Some(v) = self.location {
            next.location = clean_text("location", v.as_deref(), 160)?;
        }
        if let Some(interests) = self.interests {
            next.interests = clean_interests(&interests)?;
        }
        if let Some(visibility) = self.visibility {
            next.visibility = visibility;
        }
        if let Some(slug) = self.slug {
            next.slug = normalize_slug(slug.as_deref())?;
        }
        if let Some(school_id) = self.school_id {
            next.school_id = clean_text("schoolId", school_id.as_deref(), 128)?;
        }
        if let Some(school) = self.school_info {
            let mut info: SchoolInfo = next.school_info.0.clone();
            if let Some(v) = school.school_name {
                info.school_name = clean_text("schoolName", v.as_deref(), 160)?;
            }
            if let Some(v) = school.board {
                info.board = clean_text("board", v.as_deref(), 120)?;
            }
            if let Some(v) = school.class_name {
                info.class_name = clean_text("className", v.as_deref(), 40)?;
            }
            next.school_info = Json(info);
        }
        if let Some(history) = self.academic_history {
            check_len("academicHistory", &history, MAX_HISTORY_ITEMS)?;
            next.academic_history = Json(history);
        }
        if let Some(achievements) = self.achievements {
            check_len("achievements", &achievements, MAX_ACHIEVEMENTS)?;
            next.achievements = Json(achievements);
        }
        if let Some(competitions) = self.competitions {
            check_len("competitions", &competitions, MAX_COMPETITIONS)?;
            next.competitions = Json(competitions);
        }
        if let Some(extracurriculars) = self.extracurriculars {
            check_len("extracurriculars", &extracurriculars, MAX_EXTRACURRICULARS)?;
            next.extracurriculars = Json(extracurriculars);
        }
        if let Some(settings) = self.settings {
            let current = &next.settings.0;
            next.settings = Json(ProfileSettings {
                allow_download: settings.allow_download.unwrap_or(current.allow_download),
                show_progress_bar: settings.show_progress_bar.unwrap_or(current.show_progress_bar),
            });
        }

        *profile = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile() -> StudentProfile {
        StudentProfile::new("u1", "Asha", Utc::now())
    }

    fn update(json: &str) -> ProfileUpdate {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_slug_rules() {
        assert!(is_valid_slug("asha-k"));
        assert!(is_valid_slug("a1b"));
        assert!(!is_valid_slug("ab"));
        assert!(!is_valid_slug("-asha"));
        assert!(!is_valid_slug("asha--k"));
        assert!(!is_valid_slug("asha_k"));
        assert!(!is_valid_slug(&"a".repeat(61)));
    }

    #[test]
    fn test_slug_is_lowercased_and_blank_clears() {
        assert_eq!(normalize_slug(Some("  Asha-K ")).unwrap(), Some("asha-k".to_string()));
        assert_eq!(normalize_slug(Some("")).unwrap(), None);
        assert_eq!(normalize_slug(None).unwrap(), None);
        assert!(normalize_slug(Some("not valid!")).is_err());
    }

    #[test]
    fn test_interests_trimmed_deduped_capped() {
        let raw: Vec<String> = (0..30).map(|i| format!(" topic{} ", i % 25)).collect();
        let cleaned = clean_interests(&raw).unwrap();
        assert_eq!(cleaned.len(), MAX_INTERESTS);
        assert_eq!(cleaned[0], "topic0");

        let dupes = clean_interests(&["Math".into(), " Math".into(), "".into()]).unwrap();
        assert_eq!(dupes, vec!["Math".to_string()]);
    }

    #[test]
    fn test_null_and_blank_clear_fields() {
        let mut p = profile();
        p.tagline = Some("Old".into());
        p.bio = Some("Old bio".into());
        update(r#"{"tagline": null, "bio": "   "}"#).apply_to(&mut p).unwrap();
        assert!(p.tagline.is_none());
        assert!(p.bio.is_none());
    }

    #[test]
    fn test_absent_fields_untouched() {
        let mut p = profile();
        p.tagline = Some("Keep".into());
        update(r#"{"location": "Pune"}"#).apply_to(&mut p).unwrap();
        assert_eq!(p.tagline.as_deref(), Some("Keep"));
        assert_eq!(p.location.as_deref(), Some("Pune"));
    }

    #[test]
    fn test_failed_validation_leaves_profile_unchanged() {
        let mut p = profile();
        let result = update(r#"{"tagline": "New", "slug": "x"}"#).apply_to(&mut p);
        assert!(result.is_err());
        assert!(p.tagline.is_none());
    }

    #[test]
    fn test_list_limits() {
        let mut p = profile();
        let history: Vec<String> = (0..13)
            .map(|i| format!(r#"{{"year": "20{i:02}"}}"#))
            .collect();
        let json = format!(r#"{{"academicHistory": [{}]}}"#, history.join(","));
        assert!(update(&json).apply_to(&mut p).is_err());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(serde_json::from_str::<ProfileUpdate>(r#"{"nickname": "x"}"#).is_err());
    }

    #[test]
    fn test_settings_merge() {
        let mut p = profile();
        update(r#"{"settings": {"allowDownload": true}}"#).apply_to(&mut p).unwrap();
        assert!(p.settings.allow_download);
        assert!(p.settings.show_progress_bar);
    }
}
