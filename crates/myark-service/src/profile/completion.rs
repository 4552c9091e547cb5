//! Profile completion scoring.

use myark_entity::profile::{ProfileCompletion, ProfileVisibility, StudentProfile};

const STEPS: u32 = 6;

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Which of the six completion steps a profile has finished.
pub fn completion(profile: &StudentProfile) -> ProfileCompletion {
    let school = &profile.school_info;
    let steps = [
        (
            "profile",
            present(&profile.photo_url)
                || present(&profile.tagline)
                || present(&profile.bio)
                || !profile.interests.is_empty(),
        ),
        ("school", present(&school.school_name) && present(&school.class_name)),
        ("academicHistory", !profile.academic_history.is_empty()),
        ("achievements", !profile.achievements.is_empty()),
        (
            "competitions",
            !profile.competitions.is_empty() || !profile.extracurriculars.is_empty(),
        ),
        (
            "visibility",
            profile.slug.is_some() && profile.visibility != ProfileVisibility::Private,
        ),
    ];

    let completed_steps: Vec<String> = steps
        .iter()
        .filter(|(_, done)| *done)
        .map(|(name, _)| (*name).to_string())
        .collect();
    let done = completed_steps.len() as u32;

    ProfileCompletion {
        percent: (f64::from(done) * 100.0 / f64::from(STEPS)).round() as u32,
        completed_steps,
        total_steps: STEPS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use myark_entity::profile::{Achievement, Extracurricular, SchoolInfo};
    use sqlx::types::Json;

    fn blank() -> StudentProfile {
        StudentProfile::new("u1", "Asha", Utc::now())
    }

    #[test]
    fn test_new_profile_is_empty() {
        let c = completion(&blank());
        assert_eq!(c.percent, 0);
        assert!(c.completed_steps.is_empty());
        assert_eq!(c.total_steps, 6);
    }

    #[test]
    fn test_partial_completion() {
        let mut profile = blank();
        profile.tagline = Some("Budding astronomer".to_string());
        profile.school_info = Json(SchoolInfo {
            school_name: Some("Green Valley".to_string()),
            board: None,
            class_name: Some("9".to_string()),
        });
        profile.extracurriculars = Json(vec![Extracurricular {
            activity: "Chess".to_string(),
            role: None,
        }]);

        let c = completion(&profile);
        assert_eq!(c.completed_steps, vec!["profile", "school", "competitions"]);
        assert_eq!(c.percent, 50);
    }

    #[test]
    fn test_school_needs_class() {
        let mut profile = blank();
        profile.school_info = Json(SchoolInfo {
            school_name: Some("Green Valley".to_string()),
            ..SchoolInfo::default()
        });
        assert!(completion(&profile).completed_steps.is_empty());
    }

    #[test]
    fn test_visibility_step_needs_slug_and_non_private() {
        let mut profile = blank();
        profile.slug = Some("asha-k".to_string());
        assert_eq!(completion(&profile).percent, 0);

        profile.visibility = ProfileVisibility::Public;
        profile.achievements = Json(vec![Achievement {
            title: "Science fair".to_string(),
            description: None,
            year: None,
        }]);
        let c = completion(&profile);
        assert_eq!(c.completed_steps, vec!["achievements", "visibility"]);
        assert_eq!(c.percent, 33);
    }
}
