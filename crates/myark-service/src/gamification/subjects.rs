//! Subject categories used by the subject-mastery badges.

use serde::Serialize;

/// A subject family with its own mastery badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SubjectCategory {
    Math,
    Science,
    Coding,
    Writing,
    #[serde(rename = "GK")]
    Gk,
    Arts,
    Sports,
}

impl SubjectCategory {
    pub const ALL: [SubjectCategory; 7] = [
        Self::Math,
        Self::Science,
        Self::Coding,
        Self::Writing,
        Self::Gk,
        Self::Arts,
        Self::Sports,
    ];

    /// Keywords matched case-insensitively against explored subject names.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Math => &["Math", "Mathematics", "Arithmetic", "Algebra", "Geometry"],
            Self::Science => &["Science", "Biology", "Chemistry", "Physics", "Astronomy"],
            Self::Coding => &[
                "Coding",
                "Programming",
                "Web Development",
                "App Development",
                "Software",
            ],
            Self::Writing => &["Writing", "Literature", "English", "Essay", "Content Writing"],
            Self::Gk => &[
                "General Knowledge",
                "GK",
                "Current Affairs",
                "History",
                "Geography",
            ],
            Self::Arts => &["Arts", "Art", "Design", "Graphic Design", "Drawing", "Painting"],
            Self::Sports => &[
                "Sports",
                "Football",
                "Cricket",
                "Basketball",
                "Athletics",
                "Swimming",
            ],
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Math => 0,
            Self::Science => 1,
            Self::Coding => 2,
            Self::Writing => 3,
            Self::Gk => 4,
            Self::Arts => 5,
            Self::Sports => 6,
        }
    }
}

/// Keyword hit counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubjectCounts([u32; 7]);

impl SubjectCounts {
    /// Count keyword hits across the explored subjects.
    ///
    /// Every keyword contained in a subject name counts once, so
    /// "Mathematics" scores twice for Math ("Math" and "Mathematics").
    pub fn from_subjects<'a>(subjects: impl IntoIterator<Item = &'a String>) -> Self {
        let mut counts = [0u32; 7];
        for subject in subjects {
            let lower = subject.to_lowercase();
            for category in SubjectCategory::ALL {
                let hits = category
                    .keywords()
                    .iter()
                    .filter(|k| lower.contains(&k.to_lowercase()))
                    .count();
                counts[category.index()] += hits as u32;
            }
        }
        Self(counts)
    }

    pub fn get(&self, category: SubjectCategory) -> u32 {
        self.0[category.index()]
    }

    /// Number of categories with at least `min` hits.
    pub fn categories_with_at_least(&self, min: u32) -> u32 {
        self.0.iter().filter(|c| **c >= min).count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_matching_is_case_insensitive() {
        let subjects = vec!["algebra".to_string(), "Organic CHEMISTRY".to_string()];
        let counts = SubjectCounts::from_subjects(&subjects);
        assert_eq!(counts.get(SubjectCategory::Math), 1);
        assert_eq!(counts.get(SubjectCategory::Science), 1);
        assert_eq!(counts.get(SubjectCategory::Sports), 0);
    }

    #[test]
    fn test_each_contained_keyword_counts() {
        let subjects = vec!["Mathematics".to_string(), "Graphic Design".to_string()];
        let counts = SubjectCounts::from_subjects(&subjects);
        assert_eq!(counts.get(SubjectCategory::Math), 2);
        // "Graphic Design" contains "Design" and "Graphic Design"
        assert_eq!(counts.get(SubjectCategory::Arts), 2);
        assert_eq!(counts.categories_with_at_least(2), 2);
    }
}
