//! Student profile entities.

pub mod model;

pub use model::{
    AcademicYear, Achievement, Competition, Extracurricular, ProfileCompletion, ProfileSettings,
    ProfileVisibility, PublicStudentProfile, SchoolInfo, StudentProfile, SubjectScore,
};
