//! Share tracking entities.

pub mod click;
pub mod model;

pub use click::ShareClick;
pub use model::{ConversionType, CreateShareRecord, ShareMethod, SharePlatform, ShareRecord};
