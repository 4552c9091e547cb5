//! Core type definitions used across the Myark workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
