//! # myark-entity
//!
//! Domain entity models for the Myark platform. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.
//!
//! JSON field names are camelCase to match the web client.

pub mod gamification;
pub mod leaderboard;
pub mod notification;
pub mod profile;
pub mod quiz;
pub mod rewards;
pub mod share;
