//! Router-level integration tests.
//!
//! The pool is lazy and points at an unreachable database, so these tests
//! cover everything decided before a query runs: routing, authentication,
//! role checks, and request validation. `db_test` runs full flows against
//! `MYARK_TEST_DATABASE_URL` when it is set and is skipped otherwise.

mod helpers;

mod auth_test;
mod db_test;
mod gamification_test;
mod health_test;
mod validation_test;
