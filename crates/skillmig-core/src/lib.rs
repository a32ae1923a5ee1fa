//! skillmig-core — record model, normalizer and runner for skillmig.
//!
//! # Architecture
//!
//! ```text
//! PlayerStore::fetch_all ──► PlayerRecord ──► normalize ──► PlayerStore::replace_fields
//!                                                  │
//!                                                  └──► MigrationReport
//! ```
//!
//! The store is a trait so the runner can be driven by MongoDB in production
//! and by an in-memory fake in tests.

pub mod config;
pub mod error;
pub mod normalizer;
pub mod runner;
pub mod store;
pub mod types;

pub use bson;

pub use config::Config;
pub use error::{MigrateError, RecordError, RunAborted};
pub use normalizer::{normalize, Normalized};
pub use runner::{FailurePolicy, MigrationReport, MigrationRunner};
pub use store::{PlayerStore, StoreError};
pub use types::{MapField, PlayerRecord};
