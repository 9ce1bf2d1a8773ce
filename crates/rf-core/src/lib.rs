//! rusty-feedback/crates/rf-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Rusty-Feedback:
//! rating aggregation, the points ledger, reward claims and the account
//! directory.

pub mod activity;
pub mod aggregator;
pub mod catalog;
pub mod claims;
pub mod error;
pub mod ledger;
pub mod memory;
pub mod models;
pub mod service;
pub mod traits;

// Re-exporting for easier access in other crates
pub use catalog::Catalog;
pub use error::*;
pub use models::*;
pub use service::{FeedbackService, LedgerPolicy};
pub use traits::*;
