//! Spaced-repetition review tracking
//!
//! This module provides:
//! - The review item data model and the fixed interval ladder
//! - Pure scheduling transitions (create, review, classify, delete)
//! - The item store: in-memory collection, persistence, undo snapshot

pub mod models;
pub mod scheduler;
pub mod store;

pub use models::*;
pub use scheduler::Classified;
pub use store::{ItemStore, STORE_KEY, UNDO_WINDOW};
