//! mneme — local-first spaced-repetition review tracker
//!
//! A fixed interval ladder schedules reviews for short text items; each
//! due item is marked remembered or forgot to climb or reset its schedule.
//! Everything lives in a single JSON blob in local storage.

pub mod connectivity;
pub mod review;
pub mod storage;
