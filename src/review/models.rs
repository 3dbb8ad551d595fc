//! Data models for the review tracker

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One rung of the review ladder: how many days until the next review
/// once an item reaches this stage.
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub days: i64,
    pub label: &'static str,
}

/// Fixed Ebbinghaus-style interval ladder. An item climbs one rung per
/// successful review; past the last rung it is mastered.
pub const STAGE_LADDER: [Stage; 7] = [
    Stage { days: 1, label: "initial review" },
    Stage { days: 2, label: "reinforcement" },
    Stage { days: 4, label: "short-term memory" },
    Stage { days: 7, label: "mid-term memory" },
    Stage { days: 15, label: "long-term transfer" },
    Stage { days: 30, label: "deep consolidation" },
    Stage { days: 60, label: "permanent archive" },
];

/// Outcome of a single review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewOutcome {
    Remembered,
    Forgot,
}

/// A record of a single review attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    /// Calendar day the review happened
    pub date: NaiveDate,
    /// What the user reported
    pub result: ReviewOutcome,
}

/// A knowledge snippet being tracked through the review ladder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    /// Unique identifier, stable for the item's lifetime
    pub id: Uuid,
    /// User-supplied text, stored verbatim
    pub content: String,
    /// Creation day, immutable
    pub created_at: NaiveDate,
    /// Next scheduled review; absent once the item is mastered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_review: Option<NaiveDate>,
    /// Index into [`STAGE_LADDER`] reached so far; may run past the ladder
    /// length once mastered
    pub stage: usize,
    /// Append-only audit log of every review outcome
    #[serde(default)]
    pub history: Vec<ReviewEntry>,
    /// True once the item has climbed past the last ladder rung
    #[serde(default)]
    pub mastered: bool,
}

impl ReviewItem {
    /// Check whether the item is due for review on the given day
    pub fn is_due(&self, today: NaiveDate) -> bool {
        !self.mastered && self.next_review.map_or(false, |d| d <= today)
    }

    /// Label of the ladder rung the item currently sits on, if any
    pub fn stage_label(&self) -> Option<&'static str> {
        STAGE_LADDER.get(self.stage).map(|s| s.label)
    }
}

/// Derived counters for a collection of items
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total: usize,
    pub due: usize,
    pub upcoming: usize,
    pub mastered: usize,
    pub reviews_today: usize,
    pub remembered_today: usize,
}

impl ReviewStats {
    /// Share of items mastered, as a rounded percentage
    pub fn mastery_rate(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.mastered as f64 / self.total as f64) * 100.0).round() as u32
    }
}
