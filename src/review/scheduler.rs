//! Review scheduling over the fixed interval ladder
//!
//! Pure transition logic: every function takes `today` explicitly and
//! returns a new value. The item store owns the collection and applies
//! these transitions; nothing here touches a clock or storage.

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use super::models::{ReviewEntry, ReviewItem, ReviewOutcome, STAGE_LADDER};

/// A collection partitioned by review status.
///
/// `due` and `future` are sorted ascending by next-review date; ties keep
/// collection order. `mastered` keeps collection order.
#[derive(Debug)]
pub struct Classified<'a> {
    pub due: Vec<&'a ReviewItem>,
    pub future: Vec<&'a ReviewItem>,
    pub mastered: Vec<&'a ReviewItem>,
}

/// Build a fresh item starting at the bottom of the ladder.
///
/// The caller must have verified that `content` is non-empty after
/// trimming; the text itself is stored verbatim.
pub fn create(content: String, today: NaiveDate) -> ReviewItem {
    ReviewItem {
        id: Uuid::new_v4(),
        content,
        created_at: today,
        next_review: Some(today + Duration::days(STAGE_LADDER[0].days)),
        stage: 0,
        history: Vec::new(),
        mastered: false,
    }
}

/// Apply one review outcome and return the updated item.
///
/// The outcome is appended to the history unconditionally. `Forgot` drops
/// the item back to stage 0 with a flat one-day follow-up — deliberately a
/// plain day, not `STAGE_LADDER[0].days`, whatever stage it fell from.
/// `Remembered` climbs one rung; past the last rung the item is mastered,
/// its schedule cleared and the stage value kept as a terminal marker.
///
/// No guard against already-mastered items: whether those are offered for
/// review at all is the caller's policy.
pub fn review(item: &ReviewItem, outcome: ReviewOutcome, today: NaiveDate) -> ReviewItem {
    let mut updated = item.clone();
    updated.history.push(ReviewEntry { date: today, result: outcome });

    match outcome {
        ReviewOutcome::Forgot => {
            updated.stage = 0;
            updated.next_review = Some(today + Duration::days(1));
        }
        ReviewOutcome::Remembered => {
            let next = item.stage + 1;
            if next >= STAGE_LADDER.len() {
                updated.mastered = true;
                updated.next_review = None;
                updated.stage = next;
            } else {
                updated.stage = next;
                updated.next_review = Some(today + Duration::days(STAGE_LADDER[next].days));
            }
        }
    }

    updated
}

/// Partition a collection into due / future / mastered views.
///
/// A non-mastered item without a scheduled date falls into neither
/// partition; only a hand-edited blob can produce one.
pub fn classify(items: &[ReviewItem], today: NaiveDate) -> Classified<'_> {
    let mut due = Vec::new();
    let mut future = Vec::new();
    let mut mastered = Vec::new();

    for item in items {
        if item.mastered {
            mastered.push(item);
            continue;
        }
        match item.next_review {
            Some(date) if date <= today => due.push(item),
            Some(_) => future.push(item),
            None => {}
        }
    }

    due.sort_by_key(|i| i.next_review);
    future.sort_by_key(|i| i.next_review);

    Classified { due, future, mastered }
}

/// Remove the item with the given id, if present.
///
/// Silent no-op when the id is unknown; returns whether anything was
/// removed so the store can decide about snapshotting.
pub fn delete(items: &mut Vec<ReviewItem>, id: Uuid) -> bool {
    let before = items.len();
    items.retain(|i| i.id != id);
    items.len() != before
}
