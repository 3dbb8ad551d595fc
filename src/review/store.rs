//! Item store: the authoritative collection and its persistence
//!
//! Holds every tracked item in memory (newest first), applies scheduler
//! transitions, and writes the whole collection back to the key-value
//! capability after each mutation. Writes are best-effort: a failed save
//! is logged and the in-memory state stays authoritative.
//!
//! Review and delete mutations capture a single-slot undo snapshot of the
//! pre-mutation collection. The snapshot expires five seconds after
//! capture; expiry is checked lazily against a monotonic clock when
//! `restore` runs, so no background timer is involved.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::storage::{KvStore, StorageError};

use super::models::{ReviewItem, ReviewOutcome, ReviewStats};
use super::scheduler::{self, Classified};

/// Fixed key the collection blob is persisted under
pub const STORE_KEY: &str = "review-items";

/// How long an undo snapshot stays usable after capture
pub const UNDO_WINDOW: Duration = Duration::from_secs(5);

struct UndoSnapshot {
    items: Vec<ReviewItem>,
    deadline: Instant,
}

pub struct ItemStore<K: KvStore> {
    kv: K,
    items: Vec<ReviewItem>,
    undo: Option<UndoSnapshot>,
}

impl<K: KvStore> ItemStore<K> {
    /// Hydrate the collection from storage.
    ///
    /// A missing blob starts the collection empty. A malformed blob is
    /// discarded the same way, with a diagnostic log as the only trace.
    pub fn load(kv: K) -> Self {
        let items = match kv.get(STORE_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<ReviewItem>>(&blob) {
                Ok(items) => items,
                Err(e) => {
                    log::warn!("Discarding malformed review data: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Failed to read review data: {}", e);
                Vec::new()
            }
        };

        Self { kv, items, undo: None }
    }

    /// The collection, newest first
    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    /// Add a new item for `content`.
    ///
    /// Content that trims to empty is rejected before anything is created:
    /// no item, no snapshot, no write. Accepted content is stored verbatim
    /// and the new item goes to the front of the collection.
    pub fn add(&mut self, content: &str, today: NaiveDate) -> Option<ReviewItem> {
        if content.trim().is_empty() {
            return None;
        }

        let item = scheduler::create(content.to_string(), today);
        self.items.insert(0, item.clone());
        self.persist();
        Some(item)
    }

    /// Apply a review outcome to the item with the given id.
    ///
    /// Unknown id is a no-op returning `None`; only a matching item is
    /// transformed. The pre-mutation collection is captured for undo.
    pub fn review(
        &mut self,
        id: Uuid,
        outcome: ReviewOutcome,
        today: NaiveDate,
    ) -> Option<ReviewItem> {
        let idx = self.items.iter().position(|i| i.id == id)?;

        self.take_snapshot(Instant::now());
        let updated = scheduler::review(&self.items[idx], outcome, today);
        self.items[idx] = updated.clone();
        self.persist();
        Some(updated)
    }

    /// Delete the item with the given id.
    ///
    /// Unknown id is a silent no-op and leaves any live snapshot alone;
    /// otherwise the pre-delete collection is captured for undo.
    pub fn delete(&mut self, id: Uuid) -> bool {
        if !self.items.iter().any(|i| i.id == id) {
            return false;
        }

        self.take_snapshot(Instant::now());
        scheduler::delete(&mut self.items, id);
        self.persist();
        true
    }

    /// Roll the collection back to the last snapshot, if it is still live.
    ///
    /// Consumes the snapshot either way: an expired one is simply cleared
    /// and the call reports `false`.
    pub fn restore(&mut self) -> bool {
        self.restore_at(Instant::now())
    }

    /// Whether an undo snapshot is currently live
    pub fn undo_pending(&self) -> bool {
        self.undo
            .as_ref()
            .map_or(false, |s| Instant::now() < s.deadline)
    }

    /// Partition the collection into due / future / mastered views
    pub fn classify(&self, today: NaiveDate) -> Classified<'_> {
        scheduler::classify(&self.items, today)
    }

    /// Derived counters for display
    pub fn stats(&self, today: NaiveDate) -> ReviewStats {
        let parts = self.classify(today);
        let (due, upcoming, mastered) =
            (parts.due.len(), parts.future.len(), parts.mastered.len());

        let mut reviews_today = 0;
        let mut remembered_today = 0;
        for item in &self.items {
            for entry in &item.history {
                if entry.date == today {
                    reviews_today += 1;
                    if entry.result == ReviewOutcome::Remembered {
                        remembered_today += 1;
                    }
                }
            }
        }

        ReviewStats {
            total: self.items.len(),
            due,
            upcoming,
            mastered,
            reviews_today,
            remembered_today,
        }
    }

    fn take_snapshot(&mut self, now: Instant) {
        self.undo = Some(UndoSnapshot {
            items: self.items.clone(),
            deadline: now + UNDO_WINDOW,
        });
    }

    fn restore_at(&mut self, now: Instant) -> bool {
        match self.undo.take() {
            Some(snap) if now < snap.deadline => {
                self.items = snap.items;
                self.persist();
                true
            }
            _ => false,
        }
    }

    fn persist(&self) {
        if let Err(e) = self.try_persist() {
            log::warn!("Failed to persist review items: {}", e);
        }
    }

    fn try_persist(&self) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&self.items)?;
        self.kv.set(STORE_KEY, &blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileKvStore;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn file_store(dir: &tempfile::TempDir) -> ItemStore<FileKvStore> {
        ItemStore::load(FileKvStore::new(dir.path().to_path_buf()))
    }

    #[test]
    fn load_starts_empty_without_data() {
        let dir = tempfile::tempdir().unwrap();
        let store = file_store(&dir);
        assert!(store.items().is_empty());
    }

    #[test]
    fn load_discards_malformed_blob() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKvStore::new(dir.path().to_path_buf());
        kv.set(STORE_KEY, "{not json at all").unwrap();

        let store = ItemStore::load(kv);
        assert!(store.items().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = file_store(&dir);
        store.add("cerebellum", day("2024-01-01")).unwrap();
        store.add("hippocampus", day("2024-01-02")).unwrap();

        let reloaded = file_store(&dir);
        assert_eq!(reloaded.items(), store.items());
    }

    #[test]
    fn add_inserts_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = file_store(&dir);
        store.add("first", day("2024-01-01")).unwrap();
        store.add("second", day("2024-01-01")).unwrap();

        assert_eq!(store.items()[0].content, "second");
        assert_eq!(store.items()[1].content, "first");
    }

    #[test]
    fn add_rejects_whitespace_content() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = file_store(&dir);

        assert!(store.add("   \t", day("2024-01-01")).is_none());
        assert!(store.items().is_empty());
        // nothing was written either
        let kv = FileKvStore::new(dir.path().to_path_buf());
        assert!(kv.get(STORE_KEY).unwrap().is_none());
    }

    #[test]
    fn review_unknown_id_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = file_store(&dir);
        store.add("axon", day("2024-01-01")).unwrap();

        let result = store.review(Uuid::new_v4(), ReviewOutcome::Remembered, day("2024-01-02"));
        assert!(result.is_none());
        assert!(store.items()[0].history.is_empty());
        assert!(!store.undo_pending());
    }

    #[test]
    fn review_transforms_only_the_matching_item() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = file_store(&dir);
        let a = store.add("alpha", day("2024-01-01")).unwrap();
        let b = store.add("beta", day("2024-01-01")).unwrap();

        let updated = store
            .review(a.id, ReviewOutcome::Remembered, day("2024-01-02"))
            .unwrap();
        assert_eq!(updated.stage, 1);

        let untouched = store.items().iter().find(|i| i.id == b.id).unwrap();
        assert_eq!(untouched.stage, 0);
        assert!(untouched.history.is_empty());
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = file_store(&dir);
        store.add("soma", day("2024-01-01")).unwrap();

        assert!(!store.delete(Uuid::new_v4()));
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn delete_then_restore_within_window() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = file_store(&dir);
        store.add("alpha", day("2024-01-01")).unwrap();
        store.add("beta", day("2024-01-01")).unwrap();
        let before: Vec<ReviewItem> = store.items().to_vec();

        let target = before[0].id;
        assert!(store.delete(target));
        assert_eq!(store.items().len(), 1);

        assert!(store.restore());
        assert_eq!(store.items(), &before[..]);
        // the snapshot was consumed
        assert!(!store.restore());
    }

    #[test]
    fn restore_after_expiry_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = file_store(&dir);
        store.add("gamma", day("2024-01-01")).unwrap();
        let id = store.items()[0].id;
        store.delete(id);

        let now = Instant::now();
        store.take_snapshot(now);
        assert!(!store.restore_at(now + UNDO_WINDOW));
        assert!(store.items().is_empty());
        // clearing an already-cleared snapshot is safe
        assert!(!store.restore_at(now + UNDO_WINDOW));
    }

    #[test]
    fn new_snapshot_discards_prior_one() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = file_store(&dir);
        let a = store.add("alpha", day("2024-01-01")).unwrap();
        let b = store.add("beta", day("2024-01-01")).unwrap();

        store.delete(a.id);
        let between: Vec<ReviewItem> = store.items().to_vec();
        store.delete(b.id);

        // restore rolls back the second delete only
        assert!(store.restore());
        assert_eq!(store.items(), &between[..]);
    }

    #[test]
    fn add_does_not_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = file_store(&dir);
        store.add("delta", day("2024-01-01")).unwrap();

        assert!(!store.undo_pending());
        assert!(!store.restore());
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn review_then_undo_rolls_back_the_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = file_store(&dir);
        let item = store.add("epsilon", day("2024-01-01")).unwrap();

        store.review(item.id, ReviewOutcome::Forgot, day("2024-01-02"));
        assert_eq!(store.items()[0].history.len(), 1);

        assert!(store.restore());
        assert!(store.items()[0].history.is_empty());
        assert_eq!(store.items()[0].stage, 0);
    }

    #[test]
    fn stats_counts_partitions_and_todays_reviews() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = file_store(&dir);
        let a = store.add("alpha", day("2024-01-01")).unwrap();
        store.add("beta", day("2024-01-02")).unwrap();

        // alpha becomes due on the 2nd, beta on the 3rd
        store.review(a.id, ReviewOutcome::Remembered, day("2024-01-02"));

        let stats = store.stats(day("2024-01-02"));
        assert_eq!(stats.total, 2);
        assert_eq!(stats.due, 0);
        assert_eq!(stats.upcoming, 2);
        assert_eq!(stats.mastered, 0);
        assert_eq!(stats.reviews_today, 1);
        assert_eq!(stats.remembered_today, 1);
        assert_eq!(stats.mastery_rate(), 0);
    }

    struct FailingKv;

    impl KvStore for FailingKv {
        fn get(&self, _key: &str) -> crate::storage::Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> crate::storage::Result<()> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only storage",
            )))
        }
    }

    #[test]
    fn persist_failure_does_not_propagate() {
        let mut store = ItemStore::load(FailingKv);

        let item = store.add("zeta", day("2024-01-01"));
        assert!(item.is_some());
        assert_eq!(store.items().len(), 1);

        let id = store.items()[0].id;
        assert!(store.delete(id));
        assert!(store.items().is_empty());
    }
}
