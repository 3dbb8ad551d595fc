use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use uuid::Uuid;

use mneme_lib::review::{ItemStore, ReviewItem};
use mneme_lib::storage::FileKvStore;

/// Shared application state for CLI commands
pub struct App {
    pub store: ItemStore<FileKvStore>,
}

impl App {
    /// Initialize from the given directory, or the default data directory
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => FileKvStore::default_data_dir().context("Failed to get data directory")?,
        };

        let store = ItemStore::load(FileKvStore::new(data_dir));
        Ok(Self { store })
    }

    /// Find an item by id prefix (case-insensitive)
    pub fn find_item(&self, prefix: &str) -> Result<ReviewItem> {
        let prefix_lower = prefix.to_lowercase();

        // Exact match first
        if let Ok(id) = Uuid::parse_str(&prefix_lower) {
            if let Some(item) = self.store.items().iter().find(|i| i.id == id) {
                return Ok(item.clone());
            }
        }

        // Prefix match
        let matches: Vec<&ReviewItem> = self
            .store
            .items()
            .iter()
            .filter(|i| i.id.to_string().starts_with(&prefix_lower))
            .collect();

        match matches.len() {
            0 => bail!("No item with id matching '{}'", prefix),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous id prefix '{}'. Matches:\n{}",
                prefix,
                matches
                    .iter()
                    .map(|i| format!("  {}  {}", short_id(&i.id), excerpt(&i.content, 50)))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }
}

/// Resolve the working date: an explicit `--today` value, or the local day
pub fn resolve_today(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}' (expected YYYY-MM-DD)", s)),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// First eight hex characters of an id, enough to address items by hand
pub fn short_id(id: &Uuid) -> String {
    id.to_string().chars().take(8).collect()
}

/// Truncate content to a single display line
pub fn excerpt(content: &str, max: usize) -> String {
    let line = content.lines().next().unwrap_or("");
    if line.chars().count() <= max {
        line.to_string()
    } else {
        let cut: String = line.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
