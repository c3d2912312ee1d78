use regex::Regex;
use serde::Serialize;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::storage::{NoteSummary, VaultError, VaultStore};

/// Re-enumerates the vault every time it is asked. Nothing is cached, so a
/// listing always matches the directory at the moment it was requested.
#[derive(Debug, Clone)]
pub struct NoteListing {
    store: VaultStore,
}

impl NoteListing {
    pub fn new(store: VaultStore) -> Self {
        Self { store }
    }

    pub fn refresh(&self) -> Result<Vec<NoteSummary>, VaultError> {
        let notes = self.store.list()?;
        tracing::debug!(count = notes.len(), "refreshed note listing");
        Ok(notes)
    }
}

impl NoteSummary {
    /// Second line shown under the title in the list.
    pub fn description(&self) -> String {
        format_modified(self.last_modified)
    }

    /// `None` matches everything. Pass the matcher from
    /// [`filter_regex`](crate::highlight::filter_regex) so the rows kept are
    /// exactly the rows that get highlighted.
    pub fn matches_filter(&self, filter: Option<&Regex>) -> bool {
        filter.map_or(true, |regex| regex.is_match(&self.title))
    }
}

pub fn format_modified(dt: OffsetDateTime) -> String {
    dt.format(&format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
        .unwrap_or_else(|_| dt.unix_timestamp().to_string())
}

/// Serializable form used by `gotion list --json`.
#[derive(Debug, Serialize)]
pub struct ListingRow<'a> {
    pub title: &'a str,
    pub last_modified: String,
}

impl<'a> From<&'a NoteSummary> for ListingRow<'a> {
    fn from(note: &'a NoteSummary) -> Self {
        Self {
            title: &note.title,
            last_modified: note.description(),
        }
    }
}
