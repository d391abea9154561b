//! Usage counts persisted between runs.
//!
//! The cache file holds one `<id> <count>` record per line. Counts only bias
//! the menu order: entries with a record come first, most used on top, and
//! everything else follows in config order.

use std::fs::{self, DirBuilder};
use std::os::unix::fs::DirBuilderExt;
use std::path::Path;
use indexmap::IndexMap;
use log::{debug, info};
use crate::error::LaunchError;
use crate::model::{EntryId, EntryMapping};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    pub usage_counts: IndexMap<EntryId, u64>,
}

impl History {
    /// Parses cache content, keeping only ids known to `entries`.
    ///
    /// Lines that are not exactly `<id> <count>` with a decimal count are skipped.
    pub fn parse(content: &str, entries: &EntryMapping) -> Self {
        let mut usage_counts = IndexMap::new();
        for line in content.lines() {
            let mut tokens = line.split_whitespace();
            let (Some(id), Some(count), None) = (tokens.next(), tokens.next(), tokens.next()) else {
                continue;
            };
            let Ok(count) = count.parse::<u64>() else {
                debug!("Skipping malformed cache line {:?}", line);
                continue;
            };
            if !entries.contains_key(id) {
                debug!("Dropping stale cache entry {:?}", id);
                continue;
            }
            usage_counts.insert(id.to_string(), count);
        }
        Self { usage_counts }
    }

    pub fn load(path: &Path, entries: &EntryMapping) -> Result<Self, LaunchError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let bytes = fs::read(path).map_err(|source| LaunchError::Cache {
            path: path.to_path_buf(),
            source,
        })?;
        // Undecodable bytes become U+FFFD and the affected lines fail to match.
        Ok(Self::parse(&String::from_utf8_lossy(&bytes), entries))
    }

    /// Most used entries first, the rest in config order. Equal counts keep config order.
    pub fn reorder(&self, entries: &EntryMapping) -> EntryMapping {
        let mut known: Vec<(usize, &EntryId, u64)> = self
            .usage_counts
            .iter()
            .filter_map(|(id, &count)| entries.get_index_of(id).map(|pos| (pos, id, count)))
            .collect();
        known.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));

        let mut ordered = EntryMapping::with_capacity(entries.len());
        for (_, id, _) in known {
            ordered.insert(id.clone(), entries[id].clone());
        }
        for (id, entry) in entries {
            if !ordered.contains_key(id) {
                ordered.insert(id.clone(), entry.clone());
            }
        }
        ordered
    }

    /// A first use is stored as 0; only later uses increment.
    pub fn record(&mut self, id: &str) {
        match self.usage_counts.get_mut(id) {
            Some(count) => *count = count.saturating_add(1),
            None => {
                self.usage_counts.insert(id.to_string(), 0);
            }
        }
    }

    pub fn serialize(&self) -> String {
        self.usage_counts
            .iter()
            .map(|(id, count)| format!("{} {}", id, count))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn save(&self, path: &Path) -> Result<(), LaunchError> {
        let cache_error = |source: std::io::Error| LaunchError::Cache {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                DirBuilder::new()
                    .recursive(true)
                    .mode(0o755)
                    .create(parent)
                    .map_err(cache_error)?;
            }
        }
        fs::write(path, self.serialize()).map_err(cache_error)?;
        info!("Saved {} usage records to {:?}", self.usage_counts.len(), path);
        Ok(())
    }
}

/// Returns `entries` in menu order along with the counts parsed from `content`.
pub fn sort_from_cache(entries: &EntryMapping, content: &str) -> (EntryMapping, History) {
    let history = History::parse(content, entries);
    (history.reorder(entries), history)
}
