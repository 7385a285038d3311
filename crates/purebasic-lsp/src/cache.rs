// PureBasic Language Server
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Per-document settings cache with single-flight fetching.
//!
//! This module keeps the settings resolved for each open document so repeated
//! lookups do not round-trip to the client.
//!
//! # Responsibilities
//!
//! - Lazy population on first lookup per document
//! - Deduplication of concurrent fetches for the same document
//! - Explicit invalidation (single entry on close, everything on clear)
//! - Eviction of failed fetches so the next lookup retries
//! - Cache statistics tracking
//!
//! # Design
//!
//! A miss inserts an entry into the map *before* the fetch starts and spawns
//! the fetch as its own task. The task publishes the outcome on a
//! [`tokio::sync::watch`] channel; every caller for the same URI holds a
//! receiver for that channel and gets the same outcome. Because the fetch
//! does not run inside any caller, dropping or aborting a caller never
//! restarts or loses it.
//!
//! Entries carry a generation number. A fetch that completes after its entry
//! was closed or cleared only reaches the callers already waiting on it; it is
//! never written back into the map. A failed entry is evicted (generation
//! permitting) before the error is published, so a failed entry is never
//! observable and never joined.
//!
//! ```text
//! ABSENT --lookup--> PENDING --success--> RESOLVED
//!                       |
//!                       +--failure--> ABSENT
//! PENDING/RESOLVED --close/clear--> ABSENT
//! ```

use crate::constants::SETTINGS_SECTION;
use crate::error::{SettingsError, SettingsResult};
use crate::provider::ConfigurationProvider;
use crate::settings::DocumentSettings;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tower_lsp::lsp_types::Url;
use tracing::{debug, warn};

type SettingsOutcome = SettingsResult<Arc<DocumentSettings>>;

/// One cache slot: a fetch that is in flight or has completed.
struct SettingsEntry {
    /// Distinguishes this entry from later entries under the same URI.
    generation: u64,
    /// `None` until the fetch task publishes its outcome.
    outcome: watch::Receiver<Option<SettingsOutcome>>,
}

/// Observable state of a cached entry.
///
/// There is no failed state: a failed fetch removes its entry before any
/// caller sees the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// A fetch has been issued and has not completed yet.
    Pending,
    /// Settings were fetched and are ready.
    Resolved,
}

/// Cache statistics for monitoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStatistics {
    /// Lookups that joined an existing entry.
    pub hits: u64,
    /// Lookups that created an entry and issued a fetch.
    pub misses: u64,
    /// Entries dropped by document close or a full clear.
    pub invalidations: u64,
    /// Fetches that failed.
    pub failures: u64,
    /// Current number of entries.
    pub current_size: usize,
}

/// Single-flight settings cache keyed by document URI.
///
/// # Thread Safety
///
/// Entries live in a `DashMap`; the check-then-insert in a lookup happens
/// under the map's shard lock, so at most one entry (and one fetch) exists
/// per URI. No lock is held across an await. Fetch tasks share the map and
/// the statistics through `Arc`.
pub struct DocumentSettingsCache {
    /// Settings store: URI -> entry.
    entries: Arc<DashMap<Url, Arc<SettingsEntry>>>,
    /// Where settings are fetched from on a miss.
    provider: Arc<dyn ConfigurationProvider>,
    /// Generation counter for new entries.
    next_generation: AtomicU64,
    /// Cache statistics for monitoring.
    cache_stats: Arc<Mutex<CacheStatistics>>,
}

impl DocumentSettingsCache {
    /// Create an empty cache fetching from `provider`.
    pub fn new(provider: Arc<dyn ConfigurationProvider>) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            provider,
            next_generation: AtomicU64::new(0),
            cache_stats: Arc::new(Mutex::new(CacheStatistics::default())),
        }
    }

    /// Get the settings for `uri`, fetching them on first use.
    ///
    /// Concurrent calls for the same URI share one provider fetch. Must be
    /// called from within a tokio runtime, since a miss spawns the fetch.
    ///
    /// # Error Handling
    ///
    /// - Fetch failure: returned to every caller sharing the fetch; the
    ///   entry is already evicted, so the next lookup issues a new fetch
    /// - Close/clear while pending: waiting callers still get the outcome,
    ///   the cache is not repopulated
    /// - Fetch task gone without an outcome: `SettingsError::FetchAborted`,
    ///   and the entry is evicted
    ///
    /// Dropping a caller, including the one that caused the miss, does not
    /// affect the fetch or the other callers.
    pub async fn get(&self, uri: &Url) -> SettingsOutcome {
        let entry = self.entry_for(uri);
        let mut outcome = entry.outcome.clone();

        let published = match outcome.wait_for(Option::is_some).await {
            Ok(value) => Option::clone(&value),
            Err(_) => None,
        };

        match published {
            Some(outcome) => outcome,
            None => {
                evict_generation(&self.entries, uri, entry.generation);
                Err(SettingsError::FetchAborted)
            }
        }
    }

    /// Return the entry for `uri`, inserting a pending one and spawning its
    /// fetch on a miss.
    fn entry_for(&self, uri: &Url) -> Arc<SettingsEntry> {
        let (entry, publisher) = match self.entries.entry(uri.clone()) {
            Entry::Occupied(occupied) => {
                self.cache_stats.lock().hits += 1;
                debug!("Settings cache hit for {}", uri);
                (Arc::clone(occupied.get()), None)
            }
            Entry::Vacant(vacant) => {
                self.cache_stats.lock().misses += 1;
                let (publisher, outcome) = watch::channel(None);
                let entry = Arc::new(SettingsEntry {
                    generation: self.next_generation.fetch_add(1, Ordering::Relaxed),
                    outcome,
                });
                debug!(
                    "Settings cache miss for {}, fetching (generation {})",
                    uri, entry.generation
                );
                vacant.insert(Arc::clone(&entry));
                (entry, Some(publisher))
            }
        };

        if let Some(publisher) = publisher {
            self.spawn_fetch(uri.clone(), entry.generation, publisher);
        }
        entry
    }

    fn spawn_fetch(
        &self,
        uri: Url,
        generation: u64,
        publisher: watch::Sender<Option<SettingsOutcome>>,
    ) {
        let provider = Arc::clone(&self.provider);
        let entries = Arc::clone(&self.entries);
        let cache_stats = Arc::clone(&self.cache_stats);

        tokio::spawn(async move {
            let outcome = match provider.fetch(&uri, SETTINGS_SECTION).await {
                Ok(settings) => {
                    debug!(
                        "Resolved settings for {} (maxNumberOfProblems: {})",
                        uri,
                        settings.max_number_of_problems()
                    );
                    Ok(Arc::new(settings))
                }
                Err(err) => {
                    cache_stats.lock().failures += 1;
                    warn!("Failed to fetch settings for {}: {}", uri, err);
                    evict_generation(&entries, &uri, generation);
                    Err(err)
                }
            };
            publisher.send_replace(Some(outcome));
        });
    }

    /// Remove the entry for `uri`, pending or resolved.
    ///
    /// # Returns
    ///
    /// Returns `true` if an entry was removed, `false` if none existed.
    pub fn remove(&self, uri: &Url) -> bool {
        let removed = self.entries.remove(uri).is_some();
        if removed {
            self.cache_stats.lock().invalidations += 1;
            debug!("Settings cache entry removed for {}", uri);
        }
        removed
    }

    /// Remove every entry.
    pub fn clear(&self) {
        let mut dropped = 0u64;
        self.entries.retain(|_, _| {
            dropped += 1;
            false
        });
        self.cache_stats.lock().invalidations += dropped;
        debug!("Settings cache cleared ({} entries dropped)", dropped);
    }

    /// State of the entry for `uri`, or `None` if absent.
    pub fn state(&self, uri: &Url) -> Option<EntryState> {
        self.entries.get(uri).map(|entry| match &*entry.outcome.borrow() {
            Some(Ok(_)) => EntryState::Resolved,
            _ => EntryState::Pending,
        })
    }

    pub fn contains(&self, uri: &Url) -> bool {
        self.entries.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get current cache statistics.
    pub fn statistics(&self) -> CacheStatistics {
        let mut stats = self.cache_stats.lock().clone();
        stats.current_size = self.entries.len();
        stats
    }
}

/// Drop the entry for `uri` unless it was already replaced.
fn evict_generation(entries: &DashMap<Url, Arc<SettingsEntry>>, uri: &Url, generation: u64) {
    if entries
        .remove_if(uri, |_, entry| entry.generation == generation)
        .is_some()
    {
        debug!("Evicted failed settings entry for {} (generation {})", uri, generation);
    }
}
