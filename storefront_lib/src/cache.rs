//! Explicit client-side query cache backed by `DashMap`.
//!
//! Each [`QueryKey`] maps to the serialized envelope last committed for it,
//! the time it was fetched, and a staleness flag. A separate per-key flight
//! record carries an epoch counter: cancellation bumps the epoch, and a
//! commit presenting an older epoch is discarded, so responses that were in
//! flight when the caller cancelled can never clobber later writes.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorefrontError;
use crate::key::QueryKey;

struct CacheEntry {
    value: String,
    fetched_at: Instant,
    stale: bool,
}

#[derive(Default)]
struct FlightRecord {
    epoch: u64,
    in_flight: bool,
}

/// Snapshot of one cache entry at lookup time.
pub struct CacheSnapshot {
    /// Serialized envelope as last committed or written.
    pub value: String,
    /// Time elapsed since the entry was committed or written.
    pub age: Duration,
    /// Whether the entry has been explicitly invalidated.
    pub stale: bool,
}

/// Thread-safe cache mapping query keys to fetched envelopes.
///
/// Staleness decisions belong to the query dispatch layer; the cache only
/// records what it was told and when.
#[derive(Default)]
pub struct QueryCache {
    entries: DashMap<QueryKey, CacheEntry>,
    flights: DashMap<QueryKey, FlightRecord>,
}

impl QueryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry stored under `key`, if any.
    pub fn lookup(&self, key: &QueryKey) -> Option<CacheSnapshot> {
        let entry = self.entries.get(key)?;
        Some(CacheSnapshot {
            value: entry.value.clone(),
            age: entry.fetched_at.elapsed(),
            stale: entry.stale,
        })
    }

    /// Marks a fetch as started for `key` and returns the epoch that a
    /// matching [`QueryCache::commit`] must present.
    pub fn begin(&self, key: &QueryKey) -> u64 {
        let mut flight = self.flights.entry(key.clone()).or_default();
        flight.in_flight = true;
        flight.epoch
    }

    /// Stores a fetched value if `epoch` is still current. Returns whether
    /// the value was committed; `false` means the key was cancelled while
    /// the fetch was in flight and the result was discarded.
    pub fn commit(&self, key: &QueryKey, epoch: u64, value: String) -> bool {
        {
            let mut flight = self.flights.entry(key.clone()).or_default();
            if flight.epoch != epoch {
                return false;
            }
            flight.in_flight = false;
        }
        self.entries.insert(
            key.clone(),
            CacheEntry {
                value,
                fetched_at: Instant::now(),
                stale: false,
            },
        );
        true
    }

    /// Clears the in-flight marker after a failed fetch.
    pub fn abort(&self, key: &QueryKey, epoch: u64) {
        if let Some(mut flight) = self.flights.get_mut(key) {
            if flight.epoch == epoch {
                flight.in_flight = false;
            }
        }
    }

    /// Writes a value directly, marking it fresh. Used for optimistic edits
    /// and cache reconciliation after mutations.
    pub fn write(&self, key: &QueryKey, value: String) {
        self.entries.insert(
            key.clone(),
            CacheEntry {
                value,
                fetched_at: Instant::now(),
                stale: false,
            },
        );
    }

    /// Typed read of a cached value.
    pub fn get_as<T: DeserializeOwned>(&self, key: &QueryKey) -> Result<Option<T>, StorefrontError> {
        match self.lookup(key) {
            Some(snapshot) => Ok(Some(serde_json::from_str(&snapshot.value)?)),
            None => Ok(None),
        }
    }

    /// Typed write of a cached value.
    pub fn write_as<T: Serialize>(&self, key: &QueryKey, value: &T) -> Result<(), StorefrontError> {
        self.write(key, serde_json::to_string(value)?);
        Ok(())
    }

    /// Marks every entry under `prefix` stale. Stale entries stay readable,
    /// but the next query dispatch for them refetches.
    pub fn invalidate_prefix(&self, prefix: &QueryKey) {
        for mut entry in self.entries.iter_mut() {
            if entry.key().starts_with(prefix) {
                entry.stale = true;
            }
        }
    }

    /// Bumps the epoch of every flight record under `prefix` so responses
    /// still in flight are discarded at commit time.
    pub fn cancel_prefix(&self, prefix: &QueryKey) {
        for mut flight in self.flights.iter_mut() {
            if flight.key().starts_with(prefix) {
                flight.epoch += 1;
                flight.in_flight = false;
            }
        }
    }

    /// Removes all entries and flight records.
    pub fn clear(&self) {
        self.entries.clear();
        self.flights.clear();
    }

    /// Whether a fetch for `key` is currently in flight.
    pub fn in_flight(&self, key: &QueryKey) -> bool {
        self.flights.get(key).map(|f| f.in_flight).unwrap_or(false)
    }
}
