//! Snapshot cache for fetched collections

use std::time::{Duration, Instant};

/// Single-slot cache holding the most recent snapshot of a remote collection.
///
/// A snapshot is reused while it is younger than the freshness window and
/// replaced wholesale on store; there is no incremental merge.
#[derive(Debug)]
pub struct SnapshotCache<T> {
    freshness: Duration,
    entry: Option<(Instant, T)>,
}

impl<T: Clone> SnapshotCache<T> {
    pub fn new(freshness: Duration) -> Self {
        Self {
            freshness,
            entry: None,
        }
    }

    /// The cached snapshot, if it is still within the freshness window.
    pub fn get_fresh(&self) -> Option<T> {
        let (stored_at, snapshot) = self.entry.as_ref()?;
        if stored_at.elapsed() < self.freshness {
            Some(snapshot.clone())
        } else {
            None
        }
    }

    pub fn store(&mut self, snapshot: T) {
        self.entry = Some((Instant::now(), snapshot));
    }

    /// Drop the snapshot so the next fetch revalidates against the backend.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
