//! Store of undistributed item and entity pools.
//!
//! Distribution clears a composite location's own items and entities, so every later
//! redistribution must read from a copy taken before the first one. [`SnapshotStore`] holds
//! that copy per composite location id. Capturing is idempotent per id: an existing snapshot
//! is never overwritten.
//!
//! Typical usage:
//! - Build the store once with [`SnapshotStore::capture`] right after the catalog is loaded.
//! - Resolve the pool for a distribution with [`SnapshotStore::source_pool`], or with
//!   [`SnapshotStore::require_pool`] when a missing snapshot must be an error.
use std::borrow::Cow;
use std::collections::HashMap;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::location::{Location, LocationId, Pool};

/// Snapshot pools keyed by composite [`LocationId`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    entries: HashMap<LocationId, Pool>,
}

impl SnapshotStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Creates a store holding a snapshot of every composite location in `catalog`.
    pub fn capture(catalog: &Catalog) -> Self {
        let mut store = Self::new();
        store.capture_from(catalog);
        store
    }

    /// Snapshots every composite location in `catalog` that has no snapshot yet.
    ///
    /// Returns the number of newly captured locations.
    pub fn capture_from(&mut self, catalog: &Catalog) -> usize {
        let mut captured = 0;
        let mut skipped = 0;
        for location in catalog.composites() {
            if self.record(location) {
                captured += 1;
            } else {
                skipped += 1;
            }
        }
        info!(
            "Captured {} location snapshots ({} already present).",
            captured, skipped
        );
        captured
    }

    /// Stores the current pool of `location` unless a snapshot for its id exists.
    ///
    /// Returns `true` if a new snapshot was stored.
    pub fn record(&mut self, location: &Location) -> bool {
        if self.entries.contains_key(&location.id) {
            debug!("Snapshot for '{}' already present; keeping it.", location.id);
            return false;
        }
        self.entries.insert(location.id.clone(), Pool::of(location));
        true
    }

    /// Gets the snapshot for the given id, if one was captured.
    pub fn get(&self, id: &str) -> Option<&Pool> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The pool to distribute for `parent`: its snapshot if present, otherwise a copy of its
    /// current items and entities.
    pub fn source_pool<'a>(&'a self, parent: &Location) -> Cow<'a, Pool> {
        match self.entries.get(&parent.id) {
            Some(pool) => Cow::Borrowed(pool),
            None => Cow::Owned(Pool::of(parent)),
        }
    }

    /// Like [`SnapshotStore::source_pool`], but a composite location without a snapshot is an
    /// error. Leaves resolve to their live pool.
    pub fn require_pool<'a>(&'a self, parent: &Location) -> Result<Cow<'a, Pool>> {
        match self.entries.get(&parent.id) {
            Some(pool) => Ok(Cow::Borrowed(pool)),
            None if parent.is_composite() => Err(Error::MissingSnapshot {
                id: parent.id.clone(),
            }),
            None => Ok(Cow::Owned(Pool::of(parent))),
        }
    }

    /// Checks that every composite location in `catalog` has a snapshot.
    pub fn ensure_covers(&self, catalog: &Catalog) -> Result<()> {
        match catalog
            .composites()
            .into_iter()
            .find(|l| !self.entries.contains_key(&l.id))
        {
            Some(missing) => Err(Error::MissingSnapshot {
                id: missing.id.clone(),
            }),
            None => Ok(()),
        }
    }
}
