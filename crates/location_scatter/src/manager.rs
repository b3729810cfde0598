//! Cache of the currently active layout per location.
//!
//! [`LocationManager`] owns the catalog together with a snapshot store that covers it, and
//! maps each requested location id to its last computed layout. Entries live until they are
//! refreshed or the whole cache is cleared; the key space is the fixed catalog, so there is no
//! eviction.
use std::collections::HashMap;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::distribute::{distribute, distribute_advanced, AdvancedOptions};
use crate::error::Result;
use crate::location::{Location, LocationId};
use crate::snapshot::SnapshotStore;

/// Layout cache keyed by [`LocationId`].
#[derive(Debug, Clone)]
pub struct LocationManager {
    catalog: Catalog,
    snapshots: SnapshotStore,
    layouts: HashMap<LocationId, Location>,
    computations: usize,
}

impl LocationManager {
    /// Creates a manager, capturing the snapshot of every composite location first.
    pub fn new(catalog: Catalog) -> Self {
        let snapshots = SnapshotStore::capture(&catalog);
        Self {
            catalog,
            snapshots,
            layouts: HashMap::new(),
            computations: 0,
        }
    }

    /// Creates a manager from an existing snapshot store, failing if the store is missing a
    /// composite location of `catalog`.
    pub fn with_snapshots(catalog: Catalog, snapshots: SnapshotStore) -> Result<Self> {
        snapshots.ensure_covers(&catalog)?;
        Ok(Self {
            catalog,
            snapshots,
            layouts: HashMap::new(),
            computations: 0,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    /// Returns the cached layout for `id`, computing an unseeded one if none is cached or
    /// `force_new` is set. `None` if the catalog has no such location.
    pub fn get_location(&mut self, id: &str, force_new: bool) -> Option<&Location> {
        if !force_new && self.layouts.contains_key(id) {
            debug!("Serving cached layout for '{}'.", id);
            return self.layouts.get(id);
        }
        let fresh = self.fresh_layout(id, None)?;
        self.store(id, fresh)
    }

    /// Recomputes the layout for `id`, optionally seeded, and replaces the cached entry.
    pub fn refresh_location_layout(&mut self, id: &str, seed: Option<&str>) -> Option<&Location> {
        let fresh = self.fresh_layout(id, seed)?;
        info!(
            "Refreshed layout for '{}' ({}).",
            id,
            if seed.is_some_and(|s| !s.is_empty()) {
                "seeded"
            } else {
                "unseeded"
            }
        );
        self.store(id, fresh)
    }

    /// Drops every cached layout.
    pub fn clear_all_layouts(&mut self) {
        info!("Clearing {} cached layouts.", self.layouts.len());
        self.layouts.clear();
    }

    /// Computes a basic layout for `id` without touching the cache.
    pub fn fresh_layout(&self, id: &str, seed: Option<&str>) -> Option<Location> {
        let parent = self.catalog.get(id)?;
        Some(distribute(parent, &self.snapshots, seed))
    }

    /// Computes an advanced layout for `id` without touching the cache.
    ///
    /// Invalid options are an error; an unknown id is `Ok(None)`.
    pub fn advanced_layout(&self, id: &str, options: &AdvancedOptions) -> Result<Option<Location>> {
        options.validate()?;
        Ok(self
            .catalog
            .get(id)
            .map(|parent| distribute_advanced(parent, &self.snapshots, options)))
    }

    /// The cached layout for `id`, without computing one.
    pub fn cached_layout(&self, id: &str) -> Option<&Location> {
        self.layouts.get(id)
    }

    /// Number of layouts computed into the cache so far.
    pub fn computations(&self) -> usize {
        self.computations
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    fn store(&mut self, id: &str, layout: Location) -> Option<&Location> {
        self.computations += 1;
        self.layouts.insert(id.to_owned(), layout);
        self.layouts.get(id)
    }
}
