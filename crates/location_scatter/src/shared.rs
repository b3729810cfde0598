//! Thread-safe layout cache.
//!
//! [`SharedLocationManager`] keeps one mutex-guarded slot per location id. Requests for the
//! same id are serialized on that slot, so two threads never compute and write the same entry
//! at once; requests for different ids only share a brief read lock on the slot map.
//! The snapshot store is captured or validated in the constructor, before any request can run.
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::distribute::{distribute, distribute_advanced, AdvancedOptions};
use crate::error::Result;
use crate::location::{Location, LocationId};
use crate::snapshot::SnapshotStore;

type Slot = Arc<Mutex<Option<Arc<Location>>>>;

/// Layout cache that can be shared across threads.
#[derive(Debug)]
pub struct SharedLocationManager {
    catalog: Arc<Catalog>,
    snapshots: Arc<SnapshotStore>,
    slots: RwLock<HashMap<LocationId, Slot>>,
}

impl SharedLocationManager {
    /// Creates a manager, capturing the snapshot of every composite location first.
    pub fn new(catalog: Catalog) -> Self {
        let snapshots = SnapshotStore::capture(&catalog);
        Self {
            catalog: Arc::new(catalog),
            snapshots: Arc::new(snapshots),
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a manager from an existing snapshot store, failing if the store is missing a
    /// composite location of `catalog`.
    pub fn with_snapshots(catalog: Catalog, snapshots: SnapshotStore) -> Result<Self> {
        snapshots.ensure_covers(&catalog)?;
        Ok(Self {
            catalog: Arc::new(catalog),
            snapshots: Arc::new(snapshots),
            slots: RwLock::new(HashMap::new()),
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
    pub fn get_location(&self, id: &str, force_new: bool) -> Option<Arc<Location>> {
        let parent = self.catalog.get(id)?;
        let slot = self.slot(id);
        let mut entry = lock(&slot);
        if !force_new {
            if let Some(layout) = entry.as_ref() {
                debug!("Serving cached layout for '{}'.", id);
                return Some(Arc::clone(layout));
            }
        }
        let layout = Arc::new(distribute(parent, &self.snapshots, None));
        *entry = Some(Arc::clone(&layout));
        Some(layout)
    }

    /// Recomputes the layout for `id`, optionally seeded, and replaces the cached entry.
    pub fn refresh_location_layout(&self, id: &str, seed: Option<&str>) -> Option<Arc<Location>> {
        let parent = self.catalog.get(id)?;
        let slot = self.slot(id);
        let mut entry = lock(&slot);
        let layout = Arc::new(distribute(parent, &self.snapshots, seed));
        *entry = Some(Arc::clone(&layout));
        info!(
            "Refreshed layout for '{}' ({}).",
            id,
            if seed.is_some_and(|s| !s.is_empty()) {
                "seeded"
            } else {
                "unseeded"
            }
        );
        Some(layout)
    }

    /// Drops every cached layout. Slots stay allocated so in-flight requests keep their lock.
    pub fn clear_all_layouts(&self) {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        for slot in slots.values() {
            *lock(slot) = None;
        }
        info!("Cleared cached layouts for {} locations.", slots.len());
    }

    /// Computes a basic layout for `id` without touching the cache.
    pub fn fresh_layout(&self, id: &str, seed: Option<&str>) -> Option<Location> {
        let parent = self.catalog.get(id)?;
        Some(distribute(parent, &self.snapshots, seed))
    }

    /// Computes an advanced layout for `id` without touching the cache.
    pub fn advanced_layout(&self, id: &str, options: &AdvancedOptions) -> Result<Option<Location>> {
        options.validate()?;
        Ok(self
            .catalog
            .get(id)
            .map(|parent| distribute_advanced(parent, &self.snapshots, options)))
    }

    /// The cached layout for `id`, without computing one.
    pub fn cached_layout(&self, id: &str) -> Option<Arc<Location>> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.get(id).and_then(|slot| lock(slot).clone())
    }

    /// Number of locations with a cached layout.
    pub fn len(&self) -> usize {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| lock(slot).is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, id: &str) -> Slot {
        if let Some(slot) = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
        {
            return Arc::clone(slot);
        }
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(id.to_owned()).or_default())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
