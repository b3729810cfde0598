//! Distribution of a composite location's pool across its sublocations.
//!
//! Two variants are provided:
//! - [`basic`]: every item and entity goes to a uniformly drawn sublocation; nothing is lost.
//! - [`advanced`]: optional one-each guaranteed round, per-sublocation capacity, and a fixed
//!   retry ceiling after which content is dropped.
//!
//! Both read the pool from a [`SnapshotStore`] so repeated distributions of the same location
//! start from the original content rather than an already distributed copy. [`Distributor`]
//! bundles the store with a pool-resolution policy and seeds the random source.
use std::borrow::Cow;

use tracing::{debug, warn};

use crate::error::Result;
use crate::location::{Location, LocationEntity, LocationItem, Pool};
use crate::random::random_source;
use crate::snapshot::SnapshotStore;

pub mod advanced;
pub mod basic;
pub mod events;

pub use advanced::{
    distribute_advanced, distribute_advanced_with_events, AdvancedOptions, MAX_PLACEMENT_ATTEMPTS,
};
pub use basic::{distribute, distribute_with_events};

use events::{DistributionEvent, DistributionEventKind, EventSink};

/// Result of distributing one location.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    /// The distributed location: own pool cleared, sublocations filled.
    pub layout: Location,
    /// Items that found no sublocation with room. Always 0 in basic mode.
    pub items_dropped: usize,
    /// Entities that found no sublocation with room. Always 0 in basic mode.
    pub entities_dropped: usize,
}

impl Distribution {
    fn unchanged(layout: Location) -> Self {
        Self {
            layout,
            items_dropped: 0,
            entities_dropped: 0,
        }
    }

    /// True when nothing from the pool was dropped.
    pub fn is_lossless(&self) -> bool {
        self.items_dropped == 0 && self.entities_dropped == 0
    }

    pub fn into_layout(self) -> Location {
        self.layout
    }
}

/// Runs distributions against a [`SnapshotStore`].
///
/// In lenient mode (the default) a composite location without a snapshot is distributed from
/// its live items and entities. In strict mode that case is a
/// [`crate::error::Error::MissingSnapshot`].
#[derive(Debug, Clone, Copy)]
pub struct Distributor<'a> {
    /// Snapshot pools used as the distribution source.
    pub snapshots: &'a SnapshotStore,
    /// Whether a missing snapshot for a composite location is an error.
    pub strict: bool,
}

impl<'a> Distributor<'a> {
    pub fn new(snapshots: &'a SnapshotStore) -> Self {
        Self {
            snapshots,
            strict: false,
        }
    }

    pub fn strict(snapshots: &'a SnapshotStore) -> Self {
        Self {
            snapshots,
            strict: true,
        }
    }

    fn resolve_pool(&self, parent: &Location) -> Result<Cow<'a, Pool>> {
        if self.strict {
            self.snapshots.require_pool(parent)
        } else {
            Ok(self.snapshots.source_pool(parent))
        }
    }

    /// Basic distribution, seeded when `seed` is given.
    pub fn distribute(&self, parent: &Location, seed: Option<&str>) -> Result<Location> {
        self.distribute_with_events(parent, seed, &mut ())
            .map(Distribution::into_layout)
    }

    pub fn distribute_with_events(
        &self,
        parent: &Location,
        seed: Option<&str>,
        sink: &mut dyn EventSink,
    ) -> Result<Distribution> {
        if parent.is_leaf() {
            return Ok(Distribution::unchanged(parent.clone()));
        }
        let pool = self.resolve_pool(parent)?;
        let mut rng = random_source(seed);
        Ok(basic::distribute_pool(parent, &pool, rng.as_mut(), sink))
    }

    /// Advanced distribution. Options are validated first; the random source is seeded from
    /// [`AdvancedOptions::seed`].
    pub fn distribute_advanced(
        &self,
        parent: &Location,
        options: &AdvancedOptions,
    ) -> Result<Distribution> {
        self.distribute_advanced_with_events(parent, options, &mut ())
    }

    pub fn distribute_advanced_with_events(
        &self,
        parent: &Location,
        options: &AdvancedOptions,
        sink: &mut dyn EventSink,
    ) -> Result<Distribution> {
        options.validate()?;
        if parent.is_leaf() {
            return Ok(Distribution::unchanged(parent.clone()));
        }
        let pool = self.resolve_pool(parent)?;
        let mut rng = random_source(options.seed.as_deref());
        Ok(advanced::distribute_pool(
            parent,
            &pool,
            options,
            rng.as_mut(),
            sink,
        ))
    }
}

/// Content that can be assigned to a sublocation.
pub(crate) trait Placeable: Clone {
    const PLACED: DistributionEventKind;
    const DROPPED: DistributionEventKind;

    fn id(&self) -> &str;

    fn bucket(location: &mut Location) -> &mut Vec<Self>;

    fn placed_event(
        location_id: &str,
        sublocation_id: &str,
        id: &str,
        guaranteed: bool,
    ) -> DistributionEvent;

    fn dropped_event(location_id: &str, id: &str, attempts: usize) -> DistributionEvent;
}

impl Placeable for LocationItem {
    const PLACED: DistributionEventKind = DistributionEventKind::ItemPlaced;
    const DROPPED: DistributionEventKind = DistributionEventKind::ItemDropped;

    fn id(&self) -> &str {
        &self.id
    }

    fn bucket(location: &mut Location) -> &mut Vec<Self> {
        &mut location.items
    }

    fn placed_event(
        location_id: &str,
        sublocation_id: &str,
        id: &str,
        guaranteed: bool,
    ) -> DistributionEvent {
        DistributionEvent::ItemPlaced {
            location_id: location_id.into(),
            sublocation_id: sublocation_id.into(),
            item_id: id.into(),
            guaranteed,
        }
    }

    fn dropped_event(location_id: &str, id: &str, attempts: usize) -> DistributionEvent {
        DistributionEvent::ItemDropped {
            location_id: location_id.into(),
            item_id: id.into(),
            attempts,
        }
    }
}

impl Placeable for LocationEntity {
    const PLACED: DistributionEventKind = DistributionEventKind::EntityPlaced;
    const DROPPED: DistributionEventKind = DistributionEventKind::EntityDropped;

    fn id(&self) -> &str {
        &self.id
    }

    fn bucket(location: &mut Location) -> &mut Vec<Self> {
        &mut location.entities
    }

    fn placed_event(
        location_id: &str,
        sublocation_id: &str,
        id: &str,
        guaranteed: bool,
    ) -> DistributionEvent {
        DistributionEvent::EntityPlaced {
            location_id: location_id.into(),
            sublocation_id: sublocation_id.into(),
            entity_id: id.into(),
            guaranteed,
        }
    }

    fn dropped_event(location_id: &str, id: &str, attempts: usize) -> DistributionEvent {
        DistributionEvent::EntityDropped {
            location_id: location_id.into(),
            entity_id: id.into(),
            attempts,
        }
    }
}

/// Appends `value` to sublocation `idx` and reports the placement.
pub(crate) fn place<T: Placeable>(
    location_id: &str,
    sublocations: &mut [Location],
    idx: usize,
    value: &T,
    guaranteed: bool,
    sink: &mut dyn EventSink,
) {
    let target = &mut sublocations[idx];
    if sink.wants(T::PLACED) {
        sink.send(T::placed_event(
            location_id,
            &target.id,
            value.id(),
            guaranteed,
        ));
    }
    T::bucket(target).push(value.clone());
}

/// Copies of the parent's sublocations with empty items and entities.
pub(crate) fn cleared_sublocations(parent: &Location) -> Vec<Location> {
    parent
        .sublocations
        .iter()
        .map(|sub| Location {
            id: sub.id.clone(),
            name: sub.name.clone(),
            description: sub.description.clone(),
            tags: sub.tags.clone(),
            sublocations: sub.sublocations.clone(),
            items: Vec::new(),
            entities: Vec::new(),
        })
        .collect()
}

/// A copy of the parent with its own pool cleared and the given sublocations.
pub(crate) fn assemble_layout(parent: &Location, sublocations: Vec<Location>) -> Location {
    Location {
        id: parent.id.clone(),
        name: parent.name.clone(),
        description: parent.description.clone(),
        tags: parent.tags.clone(),
        sublocations,
        items: Vec::new(),
        entities: Vec::new(),
    }
}

pub(crate) fn emit_started(parent: &Location, pool: &Pool, sink: &mut dyn EventSink) {
    if pool.is_empty() {
        warn!("Location '{}' has an empty pool to distribute.", parent.id);
        if sink.wants(DistributionEventKind::Warning) {
            sink.send(DistributionEvent::Warning {
                context: format!("location:{}", parent.id),
                message: "Pool is empty; sublocations stay empty".into(),
            });
        }
    }
    if sink.wants(DistributionEventKind::DistributionStarted) {
        sink.send(DistributionEvent::DistributionStarted {
            location_id: parent.id.clone(),
            sublocations: parent.sublocations.len(),
            items: pool.items.len(),
            entities: pool.entities.len(),
        });
    }
}

pub(crate) fn emit_finished(result: &Distribution, sink: &mut dyn EventSink) {
    let layout = &result.layout;
    debug!(
        "Distributed '{}': {} items, {} entities placed; {} items, {} entities dropped.",
        layout.id,
        layout.distributed_item_count(),
        layout.distributed_entity_count(),
        result.items_dropped,
        result.entities_dropped,
    );
    if sink.wants(DistributionEventKind::DistributionFinished) {
        sink.send(DistributionEvent::DistributionFinished {
            location_id: layout.id.clone(),
            items_placed: layout.distributed_item_count(),
            entities_placed: layout.distributed_entity_count(),
            items_dropped: result.items_dropped,
            entities_dropped: result.entities_dropped,
        });
    }
}
