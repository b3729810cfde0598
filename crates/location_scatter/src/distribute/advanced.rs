//! Constrained distribution with per-sublocation capacity and an optional guaranteed round.
//!
//! Placement order is fixed: guaranteed items, guaranteed entities, remaining items, remaining
//! entities, all drawing from one random stream. A remaining value gets at most
//! [`MAX_PLACEMENT_ATTEMPTS`] draws; if every drawn sublocation is full it is dropped from the
//! layout and only counted in [`Distribution`].
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distribute::events::EventSink;
use crate::distribute::{
    assemble_layout, cleared_sublocations, emit_finished, emit_started, place, Distribution,
    Placeable,
};
use crate::error::{Error, Result};
use crate::location::{Location, Pool};
use crate::random::{random_source, RandomSource};
use crate::snapshot::SnapshotStore;

/// Draws allowed per item or entity before it is dropped.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Options for [`distribute_advanced`].
///
/// The minimums are carried for callers and validation only: the guaranteed round gives each
/// sublocation at most one value, and no later pass tops sublocations up to the minimum.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvancedOptions {
    /// Seed for a reproducible layout; `None` uses the thread-local generator.
    pub seed: Option<String>,
    pub min_items_per_sublocation: usize,
    /// `None` means unbounded.
    pub max_items_per_sublocation: Option<usize>,
    pub min_entities_per_sublocation: usize,
    /// `None` means unbounded.
    pub max_entities_per_sublocation: Option<usize>,
    /// Give each sublocation one item and one entity, in pool order, before random placement.
    pub guaranteed_distribution: bool,
}

impl AdvancedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    pub fn with_min_items_per_sublocation(mut self, min: usize) -> Self {
        self.min_items_per_sublocation = min;
        self
    }

    pub fn with_max_items_per_sublocation(mut self, max: usize) -> Self {
        self.max_items_per_sublocation = Some(max);
        self
    }

    pub fn with_min_entities_per_sublocation(mut self, min: usize) -> Self {
        self.min_entities_per_sublocation = min;
        self
    }

    pub fn with_max_entities_per_sublocation(mut self, max: usize) -> Self {
        self.max_entities_per_sublocation = Some(max);
        self
    }

    pub fn with_guaranteed_distribution(mut self, guaranteed: bool) -> Self {
        self.guaranteed_distribution = guaranteed;
        self
    }

    /// Validates the options, returning an error if a minimum exceeds its maximum.
    pub fn validate(&self) -> Result<()> {
        if let Some(max) = self.max_items_per_sublocation {
            if self.min_items_per_sublocation > max {
                return Err(Error::InvalidConfig(format!(
                    "min_items_per_sublocation ({}) exceeds max_items_per_sublocation ({max})",
                    self.min_items_per_sublocation
                )));
            }
        }
        if let Some(max) = self.max_entities_per_sublocation {
            if self.min_entities_per_sublocation > max {
                return Err(Error::InvalidConfig(format!(
                    "min_entities_per_sublocation ({}) exceeds max_entities_per_sublocation ({max})",
                    self.min_entities_per_sublocation
                )));
            }
        }
        Ok(())
    }
}

/// Distributes `parent`'s pool under `options`, seeding from [`AdvancedOptions::seed`].
///
/// Options are not validated here; see [`crate::distribute::Distributor`] for the checked
/// entry point.
pub fn distribute_advanced(
    parent: &Location,
    snapshots: &SnapshotStore,
    options: &AdvancedOptions,
) -> Location {
    let mut rng = random_source(options.seed.as_deref());
    distribute_advanced_with_events(parent, snapshots, options, rng.as_mut(), &mut ()).into_layout()
}

/// Like [`distribute_advanced`], drawing from `rng` (the seed in `options` is ignored) and
/// reporting placements and drops to `sink`.
pub fn distribute_advanced_with_events(
    parent: &Location,
    snapshots: &SnapshotStore,
    options: &AdvancedOptions,
    rng: &mut dyn RandomSource,
    sink: &mut dyn EventSink,
) -> Distribution {
    if parent.is_leaf() {
        return Distribution::unchanged(parent.clone());
    }
    let pool = snapshots.source_pool(parent);
    distribute_pool(parent, &pool, options, rng, sink)
}

pub(crate) fn distribute_pool(
    parent: &Location,
    pool: &Pool,
    options: &AdvancedOptions,
    rng: &mut dyn RandomSource,
    sink: &mut dyn EventSink,
) -> Distribution {
    emit_started(parent, pool, sink);

    let mut sublocations = cleared_sublocations(parent);
    let (item_head, entity_head) = if options.guaranteed_distribution {
        (
            sublocations.len().min(pool.items.len()),
            sublocations.len().min(pool.entities.len()),
        )
    } else {
        (0, 0)
    };

    // The guaranteed round ignores capacity.
    for (idx, item) in pool.items[..item_head].iter().enumerate() {
        place(&parent.id, &mut sublocations, idx, item, true, sink);
    }
    for (idx, entity) in pool.entities[..entity_head].iter().enumerate() {
        place(&parent.id, &mut sublocations, idx, entity, true, sink);
    }

    let items_dropped = scatter_capped(
        &parent.id,
        &mut sublocations,
        &pool.items[item_head..],
        options.max_items_per_sublocation,
        rng,
        sink,
    );
    let entities_dropped = scatter_capped(
        &parent.id,
        &mut sublocations,
        &pool.entities[entity_head..],
        options.max_entities_per_sublocation,
        rng,
        sink,
    );

    let result = Distribution {
        layout: assemble_layout(parent, sublocations),
        items_dropped,
        entities_dropped,
    };
    emit_finished(&result, sink);
    result
}

/// Places each value in a random sublocation below `cap`, returning how many were dropped.
fn scatter_capped<T: Placeable>(
    location_id: &str,
    sublocations: &mut [Location],
    values: &[T],
    cap: Option<usize>,
    rng: &mut dyn RandomSource,
    sink: &mut dyn EventSink,
) -> usize {
    let mut dropped = 0;
    for value in values {
        let mut placed = false;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let idx = rng.pick_index(sublocations.len());
            let has_room = cap.is_none_or(|cap| T::bucket(&mut sublocations[idx]).len() < cap);
            if has_room {
                place(location_id, sublocations, idx, value, false, sink);
                placed = true;
                break;
            }
        }
        if !placed {
            dropped += 1;
            debug!(
                "Dropped '{}' from '{}' after {} placement attempts.",
                value.id(),
                location_id,
                MAX_PLACEMENT_ATTEMPTS
            );
            if sink.wants(T::DROPPED) {
                sink.send(T::dropped_event(
                    location_id,
                    value.id(),
                    MAX_PLACEMENT_ATTEMPTS,
                ));
            }
        }
    }
    dropped
}
