#![forbid(unsafe_code)]
//! location_scatter: Seeded distribution of location content across sublocations.
//!
//! Modules:
//! - location, catalog: the location/item/entity data model and an id-indexed catalog
//! - random: seeded and ambient random sources
//! - snapshot: the undistributed pool of every composite location, captured once
//! - distribute: basic and capacity-constrained distribution, with events
//! - manager, shared: per-location layout caches (single-threaded and thread-safe)
//! - spawn: requirement-based entity filtering
pub mod catalog;
pub mod distribute;
pub mod error;
pub mod location;
pub mod manager;
pub mod random;
pub mod shared;
pub mod snapshot;
pub mod spawn;

/// Convenient re-exports for common types. Import with `use location_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::catalog::Catalog;
    pub use crate::distribute::events::{
        DistributionEvent, DistributionEventKind, EventSink, FnSink, VecSink,
    };
    pub use crate::distribute::{
        distribute, distribute_advanced, distribute_advanced_with_events, distribute_with_events,
        AdvancedOptions, Distribution, Distributor, MAX_PLACEMENT_ATTEMPTS,
    };
    pub use crate::error::{Error, Result};
    pub use crate::location::{
        EntityDisposition, EntityRequirements, ItemCategory, ItemRequirements, Location,
        LocationEntity, LocationId, LocationItem, Pool, Rarity, TimeOfDay,
    };
    pub use crate::manager::LocationManager;
    pub use crate::random::{random_source, AmbientRandom, RandomSource, SeededRandom};
    pub use crate::shared::SharedLocationManager;
    pub use crate::snapshot::SnapshotStore;
    pub use crate::spawn::{eligible_entities, SpawnContext};
}
