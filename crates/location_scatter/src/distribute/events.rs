//! Event types and sinks for observing distribution runs.
//!
//! This module defines [`DistributionEvent`] and a small set of sinks to collect or forward
//! events while [`crate::distribute::distribute_with_events`] or
//! [`crate::distribute::distribute_advanced_with_events`] run.
use crate::location::LocationId;

/// Describes events emitted while distributing a pool.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum DistributionEvent {
    /// Emitted once the pool for a composite location has been resolved.
    DistributionStarted {
        /// The composite location being distributed.
        location_id: LocationId,
        /// Number of sublocations receiving content.
        sublocations: usize,
        /// Items in the source pool.
        items: usize,
        /// Entities in the source pool.
        entities: usize,
    },

    /// Emitted when an item is assigned to a sublocation.
    ItemPlaced {
        location_id: LocationId,
        sublocation_id: LocationId,
        item_id: String,
        /// True when placed by the guaranteed round rather than a random draw.
        guaranteed: bool,
    },

    /// Emitted when an entity is assigned to a sublocation.
    EntityPlaced {
        location_id: LocationId,
        sublocation_id: LocationId,
        entity_id: String,
        /// True when placed by the guaranteed round rather than a random draw.
        guaranteed: bool,
    },

    /// Emitted when an item found no sublocation with room within the attempt ceiling.
    ItemDropped {
        location_id: LocationId,
        item_id: String,
        attempts: usize,
    },

    /// Emitted when an entity found no sublocation with room within the attempt ceiling.
    EntityDropped {
        location_id: LocationId,
        entity_id: String,
        attempts: usize,
    },

    /// Emitted when distribution of a location completes.
    DistributionFinished {
        location_id: LocationId,
        items_placed: usize,
        entities_placed: usize,
        items_dropped: usize,
        entities_dropped: usize,
    },

    /// Non-fatal warning generated during distribution.
    Warning {
        /// Context string (e.g. location id).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`DistributionEvent`], used to filter what a sink receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistributionEventKind {
    DistributionStarted,
    ItemPlaced,
    EntityPlaced,
    ItemDropped,
    EntityDropped,
    DistributionFinished,
    Warning,
}

impl DistributionEvent {
    pub fn kind(&self) -> DistributionEventKind {
        match self {
            DistributionEvent::DistributionStarted { .. } => {
                DistributionEventKind::DistributionStarted
            }
            DistributionEvent::ItemPlaced { .. } => DistributionEventKind::ItemPlaced,
            DistributionEvent::EntityPlaced { .. } => DistributionEventKind::EntityPlaced,
            DistributionEvent::ItemDropped { .. } => DistributionEventKind::ItemDropped,
            DistributionEvent::EntityDropped { .. } => DistributionEventKind::EntityDropped,
            DistributionEvent::DistributionFinished { .. } => {
                DistributionEventKind::DistributionFinished
            }
            DistributionEvent::Warning { .. } => DistributionEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`DistributionEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: DistributionEvent);

    /// Whether events of `kind` should be built and sent at all.
    #[inline]
    fn wants(&mut self, _kind: DistributionEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: DistributionEvent) {}

    #[inline]
    fn wants(&mut self, _kind: DistributionEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(DistributionEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(DistributionEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(DistributionEvent),
{
    #[inline]
    fn send(&mut self, event: DistributionEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally restricted to some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<DistributionEvent>,
    only: Option<Vec<DistributionEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            only: None,
        }
    }

    /// Collects only events of the listed kinds.
    pub fn only(kinds: &[DistributionEventKind]) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.to_vec()),
        }
    }

    pub fn into_inner(self) -> Vec<DistributionEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[DistributionEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: DistributionEvent) {
        self.events.push(event);
    }

    fn wants(&mut self, kind: DistributionEventKind) -> bool {
        match &self.only {
            Some(kinds) => kinds.contains(&kind),
            None => true,
        }
    }
}
