use std::time::Duration;

use criterion::{Criterion, Throughput};
use location_scatter::prelude::*;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// A composite location with `subs` sublocations and a pool of `items` items and
/// `entities` entities.
pub fn make_composite(id: &str, subs: usize, items: usize, entities: usize) -> Location {
    let parent = Location::new(id, id)
        .with_items(
            (0..items)
                .map(|i| LocationItem::new(format!("item_{i}"), "Item", ItemCategory::Material))
                .collect(),
        )
        .with_entities(
            (0..entities)
                .map(|i| {
                    LocationEntity::new(format!("entity_{i}"), "Entity", EntityDisposition::Hostile)
                })
                .collect(),
        );
    let children = (0..subs)
        .map(|i| Location::sublocation_of(&parent, &format!("room_{i}")))
        .collect();
    parent.with_sublocations(children)
}
