//! Unconstrained distribution: each item and entity goes to one uniformly drawn sublocation.
use crate::distribute::events::EventSink;
use crate::distribute::{
    assemble_layout, cleared_sublocations, emit_finished, emit_started, place, Distribution,
    Placeable,
};
use crate::location::{Location, Pool};
use crate::random::{random_source, RandomSource};
use crate::snapshot::SnapshotStore;

/// Distributes `parent`'s pool across its sublocations.
///
/// The pool is the snapshot for `parent.id` when one exists, otherwise `parent`'s current
/// content. A seed makes the result reproducible; without one the thread-local generator is
/// used. A leaf location is returned unchanged.
pub fn distribute(parent: &Location, snapshots: &SnapshotStore, seed: Option<&str>) -> Location {
    let mut rng = random_source(seed);
    distribute_with_events(parent, snapshots, rng.as_mut(), &mut ()).into_layout()
}

/// Like [`distribute`], drawing from `rng` and reporting to `sink`.
pub fn distribute_with_events(
    parent: &Location,
    snapshots: &SnapshotStore,
    rng: &mut dyn RandomSource,
    sink: &mut dyn EventSink,
) -> Distribution {
    if parent.is_leaf() {
        return Distribution::unchanged(parent.clone());
    }
    let pool = snapshots.source_pool(parent);
    distribute_pool(parent, &pool, rng, sink)
}

pub(crate) fn distribute_pool(
    parent: &Location,
    pool: &Pool,
    rng: &mut dyn RandomSource,
    sink: &mut dyn EventSink,
) -> Distribution {
    emit_started(parent, pool, sink);

    let mut sublocations = cleared_sublocations(parent);
    // Items first, then entities, from one shared stream.
    scatter_uniform(&parent.id, &mut sublocations, &pool.items, rng, sink);
    scatter_uniform(&parent.id, &mut sublocations, &pool.entities, rng, sink);

    let result = Distribution::unchanged(assemble_layout(parent, sublocations));
    emit_finished(&result, sink);
    result
}

fn scatter_uniform<T: Placeable>(
    location_id: &str,
    sublocations: &mut [Location],
    values: &[T],
    rng: &mut dyn RandomSource,
    sink: &mut dyn EventSink,
) {
    for value in values {
        let idx = rng.pick_index(sublocations.len());
        place(location_id, sublocations, idx, value, false, sink);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::distribute::events::{DistributionEvent, DistributionEventKind, VecSink};
    use crate::distribute::test_support::*;
    use crate::random::{AmbientRandom, SeededRandom};

    fn sorted(mut ids: Vec<String>) -> Vec<String> {
        ids.sort();
        ids
    }

    #[test]
    fn seeded_fixture_assigns_known_buckets() {
        let parent = composite("undead_asylum", 4, 6, 2);
        let store = SnapshotStore::capture(&catalog_of(vec![parent.clone()]));

        let layout = distribute(&parent, &store, Some("player123_visit1"));

        // Draws: items -> [0, 3, 1, 2, 0, 0], entities -> [1, 0].
        assert_eq!(
            item_ids(&layout),
            vec![
                vec!["i1".to_string(), "i5".into(), "i6".into()],
                vec!["i3".into()],
                vec!["i4".into()],
                vec!["i2".into()],
            ]
        );
        assert_eq!(
            entity_ids(&layout),
            vec![vec!["e2".to_string()], vec!["e1".into()], vec![], vec![]]
        );
    }

    #[test]
    fn same_seed_gives_identical_layouts() {
        let parent = composite("undead_asylum", 4, 6, 2);
        let store = SnapshotStore::capture(&catalog_of(vec![parent.clone()]));

        let a = distribute(&parent, &store, Some("player123_visit1"));
        let b = distribute(&parent, &store, Some("player123_visit1"));
        assert_eq!(a, b);

        let all_items = sorted(item_ids(&a).into_iter().flatten().collect());
        assert_eq!(all_items, vec!["i1", "i2", "i3", "i4", "i5", "i6"]);
    }

    #[test]
    fn conserves_every_item_and_entity() {
        let parent = composite("ruined_village", 5, 40, 17);
        let store = SnapshotStore::capture(&catalog_of(vec![parent.clone()]));

        for seed in 0..20u64 {
            let mut rng = AmbientRandom::new(StdRng::seed_from_u64(seed));
            let layout = distribute_with_events(&parent, &store, &mut rng, &mut ()).layout;

            let mut counts: HashMap<String, usize> = HashMap::new();
            for id in item_ids(&layout).into_iter().flatten() {
                *counts.entry(id).or_default() += 1;
            }
            assert_eq!(counts.len(), 40);
            assert!(counts.values().all(|&c| c == 1));
            assert_eq!(layout.distributed_entity_count(), 17);
        }
    }

    #[test]
    fn parent_pool_is_cleared_and_sublocation_order_kept() {
        let parent = composite("ruined_village", 3, 4, 4);
        let store = SnapshotStore::new();
        let layout = distribute(&parent, &store, Some("order"));

        assert!(layout.items.is_empty());
        assert!(layout.entities.is_empty());
        let ids: Vec<&str> = layout.sublocations.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["ruined_village_s0", "ruined_village_s1", "ruined_village_s2"]
        );
    }

    #[test]
    fn leaf_is_returned_unchanged() {
        let leaf = composite("firelink", 0, 3, 1);
        let store = SnapshotStore::new();
        assert_eq!(distribute(&leaf, &store, Some("x")), leaf);

        let mut sink = VecSink::new();
        let mut rng = SeededRandom::new("x");
        let result = distribute_with_events(&leaf, &store, &mut rng, &mut sink);
        assert_eq!(result.layout, leaf);
        assert!(sink.is_empty());
    }

    #[test]
    fn events_report_every_placement() {
        let parent = composite("undead_asylum", 4, 6, 2);
        let store = SnapshotStore::new();
        let mut sink = VecSink::new();
        let mut rng = SeededRandom::new("player123_visit1");
        distribute_with_events(&parent, &store, &mut rng, &mut sink);

        let events = sink.into_inner();
        assert!(matches!(
            events.first(),
            Some(DistributionEvent::DistributionStarted {
                sublocations: 4,
                items: 6,
                entities: 2,
                ..
            })
        ));
        let placed = events
            .iter()
            .filter(|e| {
                matches!(
                    e.kind(),
                    DistributionEventKind::ItemPlaced | DistributionEventKind::EntityPlaced
                )
            })
            .count();
        assert_eq!(placed, 8);
        assert!(matches!(
            events.last(),
            Some(DistributionEvent::DistributionFinished {
                items_placed: 6,
                entities_placed: 2,
                items_dropped: 0,
                entities_dropped: 0,
                ..
            })
        ));
    }

    #[test]
    fn empty_pool_emits_warning() {
        let parent = composite("empty_hall", 2, 0, 0);
        let store = SnapshotStore::new();
        let mut sink = VecSink::only(&[DistributionEventKind::Warning]);
        let mut rng = SeededRandom::new("empty");
        let result = distribute_with_events(&parent, &store, &mut rng, &mut sink);

        assert_eq!(result.layout.distributed_item_count(), 0);
        assert_eq!(sink.len(), 1);
    }
}
