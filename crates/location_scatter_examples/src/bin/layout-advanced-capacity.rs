use location_scatter::prelude::*;
use location_scatter_examples::{demo_catalog, describe_layout, init_tracing};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let catalog = demo_catalog()?;
    let snapshots = SnapshotStore::capture(&catalog);
    let asylum = catalog
        .get("undead_asylum")
        .ok_or_else(|| anyhow::anyhow!("demo catalog lacks undead_asylum"))?;

    // Four sublocations with room for one item each cannot hold six items.
    let options = AdvancedOptions::new()
        .with_seed("advanced_seed")
        .with_guaranteed_distribution(true)
        .with_max_items_per_sublocation(1)
        .with_max_entities_per_sublocation(1);

    let mut sink = VecSink::only(&[
        DistributionEventKind::ItemDropped,
        DistributionEventKind::EntityDropped,
    ]);
    let result = Distributor::strict(&snapshots).distribute_advanced_with_events(
        asylum,
        &options,
        &mut sink,
    )?;

    print!("{}", describe_layout(&result.layout));
    for event in sink.as_slice() {
        match event {
            DistributionEvent::ItemDropped { item_id, attempts, .. } => {
                println!("dropped item {item_id} after {attempts} attempts");
            }
            DistributionEvent::EntityDropped { entity_id, attempts, .. } => {
                println!("dropped entity {entity_id} after {attempts} attempts");
            }
            _ => {}
        }
    }
    tracing::info!(
        "Dropped {} items and {} entities.",
        result.items_dropped,
        result.entities_dropped
    );

    // Minimum above maximum is rejected before anything is distributed.
    let invalid = options.clone().with_min_items_per_sublocation(3);
    if let Err(err) = Distributor::new(&snapshots).distribute_advanced(asylum, &invalid) {
        tracing::warn!("{err}");
    }
    Ok(())
}
