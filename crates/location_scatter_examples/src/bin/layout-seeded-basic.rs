use location_scatter::prelude::*;
use location_scatter_examples::{demo_catalog, describe_layout, init_tracing};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let catalog = demo_catalog()?;
    let snapshots = SnapshotStore::capture(&catalog);
    let asylum = catalog
        .get("undead_asylum")
        .ok_or_else(|| anyhow::anyhow!("demo catalog lacks undead_asylum"))?;

    // Same seed, same layout.
    let first = distribute(asylum, &snapshots, Some("player123_visit1"));
    let again = distribute(asylum, &snapshots, Some("player123_visit1"));
    assert_eq!(first, again);
    print!("{}", describe_layout(&first));

    // A different seed reshuffles the same pool.
    let other = distribute(asylum, &snapshots, Some("player123_visit2"));
    print!("{}", describe_layout(&other));
    tracing::info!(
        "Both layouts hold {} items and {} entities.",
        other.distributed_item_count(),
        other.distributed_entity_count()
    );

    // Unseeded layouts draw from the thread-local generator.
    let unseeded = distribute(asylum, &snapshots, None);
    print!("{}", describe_layout(&unseeded));
    Ok(())
}
