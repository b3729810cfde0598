use std::sync::Arc;
use std::thread;

use location_scatter::prelude::*;
use location_scatter_examples::{demo_catalog, init_tracing};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let manager = SharedLocationManager::new(demo_catalog()?);

    let layouts: Vec<Option<Arc<Location>>> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| manager.get_location("undead_asylum", false)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or(None))
            .collect()
    });

    let first = layouts
        .first()
        .cloned()
        .flatten()
        .ok_or_else(|| anyhow::anyhow!("no layout computed"))?;
    let shared = layouts
        .iter()
        .flatten()
        .all(|layout| Arc::ptr_eq(layout, &first));
    println!("all threads received the same layout: {shared}");

    thread::scope(|s| {
        s.spawn(|| manager.refresh_location_layout("undead_asylum", Some("worker_a")));
        s.spawn(|| manager.refresh_location_layout("ruined_village", Some("worker_b")));
    });
    println!("{} cached layouts", manager.len());
    Ok(())
}
