use location_scatter::prelude::*;
use location_scatter_examples::{demo_catalog, describe_layout, init_tracing};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut manager = LocationManager::new(demo_catalog()?);

    // A new visit reseeds the layout; later lookups serve it from the cache.
    for visit in 1..=3 {
        let seed = format!("player123_visit{visit}");
        manager.refresh_location_layout("undead_asylum", Some(&seed));
        let layout = manager
            .get_location("undead_asylum", false)
            .ok_or_else(|| anyhow::anyhow!("unknown location"))?;
        println!("visit {visit}:");
        print!("{}", describe_layout(layout));
    }

    if manager.get_location("anor_londo", false).is_none() {
        tracing::warn!("No location named 'anor_londo'.");
    }

    manager.get_location("ruined_village", false);
    manager.get_location("firelink_shrine", false);
    println!(
        "{} cached layouts after {} computations",
        manager.len(),
        manager.computations()
    );

    manager.clear_all_layouts();
    println!("{} cached layouts after clearing", manager.len());
    Ok(())
}
