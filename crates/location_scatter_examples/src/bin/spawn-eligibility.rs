use location_scatter::prelude::*;
use location_scatter_examples::{demo_catalog, init_tracing};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let catalog = demo_catalog()?;
    let asylum = catalog
        .get("undead_asylum")
        .ok_or_else(|| anyhow::anyhow!("demo catalog lacks undead_asylum"))?;

    let contexts = [
        ("no context", SpawnContext::new()),
        (
            "level 1 at night",
            SpawnContext::new()
                .with_player_level(1)
                .with_time_of_day(TimeOfDay::Night),
        ),
        (
            "level 4 at dusk",
            SpawnContext::new()
                .with_player_level(4)
                .with_time_of_day(TimeOfDay::Dusk),
        ),
        (
            "level 4 at midday",
            SpawnContext::new()
                .with_player_level(4)
                .with_time_of_day(TimeOfDay::Day),
        ),
    ];

    for (label, ctx) in &contexts {
        let ids: Vec<&str> = eligible_entities(asylum, ctx)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        println!("{label:<20} {ids:?}");
    }
    Ok(())
}
