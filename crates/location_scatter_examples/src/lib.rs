#![forbid(unsafe_code)]
//! Shared helpers for the location_scatter example binaries.
use std::fmt::Write as _;

use anyhow::Context;
use location_scatter::prelude::*;
use tracing_subscriber::EnvFilter;

const DEMO_LOCATIONS: &str = include_str!("../data/locations.json");

/// Installs a compact `tracing` subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// Parses a catalog from a JSON array of locations.
pub fn catalog_from_json(json: &str) -> anyhow::Result<Catalog> {
    let locations: Vec<Location> =
        serde_json::from_str(json).context("failed to parse location catalog")?;
    Ok(Catalog::new(locations)?)
}

/// The bundled demo catalog.
pub fn demo_catalog() -> anyhow::Result<Catalog> {
    catalog_from_json(DEMO_LOCATIONS)
}

/// Renders each sublocation of `layout` with its item and entity ids.
pub fn describe_layout(layout: &Location) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", layout.name, layout.id);
    if layout.is_leaf() {
        let _ = writeln!(
            out,
            "  leaf location: {} items, {} entities",
            layout.items.len(),
            layout.entities.len()
        );
        return out;
    }
    for sub in &layout.sublocations {
        let items: Vec<&str> = sub.items.iter().map(|i| i.id.as_str()).collect();
        let entities: Vec<&str> = sub.entities.iter().map(|e| e.id.as_str()).collect();
        let _ = writeln!(out, "  {:<28} items: {:?}", sub.id, items);
        let _ = writeln!(out, "  {:<28} entities: {:?}", "", entities);
    }
    out
}
