//! Id-indexed catalog of top-level locations.
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::location::{Location, LocationId};

/// Immutable set of top-level locations keyed by id, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locations: Vec<Location>,
    index: HashMap<LocationId, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate top-level ids.
    pub fn new(locations: Vec<Location>) -> Result<Self> {
        let mut index = HashMap::with_capacity(locations.len());
        for (i, location) in locations.iter().enumerate() {
            if index.insert(location.id.clone(), i).is_some() {
                return Err(Error::DuplicateLocation {
                    id: location.id.clone(),
                });
            }
        }
        Ok(Self { locations, index })
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.index.get(id).map(|&i| &self.locations[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// Every composite location, including composite sublocations, depth first.
    pub fn composites(&self) -> Vec<&Location> {
        let mut out = Vec::new();
        let mut stack: Vec<&Location> = self.locations.iter().rev().collect();
        while let Some(location) = stack.pop() {
            if location.is_composite() {
                out.push(location);
                stack.extend(location.sublocations.iter().rev());
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl TryFrom<Vec<Location>> for Catalog {
    type Error = Error;

    fn try_from(locations: Vec<Location>) -> Result<Self> {
        Self::new(locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composite(id: &str, children: &[&str]) -> Location {
        let parent = Location::new(id, id);
        let subs = children
            .iter()
            .map(|c| Location::sublocation_of(&parent, c))
            .collect();
        parent.with_sublocations(subs)
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::new(vec![
            composite("undead_asylum", &["cell", "hall"]),
            Location::new("firelink", "Firelink Shrine"),
        ])
        .expect("unique ids");

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("firelink"));
        assert_eq!(
            catalog.get("undead_asylum").map(|l| l.sublocations.len()),
            Some(2)
        );
        assert!(catalog.get("undead_asylum_cell").is_none());
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Catalog::new(vec![
            Location::new("a", "A"),
            Location::new("a", "Also A"),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateLocation { ref id } if id == "a"));
    }

    #[test]
    fn composites_skip_leaves_and_include_nested() {
        let nested = composite("crypt", &["upper", "lower"]);
        let village = composite("ruined_village", &["plaza"]).with_sublocation(nested);
        let catalog = Catalog::try_from(vec![
            Location::new("firelink", "Firelink Shrine"),
            village,
            composite("undead_asylum", &["cell"]),
        ])
        .expect("unique ids");

        let ids: Vec<&str> = catalog.composites().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["ruined_village", "crypt", "undead_asylum"]);
    }
}
