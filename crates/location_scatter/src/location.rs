//! Data model for locations and the items and entities they hold.
//!
//! A [`Location`] with at least one sublocation is *composite* and can be distributed; a
//! location without sublocations is a *leaf* and is never redistributed. Items and entities
//! are immutable catalog records; distribution only moves clones of them between sublocations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub type LocationId = String;

/// Time-of-day buckets used by requirement predicates.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    Dawn,
    Day,
    Dusk,
    Night,
}

/// Item category.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemCategory {
    Weapon,
    Armor,
    Consumable,
    Material,
    Quest,
    Treasure,
}

/// Item rarity tier.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// How an entity behaves towards the player.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityDisposition {
    Hostile,
    Neutral,
    Interactive,
    Passive,
    Unique,
}

/// Conditions gating an item.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemRequirements {
    pub quest_completed: Option<Vec<String>>,
    pub time_of_day: Option<Vec<TimeOfDay>>,
}

/// A collectible item that can be placed in a location.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Clone, Debug, PartialEq)]
pub struct LocationItem {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub category: ItemCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    /// Probability in `[0, 1]` that the item drops.
    #[cfg_attr(feature = "serde", serde(default))]
    pub drop_chance: Option<f32>,
    /// Respawn delay in minutes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub respawn_time: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hidden: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirements: Option<ItemRequirements>,
}

impl LocationItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            rarity: Rarity::Common,
            drop_chance: None,
            respawn_time: None,
            hidden: false,
            requirements: None,
        }
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_drop_chance(mut self, drop_chance: f32) -> Self {
        self.drop_chance = Some(drop_chance);
        self
    }

    pub fn with_requirements(mut self, requirements: ItemRequirements) -> Self {
        self.requirements = Some(requirements);
        self
    }
}

/// Conditions gating an entity spawn.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityRequirements {
    pub quest_completed: Option<Vec<String>>,
    pub item_required: Option<Vec<String>>,
    pub level_required: Option<u32>,
    pub time_of_day: Option<Vec<TimeOfDay>>,
}

/// A spawnable entity (enemy, NPC, interactive object).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Clone, Debug, PartialEq)]
pub struct LocationEntity {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub disposition: EntityDisposition,
    #[cfg_attr(feature = "serde", serde(default))]
    pub level: Option<u32>,
    /// Respawn delay in minutes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub respawn_time: Option<u32>,
    /// Probability in `[0, 1]` that the entity spawns.
    #[cfg_attr(feature = "serde", serde(default))]
    pub spawn_chance: Option<f32>,
    /// Maximum simultaneous instances in one location.
    #[cfg_attr(feature = "serde", serde(default = "default_max_count"))]
    pub max_count: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirements: Option<EntityRequirements>,
}

#[cfg(feature = "serde")]
fn default_max_count() -> u32 {
    1
}

impl LocationEntity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        disposition: EntityDisposition,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            disposition,
            level: None,
            respawn_time: None,
            spawn_chance: None,
            max_count: 1,
            requirements: None,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_spawn(mut self, spawn_chance: f32, respawn_time: Option<u32>) -> Self {
        self.spawn_chance = Some(spawn_chance);
        self.respawn_time = respawn_time;
        self
    }

    pub fn with_max_count(mut self, max_count: u32) -> Self {
        self.max_count = max_count;
        self
    }

    pub fn with_requirements(mut self, requirements: EntityRequirements) -> Self {
        self.requirements = Some(requirements);
        self
    }
}

/// The distributable content of a location.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pool {
    pub items: Vec<LocationItem>,
    pub entities: Vec<LocationEntity>,
}

impl Pool {
    pub fn new(items: Vec<LocationItem>, entities: Vec<LocationEntity>) -> Self {
        Self { items, entities }
    }

    /// Copies the current items and entities of `location`.
    pub fn of(location: &Location) -> Self {
        Self {
            items: location.items.clone(),
            entities: location.entities.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.entities.is_empty()
    }
}

/// A place in the game world, optionally split into sublocations.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Location {
    pub id: LocationId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sublocations: Vec<Location>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<LocationItem>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub entities: Vec<LocationEntity>,
}

impl Location {
    pub fn new(id: impl Into<LocationId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Derives a child of `parent`: every field is inherited, the id becomes
    /// `"{parent.id}_{suffix}"` and the child has no sublocations of its own.
    pub fn sublocation_of(parent: &Location, suffix: &str) -> Self {
        Self {
            id: format!("{}_{}", parent.id, suffix),
            name: parent.name.clone(),
            description: parent.description.clone(),
            tags: parent.tags.clone(),
            sublocations: Vec::new(),
            items: parent.items.clone(),
            entities: parent.entities.clone(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_items(mut self, items: Vec<LocationItem>) -> Self {
        self.items = items;
        self
    }

    pub fn with_entities(mut self, entities: Vec<LocationEntity>) -> Self {
        self.entities = entities;
        self
    }

    pub fn with_sublocation(mut self, sublocation: Location) -> Self {
        self.sublocations.push(sublocation);
        self
    }

    pub fn with_sublocations(mut self, sublocations: Vec<Location>) -> Self {
        self.sublocations.extend(sublocations);
        self
    }

    /// True when the location has at least one sublocation.
    pub fn is_composite(&self) -> bool {
        !self.sublocations.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.sublocations.is_empty()
    }

    pub fn sublocation(&self, id: &str) -> Option<&Location> {
        self.sublocations.iter().find(|s| s.id == id)
    }

    /// Total number of items held by the sublocations.
    pub fn distributed_item_count(&self) -> usize {
        self.sublocations.iter().map(|s| s.items.len()).sum()
    }

    /// Total number of entities held by the sublocations.
    pub fn distributed_entity_count(&self) -> usize {
        self.sublocations.iter().map(|s| s.entities.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asylum() -> Location {
        Location::new("undead_asylum", "Undead Asylum")
            .with_description("A dark and gloomy asylum for the undead.")
            .with_tags(["dungeon"])
            .with_items(vec![LocationItem::new(
                "undead_asylum_key",
                "Undead Asylum Key",
                ItemCategory::Treasure,
            )
            .with_drop_chance(1.0)])
    }

    #[test]
    fn sublocation_inherits_parent_and_prefixes_id() {
        let parent = asylum();
        let cell = Location::sublocation_of(&parent, "cell").with_name("Asylum Cell");

        assert_eq!(cell.id, "undead_asylum_cell");
        assert_eq!(cell.name, "Asylum Cell");
        assert_eq!(cell.description, parent.description);
        assert_eq!(cell.tags, vec!["dungeon".to_string()]);
        assert_eq!(cell.items, parent.items);
        assert!(cell.is_leaf());
    }

    #[test]
    fn composite_depends_on_sublocations() {
        let parent = asylum();
        assert!(parent.is_leaf());

        let cell = Location::sublocation_of(&parent, "cell");
        let parent = parent.with_sublocation(cell);
        assert!(parent.is_composite());
        assert!(parent.sublocation("undead_asylum_cell").is_some());
        assert!(parent.sublocation("cell").is_none());
    }

    #[test]
    fn pool_copies_location_content() {
        let parent = asylum().with_entities(vec![LocationEntity::new(
            "undead",
            "Undead",
            EntityDisposition::Hostile,
        )
        .with_level(1)
        .with_max_count(2)]);
        let pool = Pool::of(&parent);
        assert_eq!(pool.items.len(), 1);
        assert_eq!(pool.entities.len(), 1);
        assert_eq!(pool.entities[0].max_count, 2);
        assert!(!pool.is_empty());
        assert!(Pool::default().is_empty());
    }

    #[test]
    fn entity_builder_sets_spawn_fields() {
        let e = LocationEntity::new("peaceful_wolf", "Wolf", EntityDisposition::Passive)
            .with_spawn(1.0, Some(60))
            .with_max_count(4);
        assert_eq!(e.spawn_chance, Some(1.0));
        assert_eq!(e.respawn_time, Some(60));
        assert_eq!(e.max_count, 4);
        assert!(e.requirements.is_none());
    }
}
