//! Filtering a location's entities by their requirement predicates.
use crate::location::{EntityRequirements, Location, LocationEntity, TimeOfDay};

/// What is known about the player and world when deciding which entities may appear.
///
/// Every field is optional; a requirement is only checked when the matching field is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnContext {
    pub time_of_day: Option<TimeOfDay>,
    pub player_level: Option<u32>,
    pub quests_completed: Option<Vec<String>>,
}

impl SpawnContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = Some(time_of_day);
        self
    }

    pub fn with_player_level(mut self, level: u32) -> Self {
        self.player_level = Some(level);
        self
    }

    pub fn with_quests_completed<I, S>(mut self, quests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.quests_completed = Some(quests.into_iter().map(Into::into).collect());
        self
    }

    /// Whether an entity with `requirements` may spawn in this context.
    pub fn permits(&self, requirements: &EntityRequirements) -> bool {
        if let (Some(times), Some(now)) = (&requirements.time_of_day, self.time_of_day) {
            if !times.contains(&now) {
                return false;
            }
        }
        // A level of 0 on either side means no level check.
        if let (Some(required @ 1..), Some(level @ 1..)) =
            (requirements.level_required, self.player_level)
        {
            if level < required {
                return false;
            }
        }
        if let (Some(required), Some(done)) =
            (&requirements.quest_completed, &self.quests_completed)
        {
            if !required.iter().all(|q| done.contains(q)) {
                return false;
            }
        }
        true
    }
}

/// Entities of `location` whose requirements pass in `ctx`, in location order.
pub fn eligible_entities<'a>(location: &'a Location, ctx: &SpawnContext) -> Vec<&'a LocationEntity> {
    location
        .entities
        .iter()
        .filter(|e| e.requirements.as_ref().is_none_or(|r| ctx.permits(r)))
        .collect()
}
