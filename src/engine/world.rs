//! The scenario graph: every location in a loaded world, keyed by id.

use log::{debug, warn};
use std::collections::HashMap;

use super::errors::GameError;
use super::types::Scenario;

/// All scenarios of a loaded world, keyed by scenario id.
///
/// The world owns every scenario and, transitively, every item still
/// sitting in a scenario pool. It is built once by the loader and during
/// play is only mutated by pickups draining items out of pools. Dropping a
/// `World` tears down everything it owns.
#[derive(Debug, Default)]
pub struct World {
    scenarios: HashMap<String, Scenario>,
}

impl World {
    pub fn new() -> Self {
        Self {
            scenarios: HashMap::new(),
        }
    }

    /// Insert a scenario under its own id.
    ///
    /// Duplicate ids overwrite the previous entry (last write wins) so
    /// world files stay order-insensitive; the collision is logged.
    pub fn insert(&mut self, scenario: Scenario) {
        let id = scenario.id.clone();
        if let Some(previous) = self.scenarios.insert(id.clone(), scenario) {
            warn!(
                "scenario id {} defined more than once, keeping the later one (was: {})",
                id, previous.name
            );
        } else {
            debug!("scenario {} registered", id);
        }
    }

    /// Look up a scenario by id.
    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.get(id)
    }

    /// Look up a scenario by id, failing with [`GameError::ScenarioNotFound`].
    pub fn require(&self, id: &str) -> Result<&Scenario, GameError> {
        self.scenarios
            .get(id)
            .ok_or_else(|| GameError::ScenarioNotFound(id.to_string()))
    }

    /// Mutable lookup, used by pickups to drain a scenario's item pool.
    pub fn require_mut(&mut self, id: &str) -> Result<&mut Scenario, GameError> {
        self.scenarios
            .get_mut(id)
            .ok_or_else(|| GameError::ScenarioNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.scenarios.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Iterate over all scenarios in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.values()
    }

    /// Total number of items still pooled across all scenarios.
    pub fn pooled_item_count(&self) -> usize {
        self.scenarios.values().map(|s| s.items.len()).sum()
    }

    /// Exit references whose destination id does not resolve.
    ///
    /// Exits are never validated at load time; this report lets the
    /// `validate` command surface broken wiring without rejecting a world.
    /// Returns `(scenario id, direction, dangling destination)` triples,
    /// sorted for stable output.
    pub fn dangling_exits(&self) -> Vec<(String, String, String)> {
        let mut dangling: Vec<(String, String, String)> = self
            .scenarios
            .values()
            .flat_map(|scenario| {
                scenario
                    .exits
                    .iter()
                    .filter(|(_, destination)| !self.scenarios.contains_key(*destination))
                    .map(|(direction, destination)| {
                        (
                            scenario.id.clone(),
                            direction.to_string(),
                            destination.clone(),
                        )
                    })
            })
            .collect();
        dangling.sort();
        dangling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{Direction, Item};

    fn sample_world() -> World {
        let mut world = World::new();
        world.insert(
            Scenario::new("1", "Entrance", "A damp stone hall")
                .with_exit(Direction::Right, "2")
                .with_item(Item::new("sword", 5, 3)),
        );
        world.insert(Scenario::new("2", "Vault", "Treasure, maybe").terminal());
        world
    }

    #[test]
    fn lookup_and_counts() {
        let world = sample_world();
        assert_eq!(world.len(), 2);
        assert_eq!(world.pooled_item_count(), 1);
        assert!(world.contains("1"));
        assert!(world.get("3").is_none());
        assert!(matches!(
            world.require("3"),
            Err(GameError::ScenarioNotFound(id)) if id == "3"
        ));
    }

    #[test]
    fn duplicate_id_keeps_last_write() {
        let mut world = World::new();
        world.insert(Scenario::new("1", "First", "original"));
        world.insert(Scenario::new("1", "Second", "replacement"));

        assert_eq!(world.len(), 1);
        assert_eq!(world.get("1").unwrap().name, "Second");
    }

    #[test]
    fn dangling_exits_reported() {
        let mut world = sample_world();
        world.insert(Scenario::new("3", "Ledge", "A dead end").with_exit(Direction::Up, "99"));

        let dangling = world.dangling_exits();
        assert_eq!(dangling.len(), 1);
        assert_eq!(
            dangling[0],
            ("3".to_string(), "up".to_string(), "99".to_string())
        );
    }

    #[test]
    fn fully_wired_world_has_no_dangling_exits() {
        assert!(sample_world().dangling_exits().is_empty());
    }
}
