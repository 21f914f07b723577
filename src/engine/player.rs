use super::inventory;
use super::types::Item;

/// Minimum time units any move costs, regardless of carried weight.
const MIN_MOVE_COST: i32 = 1;

/// Weight units per extra time unit spent moving.
const WEIGHT_PER_TIME_UNIT: i32 = 10;

/// The player's mutable state for one session.
///
/// The inventory owns its items exclusively: each entry was cloned out of a
/// scenario pool on pickup and is dropped on discard or when the player
/// goes away at the end of the session.
#[derive(Debug, Clone)]
pub struct Player {
    /// Id of the scenario the player is standing in. A weak reference,
    /// resolved against the world on every action.
    pub current_scenario: String,
    pub inventory: Vec<Item>,
    pub time_remaining: i32,
    /// Running total: value of everything ever picked up minus value of
    /// everything discarded. Never recomputed from the inventory.
    pub score: i32,
}

impl Player {
    pub fn new(start_scenario: &str, start_time: i32) -> Self {
        Self {
            current_scenario: start_scenario.to_string(),
            inventory: Vec::new(),
            time_remaining: start_time,
            score: 0,
        }
    }

    /// Combined weight of everything carried.
    pub fn total_weight(&self) -> i32 {
        inventory::total_weight(&self.inventory)
    }

    /// Time a move costs at the current carry weight:
    /// `max(1, (weight + 1) / 10)` with integer division.
    pub fn move_cost(&self) -> i32 {
        let cost = (self.total_weight() + 1) / WEIGHT_PER_TIME_UNIT;
        cost.max(MIN_MOVE_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_player() {
        let player = Player::new("1", 10);
        assert_eq!(player.current_scenario, "1");
        assert_eq!(player.time_remaining, 10);
        assert_eq!(player.score, 0);
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn move_cost_floors_at_one() {
        let mut player = Player::new("1", 10);
        assert_eq!(player.total_weight(), 0);
        assert_eq!(player.move_cost(), 1);

        player.inventory.push(Item::new("pebble", 0, 3));
        // (3 + 1) / 10 == 0, floored to the minimum
        assert_eq!(player.move_cost(), 1);
    }

    #[test]
    fn move_cost_scales_with_weight() {
        let mut player = Player::new("1", 10);
        player.inventory.push(Item::new("anvil", 1, 19));
        // (19 + 1) / 10 == 2
        assert_eq!(player.move_cost(), 2);

        player.inventory.push(Item::new("crate", 1, 15));
        // (34 + 1) / 10 == 3
        assert_eq!(player.move_cost(), 3);
    }
}
