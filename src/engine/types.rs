use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Scenario id the player spawns into unless the config overrides it.
pub const DEFAULT_START_SCENARIO: &str = "1";

/// Time units a fresh player starts with unless the config overrides it.
pub const DEFAULT_START_TIME: i32 = 10;

/// The four directed exits a scenario may have.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in menu order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        write!(f, "{}", label)
    }
}

/// A collectible object sitting in a scenario pool or a player inventory.
///
/// Items are immutable after creation. Transferring one between containers
/// always clones it; the source copy is removed and dropped separately, so
/// no two containers ever alias the same physical item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    /// Points added to the score on pickup and removed again on discard.
    pub value: i32,
    /// Carry weight; drives the movement time cost.
    pub weight: i32,
}

impl Item {
    pub fn new(name: &str, value: i32, weight: i32) -> Self {
        Self {
            name: name.to_string(),
            value,
            weight,
        }
    }
}

/// One location in the world graph.
///
/// Exits are weak references: plain scenario ids resolved against the
/// [`World`](crate::engine::World) at use time. An absent map entry means
/// "no exit that way"; a present entry is not guaranteed to resolve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub exits: HashMap<Direction, String>,
    #[serde(default)]
    pub is_terminal: bool,
}

impl Scenario {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            items: Vec::new(),
            exits: HashMap::new(),
            is_terminal: false,
        }
    }

    pub fn with_exit(mut self, direction: Direction, destination: &str) -> Self {
        self.exits.insert(direction, destination.to_string());
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn terminal(mut self) -> Self {
        self.is_terminal = true;
        self
    }

    /// Destination id for a direction, if an exit exists that way.
    pub fn exit(&self, direction: Direction) -> Option<&str> {
        self.exits.get(&direction).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_wires_exits_and_items() {
        let scenario = Scenario::new("1", "Entrance", "Where it all begins")
            .with_exit(Direction::Right, "2")
            .with_item(Item::new("sword", 5, 3));

        assert_eq!(scenario.exit(Direction::Right), Some("2"));
        assert_eq!(scenario.exit(Direction::Up), None);
        assert_eq!(scenario.items.len(), 1);
        assert!(!scenario.is_terminal);
    }

    #[test]
    fn terminal_flag() {
        let scenario = Scenario::new("9", "Exit", "The way out").terminal();
        assert!(scenario.is_terminal);
    }
}
