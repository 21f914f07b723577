//! # GraphQuest - a text-driven graph exploration game
//!
//! GraphQuest models a world as a directed graph of scenarios. The player
//! starts in one of them with a fixed time budget, picks up or discards
//! weighted, valued items, and moves along up-to-four named exits per
//! scenario. Every action spends time; reaching the terminal scenario wins
//! the game, running the clock out loses it.
//!
//! ## Quick Start
//!
//! ```rust
//! use graphquest::engine::{Direction, Item, Scenario, Session, World};
//!
//! let mut world = World::new();
//! world.insert(
//!     Scenario::new("1", "Entrance", "Start here")
//!         .with_item(Item::new("sword", 5, 3))
//!         .with_exit(Direction::Right, "2"),
//! );
//! world.insert(Scenario::new("2", "Gate", "The way out").terminal());
//!
//! let mut session = Session::new(&mut world, "1", 10)?;
//! session.pickup(&[1])?;
//! let report = session.move_to(Direction::Right)?;
//! assert!(report.won.is_some());
//! # Ok::<(), graphquest::engine::GameError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`engine`] - the game core: scenario graph, player state, session
//!   state machine, and the rules for pickup, discard, and movement
//! - [`loader`] - world ingestion from CSV tables or JSON seed arrays
//! - [`config`] - TOML configuration with validation and defaults
//! - [`repl`] - the interactive terminal front-end
//!
//! ## Architecture
//!
//! The engine is strictly synchronous and single-player: one session at a
//! time holds a mutable borrow of the loaded world, queries it on every
//! action, and mutates it only when a pickup drains items out of a
//! scenario pool. The front-end layers (`repl`, the binary) parse input
//! lines and render the engine's typed reports; every rule lives in
//! [`engine`], every recoverable failure is a value of
//! [`engine::GameError`].

pub mod config;
pub mod engine;
pub mod loader;
pub mod repl;
