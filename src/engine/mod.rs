//! The game core: scenario graph, player state, and the session state
//! machine that ties them together. Everything here is synchronous and
//! single-player; the world is read-mostly during play and only pickups
//! drain items out of scenario pools.

pub mod errors;
pub mod inventory;
pub mod player;
pub mod session;
pub mod types;
pub mod world;

pub use errors::GameError;
pub use inventory::{format_final_summary, format_inventory, format_item_listing, total_weight};
pub use player::Player;
pub use session::{
    DiscardReport, MoveReport, PickupReport, Session, SessionState, Status, WinReport,
};
pub use types::{Direction, Item, Scenario, DEFAULT_START_SCENARIO, DEFAULT_START_TIME};
pub use world::World;
