//! One playthrough: the player state machine over a loaded world.

use chrono::{DateTime, Utc};
use log::debug;
use std::collections::BTreeSet;

use super::errors::GameError;
use super::player::Player;
use super::types::{Direction, Item, Scenario};
use super::world::World;

/// Lifecycle of a session. `Browsing` accepts actions; the other three are
/// final and accept none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Awaiting the next action.
    Browsing,
    /// The player reached a terminal scenario.
    Won,
    /// The time budget ran out.
    TimedOut,
    /// The player quit back to the menu.
    Exited,
}

/// Snapshot of the observable player state, exposed after every action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub scenario_id: String,
    pub time_remaining: i32,
    pub score: i32,
}

/// What a pickup actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupReport {
    /// Names of the items taken, in pool order.
    pub taken: Vec<String>,
    pub time_spent: i32,
}

/// What a discard actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscardReport {
    /// Names of the items dropped, in inventory order.
    pub dropped: Vec<String>,
    pub time_spent: i32,
}

/// Final standing reported when the player reaches a terminal scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinReport {
    pub score: i32,
    pub inventory: Vec<Item>,
}

/// What a move actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub destination: String,
    pub time_spent: i32,
    /// Present when the destination was terminal and the session ended.
    pub won: Option<WinReport>,
}

/// A single playthrough over a borrowed world.
///
/// Holding `&mut World` for the whole session means the world cannot be
/// reloaded or dropped underneath a running game, and the session's own
/// outcome is always evaluated while the player state is still alive.
#[derive(Debug)]
pub struct Session<'a> {
    world: &'a mut World,
    player: Player,
    state: SessionState,
    started_at: DateTime<Utc>,
}

impl<'a> Session<'a> {
    /// Start a session at the given scenario with the given time budget.
    ///
    /// Fails with [`GameError::WorldNotLoaded`] when the world is empty;
    /// no session exists afterwards.
    pub fn new(world: &'a mut World, start_scenario: &str, start_time: i32) -> Result<Self, GameError> {
        if world.is_empty() {
            return Err(GameError::WorldNotLoaded);
        }

        debug!(
            "session starting at scenario {} with {} time units",
            start_scenario, start_time
        );
        Ok(Self {
            world,
            player: Player::new(start_scenario, start_time),
            state: SessionState::Browsing,
            started_at: Utc::now(),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The scenario the player is standing in.
    pub fn current_scenario(&self) -> Result<&Scenario, GameError> {
        self.world.require(&self.player.current_scenario)
    }

    /// Observable state after any action.
    pub fn status(&self) -> Status {
        Status {
            scenario_id: self.player.current_scenario.clone(),
            time_remaining: self.player.time_remaining,
            score: self.player.score,
        }
    }

    /// Pick up items from the current scenario's pool by 1-based position.
    ///
    /// Invalid positions are skipped; duplicates collapse to one. Each
    /// selected item is cloned into the inventory and its value added to
    /// the score, then the pool copies are removed in a second pass so the
    /// positions stay stable throughout. Costs 1 time unit iff anything
    /// was taken; an empty pool or an all-invalid selection costs nothing.
    pub fn pickup(&mut self, selections: &[usize]) -> Result<PickupReport, GameError> {
        self.ensure_active()?;
        let scenario = self.world.require_mut(&self.player.current_scenario)?;

        if scenario.items.is_empty() {
            return Ok(PickupReport {
                taken: Vec::new(),
                time_spent: 0,
            });
        }

        // Phase one: mark valid positions and copy the items over.
        let marked: BTreeSet<usize> = selections
            .iter()
            .filter(|&&sel| sel >= 1 && sel <= scenario.items.len())
            .map(|&sel| sel - 1)
            .collect();

        let mut taken = Vec::with_capacity(marked.len());
        for &idx in &marked {
            let item = scenario.items[idx].clone();
            self.player.score += item.value;
            taken.push(item.name.clone());
            self.player.inventory.push(item);
        }

        // Phase two: drain the marked pool slots, highest index first.
        for &idx in marked.iter().rev() {
            scenario.items.remove(idx);
        }

        let time_spent = if taken.is_empty() { 0 } else { 1 };
        self.player.time_remaining -= time_spent;
        if !taken.is_empty() {
            debug!(
                "picked up {} item(s) at scenario {}, score now {}",
                taken.len(),
                self.player.current_scenario,
                self.player.score
            );
        }

        self.check_timeout();
        Ok(PickupReport { taken, time_spent })
    }

    /// Discard inventory items by 1-based position.
    ///
    /// Same two-phase shape as [`pickup`](Session::pickup): invalid
    /// positions are skipped, duplicates collapse to one, each dropped
    /// item's value comes back off the score, and the inventory copies are
    /// removed (and dropped) after the marking pass. Costs 1 time unit iff
    /// anything was dropped.
    pub fn discard(&mut self, selections: &[usize]) -> Result<DiscardReport, GameError> {
        self.ensure_active()?;

        let marked: BTreeSet<usize> = selections
            .iter()
            .filter(|&&sel| sel >= 1 && sel <= self.player.inventory.len())
            .map(|&sel| sel - 1)
            .collect();

        let mut dropped = Vec::with_capacity(marked.len());
        for &idx in &marked {
            let item = &self.player.inventory[idx];
            self.player.score -= item.value;
            dropped.push(item.name.clone());
        }

        for &idx in marked.iter().rev() {
            self.player.inventory.remove(idx);
        }

        let time_spent = if dropped.is_empty() { 0 } else { 1 };
        self.player.time_remaining -= time_spent;
        if !dropped.is_empty() {
            debug!(
                "discarded {} item(s), score now {}",
                dropped.len(),
                self.player.score
            );
        }

        self.check_timeout();
        Ok(DiscardReport {
            dropped,
            time_spent,
        })
    }

    /// Move through an exit of the current scenario.
    ///
    /// The cost depends on carried weight (see [`Player::move_cost`]). A
    /// missing exit or an unaffordable cost leaves the player, the clock,
    /// and the score untouched. Arriving at a terminal scenario zeroes the
    /// clock and ends the session as [`SessionState::Won`] regardless of
    /// how much time was left.
    pub fn move_to(&mut self, direction: Direction) -> Result<MoveReport, GameError> {
        self.ensure_active()?;
        let scenario = self.world.require(&self.player.current_scenario)?;

        let destination = scenario
            .exit(direction)
            .map(str::to_string)
            .ok_or(GameError::NoExit(direction))?;

        let cost = self.player.move_cost();
        if self.player.time_remaining < cost {
            return Err(GameError::InsufficientTime {
                needed: cost,
                available: self.player.time_remaining,
            });
        }

        self.player.current_scenario = destination.clone();
        self.player.time_remaining -= cost;
        debug!(
            "moved {} to scenario {} for {} time unit(s)",
            direction, destination, cost
        );

        // Exits are weak references: an unresolvable destination is not an
        // error here, the next action will surface it.
        let won = match self.world.get(&destination) {
            Some(dest) if dest.is_terminal => {
                self.player.time_remaining = 0;
                self.state = SessionState::Won;
                debug!("terminal scenario {} reached, session won", destination);
                Some(WinReport {
                    score: self.player.score,
                    inventory: self.player.inventory.clone(),
                })
            }
            _ => None,
        };

        if won.is_none() {
            self.check_timeout();
        }

        Ok(MoveReport {
            destination,
            time_spent: cost,
            won,
        })
    }

    /// Leave the session voluntarily.
    pub fn quit(&mut self) -> Result<(), GameError> {
        self.ensure_active()?;
        self.state = SessionState::Exited;
        debug!("session exited by the player");
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), GameError> {
        match self.state {
            SessionState::Browsing => Ok(()),
            _ => Err(GameError::SessionOver),
        }
    }

    fn check_timeout(&mut self) {
        if self.state == SessionState::Browsing && self.player.time_remaining <= 0 {
            self.state = SessionState::TimedOut;
            debug!("time budget exhausted, session over");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Scenario;

    fn two_room_world() -> World {
        let mut world = World::new();
        world.insert(
            Scenario::new("1", "Entrance", "A damp stone hall")
                .with_exit(Direction::Right, "2")
                .with_item(Item::new("sword", 5, 3)),
        );
        world.insert(Scenario::new("2", "Vault", "The way out").terminal());
        world
    }

    #[test]
    fn start_requires_a_world() {
        let mut empty = World::new();
        assert!(matches!(
            Session::new(&mut empty, "1", 10),
            Err(GameError::WorldNotLoaded)
        ));
    }

    #[test]
    fn worked_example_pickup_then_win() {
        let mut world = two_room_world();
        let mut session = Session::new(&mut world, "1", 10).unwrap();

        let report = session.pickup(&[1]).unwrap();
        assert_eq!(report.taken, vec!["sword"]);
        assert_eq!(report.time_spent, 1);
        let status = session.status();
        assert_eq!(status.score, 5);
        assert_eq!(status.time_remaining, 9);

        let report = session.move_to(Direction::Right).unwrap();
        assert_eq!(report.time_spent, 1);
        assert_eq!(report.destination, "2");
        let win = report.won.expect("terminal move should win");
        assert_eq!(win.score, 5);
        assert_eq!(win.inventory, vec![Item::new("sword", 5, 3)]);
        assert_eq!(session.status().time_remaining, 0);
        assert_eq!(session.state(), SessionState::Won);
    }

    #[test]
    fn finished_session_rejects_actions() {
        let mut world = two_room_world();
        let mut session = Session::new(&mut world, "1", 10).unwrap();
        session.quit().unwrap();
        assert_eq!(session.state(), SessionState::Exited);
        assert!(matches!(session.pickup(&[1]), Err(GameError::SessionOver)));
        assert!(matches!(
            session.move_to(Direction::Right),
            Err(GameError::SessionOver)
        ));
    }

    #[test]
    fn pickup_out_of_range_is_free() {
        let mut world = two_room_world();
        let mut session = Session::new(&mut world, "1", 10).unwrap();

        let report = session.pickup(&[5]).unwrap();
        assert!(report.taken.is_empty());
        assert_eq!(report.time_spent, 0);
        let status = session.status();
        assert_eq!(status.score, 0);
        assert_eq!(status.time_remaining, 10);
        assert_eq!(session.current_scenario().unwrap().items.len(), 1);
    }

    #[test]
    fn pickup_on_empty_pool_is_free() {
        let mut world = two_room_world();
        let mut session = Session::new(&mut world, "1", 10).unwrap();
        session.pickup(&[1]).unwrap();

        let report = session.pickup(&[1]).unwrap();
        assert!(report.taken.is_empty());
        assert_eq!(session.status().time_remaining, 9);
    }

    #[test]
    fn duplicate_discard_indices_collapse() {
        let mut world = two_room_world();
        let mut session = Session::new(&mut world, "1", 10).unwrap();
        session.pickup(&[1]).unwrap();

        let report = session.discard(&[1, 1]).unwrap();
        assert_eq!(report.dropped, vec!["sword"]);
        assert_eq!(report.time_spent, 1);
        let status = session.status();
        assert_eq!(status.score, 0);
        assert_eq!(status.time_remaining, 8);
        assert!(session.player().inventory.is_empty());
    }

    #[test]
    fn move_without_exit_changes_nothing() {
        let mut world = two_room_world();
        let mut session = Session::new(&mut world, "1", 10).unwrap();

        assert!(matches!(
            session.move_to(Direction::Up),
            Err(GameError::NoExit(Direction::Up))
        ));
        let status = session.status();
        assert_eq!(status.scenario_id, "1");
        assert_eq!(status.time_remaining, 10);
    }

    fn anvil_world() -> World {
        let mut world = World::new();
        world.insert(
            Scenario::new("1", "Entrance", "start")
                .with_exit(Direction::Right, "2")
                .with_item(Item::new("anvil", 1, 25)),
        );
        world.insert(Scenario::new("2", "Next", "not terminal"));
        world
    }

    #[test]
    fn move_without_time_changes_nothing() {
        let mut world = anvil_world();
        let mut session = Session::new(&mut world, "1", 2).unwrap();
        session.pickup(&[1]).unwrap();

        // Carrying the anvil a move costs (25 + 1) / 10 == 2, 1 remains.
        let err = session.move_to(Direction::Right);
        assert!(matches!(
            err,
            Err(GameError::InsufficientTime {
                needed: 2,
                available: 1
            })
        ));
        let status = session.status();
        assert_eq!(status.scenario_id, "1");
        assert_eq!(status.time_remaining, 1);
    }

    #[test]
    fn exact_cost_move_lands_in_timeout() {
        let mut world = anvil_world();
        let mut session = Session::new(&mut world, "1", 3).unwrap();
        session.pickup(&[1]).unwrap();

        let report = session.move_to(Direction::Right).unwrap();
        assert_eq!(report.time_spent, 2);
        assert_eq!(session.status().time_remaining, 0);
        assert_eq!(session.state(), SessionState::TimedOut);
    }

    #[test]
    fn timeout_fires_the_instant_time_hits_zero() {
        let mut world = two_room_world();
        let mut session = Session::new(&mut world, "1", 1).unwrap();

        session.pickup(&[1]).unwrap();
        assert_eq!(session.status().time_remaining, 0);
        assert_eq!(session.state(), SessionState::TimedOut);
        assert!(matches!(session.discard(&[1]), Err(GameError::SessionOver)));
    }

    #[test]
    fn unresolvable_current_scenario_is_recoverable() {
        let mut world = two_room_world();
        let mut session = Session::new(&mut world, "ghost", 10).unwrap();

        assert!(matches!(
            session.pickup(&[1]),
            Err(GameError::ScenarioNotFound(id)) if id == "ghost"
        ));
        // The session survives the lookup failure.
        assert_eq!(session.state(), SessionState::Browsing);
    }

    #[test]
    fn dangling_exit_move_is_paid_and_surfaces_later() {
        let mut world = World::new();
        world.insert(Scenario::new("1", "Entrance", "start").with_exit(Direction::Left, "void"));

        let mut session = Session::new(&mut world, "1", 10).unwrap();
        let report = session.move_to(Direction::Left).unwrap();
        assert_eq!(report.destination, "void");
        assert!(report.won.is_none());
        assert_eq!(session.status().time_remaining, 9);

        assert!(matches!(
            session.move_to(Direction::Left),
            Err(GameError::ScenarioNotFound(id)) if id == "void"
        ));
    }
}
