//! Interactive terminal front-end: the main menu and the per-turn game
//! loop. This layer only parses lines, renders reports, and recovers from
//! the engine's error values; all game rules live in [`crate::engine`].

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use std::io::{BufRead, Write};

use crate::config::Config;
use crate::engine::{
    format_final_summary, format_inventory, format_item_listing, Direction, GameError, Session,
    SessionState, World,
};
use crate::loader;

/// The interactive driver. Owns the loaded world between games so a quit
/// back to the menu can resume into a fresh session without reloading.
pub struct Repl {
    config: Config,
    world: Option<World>,
}

impl Repl {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            world: None,
        }
    }

    /// Run the menu loop until the player quits or input ends.
    pub fn run(&mut self, input: &mut impl BufRead, output: &mut impl Write) -> Result<()> {
        loop {
            clear_screen(output)?;
            writeln!(output, "========================================")?;
            writeln!(output, "              GRAPHQUEST")?;
            writeln!(output, "========================================")?;
            writeln!(output, "1) Load world")?;
            writeln!(output, "2) Start game")?;
            writeln!(output, "3) Quit")?;

            let Some(choice) = prompt(input, output, "Choose an option: ")? else {
                return Ok(());
            };

            match choice.trim() {
                "1" => self.load_world(output)?,
                "2" => self.start_game(input, output)?,
                "3" => {
                    writeln!(output, "Goodbye.")?;
                    return Ok(());
                }
                other => writeln!(output, "Unknown option: {}", other)?,
            }
        }
    }

    /// (Re)load the configured world file, replacing any previous world.
    fn load_world(&mut self, output: &mut impl Write) -> Result<()> {
        match loader::load_world(&self.config.game.world_file) {
            Ok(world) => {
                writeln!(
                    output,
                    "World loaded: {} scenarios, {} items.",
                    world.len(),
                    world.pooled_item_count()
                )?;
                self.world = Some(world);
            }
            Err(err) => {
                warn!("world load failed: {}", err);
                writeln!(output, "Could not load world: {}", err)?;
            }
        }
        Ok(())
    }

    fn start_game(&mut self, input: &mut impl BufRead, output: &mut impl Write) -> Result<()> {
        let Some(world) = self.world.as_mut() else {
            writeln!(output, "Load a world first.")?;
            return Ok(());
        };

        let mut session = match Session::new(
            world,
            &self.config.game.start_scenario,
            self.config.game.start_time,
        ) {
            Ok(session) => session,
            Err(err) => {
                writeln!(output, "Cannot start: {}", err)?;
                return Ok(());
            }
        };
        info!("new game started");

        while session.state() == SessionState::Browsing {
            render_status(&session, output)?;
            writeln!(output, "\nOptions:")?;
            writeln!(output, "1) Pick up items")?;
            writeln!(output, "2) Discard items")?;
            writeln!(output, "3) Move")?;
            writeln!(output, "4) Quit to menu")?;

            let Some(choice) = prompt(input, output, "Choose an option: ")? else {
                session.quit().ok();
                break;
            };

            let outcome = match choice.trim() {
                "1" => turn_pickup(&mut session, input, output),
                "2" => turn_discard(&mut session, input, output),
                "3" => turn_move(&mut session, input, output),
                "4" => session.quit().map_err(Into::into),
                other => {
                    writeln!(output, "Unknown option: {}", other)?;
                    Ok(())
                }
            };

            // Engine errors are recoverable outcomes, not crashes: report
            // them and keep playing.
            if let Err(err) = outcome {
                match err.downcast_ref::<GameError>() {
                    Some(game_err) => writeln!(output, "{}", game_err)?,
                    None => return Err(err),
                }
            }
        }

        match session.state() {
            SessionState::Won => {
                let elapsed = Utc::now().signed_duration_since(session.started_at());
                writeln!(output, "\nYou made it out! ({}s)", elapsed.num_seconds())?;
            }
            SessionState::TimedOut => {
                writeln!(output, "\nYou ran out of time. Game over.")?;
                writeln!(output, "Final score: {}", session.status().score)?;
            }
            SessionState::Exited => {
                writeln!(output, "\nBack to the main menu.")?;
            }
            SessionState::Browsing => unreachable!("loop only exits on a final state"),
        }
        Ok(())
    }
}

fn render_status(session: &Session<'_>, output: &mut impl Write) -> Result<()> {
    let status = session.status();
    writeln!(output, "\n=== CURRENT STATE ===")?;
    match session.current_scenario() {
        Ok(scenario) => {
            writeln!(output, "Scenario: {} - {}", scenario.id, scenario.name)?;
            writeln!(output, "{}", scenario.description)?;
        }
        Err(_) => writeln!(output, "Scenario: {} (unknown)", status.scenario_id)?,
    }
    writeln!(output, "Time remaining: {}", status.time_remaining)?;
    writeln!(output, "Score: {}", status.score)?;
    Ok(())
}

fn turn_pickup(
    session: &mut Session<'_>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    let items = &session.current_scenario()?.items;
    if items.is_empty() {
        writeln!(output, "There are no items here.")?;
        return Ok(());
    }
    writeln!(output, "\nItems available (value/weight):")?;
    for line in format_item_listing(items) {
        writeln!(output, "{}", line)?;
    }

    let Some(line) = prompt(input, output, "Item numbers, space separated: ")? else {
        return Ok(());
    };
    let report = session.pickup(&parse_selections(&line))?;
    for name in &report.taken {
        writeln!(output, "You picked up: {}", name)?;
    }
    if report.taken.is_empty() {
        writeln!(output, "Nothing picked up.")?;
    }
    Ok(())
}

fn turn_discard(
    session: &mut Session<'_>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    if session.player().inventory.is_empty() {
        writeln!(output, "Your inventory is empty.")?;
        return Ok(());
    }
    writeln!(output, "\nYour inventory (value/weight):")?;
    for line in format_inventory(&session.player().inventory) {
        writeln!(output, "{}", line)?;
    }

    let Some(line) = prompt(input, output, "Item numbers, space separated: ")? else {
        return Ok(());
    };
    let report = session.discard(&parse_selections(&line))?;
    for name in &report.dropped {
        writeln!(output, "You dropped: {}", name)?;
    }
    if report.dropped.is_empty() {
        writeln!(output, "Nothing discarded.")?;
    }
    Ok(())
}

fn turn_move(
    session: &mut Session<'_>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    let scenario = session.current_scenario()?;
    writeln!(output, "\nAvailable directions:")?;
    for (idx, direction) in Direction::ALL.iter().enumerate() {
        if let Some(destination) = scenario.exit(*direction) {
            writeln!(output, "{}) {} (to {})", idx + 1, direction, destination)?;
        }
    }

    let Some(line) = prompt(input, output, "Direction (1-4): ")? else {
        return Ok(());
    };
    let direction = match line.trim() {
        "1" => Direction::Up,
        "2" => Direction::Down,
        "3" => Direction::Left,
        "4" => Direction::Right,
        other => {
            writeln!(output, "Not a direction: {}", other)?;
            return Ok(());
        }
    };

    let report = session.move_to(direction)?;
    writeln!(
        output,
        "You moved to scenario {}. Time spent: {}",
        report.destination, report.time_spent
    )?;

    if let Some(win) = report.won {
        writeln!(output, "\nCongratulations! You reached the exit.")?;
        for line in format_final_summary(win.score, &win.inventory) {
            writeln!(output, "{}", line)?;
        }
    }
    Ok(())
}

/// Parse a whitespace-separated selection line into 1-based indices.
/// Tokens that are not numbers are skipped, matching the engine's
/// skip-invalid-selections policy.
fn parse_selections(line: &str) -> Vec<usize> {
    line.split_whitespace()
        .filter_map(|token| token.parse::<usize>().ok())
        .collect()
}

fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    text: &str,
) -> Result<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None); // EOF: treat as a quit
    }
    Ok(Some(line))
}

/// Clear the screen, but only when talking to a real terminal.
fn clear_screen(output: &mut impl Write) -> Result<()> {
    if atty::is(atty::Stream::Stdout) {
        write!(output, "\x1b[2J\x1b[H")?;
    }
    Ok(())
}
