//! World ingestion: turn a scenario file into a [`World`].
//!
//! Two on-disk formats are supported so worlds can be authored without
//! recompiling: the classic comma-separated table (one row per scenario)
//! and a JSON seed array. [`load_world`] picks the parser from the file
//! extension.

use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::engine::{Direction, GameError, Item, Scenario, World};

/// Literal marking "no exit in this direction" in CSV direction fields.
const NO_EXIT_SENTINEL: &str = "-1";

/// Literal marking a terminal scenario in the CSV flag field.
const TERMINAL_FLAG: &str = "Si";

/// Fields per CSV row: id, name, description, items, four exits, terminal.
const FIELDS_PER_ROW: usize = 9;

/// Load a world file, dispatching on the extension: `.json` gets the seed
/// parser, anything else the CSV parser.
pub fn load_world<P: AsRef<Path>>(path: P) -> Result<World, GameError> {
    let path = path.as_ref();
    let world = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => load_world_from_json(path)?,
        _ => load_world_from_csv(path)?,
    };

    info!(
        "loaded world from {}: {} scenarios, {} pooled items",
        path.display(),
        world.len(),
        world.pooled_item_count()
    );
    Ok(world)
}

/// Load a world from the comma-separated table format.
///
/// Expected columns, after one header row:
/// `id,name,description,items,up,down,left,right,terminal`. The items
/// column is empty or `;`-separated `name,value,weight` triples; direction
/// columns hold a scenario id or the `-1` sentinel; the terminal column is
/// `Si` for true, anything else for false. Exit ids are not checked
/// against the loaded scenarios (see [`World::dangling_exits`]).
pub fn load_world_from_csv<P: AsRef<Path>>(path: P) -> Result<World, GameError> {
    let contents = fs::read_to_string(path.as_ref())?;
    let mut world = World::new();

    // Line 1 is the header row.
    for (line_no, line) in contents.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        world.insert(parse_row(line_no + 1, line)?);
    }

    Ok(world)
}

fn parse_row(line_no: usize, line: &str) -> Result<Scenario, GameError> {
    let fields = split_fields(line);
    if fields.len() < FIELDS_PER_ROW {
        return Err(GameError::WorldFormat {
            line: line_no,
            reason: format!(
                "expected {} fields, found {}",
                FIELDS_PER_ROW,
                fields.len()
            ),
        });
    }

    // Unquoted files leave item-triple commas visible, inflating the field
    // count; the fixed columns sit at both ends, so take three from the
    // front, five from the back, and fold the middle back together.
    let tail = fields.len() - 5;
    let items_field = fields[3..tail].join(",");

    let mut scenario = Scenario::new(&fields[0], &fields[1], &fields[2]);
    scenario.items = parse_items_field(line_no, &items_field)?;

    for (direction, field) in Direction::ALL.iter().zip(&fields[tail..tail + 4]) {
        if field != NO_EXIT_SENTINEL && !field.is_empty() {
            scenario.exits.insert(*direction, field.clone());
        }
    }
    scenario.is_terminal = fields[tail + 4] == TERMINAL_FLAG;

    debug!(
        "parsed scenario {} ({} items, {} exits)",
        scenario.id,
        scenario.items.len(),
        scenario.exits.len()
    );
    Ok(scenario)
}

/// Split one row on commas, honoring double quotes. Quotes are stripped;
/// a doubled quote inside a quoted field is a literal quote.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.trim_end_matches(['\r', '\n']).chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

fn parse_items_field(line_no: usize, field: &str) -> Result<Vec<Item>, GameError> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(Vec::new());
    }

    let mut items = Vec::new();
    for triple in field.split(';') {
        let parts: Vec<&str> = triple.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(GameError::WorldFormat {
                line: line_no,
                reason: format!("item entry {:?} is not a name,value,weight triple", triple),
            });
        }
        let value = parts[1].parse::<i32>().map_err(|_| GameError::WorldFormat {
            line: line_no,
            reason: format!("item value {:?} is not a number", parts[1]),
        })?;
        let weight = parts[2].parse::<i32>().map_err(|_| GameError::WorldFormat {
            line: line_no,
            reason: format!("item weight {:?} is not a number", parts[2]),
        })?;
        items.push(Item::new(parts[0], value, weight));
    }
    Ok(items)
}

/// One scenario entry in a JSON seed file.
#[derive(Debug, Deserialize)]
struct ScenarioSeed {
    id: String,
    name: String,
    description: String,
    #[serde(default)]
    items: Vec<ItemSeed>,
    #[serde(default)]
    up: Option<String>,
    #[serde(default)]
    down: Option<String>,
    #[serde(default)]
    left: Option<String>,
    #[serde(default)]
    right: Option<String>,
    #[serde(default)]
    terminal: bool,
}

#[derive(Debug, Deserialize)]
struct ItemSeed {
    name: String,
    value: i32,
    weight: i32,
}

/// Load a world from a JSON seed array.
pub fn load_world_from_json<P: AsRef<Path>>(path: P) -> Result<World, GameError> {
    let contents = fs::read_to_string(path.as_ref())?;
    let seeds: Vec<ScenarioSeed> = serde_json::from_str(&contents)?;

    let mut world = World::new();
    for seed in seeds {
        let mut scenario = Scenario::new(&seed.id, &seed.name, &seed.description);
        scenario.items = seed
            .items
            .into_iter()
            .map(|item| Item::new(&item.name, item.value, item.weight))
            .collect();
        scenario.is_terminal = seed.terminal;

        let exits = [
            (Direction::Up, seed.up),
            (Direction::Down, seed.down),
            (Direction::Left, seed.left),
            (Direction::Right, seed.right),
        ];
        for (direction, destination) in exits {
            if let Some(destination) = destination {
                scenario.exits.insert(direction, destination);
            }
        }

        world.insert(scenario);
    }

    Ok(world)
}
