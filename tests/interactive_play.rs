//! A scripted end-to-end playthrough driven through the REPL.

use std::fs;
use std::io::Cursor;

use graphquest::config::Config;
use graphquest::repl::Repl;

const WORLD_CSV: &str = "\
id,name,description,items,up,down,left,right,is_terminal
1,Entrance,A damp stone hall,\"torch,1,1\",-1,3,-1,2,No
2,Armory,Rusted weapon racks,\"sword,5,3;shield,4,6\",-1,4,1,-1,No
3,Cellar,Crates and cobwebs,\"coin purse,8,2\",1,-1,-1,4,No
4,Courtyard,A broken gate,,2,-1,3,5,No
5,Gatehouse,The way out,,-1,-1,-1,-1,Si
";

fn repl_with_world(dir: &tempfile::TempDir) -> Repl {
    let world_path = dir.path().join("world.csv");
    fs::write(&world_path, WORLD_CSV).unwrap();

    let mut config = Config::default();
    config.game.world_file = world_path.to_string_lossy().into_owned();
    Repl::new(config)
}

#[test]
fn scripted_run_to_victory() {
    let dir = tempfile::tempdir().unwrap();
    let mut repl = repl_with_world(&dir);

    // Load, start, grab the torch, go right, loot the armory, head down
    // and right again into the terminal gatehouse, then leave the menu.
    let script = "1\n2\n1\n1\n3\n4\n1\n1 2\n3\n2\n3\n4\n3\n";
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut output = Vec::new();

    repl.run(&mut input, &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();

    assert!(text.contains("World loaded: 5 scenarios, 4 items."));
    assert!(text.contains("You picked up: torch"));
    assert!(text.contains("You picked up: sword"));
    assert!(text.contains("You picked up: shield"));
    assert!(text.contains("Congratulations! You reached the exit."));
    assert!(text.contains("Final score: 10"));
    assert!(text.contains("- sword (value: 5, weight: 3)"));
}

#[test]
fn scripted_run_out_of_time() {
    let dir = tempfile::tempdir().unwrap();
    let mut repl = repl_with_world(&dir);

    // Ping-pong between the entrance and the cellar until the clock dies.
    // Ten 1-cost moves exhaust the ten-unit budget exactly.
    let mut script = String::from("1\n2\n");
    for _ in 0..5 {
        script.push_str("3\n2\n"); // down to the cellar
        script.push_str("3\n1\n"); // back up
    }
    script.push_str("3\n"); // back at the main menu: quit
    let mut input = Cursor::new(script.into_bytes());
    let mut output = Vec::new();

    repl.run(&mut input, &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();

    assert!(text.contains("You ran out of time. Game over."));
    assert!(text.contains("Final score: 0"));
}

#[test]
fn blocked_moves_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut repl = repl_with_world(&dir);

    // Moving up from the entrance has no exit; the game keeps going.
    let script = "1\n2\n3\n1\n4\n3\n";
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut output = Vec::new();

    repl.run(&mut input, &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();

    assert!(text.contains("no exit leading up"));
    assert!(text.contains("Back to the main menu."));
}

#[test]
fn eof_mid_game_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let mut repl = repl_with_world(&dir);

    let script = "1\n2\n";
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut output = Vec::new();

    repl.run(&mut input, &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Back to the main menu."));
}
