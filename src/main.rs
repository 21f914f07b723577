//! Binary entrypoint for the GraphQuest CLI.
//!
//! Commands:
//! - `play [--world <path>]` - run the interactive game
//! - `init` - create a starter `config.toml` and the demo world file
//! - `validate [--world <path>]` - load a world and report its shape
//!
//! See the library crate docs for module-level details: `graphquest::`.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::io::{self, Write};

use graphquest::config::Config;
use graphquest::loader;
use graphquest::repl::Repl;

#[derive(Parser)]
#[command(name = "graphquest")]
#[command(about = "A text-driven graph exploration game")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the game interactively
    Play {
        /// World file, overriding the configured one
        #[arg(short, long)]
        world: Option<String>,
    },
    /// Create a default config.toml and demo world
    Init,
    /// Load a world file and report scenarios, items and broken exits
    Validate {
        /// World file, overriding the configured one
        #[arg(short, long)]
        world: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).ok(),
    };
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Play { world } => {
            let mut config = config.unwrap_or_else(|| {
                info!("no config file at {}, using defaults", cli.config);
                Config::default()
            });
            if let Some(world) = world {
                config.game.world_file = world;
            }

            let stdin = io::stdin();
            let stdout = io::stdout();
            Repl::new(config).run(&mut stdin.lock(), &mut stdout.lock())
        }
        Commands::Init => {
            Config::create_default(&cli.config)
                .with_context(|| format!("writing {}", cli.config))?;
            println!("Wrote {}", cli.config);

            std::fs::create_dir_all("data/worlds").context("creating data/worlds")?;
            std::fs::write("data/worlds/demo.csv", DEMO_WORLD_CSV)
                .context("writing data/worlds/demo.csv")?;
            println!("Wrote data/worlds/demo.csv");
            Ok(())
        }
        Commands::Validate { world } => {
            let config = config.unwrap_or_default();
            let world_file = world.unwrap_or(config.game.world_file);

            let loaded = loader::load_world(&world_file)
                .with_context(|| format!("loading {}", world_file))?;
            println!(
                "{}: {} scenarios, {} pooled items",
                world_file,
                loaded.len(),
                loaded.pooled_item_count()
            );

            let dangling = loaded.dangling_exits();
            if dangling.is_empty() {
                println!("All exits resolve.");
            } else {
                for (scenario, direction, destination) in &dangling {
                    println!(
                        "dangling exit: scenario {} leads {} to missing {}",
                        scenario, direction, destination
                    );
                }
            }

            if !loaded.contains(&config.game.start_scenario) {
                println!(
                    "warning: start scenario {} is not in this world",
                    config.game.start_scenario
                );
            }
            Ok(())
        }
    }
}

/// Initialize env_logger from the config level, overridden by -v flags.
/// With a configured log file, records go there instead of stderr.
fn init_logging(config: &Option<Config>, verbosity: u8) {
    let mut builder = env_logger::Builder::new();

    let level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|cfg| cfg.logging.level.parse().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);

    if let Some(file) = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.as_deref())
        .filter(|path| !path.is_empty())
    {
        if let Ok(f) = std::fs::OpenOptions::new().create(true).append(true).open(file) {
            builder.target(env_logger::Target::Pipe(Box::new(f)));
        }
    }

    builder.format(|fmt, record| {
        let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
    });

    let _ = builder.try_init();
}

const DEMO_WORLD_CSV: &str = "\
id,name,description,items,up,down,left,right,is_terminal
1,Entrance,A damp stone hall streaked with torchlight,\"torch,1,1\",-1,3,-1,2,No
2,Armory,Racks of rusted weapons line the walls,\"sword,5,3;shield,4,6\",-1,4,1,-1,No
3,Cellar,Crates and cobwebs as far as the torch reaches,\"coin purse,8,2\",1,-1,-1,4,No
4,Courtyard,Daylight at last beyond a broken gate,,2,-1,3,5,No
5,Gatehouse,The way out of the maze,,-1,-1,-1,-1,Si
";
