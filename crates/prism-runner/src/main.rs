//! Standalone Prism area host.
//!
//! This binary:
//! 1. Loads `config.toml` (writing the default on first start)
//! 2. Loads `areas.json` from the data directory into a shared registry
//! 3. Runs a tick loop that serves operator commands from stdin
//! 4. Saves areas on shutdown
//!
//! Type `help` at the prompt for the command list.

mod config;
mod console;

use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use prism_core::PermissionTree;
use prism_persist::AreaStore;
use prism_spatial::SharedAreas;
use tracing::{error, info};

use crate::config::Config;
use crate::console::{Command, Console, parse_command};

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("prism_runner=info".parse()?)
                .add_directive("prism_persist=info".parse()?),
        )
        .init();

    info!("Starting Prism runner");

    let config = Config::from_env()?;
    info!("Data directory: {}", config.data_dir.display());

    let worlds = config.worlds();
    let areas = SharedAreas::with_permissions(PermissionTree::new());
    let store = AreaStore::open(config.areas_path());

    // Never overwrite a file that failed to load.
    let loaded = match store.load_into(&areas, &worlds) {
        Ok(_) => true,
        Err(e) => {
            error!("Failed to load areas from {}: {e}", store.path().display());
            false
        }
    };

    let console = Console::new(areas, store, worlds);

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    thread::spawn(move || {
        input_thread(cmd_tx);
    });

    let tick_interval = config.tick_interval();
    let mut running = true;

    while running {
        let start = Instant::now();

        while let Ok(cmd) = cmd_rx.try_recv() {
            if cmd == Command::Quit {
                info!("Shutting down...");
                running = false;
                break;
            }
            for line in console.execute(cmd) {
                info!("{line}");
            }
        }

        let elapsed = start.elapsed();
        if elapsed < tick_interval {
            thread::sleep(tick_interval - elapsed);
        }
    }

    if loaded {
        if let Some(count) = console.save() {
            info!("Saved {count} areas");
        }
    } else {
        error!("Skipping save: areas were not loaded cleanly at startup");
    }

    Ok(())
}

/// Forward stdin lines as commands; end of input quits.
fn input_thread(tx: mpsc::Sender<Command>) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        let cmd = parse_command(&line);
        let is_quit = cmd == Command::Quit;
        if tx.send(cmd).is_err() || is_quit {
            return;
        }
    }
    let _ = tx.send(Command::Quit);
}
