mod config;
mod console;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use place_core::{GameCoordinator, PlaceBook, Settings, SettingsStore};

use crate::config::Config;
use crate::console::{ConsoleOutbox, ConsolePresenter};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    info!("Starting Place Duel console host...");

    let config = Config::new();
    let book = Arc::new(PlaceBook::builtin()?);
    info!(places = book.total_places(), "place lists loaded");

    let store = SettingsStore::new(&config.settings_path);
    let settings = store.load();

    let mut coordinator = GameCoordinator::new(
        book,
        config.rules(),
        settings.display_name.clone(),
        ConsolePresenter,
        ConsoleOutbox,
    );

    println!("commands: classic | invite | battle | ready | unready | name <n> |");
    println!("          submit <word> | recv <payload> | tick [n] | quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "classic" => coordinator.start_classic(),
            "invite" => coordinator.invite_classic(),
            "battle" => coordinator.start_battle_room(),
            "ready" => coordinator.toggle_ready(true),
            "unready" => coordinator.toggle_ready(false),
            "name" => {
                coordinator.rename_local_player(rest);
                store.save(&Settings {
                    display_name: rest.to_string(),
                })?;
            }
            "submit" => coordinator.submit(rest),
            "recv" => coordinator.handle_inbound(rest),
            "tick" => {
                let count: u32 = rest.parse().unwrap_or(1);
                for _ in 0..count {
                    coordinator.tick();
                }
            }
            "leave" => coordinator.leave_battle_room(),
            "quit" | "exit" => break,
            "" => {}
            other => println!("unknown command: {other}"),
        }
    }

    info!("Host shutdown complete.");
    Ok(())
}
