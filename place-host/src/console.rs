use place_core::{GamePresenter, MessageOutbox};
use place_types::{Payload, Player};

/// Renders presenter calls as console lines.
pub struct ConsolePresenter;

impl GamePresenter for ConsolePresenter {
    fn set_letter(&mut self, letter: char) {
        println!("  [letter] {letter}");
    }

    fn set_score(&mut self, score: u32) {
        println!("  [score] {score}");
    }

    fn set_timer(&mut self, seconds_remaining: u32, fraction: f32) {
        println!("  [timer] {seconds_remaining}s ({:.0}%)", fraction * 100.0);
    }

    fn set_feedback(&mut self, text: &str) {
        if !text.is_empty() {
            println!("  [feedback] {text}");
        }
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        println!("  [input] {}", if enabled { "enabled" } else { "disabled" });
    }

    fn show_plus_one(&mut self) {
        println!("  [+1]");
    }

    fn show_roster(&mut self, players: &[Player]) {
        println!("  [roster]");
        for player in players {
            println!(
                "    {} {} score={} {}{}",
                player.id,
                player.name,
                player.score,
                if player.is_ready { "ready" } else { "not-ready" },
                if player.is_active { " *active*" } else { "" },
            );
        }
    }
}

/// Prints the wire form of each outbound payload, standing in for the
/// conversation's insert-message call.
pub struct ConsoleOutbox;

impl MessageOutbox for ConsoleOutbox {
    fn send(&mut self, payload: &Payload) {
        println!("  [outbound] {}", payload.encode());
    }
}
