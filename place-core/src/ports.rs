use place_types::{Payload, Player};

/// Presentation seam consumed by the game core. The hosting surface renders
/// however it likes; sessions only push values through this one-directional
/// interface and never hold a reference back into concrete UI objects.
pub trait GamePresenter {
    fn set_letter(&mut self, letter: char);
    fn set_score(&mut self, score: u32);
    fn set_timer(&mut self, seconds_remaining: u32, fraction: f32);
    fn set_feedback(&mut self, text: &str);
    fn set_input_enabled(&mut self, enabled: bool);
    /// Brief "+1" flourish on an accepted word.
    fn show_plus_one(&mut self);
    fn show_roster(&mut self, players: &[Player]);
}

/// Outbound half of the conversation surface: the core encodes state into a
/// payload and hands it here for store-and-forward delivery. There is no
/// acknowledgment channel.
pub trait MessageOutbox {
    fn send(&mut self, payload: &Payload);
}
