//! Shared doubles for the colocated unit tests.

use place_types::{Payload, Player};

use crate::ports::{GamePresenter, MessageOutbox};

/// Presenter that records everything pushed at it.
pub struct RecordingPresenter {
    pub letter: Option<char>,
    pub score: u32,
    pub timer: Vec<(u32, f32)>,
    pub feedback: Vec<String>,
    pub input_enabled: Option<bool>,
    pub plus_ones: u32,
    pub rosters: Vec<Vec<Player>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self {
            letter: None,
            score: 0,
            timer: Vec::new(),
            feedback: Vec::new(),
            input_enabled: None,
            plus_ones: 0,
            rosters: Vec::new(),
        }
    }

    pub fn last_feedback(&self) -> &str {
        self.feedback.last().map(String::as_str).unwrap_or("")
    }
}

impl GamePresenter for RecordingPresenter {
    fn set_letter(&mut self, letter: char) {
        self.letter = Some(letter);
    }
    fn set_score(&mut self, score: u32) {
        self.score = score;
    }
    fn set_timer(&mut self, seconds_remaining: u32, fraction: f32) {
        self.timer.push((seconds_remaining, fraction));
    }
    fn set_feedback(&mut self, text: &str) {
        self.feedback.push(text.to_string());
    }
    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = Some(enabled);
    }
    fn show_plus_one(&mut self) {
        self.plus_ones += 1;
    }
    fn show_roster(&mut self, players: &[Player]) {
        self.rosters.push(players.to_vec());
    }
}

/// Outbox that captures every sent payload.
pub struct CapturingOutbox {
    pub sent: Vec<Payload>,
}

impl CapturingOutbox {
    pub fn new() -> Self {
        Self { sent: Vec::new() }
    }

    pub fn last(&self) -> Option<&Payload> {
        self.sent.last()
    }
}

impl MessageOutbox for CapturingOutbox {
    fn send(&mut self, payload: &Payload) {
        self.sent.push(payload.clone());
    }
}
