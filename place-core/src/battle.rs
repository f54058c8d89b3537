use std::collections::HashSet;

use tracing::{info, warn};

use place_types::{BattleSync, GuessError, Player};

use crate::classic::check_guess;
use crate::clock::{ClockTick, TurnClock};
use crate::places::{PlaceBook, random_letter};
use crate::ports::GamePresenter;

/// Synchronous multiplayer round-robin session. One player is active at a
/// time; the used-word set is shared by everyone; a turn that times out
/// ends the whole session. Turn-to-turn play is local to the device that
/// hosts the session — cross-device sync happens at room-join time, with
/// `handle_sync` covering the mirrored-session case.
pub struct BattleSession {
    players: Vec<Player>,
    active_player_index: usize,
    letter: char,
    used_words: HashSet<String>,
    clock: TurnClock,
    time_limit: u32,
    over: bool,
}

impl BattleSession {
    /// Build the session from the room's name list and start the first
    /// turn. Every player gets a fresh id and a zero score. An empty name
    /// list yields a session that is already over.
    pub fn start(names: &[String], time_limit: u32, presenter: &mut dyn GamePresenter) -> Self {
        Self::start_with_letter(names, random_letter(), time_limit, presenter)
    }

    /// Like `start`, but with a caller-chosen letter. Used when this device
    /// mirrors a session whose letter another device already drew.
    pub fn start_with_letter(
        names: &[String],
        letter: char,
        time_limit: u32,
        presenter: &mut dyn GamePresenter,
    ) -> Self {
        let players: Vec<Player> = names.iter().map(|name| Player::local(name)).collect();
        let mut session = Self {
            players,
            active_player_index: 0,
            letter,
            used_words: HashSet::new(),
            clock: TurnClock::new(),
            time_limit,
            over: false,
        };
        if session.players.is_empty() {
            warn!("battle session started with an empty roster");
            session.over = true;
            presenter.set_input_enabled(false);
            return session;
        }
        info!(
            players = session.players.len(),
            letter = %session.letter,
            "battle session started"
        );
        presenter.set_letter(session.letter);
        session.begin_turn(presenter);
        session
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn active_player_index(&self) -> usize {
        self.active_player_index
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn time_remaining(&self) -> u32 {
        self.clock.remaining()
    }

    /// Run a guess from the player at `player_index` through the shared
    /// validation chain. Submissions from anyone but the active player are
    /// rejected without touching state. An accepted word scores the active
    /// player, passes the turn round-robin, and restarts the clock.
    pub fn submit(
        &mut self,
        player_index: usize,
        input: &str,
        book: &PlaceBook,
        presenter: &mut dyn GamePresenter,
    ) -> Result<(), GuessError> {
        if self.over {
            return Err(GuessError::RoundOver);
        }
        if player_index != self.active_player_index {
            warn!(
                player_index,
                active = self.active_player_index,
                "submission from non-active player rejected"
            );
            return Err(GuessError::NotYourTurn);
        }

        let word = input.trim().to_lowercase();
        match check_guess(&word, self.letter, &self.used_words, book) {
            Ok(()) => {
                self.used_words.insert(word);
                self.players[self.active_player_index].score += 1;
                presenter.show_plus_one();
                presenter.set_feedback("Correct! Next player's turn.");

                self.active_player_index = (self.active_player_index + 1) % self.players.len();
                self.begin_turn(presenter);
                Ok(())
            }
            Err(err) => {
                info!(%word, %err, "battle guess rejected");
                presenter.set_feedback(&err.to_string());
                Err(err)
            }
        }
    }

    /// Advance the countdown by one second. On expiry the active player is
    /// out of time and the session ends.
    pub fn tick(&mut self, presenter: &mut dyn GamePresenter) {
        match self.clock.tick() {
            Some(ClockTick::Tick(remaining)) => {
                presenter.set_timer(remaining, self.clock.fraction());
            }
            Some(ClockTick::Expired) => self.handle_timeout(presenter),
            None => {}
        }
    }

    /// Apply a mirrored battle message from another device.
    pub fn handle_sync(
        &mut self,
        sync: &BattleSync,
        book: &PlaceBook,
        presenter: &mut dyn GamePresenter,
    ) {
        match sync {
            BattleSync::Guess { word, player_index } => {
                if *player_index != self.active_player_index {
                    warn!(player_index, "mirrored guess from non-active player dropped");
                    return;
                }
                let _ = self.submit(*player_index, word, book, presenter);
            }
            BattleSync::TurnUpdate {
                active_player_index,
            } => {
                if *active_player_index >= self.players.len() {
                    warn!(active_player_index, "turn update out of range dropped");
                    return;
                }
                self.active_player_index = *active_player_index;
                self.begin_turn(presenter);
            }
            BattleSync::ScoreUpdate {
                player_index,
                score,
            } => {
                let Some(player) = self.players.get_mut(*player_index) else {
                    warn!(player_index, "score update out of range dropped");
                    return;
                };
                player.score = *score;
                presenter.show_roster(&self.players);
                if *player_index == self.active_player_index {
                    presenter.set_score(*score);
                }
            }
        }
    }

    /// Stop the clock before the session is discarded.
    pub fn shutdown(&mut self) {
        self.clock.stop();
    }

    fn begin_turn(&mut self, presenter: &mut dyn GamePresenter) {
        for (i, player) in self.players.iter_mut().enumerate() {
            player.is_active = i == self.active_player_index;
        }
        self.clock.start(self.time_limit);

        let active = &self.players[self.active_player_index];
        info!(name = %active.name, index = self.active_player_index, "battle turn started");
        presenter.set_score(active.score);
        presenter.set_timer(self.clock.remaining(), self.clock.fraction());
        presenter.set_input_enabled(true);
        presenter.show_roster(&self.players);
        presenter.set_feedback(&format!("{}'s Turn", active.name));
    }

    fn handle_timeout(&mut self, presenter: &mut dyn GamePresenter) {
        self.over = true;
        let name = &self.players[self.active_player_index].name;
        info!(%name, "battle player timed out, session over");
        presenter.set_input_enabled(false);
        presenter.set_feedback(&format!("{name} ran out of time!"));
    }
}
