use std::collections::HashSet;

use tracing::{info, warn};

use place_types::{ClassicPayload, GuessError, Payload};

use crate::clock::{ClockTick, TurnClock};
use crate::places::{PlaceBook, random_letter};
use crate::ports::GamePresenter;

/// Where a classic run is in its turn-exchange lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassicPhase {
    Idle,
    /// The local countdown is live and input is open.
    Playing,
    /// Local turn finished; the score went out and the opponent has not
    /// played yet.
    AwaitingOpponent,
    /// Both scores are known and the result has been shown.
    Resolved,
}

/// How a resolved classic game came out for the local player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassicOutcome {
    Win,
    Lose,
    Tie,
}

/// Solo timed run whose score is handed to the opponent through an encoded
/// message. The session owns all of its state; the presenter only renders.
pub struct ClassicSession {
    letter: char,
    score: u32,
    used_words: HashSet<String>,
    opponent_score: Option<u32>,
    phase: ClassicPhase,
    clock: TurnClock,
    time_limit: u32,
    outcome: Option<ClassicOutcome>,
}

impl ClassicSession {
    pub fn new(time_limit: u32) -> Self {
        Self {
            letter: random_letter(),
            score: 0,
            used_words: HashSet::new(),
            opponent_score: None,
            phase: ClassicPhase::Idle,
            clock: TurnClock::new(),
            time_limit,
            outcome: None,
        }
    }

    pub fn phase(&self) -> ClassicPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn outcome(&self) -> Option<ClassicOutcome> {
        self.outcome
    }

    pub fn time_remaining(&self) -> u32 {
        self.clock.remaining()
    }

    /// Opening invite for a conversation that has no game yet: a starting
    /// letter for the recipient and no score, so the recipient hands the
    /// turn back to us instead of closing the game at its own expiry.
    pub fn invite_payload(&self) -> Payload {
        Payload::Classic(ClassicPayload::open_invite(self.letter))
    }

    /// Start the local turn. Without a supplied letter a random one is
    /// drawn. Resets score and used words and restarts the clock.
    pub fn begin(&mut self, letter: Option<char>, presenter: &mut dyn GamePresenter) {
        self.letter = letter.unwrap_or_else(random_letter);
        self.score = 0;
        self.used_words.clear();
        self.outcome = None;
        self.phase = ClassicPhase::Playing;
        self.clock.start(self.time_limit);

        info!(letter = %self.letter, limit = self.time_limit, "classic turn started");
        presenter.set_letter(self.letter);
        presenter.set_score(0);
        presenter.set_timer(self.clock.remaining(), self.clock.fraction());
        presenter.set_feedback("");
        presenter.set_input_enabled(true);
    }

    /// Run one guess through the validation chain. Rejections surface as
    /// feedback and leave score and used words untouched; the clock keeps
    /// running either way.
    pub fn submit(
        &mut self,
        input: &str,
        book: &PlaceBook,
        presenter: &mut dyn GamePresenter,
    ) -> Result<(), GuessError> {
        if self.phase != ClassicPhase::Playing {
            return Err(GuessError::RoundOver);
        }

        let word = input.trim().to_lowercase();
        let result = check_guess(&word, self.letter, &self.used_words, book);
        match result {
            Ok(()) => {
                self.used_words.insert(word);
                self.score += 1;
                presenter.set_score(self.score);
                presenter.show_plus_one();
                Ok(())
            }
            Err(err) => {
                info!(%word, %err, "classic guess rejected");
                presenter.set_feedback(&err.to_string());
                Err(err)
            }
        }
    }

    /// Advance the countdown by one second. When the turn expires this
    /// returns the payload that must go out to the opponent, if any.
    pub fn tick(&mut self, presenter: &mut dyn GamePresenter) -> Option<Payload> {
        match self.clock.tick()? {
            ClockTick::Tick(remaining) => {
                presenter.set_timer(remaining, self.clock.fraction());
                None
            }
            ClockTick::Expired => self.finish_turn(presenter),
        }
    }

    fn finish_turn(&mut self, presenter: &mut dyn GamePresenter) -> Option<Payload> {
        presenter.set_timer(0, 0.0);
        presenter.set_input_enabled(false);

        if let Some(opponent) = self.opponent_score {
            // The opponent already played; this device closes the game.
            self.resolve(opponent, presenter);
            Some(Payload::Classic(ClassicPayload::result(
                self.score,
                self.letter,
            )))
        } else {
            self.phase = ClassicPhase::AwaitingOpponent;
            info!(score = self.score, "classic turn over, handing off to opponent");
            presenter.set_feedback("Time's up! Waiting for opponent...");
            Some(Payload::Classic(ClassicPayload::invite(
                self.score,
                self.letter,
            )))
        }
    }

    /// Reconcile an inbound classic payload against local state.
    pub fn receive(
        &mut self,
        classic: &ClassicPayload,
        presenter: &mut dyn GamePresenter,
    ) -> Option<Payload> {
        if classic.completed {
            let Some(opponent) = classic.score else {
                warn!("completed result without a score; dropping");
                return None;
            };
            self.clock.stop();
            presenter.set_input_enabled(false);
            self.resolve(opponent, presenter);
            return None;
        }

        match self.phase {
            ClassicPhase::Idle => {
                // Opponent set our starting letter (and possibly their
                // finished score, which we keep for resolution later).
                self.opponent_score = classic.score;
                self.begin(classic.letter, presenter);
                None
            }
            phase => {
                warn!(?phase, "stale classic invite ignored");
                None
            }
        }
    }

    fn resolve(&mut self, opponent: u32, presenter: &mut dyn GamePresenter) {
        let (outcome, text) = if self.score > opponent {
            (
                ClassicOutcome::Win,
                format!(
                    "You won! Your score: {}, opponent: {}",
                    self.score, opponent
                ),
            )
        } else if self.score < opponent {
            (
                ClassicOutcome::Lose,
                format!(
                    "You lost. Your score: {}, opponent: {}",
                    self.score, opponent
                ),
            )
        } else {
            (ClassicOutcome::Tie, format!("It's a tie! Score: {}", self.score))
        };

        info!(local = self.score, opponent, ?outcome, "classic game resolved");
        self.phase = ClassicPhase::Resolved;
        self.opponent_score = Some(opponent);
        self.outcome = Some(outcome);
        presenter.set_feedback(&text);
        presenter.set_input_enabled(false);
    }

    /// Stop the clock before the session is discarded.
    pub fn shutdown(&mut self) {
        self.clock.stop();
    }
}

/// Shared validation chain for both modes: empty, wrong starting letter,
/// already used, unknown place, in that order. A word that matches several
/// categories still passes exactly once.
pub(crate) fn check_guess(
    word: &str,
    letter: char,
    used_words: &HashSet<String>,
    book: &PlaceBook,
) -> Result<(), GuessError> {
    if word.is_empty() {
        return Err(GuessError::Empty);
    }
    if !word.starts_with(letter.to_ascii_lowercase()) {
        return Err(GuessError::WrongLetter(letter));
    }
    if used_words.contains(word) {
        return Err(GuessError::AlreadyUsed(word.to_string()));
    }
    if book.classify(word).is_none() {
        return Err(GuessError::UnknownPlace(word.to_string()));
    }
    Ok(())
}
