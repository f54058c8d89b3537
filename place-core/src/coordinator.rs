use std::sync::Arc;

use tracing::{info, warn};

use place_types::{Payload, Player};

use crate::battle::BattleSession;
use crate::battle_room::BattleRoom;
use crate::classic::ClassicSession;
use crate::places::PlaceBook;
use crate::ports::{GamePresenter, MessageOutbox};
use crate::rules::GameRules;

/// Battle mode is a lobby first and a session second.
pub enum BattleFlow {
    Room(BattleRoom),
    Session(BattleSession),
}

/// The one mode currently on screen. Classic and battle are deliberately a
/// sum type rather than a shared capability interface, so every dispatch
/// point is an exhaustive match.
pub enum GameMode {
    Classic(ClassicSession),
    Battle(BattleFlow),
}

/// Top-level dispatcher owned by the application shell. Explicitly
/// constructed with its collaborators — the place book, the presentation
/// port and the message outbox — and handed around by reference; there is
/// no process-wide instance.
pub struct GameCoordinator<P: GamePresenter, O: MessageOutbox> {
    mode: Option<GameMode>,
    rules: GameRules,
    book: Arc<PlaceBook>,
    local_name: String,
    presenter: P,
    outbox: O,
}

impl<P: GamePresenter, O: MessageOutbox> GameCoordinator<P, O> {
    pub fn new(
        book: Arc<PlaceBook>,
        rules: GameRules,
        local_name: String,
        presenter: P,
        outbox: O,
    ) -> Self {
        Self {
            mode: None,
            rules,
            book,
            local_name,
            presenter,
            outbox,
        }
    }

    pub fn mode(&self) -> Option<&GameMode> {
        self.mode.as_ref()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn outbox(&self) -> &O {
        &self.outbox
    }

    pub fn set_local_name(&mut self, name: &str) {
        self.local_name = name.to_string();
    }

    /// Begin a local classic run immediately.
    pub fn start_classic(&mut self) {
        self.teardown_mode();
        let mut session = ClassicSession::new(self.rules.classic_time_limit);
        session.begin(None, &mut self.presenter);
        self.mode = Some(GameMode::Classic(session));
    }

    /// Send a classic invite so the opponent plays the first turn.
    pub fn invite_classic(&mut self) {
        self.teardown_mode();
        let session = ClassicSession::new(self.rules.classic_time_limit);
        self.outbox.send(&session.invite_payload());
        self.mode = Some(GameMode::Classic(session));
    }

    /// Open a battle waiting room with just the local player and advertise
    /// it to the conversation.
    pub fn start_battle_room(&mut self) {
        self.teardown_mode();
        let room = BattleRoom::create(&self.local_name, self.rules.max_battle_players);
        self.outbox.send(&room.invite_payload());
        self.presenter.show_roster(room.players());
        self.mode = Some(GameMode::Battle(BattleFlow::Room(room)));
    }

    /// Flip the local ready flag; starts the battle once everyone is ready.
    pub fn toggle_ready(&mut self, is_ready: bool) {
        let Some(GameMode::Battle(BattleFlow::Room(room))) = &mut self.mode else {
            warn!("ready toggle outside a waiting room ignored");
            return;
        };
        if let Some(broadcast) = room.toggle_ready(is_ready, &mut self.presenter) {
            self.outbox.send(&broadcast);
        }
        self.try_start_battle();
    }

    /// Rename the local player in the waiting room.
    pub fn rename_local_player(&mut self, name: &str) {
        self.local_name = name.to_string();
        let Some(GameMode::Battle(BattleFlow::Room(room))) = &mut self.mode else {
            return;
        };
        if let Some(broadcast) = room.rename(name, &mut self.presenter) {
            self.outbox.send(&broadcast);
        }
    }

    /// Leave the waiting room and fall back to no mode.
    pub fn leave_battle_room(&mut self) {
        let Some(GameMode::Battle(BattleFlow::Room(room))) = &mut self.mode else {
            return;
        };
        let broadcast = room.leave();
        self.outbox.send(&broadcast);
        self.mode = None;
    }

    /// Submit a guess typed on this device to whichever game is running.
    pub fn submit(&mut self, input: &str) {
        match &mut self.mode {
            Some(GameMode::Classic(session)) => {
                let _ = session.submit(input, &self.book, &mut self.presenter);
            }
            Some(GameMode::Battle(BattleFlow::Session(session))) => {
                let index = session.active_player_index();
                let _ = session.submit(index, input, &self.book, &mut self.presenter);
            }
            Some(GameMode::Battle(BattleFlow::Room(_))) => {
                warn!("guess submitted while still in the waiting room");
            }
            None => warn!("guess submitted with no game running"),
        }
    }

    /// One second of wall-clock time. The host calls this on its own
    /// schedule; all expiry processing happens here, on the same thread as
    /// every other mutation.
    pub fn tick(&mut self) {
        match &mut self.mode {
            Some(GameMode::Classic(session)) => {
                if let Some(payload) = session.tick(&mut self.presenter) {
                    self.outbox.send(&payload);
                }
            }
            Some(GameMode::Battle(BattleFlow::Session(session))) => {
                session.tick(&mut self.presenter);
            }
            _ => {}
        }
    }

    /// Entry point for the payload of a selected conversation message.
    pub fn handle_inbound(&mut self, raw: &str) {
        let payload = match Payload::decode(raw) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(%err, "undecodable inbound payload dropped");
                return;
            }
        };
        info!(?payload, "inbound payload");

        match payload {
            Payload::Classic(classic) => {
                // Create the classic session on demand; an inbound classic
                // payload is how the second device learns a game exists.
                if !matches!(self.mode, Some(GameMode::Classic(_))) {
                    self.teardown_mode();
                    self.mode = Some(GameMode::Classic(ClassicSession::new(
                        self.rules.classic_time_limit,
                    )));
                }
                let Some(GameMode::Classic(session)) = &mut self.mode else {
                    unreachable!("classic mode was just installed");
                };
                if let Some(outbound) = session.receive(&classic, &mut self.presenter) {
                    self.outbox.send(&outbound);
                }
            }
            Payload::BattleInvite { roster } => {
                self.teardown_mode();
                let (room, broadcast) = BattleRoom::join(
                    &self.local_name,
                    &roster,
                    self.rules.max_battle_players,
                    &mut self.presenter,
                );
                if let Some(broadcast) = broadcast {
                    self.outbox.send(&broadcast);
                }
                self.mode = Some(GameMode::Battle(BattleFlow::Room(room)));
                self.try_start_battle();
            }
            Payload::RoomUpdate(update) => {
                let Some(GameMode::Battle(BattleFlow::Room(room))) = &mut self.mode else {
                    warn!("room update with no waiting room; dropped");
                    return;
                };
                room.receive_update(&update, &mut self.presenter);
                self.try_start_battle();
            }
            Payload::BattleSync(sync) => {
                let Some(GameMode::Battle(BattleFlow::Session(session))) = &mut self.mode else {
                    warn!("battle sync with no running battle; dropped");
                    return;
                };
                session.handle_sync(&sync, &self.book, &mut self.presenter);
            }
        }
    }

    fn try_start_battle(&mut self) {
        let Some(GameMode::Battle(BattleFlow::Room(room))) = &mut self.mode else {
            return;
        };
        if !room.quorum_met() {
            return;
        }
        let names: Vec<String> = room.hand_off().into_iter().map(|p| p.name).collect();
        let session = BattleSession::start(&names, self.rules.battle_time_limit, &mut self.presenter);
        self.mode = Some(GameMode::Battle(BattleFlow::Session(session)));
    }

    /// Stop whatever clock is live before a mode object is dropped, so an
    /// expiry can never fire against a discarded state machine.
    fn teardown_mode(&mut self) {
        match self.mode.take() {
            Some(GameMode::Classic(mut session)) => session.shutdown(),
            Some(GameMode::Battle(BattleFlow::Session(mut session))) => session.shutdown(),
            Some(GameMode::Battle(BattleFlow::Room(_))) | None => {}
        }
    }

    /// Current roster, if battle mode is up in either form.
    pub fn roster(&self) -> Option<&[Player]> {
        match &self.mode {
            Some(GameMode::Battle(BattleFlow::Room(room))) => Some(room.players()),
            Some(GameMode::Battle(BattleFlow::Session(session))) => Some(session.players()),
            _ => None,
        }
    }
}
