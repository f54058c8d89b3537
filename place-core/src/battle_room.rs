use tracing::{info, warn};

use place_types::{Payload, Player, RoomUpdate, RosterEntry};

use crate::ports::GamePresenter;

/// Whether the lobby is still mutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    Open,
    /// Quorum was reached and the roster went to a battle session; no
    /// further room mutations are accepted.
    HandedOff,
}

/// Pre-game waiting room. The roster is synchronized by repeated message
/// round-trips: every local mutation produces a broadcast payload, every
/// inbound update mutates the roster. Once the local player has joined,
/// exactly one roster entry carries the local id.
pub struct BattleRoom {
    players: Vec<Player>,
    local_player_id: String,
    max_players: usize,
    phase: RoomPhase,
}

impl BattleRoom {
    /// Open a fresh room containing only the local player, not ready.
    pub fn create(local_name: &str, max_players: usize) -> Self {
        let local = Player::local(local_name);
        Self {
            local_player_id: local.id.clone(),
            players: vec![local],
            max_players,
            phase: RoomPhase::Open,
        }
    }

    /// Join a room advertised by an inbound invite roster. The remote
    /// roster is adopted verbatim; if we are not in it yet and a seat is
    /// free we append ourselves and announce the join. A full room is
    /// adopted as-is without seating the local player.
    pub fn join(
        local_name: &str,
        roster: &[RosterEntry],
        max_players: usize,
        presenter: &mut dyn GamePresenter,
    ) -> (Self, Option<Payload>) {
        let mut players: Vec<Player> = roster
            .iter()
            .take(max_players)
            .map(|entry| Player::from_roster(&entry.id, &entry.name, entry.is_ready))
            .collect();

        let local = Player::local(local_name);
        let local_player_id = local.id.clone();

        let broadcast = if players.iter().any(|p| p.id == local_player_id) {
            // Our own earlier join echoed back; the remote roster is
            // authoritative and already includes us.
            None
        } else if players.len() >= max_players {
            warn!(players = players.len(), "room full, local player not seated");
            None
        } else {
            let update = RoomUpdate::PlayerJoin {
                player_id: local.id.clone(),
                name: local.name.clone(),
                is_ready: false,
            };
            players.push(local);
            Some(Payload::RoomUpdate(update))
        };

        info!(players = players.len(), "joined battle waiting room");
        let room = Self {
            players,
            local_player_id,
            max_players,
            phase: RoomPhase::Open,
        };
        presenter.show_roster(&room.players);
        (room, broadcast)
    }

    pub fn phase(&self) -> RoomPhase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn local_player_id(&self) -> &str {
        &self.local_player_id
    }

    /// Invite payload carrying the full roster, for bringing a new device
    /// into the room.
    pub fn invite_payload(&self) -> Payload {
        Payload::BattleInvite {
            roster: self
                .players
                .iter()
                .map(|p| RosterEntry {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    is_ready: p.is_ready,
                })
                .collect(),
        }
    }

    /// Flip the local ready flag and broadcast it.
    pub fn toggle_ready(
        &mut self,
        is_ready: bool,
        presenter: &mut dyn GamePresenter,
    ) -> Option<Payload> {
        if self.phase == RoomPhase::HandedOff {
            warn!("ready toggle after handoff ignored");
            return None;
        }
        let id = self.local_player_id.clone();
        self.set_ready(&id, is_ready);
        presenter.show_roster(&self.players);
        Some(Payload::RoomUpdate(RoomUpdate::PlayerReady {
            player_id: id,
            is_ready,
        }))
    }

    /// Rename the local player and broadcast it.
    pub fn rename(&mut self, name: &str, presenter: &mut dyn GamePresenter) -> Option<Payload> {
        if self.phase == RoomPhase::HandedOff {
            return None;
        }
        let id = self.local_player_id.clone();
        if let Some(player) = self.players.iter_mut().find(|p| p.id == id) {
            player.name = name.to_string();
        }
        presenter.show_roster(&self.players);
        Some(Payload::RoomUpdate(RoomUpdate::PlayerName {
            player_id: id,
            name: name.to_string(),
        }))
    }

    /// Apply an inbound room update. Updates for unknown ids and unknown
    /// kinds are dropped; the roster never grows past `max_players`.
    pub fn receive_update(&mut self, update: &RoomUpdate, presenter: &mut dyn GamePresenter) {
        if self.phase == RoomPhase::HandedOff {
            warn!("room update after handoff ignored");
            return;
        }
        match update {
            RoomUpdate::PlayerReady {
                player_id,
                is_ready,
            } => {
                if !self.set_ready(player_id, *is_ready) {
                    warn!(%player_id, "ready update for unknown player dropped");
                }
            }
            RoomUpdate::PlayerName { player_id, name } => {
                match self.players.iter_mut().find(|p| &p.id == player_id) {
                    Some(player) => player.name = name.clone(),
                    None => warn!(%player_id, "rename for unknown player dropped"),
                }
            }
            RoomUpdate::PlayerJoin {
                player_id,
                name,
                is_ready,
            } => {
                if self.players.iter().any(|p| &p.id == player_id) {
                    // Duplicate join; roster already has them.
                } else if self.players.len() >= self.max_players {
                    warn!(%player_id, "room full, join dropped");
                } else {
                    info!(%player_id, %name, "player joined room");
                    self.players
                        .push(Player::from_roster(player_id, name, *is_ready));
                }
            }
            RoomUpdate::PlayerLeave { player_id } => {
                let before = self.players.len();
                self.players.retain(|p| &p.id != player_id);
                if self.players.len() == before {
                    warn!(%player_id, "leave for unknown player dropped");
                }
            }
        }
        presenter.show_roster(&self.players);
    }

    /// Remove the local player and produce the leave broadcast.
    pub fn leave(&mut self) -> Payload {
        let id = self.local_player_id.clone();
        self.players.retain(|p| p.id != id);
        info!("left battle waiting room");
        Payload::RoomUpdate(RoomUpdate::PlayerLeave { player_id: id })
    }

    /// Quorum rule: at least two players and every one of them ready.
    pub fn quorum_met(&self) -> bool {
        self.players.len() >= 2 && self.players.iter().all(|p| p.is_ready)
    }

    /// Close the room and take the roster for the battle session. Call only
    /// after `quorum_met`.
    pub fn hand_off(&mut self) -> Vec<Player> {
        self.phase = RoomPhase::HandedOff;
        info!(players = self.players.len(), "room quorum met, starting battle");
        self.players.clone()
    }

    fn set_ready(&mut self, player_id: &str, is_ready: bool) -> bool {
        match self.players.iter_mut().find(|p| p.id == player_id) {
            Some(player) => {
                player.is_ready = is_ready;
                true
            }
            None => false,
        }
    }
}
