use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fallback display name when the local player has not set one.
pub const DEFAULT_PLAYER_NAME: &str = "You";

/// One participant in a room or battle session.
///
/// The id is the only field that is stable across peers: locally created
/// players get a fresh UUID string, players parsed from an inbound roster
/// keep whatever slot id the sender assigned (e.g. "player1").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub score: u32,
    pub is_active: bool,
    pub is_ready: bool,
}

impl Player {
    /// Create a locally owned player with a fresh id.
    pub fn local(name: &str) -> Self {
        let name = if name.trim().is_empty() {
            DEFAULT_PLAYER_NAME
        } else {
            name
        };
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            score: 0,
            is_active: false,
            is_ready: false,
        }
    }

    /// Create a player from fields carried in a roster payload.
    pub fn from_roster(id: &str, name: &str, is_ready: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            score: 0,
            is_active: false,
            is_ready,
        }
    }
}
