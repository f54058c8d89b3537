use serde::{Deserialize, Serialize};

use crate::errors::PayloadError;

/// Maximum number of indexed roster slots scanned in a battle invite.
pub const MAX_ROSTER_SLOTS: usize = 10;

/// One `player<N>id` / `player<N>name` / `player<N>ready` triple from a
/// battle invite payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    pub is_ready: bool,
}

/// A single waiting-room mutation, addressed by player id.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomUpdate {
    PlayerReady { player_id: String, is_ready: bool },
    PlayerName { player_id: String, name: String },
    PlayerJoin { player_id: String, name: String, is_ready: bool },
    PlayerLeave { player_id: String },
}

/// Mirrored battle-session traffic, used when a running battle is being
/// reflected across devices outside the room-join handshake.
#[derive(Debug, Clone, PartialEq)]
pub enum BattleSync {
    Guess { word: String, player_index: usize },
    TurnUpdate { active_player_index: usize },
    ScoreUpdate { player_index: usize, score: u32 },
}

/// Classic-mode snapshot carried in a message. A fresh invite has
/// `completed == false`; the closing result sets it. Absent keys decode to
/// `None` rather than failing the message.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassicPayload {
    pub score: Option<u32>,
    pub letter: Option<char>,
    pub completed: bool,
}

impl ClassicPayload {
    /// Invite opening a brand-new game: a starting letter for the recipient
    /// and no score key, so the recipient knows no turn has been played yet.
    pub fn open_invite(letter: char) -> Self {
        Self {
            score: None,
            letter: Some(letter),
            completed: false,
        }
    }

    pub fn invite(score: u32, letter: char) -> Self {
        Self {
            score: Some(score),
            letter: Some(letter),
            completed: false,
        }
    }

    pub fn result(score: u32, letter: char) -> Self {
        Self {
            score: Some(score),
            letter: Some(letter),
            completed: true,
        }
    }
}

/// Every message class that can ride on a conversation message. The wire
/// form is a flat `key=value&key=value` query string.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Classic(ClassicPayload),
    BattleInvite { roster: Vec<RosterEntry> },
    RoomUpdate(RoomUpdate),
    BattleSync(BattleSync),
}

impl Payload {
    /// Serialize to the wire query string. Key order is fixed per message
    /// class so the same logical state always produces the same bytes.
    pub fn encode(&self) -> String {
        let mut pairs: Vec<(String, String)> = Vec::new();
        match self {
            Payload::Classic(classic) => {
                pairs.push(("mode".into(), "classic".into()));
                if let Some(score) = classic.score {
                    pairs.push(("score".into(), score.to_string()));
                }
                if let Some(letter) = classic.letter {
                    pairs.push(("letter".into(), letter.to_string()));
                }
                if classic.completed {
                    pairs.push(("completed".into(), "true".into()));
                }
            }
            Payload::BattleInvite { roster } => {
                pairs.push(("mode".into(), "battle".into()));
                for (i, entry) in roster.iter().take(MAX_ROSTER_SLOTS).enumerate() {
                    let n = i + 1;
                    pairs.push((format!("player{n}id"), entry.id.clone()));
                    pairs.push((format!("player{n}name"), entry.name.clone()));
                    pairs.push((format!("player{n}ready"), entry.is_ready.to_string()));
                }
            }
            Payload::RoomUpdate(update) => {
                pairs.push(("mode".into(), "battle".into()));
                match update {
                    RoomUpdate::PlayerReady {
                        player_id,
                        is_ready,
                    } => {
                        pairs.push(("type".into(), "playerReady".into()));
                        pairs.push(("playerId".into(), player_id.clone()));
                        pairs.push(("isReady".into(), is_ready.to_string()));
                    }
                    RoomUpdate::PlayerName { player_id, name } => {
                        pairs.push(("type".into(), "playerName".into()));
                        pairs.push(("playerId".into(), player_id.clone()));
                        pairs.push(("name".into(), name.clone()));
                    }
                    RoomUpdate::PlayerJoin {
                        player_id,
                        name,
                        is_ready,
                    } => {
                        pairs.push(("type".into(), "playerJoin".into()));
                        pairs.push(("playerId".into(), player_id.clone()));
                        pairs.push(("name".into(), name.clone()));
                        pairs.push(("isReady".into(), is_ready.to_string()));
                    }
                    RoomUpdate::PlayerLeave { player_id } => {
                        pairs.push(("type".into(), "playerLeave".into()));
                        pairs.push(("playerId".into(), player_id.clone()));
                    }
                }
            }
            Payload::BattleSync(sync) => {
                pairs.push(("mode".into(), "battle".into()));
                match sync {
                    BattleSync::Guess { word, player_index } => {
                        pairs.push(("type".into(), "guess".into()));
                        pairs.push(("guess".into(), word.clone()));
                        pairs.push(("playerIndex".into(), player_index.to_string()));
                    }
                    BattleSync::TurnUpdate {
                        active_player_index,
                    } => {
                        pairs.push(("type".into(), "turnUpdate".into()));
                        pairs.push((
                            "activePlayerIndex".into(),
                            active_player_index.to_string(),
                        ));
                    }
                    BattleSync::ScoreUpdate {
                        player_index,
                        score,
                    } => {
                        pairs.push(("type".into(), "scoreUpdate".into()));
                        pairs.push(("playerIndex".into(), player_index.to_string()));
                        pairs.push(("score".into(), score.to_string()));
                    }
                }
            }
        }

        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", escape(k), escape(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Parse the wire query string back into a typed payload.
    ///
    /// Tolerance rules: unknown keys are skipped, missing keys become
    /// defaults, values that fail numeric parse count as absent. A payload
    /// that cannot be classified at all (no mode, unknown battle type) comes
    /// back as an error so the caller can log and drop it; nothing panics.
    pub fn decode(raw: &str) -> Result<Payload, PayloadError> {
        let fields = Fields::parse(raw);

        match fields.get("mode") {
            Some("classic") => Ok(Payload::Classic(ClassicPayload {
                score: fields.get_u32("score"),
                letter: fields.get_letter("letter"),
                completed: fields.get_bool("completed"),
            })),
            Some("battle") => decode_battle(&fields),
            _ => Err(PayloadError::MissingMode),
        }
    }
}

fn decode_battle(fields: &Fields) -> Result<Payload, PayloadError> {
    let Some(kind) = fields.get("type") else {
        // No sub-action: this is a roster invite.
        let roster = decode_roster(fields);
        if roster.is_empty() {
            return Err(PayloadError::MissingField("player1name"));
        }
        return Ok(Payload::BattleInvite { roster });
    };

    let player_id = || {
        fields
            .get("playerId")
            .map(str::to_string)
            .ok_or(PayloadError::MissingField("playerId"))
    };

    match kind {
        "playerReady" => Ok(Payload::RoomUpdate(RoomUpdate::PlayerReady {
            player_id: player_id()?,
            is_ready: fields.get_bool("isReady"),
        })),
        "playerName" => Ok(Payload::RoomUpdate(RoomUpdate::PlayerName {
            player_id: player_id()?,
            name: fields
                .get("name")
                .map(str::to_string)
                .ok_or(PayloadError::MissingField("name"))?,
        })),
        "playerJoin" => Ok(Payload::RoomUpdate(RoomUpdate::PlayerJoin {
            player_id: player_id()?,
            name: fields.get("name").unwrap_or_default().to_string(),
            is_ready: fields.get_bool("isReady"),
        })),
        "playerLeave" => Ok(Payload::RoomUpdate(RoomUpdate::PlayerLeave {
            player_id: player_id()?,
        })),
        "guess" => Ok(Payload::BattleSync(BattleSync::Guess {
            word: fields
                .get("guess")
                .map(str::to_string)
                .ok_or(PayloadError::MissingField("guess"))?,
            player_index: fields
                .get_usize("playerIndex")
                .ok_or(PayloadError::MissingField("playerIndex"))?,
        })),
        "turnUpdate" => Ok(Payload::BattleSync(BattleSync::TurnUpdate {
            active_player_index: fields
                .get_usize("activePlayerIndex")
                .ok_or(PayloadError::MissingField("activePlayerIndex"))?,
        })),
        "scoreUpdate" => Ok(Payload::BattleSync(BattleSync::ScoreUpdate {
            player_index: fields
                .get_usize("playerIndex")
                .ok_or(PayloadError::MissingField("playerIndex"))?,
            score: fields
                .get_u32("score")
                .ok_or(PayloadError::MissingField("score"))?,
        })),
        other => Err(PayloadError::UnknownUpdateType(other.to_string())),
    }
}

fn decode_roster(fields: &Fields) -> Vec<RosterEntry> {
    let mut roster = Vec::new();
    for n in 1..=MAX_ROSTER_SLOTS {
        let Some(name) = fields.get(&format!("player{n}name")) else {
            continue;
        };
        let Some(ready) = fields.get(&format!("player{n}ready")) else {
            continue;
        };
        // Senders that predate explicit ids only carry name/ready; fall back
        // to the slot id the way the original roster parser did.
        let id = fields
            .get(&format!("player{n}id"))
            .map(str::to_string)
            .unwrap_or_else(|| format!("player{n}"));
        roster.push(RosterEntry {
            id,
            name: name.to_string(),
            is_ready: ready == "true",
        });
    }
    roster
}

/// Parsed key/value pairs with typed accessors. First occurrence of a key
/// wins; later duplicates are ignored.
struct Fields {
    pairs: Vec<(String, String)>,
}

impl Fields {
    fn parse(raw: &str) -> Self {
        let pairs = raw
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| match part.split_once('=') {
                Some((k, v)) => (unescape(k), unescape(v)),
                None => (unescape(part), String::new()),
            })
            .collect();
        Self { pairs }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    fn get_bool(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }

    fn get_letter(&self, key: &str) -> Option<char> {
        self.get(key)
            .and_then(|v| v.chars().next())
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_uppercase())
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn unescape(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap_or("");
                if let Ok(byte) = u8::from_str_radix(hex, 16) {
                    out.push(byte);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
