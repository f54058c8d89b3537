use std::env;

use place_core::GameRules;

/// Host-side configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub classic_time_limit_seconds: u32,
    pub battle_time_limit_seconds: u32,
    pub max_battle_players: usize,
    pub settings_path: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            classic_time_limit_seconds: env::var("CLASSIC_TIME_LIMIT_SECONDS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .expect("Invalid CLASSIC_TIME_LIMIT_SECONDS"),
            battle_time_limit_seconds: env::var("BATTLE_TIME_LIMIT_SECONDS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("Invalid BATTLE_TIME_LIMIT_SECONDS"),
            max_battle_players: env::var("MAX_BATTLE_PLAYERS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("Invalid MAX_BATTLE_PLAYERS"),
            settings_path: env::var("SETTINGS_PATH")
                .unwrap_or_else(|_| "place_settings.json".to_string()),
        }
    }

    pub fn rules(&self) -> GameRules {
        GameRules {
            classic_time_limit: self.classic_time_limit_seconds,
            battle_time_limit: self.battle_time_limit_seconds,
            max_battle_players: self.max_battle_players,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
