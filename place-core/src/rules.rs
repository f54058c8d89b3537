/// Timing and sizing knobs for both modes. Limits vary widely across the
/// game's history, so they are configuration rather than literals; the host
/// builds this from its environment.
#[derive(Debug, Clone)]
pub struct GameRules {
    /// Whole-turn countdown for a classic run, in seconds.
    pub classic_time_limit: u32,
    /// Per-player turn countdown in battle mode, in seconds.
    pub battle_time_limit: u32,
    /// Most players a battle roster will accept.
    pub max_battle_players: usize,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            classic_time_limit: 20,
            battle_time_limit: 30,
            max_battle_players: place_types::MAX_ROSTER_SLOTS,
        }
    }
}
