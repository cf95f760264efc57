//! Default configuration values (NBA 2K25, Patch 4)

use crate::resolver::PointerChain;

pub const DEFAULT_PROCESS_NAME: &str = "NBA2K25.exe";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Static player table RVA, tried after every chain
pub const DEFAULT_PLAYER_STATIC_RVA: u64 = 0x07E5_2998;

/// Player table chains, most recent build first
pub fn default_player_chains() -> Vec<PointerChain> {
    vec![
        PointerChain::new(0x07E3_9430, 0x18, true),
        PointerChain::new(0x06E1_4E48, 0x148, false),
        PointerChain::new(0x07E5_2998, 0x0, false),
        PointerChain::new(0x07E5_DD88, 0x0, false),
    ]
}

/// Team table chains, most recent build first
pub fn default_team_chains() -> Vec<PointerChain> {
    vec![
        PointerChain::new(0x07E3_9430, 0x88, true),
        PointerChain::new(0x07E3_9430, 0x0, false),
        PointerChain::new(0x07DF_FAC0, 0x0, false),
    ]
}
