//! Plausibility checks for candidate table bases

use crate::core::types::Address;
use crate::memory::{ForeignMemory, MemoryReadExt};
use crate::scanner::heuristics::is_plausible_label;
use crate::scanner::{PlayerLayout, TeamLayout};

/// Slot 0 must carry a non-blank first or last name
pub fn validate_player_table(
    memory: &dyn ForeignMemory,
    candidate: Address,
    layout: &PlayerLayout,
) -> bool {
    let read = |offset: u64| {
        memory
            .read_wide_string(candidate.offset(offset), layout.name_max_chars)
            .map(|s| !s.trim().is_empty())
    };
    match (read(layout.last_name_offset), read(layout.first_name_offset)) {
        (Ok(last), Ok(first)) => last || first,
        _ => false,
    }
}

/// Slot 0's name must be non-empty, printable and contain two letters
pub fn validate_team_table(
    memory: &dyn ForeignMemory,
    candidate: Address,
    layout: &TeamLayout,
) -> bool {
    memory
        .read_wide_string(candidate.offset(layout.name_offset), layout.name_max_chars)
        .map(|name| is_plausible_label(&name))
        .unwrap_or(false)
}
