//! Player table scan

use super::heuristics::JunkTally;
use super::layout::{PlayerLayout, TeamLayout};
use super::teams::compose_team_label;
use super::ScanOutcome;
use crate::core::types::{Address, MemoryResult, Player, Slot, FREE_AGENTS, UNKNOWN_TEAM};
use crate::memory::{ForeignMemory, MemoryReadExt};
use std::collections::HashMap;
use tracing::{debug, info, trace, warn};

/// Decodes the identity fields of one player record.
///
/// Returns `Ok(None)` for a blank slot. The team label is left empty.
pub fn read_player(
    memory: &dyn ForeignMemory,
    record: Address,
    slot: Slot,
    layout: &PlayerLayout,
) -> MemoryResult<Option<Player>> {
    let last_name = memory
        .read_wide_string(record.offset(layout.last_name_offset), layout.name_max_chars)?
        .trim()
        .to_string();
    let first_name = memory
        .read_wide_string(record.offset(layout.first_name_offset), layout.name_max_chars)?
        .trim()
        .to_string();
    if first_name.is_empty() && last_name.is_empty() {
        return Ok(None);
    }
    let face_id = memory.read_u32(record.offset(layout.face_id_offset))?;

    Ok(Some(Player {
        slot,
        first_name,
        last_name,
        face_id,
        team_ptr: Address::null(),
        team: String::new(),
    }))
}

/// Scans up to `max_count` player slots starting at `base`
pub fn scan_players(
    memory: &dyn ForeignMemory,
    base: Address,
    layout: &PlayerLayout,
    team_layout: &TeamLayout,
    max_count: u32,
) -> ScanOutcome<Vec<Player>> {
    let mut players = Vec::new();
    let mut tally = JunkTally::default();
    let mut labels: HashMap<Address, String> = HashMap::new();

    for slot in 0..max_count {
        let record = layout.record(base, slot);
        let mut player = match read_player(memory, record, slot, layout) {
            Ok(Some(player)) => player,
            Ok(None) => continue,
            Err(e) if e.is_fatal() => {
                warn!("Player scan aborted at slot {}: {}", slot, e);
                return ScanOutcome::Aborted(e);
            }
            Err(e) => {
                trace!("Skipping player slot {}: {}", slot, e);
                continue;
            }
        };

        tally.add(&player.first_name);
        tally.add(&player.last_name);

        match memory.read_ptr(record.offset(layout.team_ptr_offset)) {
            Ok(ptr) if ptr.is_null() => player.team = FREE_AGENTS.to_string(),
            Ok(ptr) => {
                player.team_ptr = ptr;
                player.team = match labels.get(&ptr) {
                    Some(label) => label.clone(),
                    None => {
                        let label = match compose_team_label(memory, ptr, team_layout) {
                            Ok(label) => label,
                            Err(e) if e.is_fatal() => return ScanOutcome::Aborted(e),
                            Err(e) => {
                                debug!("Team pointer {} unreadable: {}", ptr, e);
                                UNKNOWN_TEAM.to_string()
                            }
                        };
                        labels.insert(ptr, label.clone());
                        label
                    }
                };
            }
            Err(e) if e.is_fatal() => return ScanOutcome::Aborted(e),
            Err(_) => player.team = UNKNOWN_TEAM.to_string(),
        }

        players.push(player);
    }

    if tally.is_mostly_junk() {
        let reason = format!(
            "{} of {} name characters outside the expected set",
            tally.junk, tally.total
        );
        warn!("Rejecting player scan at {}: {}", base, reason);
        return ScanOutcome::Rejected(reason);
    }

    info!("Scanned {} players from {}", players.len(), base);
    ScanOutcome::Complete(players)
}
