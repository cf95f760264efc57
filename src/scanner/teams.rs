//! Team table scan

use super::heuristics::{compose_label, dedupe_labels, is_plausible_label};
use super::layout::{PlayerLayout, TeamLayout};
use super::players::read_player;
use super::ScanOutcome;
use crate::codec::extract_bits;
use crate::core::types::{Address, MemoryResult, Player, Team, UNKNOWN_TEAM};
use crate::memory::{ForeignMemory, MemoryReadExt};
use tracing::{debug, info, trace, warn};

fn read_era(memory: &dyn ForeignMemory, team: Address, layout: &TeamLayout) -> MemoryResult<u8> {
    let span = layout.era_span();
    let bytes = memory.read_bytes(team.offset(span.offset), span.byte_len())?;
    Ok(extract_bits(&bytes, span.start_bit, span.width) as u8)
}

fn read_roster_type(
    memory: &dyn ForeignMemory,
    team: Address,
    layout: &TeamLayout,
) -> MemoryResult<u8> {
    let span = layout.type_span();
    let bytes = memory.read_bytes(team.offset(span.offset), span.byte_len())?;
    Ok(extract_bits(&bytes, span.start_bit, span.width) as u8)
}

/// Transient faults read as 0; fatal ones propagate
fn zero_on_fault(result: MemoryResult<u8>) -> MemoryResult<u8> {
    match result {
        Err(e) if e.is_fatal() => Err(e),
        Err(_) => Ok(0),
        ok => ok,
    }
}

/// Display label for the team record at `team`.
///
/// Yields "Unknown" when the composed label is not plausible. Read errors
/// on the name are returned so callers can tell faults from noise; an
/// unreadable era counts as no era.
pub fn compose_team_label(
    memory: &dyn ForeignMemory,
    team: Address,
    layout: &TeamLayout,
) -> MemoryResult<String> {
    let name = memory.read_wide_string(team.offset(layout.name_offset), layout.name_max_chars)?;
    let era = match read_era(memory, team, layout) {
        Ok(era) => era,
        Err(e) if e.is_fatal() => return Err(e),
        Err(_) => 0,
    };
    let label = compose_label(&name, era);
    Ok(if is_plausible_label(&label) {
        label
    } else {
        UNKNOWN_TEAM.to_string()
    })
}

/// Non-null player pointers at the start of a team record
pub fn read_roster(
    memory: &dyn ForeignMemory,
    team: Address,
    layout: &TeamLayout,
) -> MemoryResult<Vec<Address>> {
    let bytes = memory.read_bytes(team, layout.roster_slots * 8)?;
    Ok(bytes
        .chunks_exact(8)
        .filter_map(|chunk| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(chunk);
            let ptr = Address::new(u64::from_le_bytes(raw));
            (!ptr.is_null()).then_some(ptr)
        })
        .collect())
}

/// Scans up to `max_count` team slots starting at `base`
pub fn scan_teams(
    memory: &dyn ForeignMemory,
    base: Address,
    layout: &TeamLayout,
    max_count: u32,
) -> ScanOutcome<Vec<Team>> {
    let mut teams = Vec::new();

    for slot in 0..max_count {
        let record = layout.record(base, slot);
        let name = match memory.read_wide_string(record.offset(layout.name_offset), layout.name_max_chars)
        {
            Ok(name) => name.trim().to_string(),
            Err(e) if e.is_fatal() => {
                warn!("Team scan aborted at slot {}: {}", slot, e);
                return ScanOutcome::Aborted(e);
            }
            Err(e) => {
                trace!("Skipping team slot {}: {}", slot, e);
                continue;
            }
        };

        let roster_type = match zero_on_fault(read_roster_type(memory, record, layout)) {
            Ok(v) => v,
            Err(e) => return ScanOutcome::Aborted(e),
        };
        let era = match zero_on_fault(read_era(memory, record, layout)) {
            Ok(v) => v,
            Err(e) => return ScanOutcome::Aborted(e),
        };

        let label = compose_label(&name, era);
        if !is_plausible_label(&label) {
            trace!("Team slot {} rejected: {:?}", slot, label);
            continue;
        }

        let roster = match read_roster(memory, record, layout) {
            Ok(roster) => roster,
            Err(e) if e.is_fatal() => return ScanOutcome::Aborted(e),
            Err(e) => {
                debug!("Team slot {} roster unreadable: {}", slot, e);
                Vec::new()
            }
        };

        teams.push(Team {
            slot,
            address: record,
            name,
            label,
            roster_type,
            era,
            roster,
        });
    }

    let mut labels: Vec<(u32, String)> = teams.iter().map(|t| (t.slot, t.label.clone())).collect();
    dedupe_labels(&mut labels);
    for (team, (_, label)) in teams.iter_mut().zip(labels) {
        team.label = label;
    }

    info!("Scanned {} teams from {}", teams.len(), base);
    ScanOutcome::Complete(teams)
}

/// Decodes the players a team's roster pointers refer to.
///
/// Pointers that do not land on a record of the player table at
/// `player_base` are skipped, as are unreadable and blank records.
pub fn scan_team_roster(
    memory: &dyn ForeignMemory,
    team: &Team,
    player_base: Address,
    layout: &PlayerLayout,
) -> MemoryResult<Vec<Player>> {
    let mut players = Vec::new();
    for &ptr in &team.roster {
        let Some(slot) = layout.slot_of(player_base, ptr) else {
            debug!("Roster pointer {} of {} is outside the player table", ptr, team.label);
            continue;
        };
        match read_player(memory, ptr, slot, layout) {
            Ok(Some(mut player)) => {
                player.team_ptr = team.address;
                player.team = team.label.clone();
                players.push(player);
            }
            Ok(None) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => debug!("Roster player at {} unreadable: {}", ptr, e),
        }
    }
    Ok(players)
}
