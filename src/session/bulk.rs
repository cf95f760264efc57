//! Whole-team operations
//!
//! Both operations act on the players the current snapshot lists under the
//! selected labels. Neither refreshes; the snapshot is stale afterwards.

use super::{RosterSession, RosterSnapshot};
use crate::accessor::{BatchReport, EntitySelector, RandomizePlan};
use crate::core::types::{MemoryError, MemoryResult, Slot, Team};
use crate::memory::ForeignMemory;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Players handed back to each team by a shuffle
pub const SHUFFLE_ROSTER_SIZE: usize = 15;

/// Tally of one team shuffle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffleReport {
    /// Players taken from the selected teams
    pub pooled: usize,
    /// Players written back onto a selected team
    pub reassigned: usize,
    /// Pointer writes that failed
    pub failed: usize,
}

impl ShuffleReport {
    /// Pooled players not handed back to a team
    pub fn left_as_free_agents(&self) -> usize {
        self.pooled - self.reassigned
    }
}

impl<M: ForeignMemory> RosterSession<M> {
    /// Pools the players of the selected teams, shuffles them and deals up
    /// to [`SHUFFLE_ROSTER_SIZE`] back to each team in selection order.
    ///
    /// Every pooled player is first pointed at the free-agent team, so
    /// whoever is not dealt back stays a free agent. Needs a scanned team
    /// table containing a free-agent team; labels without a team record are
    /// pooled but receive no players.
    pub fn shuffle_teams<R: Rng + ?Sized>(
        &self,
        labels: &[String],
        rng: &mut R,
    ) -> MemoryResult<ShuffleReport> {
        let accessor = self.player_accessor()?;
        let snapshot = self.snapshot();
        if snapshot.team_base.is_none() || snapshot.teams.is_empty() {
            return Err(MemoryError::table_unresolved(self.teams.table()));
        }
        let free_agents = find_free_agents(&snapshot.teams)
            .ok_or_else(|| MemoryError::EntityNotFound("free agent team".to_string()))?;

        let mut pool = team_members(&snapshot, labels);

        let targets: Vec<&Team> = labels
            .iter()
            .filter_map(|label| {
                let team = snapshot.team(label);
                if team.is_none() {
                    debug!("No team record for {:?}; it receives no players", label);
                }
                team
            })
            .collect();

        let team_ptr_offset = self.config.players.layout.team_ptr_offset;
        let mut report = ShuffleReport {
            pooled: pool.len(),
            ..Default::default()
        };

        for &slot in &pool {
            if let Err(e) = accessor.set_ptr(slot, team_ptr_offset, free_agents.address) {
                if e.is_fatal() {
                    return Err(e);
                }
                warn!("Failed to release slot {} to free agency: {}", slot, e);
                report.failed += 1;
            }
        }

        pool.shuffle(rng);
        let mut dealt = pool.into_iter();
        for team in targets {
            for slot in dealt.by_ref().take(SHUFFLE_ROSTER_SIZE) {
                match accessor.set_ptr(slot, team_ptr_offset, team.address) {
                    Ok(()) => report.reassigned += 1,
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => {
                        warn!("Failed to move slot {} to {}: {}", slot, team.label, e);
                        report.failed += 1;
                    }
                }
            }
        }

        info!(
            "Shuffled {} players across {} teams: {} reassigned, {} left as free agents",
            report.pooled,
            labels.len(),
            report.reassigned,
            report.left_as_free_agents()
        );
        Ok(report)
    }

    /// Writes a fresh random value from `plan` into every planned field of
    /// every player on the selected teams
    pub fn randomize_teams<R: Rng + ?Sized>(
        &self,
        labels: &[String],
        plan: &RandomizePlan,
        rng: &mut R,
    ) -> MemoryResult<BatchReport> {
        let slots = team_members(&self.snapshot(), labels);
        let edits = plan.edits(&slots, rng);
        debug!(
            "Randomizing {} fields for {} players",
            plan.fields().len(),
            slots.len()
        );
        self.apply_batch(&edits)
    }
}

/// Distinct member slots of the labelled teams, ascending
fn team_members(snapshot: &RosterSnapshot, labels: &[String]) -> Vec<Slot> {
    let mut slots: Vec<Slot> = labels
        .iter()
        .flat_map(|label| snapshot.select(&EntitySelector::Team(label.clone())))
        .collect();
    slots.sort_unstable();
    slots.dedup();
    slots
}

fn find_free_agents(teams: &[Team]) -> Option<&Team> {
    teams
        .iter()
        .find(|t| t.name.to_lowercase().contains("free"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Address;

    fn team(slot: u32, name: &str) -> Team {
        Team {
            slot,
            address: Address::new(0x3000_0000 + slot as u64 * 0x5A0),
            name: name.to_string(),
            label: name.to_string(),
            roster_type: 0,
            era: 0,
            roster: Vec::new(),
        }
    }

    #[test]
    fn test_find_free_agents() {
        let teams = vec![team(0, "Lakers"), team(29, "FREE AGENTS"), team(30, "Free Agents")];
        assert_eq!(find_free_agents(&teams).map(|t| t.slot), Some(29));
        assert!(find_free_agents(&teams[..1]).is_none());
    }

    #[test]
    fn test_report_tally() {
        let report = ShuffleReport {
            pooled: 20,
            reassigned: 15,
            failed: 0,
        };
        assert_eq!(report.left_as_free_agents(), 5);
    }
}
