//! Entity index
//!
//! Read-only lookups built from one scan: player name to slots and team
//! address to member slots. When the team table cannot be resolved, teams
//! are derived from the players' own team pointers instead.

mod fallback;

pub use fallback::{derive_teams_from_players, sorted_team_labels};
pub use crate::scanner::compose_team_label;

use crate::core::types::{name_key, Address, Player, Slot, Team};
use crate::scanner::PlayerLayout;
use std::collections::{BTreeSet, HashMap};

/// Name and team lookups over one snapshot
#[derive(Debug, Clone, Default)]
pub struct EntityIndex {
    by_name: HashMap<String, Vec<Slot>>,
    by_team: HashMap<Address, Vec<Slot>>,
}

impl EntityIndex {
    /// Builds the index.
    ///
    /// Team membership is the union of the team's roster pointers that land
    /// on a player record and the players whose team pointer is the team.
    pub fn build(
        players: &[Player],
        teams: &[Team],
        player_base: Option<Address>,
        layout: &PlayerLayout,
    ) -> Self {
        let mut by_name: HashMap<String, Vec<Slot>> = HashMap::new();
        for player in players.iter().filter(|p| !p.is_blank()) {
            by_name
                .entry(player.name_key())
                .or_default()
                .push(player.slot);
        }

        let mut members: HashMap<Address, BTreeSet<Slot>> = HashMap::new();
        for team in teams {
            let set = members.entry(team.address).or_default();
            if let Some(base) = player_base {
                set.extend(team.roster.iter().filter_map(|&ptr| layout.slot_of(base, ptr)));
            }
        }
        for player in players.iter().filter(|p| !p.team_ptr.is_null()) {
            if let Some(set) = members.get_mut(&player.team_ptr) {
                set.insert(player.slot);
            }
        }

        EntityIndex {
            by_name,
            by_team: members
                .into_iter()
                .map(|(address, slots)| (address, slots.into_iter().collect()))
                .collect(),
        }
    }

    /// Slots whose "first last" name matches, case-insensitively.
    ///
    /// The first whitespace-separated token is the first name and the rest
    /// is the last name.
    pub fn lookup_by_name(&self, full_name: &str) -> Vec<Slot> {
        let mut parts = full_name.split_whitespace();
        let Some(first) = parts.next() else {
            return Vec::new();
        };
        let last = parts.collect::<Vec<_>>().join(" ");
        self.by_name
            .get(&name_key(first, &last))
            .cloned()
            .unwrap_or_default()
    }

    /// Member slots of the team at `team`, ascending
    pub fn slots_for_team(&self, team: Address) -> Vec<Slot> {
        self.by_team.get(&team).cloned().unwrap_or_default()
    }

    pub fn name_count(&self) -> usize {
        self.by_name.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FREE_AGENTS;

    const PLAYER_BASE: Address = Address::new(0x10_0000);
    const TEAM: Address = Address::new(0x90_0000);

    fn player(slot: u32, first: &str, last: &str, team_ptr: Address) -> Player {
        Player {
            slot,
            first_name: first.to_string(),
            last_name: last.to_string(),
            face_id: 0,
            team_ptr,
            team: FREE_AGENTS.to_string(),
        }
    }

    fn team(roster: Vec<Address>) -> Team {
        Team {
            slot: 0,
            address: TEAM,
            name: "Knicks".to_string(),
            label: "Knicks".to_string(),
            roster_type: 0,
            era: 0,
            roster,
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let players = vec![
            player(0, "Gary", "Payton II", Address::null()),
            player(4, "Gary", "Payton", Address::null()),
            player(9, "gary", "payton", Address::null()),
            player(11, "", "", Address::null()),
        ];
        let index = EntityIndex::build(&players, &[], None, &PlayerLayout::default());

        assert_eq!(index.lookup_by_name("GARY PAYTON"), vec![4, 9]);
        assert_eq!(index.lookup_by_name("Gary  Payton   II"), vec![0]);
        assert!(index.lookup_by_name("Nobody Here").is_empty());
        assert!(index.lookup_by_name("   ").is_empty());
        assert_eq!(index.name_count(), 2);
    }

    #[test]
    fn test_team_membership_union() {
        let layout = PlayerLayout::default();
        let players = vec![
            player(0, "A", "One", TEAM),
            player(1, "B", "Two", Address::null()),
            player(2, "C", "Three", TEAM),
        ];
        let roster = vec![
            layout.record(PLAYER_BASE, 1),
            layout.record(PLAYER_BASE, 2),
            PLAYER_BASE.offset(5),
        ];
        let index = EntityIndex::build(&players, &[team(roster)], Some(PLAYER_BASE), &layout);

        assert_eq!(index.slots_for_team(TEAM), vec![0, 1, 2]);
        assert!(index.slots_for_team(Address::new(0x1234)).is_empty());
    }

    #[test]
    fn test_team_membership_without_player_base() {
        let players = vec![player(3, "A", "One", TEAM)];
        let index = EntityIndex::build(
            &players,
            &[team(vec![PLAYER_BASE])],
            None,
            &PlayerLayout::default(),
        );
        assert_eq!(index.slots_for_team(TEAM), vec![3]);
    }
}
