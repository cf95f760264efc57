//! Immutable results of one refresh

use crate::accessor::EntitySelector;
use crate::core::types::{Address, Player, Slot, Team};
use crate::index::EntityIndex;

/// Everything one refresh decoded.
///
/// Slots and addresses are only valid for the bases recorded here; a new
/// refresh may move both tables.
#[derive(Debug, Clone, Default)]
pub struct RosterSnapshot {
    /// Increases with every refresh of a session
    pub generation: u64,
    pub player_base: Option<Address>,
    pub team_base: Option<Address>,
    pub players: Vec<Player>,
    /// Teams from the team table, in label order
    pub teams: Vec<Team>,
    /// Display labels in order, whether from the team table or derived
    pub team_labels: Vec<(u32, String)>,
    /// True when teams were derived from player team pointers
    pub derived_teams: bool,
    pub index: EntityIndex,
}

impl RosterSnapshot {
    pub fn empty(generation: u64) -> Self {
        RosterSnapshot {
            generation,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn player(&self, slot: Slot) -> Option<&Player> {
        self.players.iter().find(|p| p.slot == slot)
    }

    pub fn team(&self, label: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.label == label)
    }

    /// Players shown under a team label
    pub fn players_by_team(&self, label: &str) -> Vec<&Player> {
        self.players.iter().filter(|p| p.team == label).collect()
    }

    /// Slots an edit selector refers to, ascending and unique
    pub fn select(&self, selector: &EntitySelector) -> Vec<Slot> {
        let mut slots = match selector {
            EntitySelector::Slot(slot) => self
                .player(*slot)
                .map(|p| vec![p.slot])
                .unwrap_or_default(),
            EntitySelector::Name(name) => self.index.lookup_by_name(name),
            EntitySelector::Team(label) => match self.team(label) {
                Some(team) => self.index.slots_for_team(team.address),
                None => self.players_by_team(label).iter().map(|p| p.slot).collect(),
            },
        };
        slots.sort_unstable();
        slots.dedup();
        slots
    }
}
