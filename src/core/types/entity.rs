//! Decoded roster records

use super::address::Address;
use serde::{Deserialize, Serialize};

/// Display label for players whose team pointer is null
pub const FREE_AGENTS: &str = "Free Agents";

/// Display label for a team pointer that could not be decoded
pub const UNKNOWN_TEAM: &str = "Unknown";

/// A decoded player record.
///
/// `slot` is only meaningful against the table base it was scanned from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub slot: u32,
    pub first_name: String,
    pub last_name: String,
    pub face_id: u32,
    pub team_ptr: Address,
    pub team: String,
}

impl Player {
    /// "First Last", trimmed
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Case-insensitive lookup key
    pub fn name_key(&self) -> String {
        name_key(&self.first_name, &self.last_name)
    }

    /// True when neither name carries any text
    pub fn is_blank(&self) -> bool {
        self.first_name.trim().is_empty() && self.last_name.trim().is_empty()
    }
}

/// Builds the lookup key shared by players and name queries
pub fn name_key(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim())
        .trim()
        .to_lowercase()
}

/// A decoded team record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub slot: u32,
    pub address: Address,
    /// Base name as stored in the record
    pub name: String,
    /// Unique display label (era suffix and collision suffix applied)
    pub label: String,
    pub roster_type: u8,
    pub era: u8,
    /// Non-null player pointers embedded at the start of the record
    pub roster: Vec<Address>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(first: &str, last: &str) -> Player {
        Player {
            slot: 0,
            first_name: first.to_string(),
            last_name: last.to_string(),
            face_id: 0,
            team_ptr: Address::null(),
            team: FREE_AGENTS.to_string(),
        }
    }

    #[test]
    fn test_full_name_and_key() {
        let p = player("LeBron", "James");
        assert_eq!(p.full_name(), "LeBron James");
        assert_eq!(p.name_key(), "lebron james");

        let mononym = player("", "Nene");
        assert_eq!(mononym.full_name(), "Nene");
        assert_eq!(mononym.name_key(), "nene");
    }

    #[test]
    fn test_blank_player() {
        assert!(player("  ", "").is_blank());
        assert!(!player("A", "").is_blank());
    }
}
