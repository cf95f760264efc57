//! Record table scanning
//!
//! Walks the player and team tables from a resolved base, decoding each
//! slot and applying the acceptance rules in [`heuristics`]. Transient read
//! faults skip a slot; fatal faults (handle or process gone) abort the scan.

pub mod heuristics;
pub mod layout;
mod players;
mod teams;

pub use layout::{PlayerLayout, TeamLayout};
pub use players::{read_player, scan_players};
pub use teams::{compose_team_label, read_roster, scan_team_roster, scan_teams};

use crate::core::types::MemoryError;

/// Result of a table scan
#[derive(Debug)]
pub enum ScanOutcome<T> {
    /// Every slot was visited
    Complete(T),
    /// The decoded data looks like the wrong memory
    Rejected(String),
    /// The target became unusable mid-scan
    Aborted(MemoryError),
}

impl<T: Default> ScanOutcome<T> {
    /// Decoded items, or an empty value for rejected and aborted scans
    pub fn into_items(self) -> T {
        match self {
            ScanOutcome::Complete(items) => items,
            ScanOutcome::Rejected(_) | ScanOutcome::Aborted(_) => T::default(),
        }
    }
}

impl<T> ScanOutcome<T> {
    pub fn is_complete(&self) -> bool {
        matches!(self, ScanOutcome::Complete(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_items() {
        let complete: ScanOutcome<Vec<u32>> = ScanOutcome::Complete(vec![1, 2]);
        assert!(complete.is_complete());
        assert_eq!(complete.into_items(), vec![1, 2]);

        let rejected: ScanOutcome<Vec<u32>> = ScanOutcome::Rejected("junk".to_string());
        assert!(!rejected.is_complete());
        assert!(rejected.into_items().is_empty());

        let aborted: ScanOutcome<Vec<u32>> = ScanOutcome::Aborted(MemoryError::ProcessExited(1));
        assert!(aborted.into_items().is_empty());
    }
}
