//! Whole-block copies between player records and team text fields

use crate::core::types::TextField;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A contiguous region of the player record copied as a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CopyBlock {
    Appearance,
    Attributes,
    Tendencies,
    Badges,
    /// The whole record
    Full,
}

impl CopyBlock {
    pub const ALL: [CopyBlock; 5] = [
        CopyBlock::Appearance,
        CopyBlock::Attributes,
        CopyBlock::Tendencies,
        CopyBlock::Badges,
        CopyBlock::Full,
    ];

    /// `(offset, length)` of the block in a record of `stride` bytes
    pub fn range(&self, stride: u64) -> (u64, usize) {
        match self {
            CopyBlock::Appearance => (0x078, 51),
            CopyBlock::Attributes => (0x392, 53),
            CopyBlock::Tendencies => (0x3C8, 99),
            CopyBlock::Badges => (0x42A, 19),
            CopyBlock::Full => (0, stride as usize),
        }
    }
}

impl fmt::Display for CopyBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CopyBlock::Appearance => "appearance",
            CopyBlock::Attributes => "attributes",
            CopyBlock::Tendencies => "tendencies",
            CopyBlock::Badges => "badges",
            CopyBlock::Full => "full",
        };
        f.write_str(name)
    }
}

impl FromStr for CopyBlock {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CopyBlock::ALL
            .into_iter()
            .find(|block| block.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown copy block: {}", s))
    }
}

/// Editable text fields of a team record
pub const TEAM_TEXT_FIELDS: [TextField; 5] = [
    TextField::new("Team Name", 0x2D4, 24),
    TextField::new("City Name", 0x306, 24),
    TextField::new("City Short Name", 0x32A, 8),
    TextField::new("State Short Name", 0x338, 8),
    TextField::new("Arena Name", 0x158, 36),
];
