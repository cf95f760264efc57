//! Record layouts for the player and team tables

use crate::core::types::{Address, BitSpan, Slot};
use serde::{Deserialize, Serialize};

/// Byte layout of one player record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerLayout {
    pub stride: u64,
    pub max_slots: u32,
    pub last_name_offset: u64,
    pub first_name_offset: u64,
    pub name_max_chars: usize,
    pub face_id_offset: u64,
    pub team_ptr_offset: u64,
}

impl Default for PlayerLayout {
    fn default() -> Self {
        PlayerLayout {
            stride: 0x448,
            max_slots: 6000,
            last_name_offset: 0x0,
            first_name_offset: 0x28,
            name_max_chars: 20,
            face_id_offset: 0x114,
            team_ptr_offset: 0x60,
        }
    }
}

impl PlayerLayout {
    pub fn record(&self, base: Address, slot: Slot) -> Address {
        base.element(slot as u64, self.stride)
    }

    /// Slot a pointer refers to, if it lands on a record boundary in range
    pub fn slot_of(&self, base: Address, ptr: Address) -> Option<Slot> {
        let distance = ptr.distance_from(base)?;
        if self.stride == 0 || distance % self.stride != 0 {
            return None;
        }
        let slot = distance / self.stride;
        (slot < self.max_slots as u64).then_some(slot as Slot)
    }
}

/// Byte layout of one team record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamLayout {
    pub stride: u64,
    pub max_slots: u32,
    pub name_offset: u64,
    pub name_max_chars: usize,
    /// Byte holding the roster type in bits 2..6
    pub type_offset: u64,
    /// u16 holding the era in bits 3..9
    pub year_offset: u64,
    /// Player pointers at the start of the record
    pub roster_slots: usize,
}

impl Default for TeamLayout {
    fn default() -> Self {
        TeamLayout {
            stride: 0x1620,
            max_slots: 300,
            name_offset: 0x2D4,
            name_max_chars: 24,
            type_offset: 0x12F7,
            year_offset: 0x161A,
            roster_slots: 20,
        }
    }
}

impl TeamLayout {
    pub fn record(&self, base: Address, slot: Slot) -> Address {
        base.element(slot as u64, self.stride)
    }

    pub const fn type_span(&self) -> BitSpan {
        BitSpan::new(self.type_offset, 2, 5)
    }

    pub const fn era_span(&self) -> BitSpan {
        BitSpan::new(self.year_offset, 3, 7)
    }
}
