//! Field descriptors for bit-packed record fields

use serde::{Deserialize, Serialize};
use std::fmt;

/// Location of a bitfield inside one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitSpan {
    /// Byte offset from the record start
    pub offset: u64,
    /// First bit inside the byte at `offset` (0-7)
    pub start_bit: u8,
    /// Field width in bits (1-64)
    pub width: u8,
}

impl BitSpan {
    pub const fn new(offset: u64, start_bit: u8, width: u8) -> Self {
        BitSpan {
            offset,
            start_bit,
            width,
        }
    }

    /// Number of bytes covering the field
    pub const fn byte_len(&self) -> usize {
        (self.start_bit as usize + self.width as usize + 7) / 8
    }

    /// Largest raw value the field can hold
    pub const fn max_raw(&self) -> u64 {
        crate::codec::max_raw(self.width)
    }
}

impl fmt::Display for BitSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "+0x{:X} bit {} width {}",
            self.offset, self.start_bit, self.width
        )
    }
}

/// How a field's raw value maps to the value a user edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// 25-110 rating (Attributes, Durability)
    Rating,
    /// 0-100 tendency
    Tendency,
    /// Index into the descriptor's `values`
    Enumerated,
    /// Raw integer
    Raw,
}

/// Category names carrying special meaning for value conversion
pub mod category {
    pub const BODY: &str = "Body";
    pub const VITALS: &str = "Vitals";
    pub const ATTRIBUTES: &str = "Attributes";
    pub const DURABILITY: &str = "Durability";
    pub const TENDENCIES: &str = "Tendencies";
    pub const BADGES: &str = "Badges";
    pub const CONTRACT: &str = "Contract";
}

impl FieldKind {
    /// Derives the kind from the owning category and the enumerated labels
    pub fn for_category(category: &str, has_values: bool) -> Self {
        if has_values {
            return FieldKind::Enumerated;
        }
        match category {
            category::ATTRIBUTES | category::DURABILITY => FieldKind::Rating,
            category::TENDENCIES => FieldKind::Tendency,
            _ => FieldKind::Raw,
        }
    }
}

/// A named bitfield in the player record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub category: String,
    pub span: BitSpan,
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

impl FieldDescriptor {
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        span: BitSpan,
        values: Option<Vec<String>>,
    ) -> Self {
        let category = category.into();
        let values = values.filter(|v| !v.is_empty());
        let kind = FieldKind::for_category(&category, values.is_some());
        FieldDescriptor {
            name: name.into(),
            category,
            span,
            kind,
            values,
        }
    }

    /// Index of `label` in the enumerated values, case-insensitive
    pub fn value_index(&self, label: &str) -> Option<usize> {
        let wanted = label.trim();
        self.values
            .as_ref()?
            .iter()
            .position(|v| v.eq_ignore_ascii_case(wanted))
    }
}

/// A fixed-width UTF-16 text field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextField {
    pub name: &'static str,
    pub offset: u64,
    pub max_chars: usize,
}

impl TextField {
    pub const fn new(name: &'static str, offset: u64, max_chars: usize) -> Self {
        TextField {
            name,
            offset,
            max_chars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_len() {
        assert_eq!(BitSpan::new(0, 0, 8).byte_len(), 1);
        assert_eq!(BitSpan::new(0, 7, 2).byte_len(), 2);
        assert_eq!(BitSpan::new(0, 3, 7).byte_len(), 2);
        assert_eq!(BitSpan::new(0, 7, 64).byte_len(), 9);
        assert_eq!(BitSpan::new(0, 0, 1).byte_len(), 1);
    }

    #[test]
    fn test_kind_from_category() {
        assert_eq!(
            FieldKind::for_category("Attributes", false),
            FieldKind::Rating
        );
        assert_eq!(
            FieldKind::for_category("Durability", false),
            FieldKind::Rating
        );
        assert_eq!(
            FieldKind::for_category("Tendencies", false),
            FieldKind::Tendency
        );
        assert_eq!(FieldKind::for_category("Badges", true), FieldKind::Enumerated);
        assert_eq!(FieldKind::for_category("Vitals", false), FieldKind::Raw);
    }

    #[test]
    fn test_value_index() {
        let field = FieldDescriptor::new(
            "Badges",
            "Deadeye",
            BitSpan::new(0x42A, 0, 3),
            Some(vec!["None".into(), "Bronze".into(), "Silver".into()]),
        );
        assert_eq!(field.kind, FieldKind::Enumerated);
        assert_eq!(field.value_index("silver"), Some(2));
        assert_eq!(field.value_index(" BRONZE "), Some(1));
        assert_eq!(field.value_index("Gold"), None);
    }

    #[test]
    fn test_empty_values_are_not_enumerated() {
        let field = FieldDescriptor::new("Attributes", "Speed", BitSpan::new(0x3A0, 2, 7), Some(vec![]));
        assert_eq!(field.kind, FieldKind::Rating);
        assert!(field.values.is_none());
    }
}
