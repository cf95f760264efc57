//! Conversion between user-facing values and raw bitfield values

use crate::codec::{decode_rating, decode_tendency, encode_rating, encode_tendency, RatingScale};
use crate::core::types::{FieldDescriptor, FieldKind, MemoryError, MemoryResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value as supplied by or shown to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Label(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Label(s) => f.write_str(s),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Label(value.to_string())
    }
}

/// Converts a user value into the raw value to store.
///
/// Ratings and tendencies go through the codec, enumerated fields take a
/// label (case-insensitive) or an index, raw fields are clamped.
pub fn encode_value(
    field: &FieldDescriptor,
    value: &FieldValue,
    scale: &RatingScale,
) -> MemoryResult<u64> {
    let width = field.span.width;
    let max = field.span.max_raw();
    let number = match value {
        FieldValue::Number(n) => *n,
        FieldValue::Label(label) => {
            if let Some(index) = field.value_index(label) {
                return Ok((index as u64).min(max));
            }
            label.trim().parse::<f64>().map_err(|_| {
                MemoryError::InvalidField(format!("{}: unrecognised value {:?}", field.name, label))
            })?
        }
    };
    if !number.is_finite() {
        return Err(MemoryError::InvalidField(format!(
            "{}: non-finite value",
            field.name
        )));
    }

    Ok(match field.kind {
        FieldKind::Rating => encode_rating(number, width, scale),
        FieldKind::Tendency => encode_tendency(number, width),
        FieldKind::Enumerated | FieldKind::Raw => {
            if number <= 0.0 {
                0
            } else if number >= max as f64 {
                max
            } else {
                number as u64
            }
        }
    })
}

/// Converts a stored raw value into what a user sees
pub fn decode_value(field: &FieldDescriptor, raw: u64, scale: &RatingScale) -> FieldValue {
    let width = field.span.width;
    match field.kind {
        FieldKind::Rating => FieldValue::Number(decode_rating(raw, width, scale) as f64),
        FieldKind::Tendency => FieldValue::Number(decode_tendency(raw, width) as f64),
        FieldKind::Enumerated => field
            .values
            .as_ref()
            .and_then(|values| values.get(raw as usize))
            .map(|label| FieldValue::Label(label.clone()))
            .unwrap_or(FieldValue::Number(raw as f64)),
        FieldKind::Raw => FieldValue::Number(raw as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::BitSpan;

    fn field(category: &str, width: u8, values: Option<Vec<&str>>) -> FieldDescriptor {
        FieldDescriptor::new(
            category,
            "Test",
            BitSpan::new(0x10, 0, width),
            values.map(|v| v.into_iter().map(String::from).collect()),
        )
    }

    #[test]
    fn test_rating_encoding() {
        let scale = RatingScale::default();
        let speed = field("Attributes", 7, None);
        assert_eq!(encode_value(&speed, &85.0.into(), &scale).unwrap(), 85);
        assert_eq!(encode_value(&speed, &"85".into(), &scale).unwrap(), 85);
        assert_eq!(decode_value(&speed, 85, &scale), FieldValue::Number(85.0));
    }

    #[test]
    fn test_tendency_encoding() {
        let scale = RatingScale::default();
        let drive = field("Tendencies", 8, None);
        assert_eq!(encode_value(&drive, &100.0.into(), &scale).unwrap(), 255);
        assert_eq!(decode_value(&drive, 255, &scale), FieldValue::Number(100.0));
    }

    #[test]
    fn test_enumerated_encoding() {
        let scale = RatingScale::default();
        let option = field("Contract", 2, Some(vec!["None", "Team", "Player", "2 Yr Team"]));
        assert_eq!(encode_value(&option, &"player".into(), &scale).unwrap(), 2);
        assert_eq!(encode_value(&option, &1.0.into(), &scale).unwrap(), 1);
        assert_eq!(encode_value(&option, &9.0.into(), &scale).unwrap(), 3);
        assert!(encode_value(&option, &"Mutual".into(), &scale).is_err());
        assert_eq!(
            decode_value(&option, 3, &scale),
            FieldValue::Label("2 Yr Team".to_string())
        );
    }

    #[test]
    fn test_raw_encoding_clamps() {
        let scale = RatingScale::default();
        let raw = field("Vitals", 4, None);
        assert_eq!(encode_value(&raw, &(-3.0).into(), &scale).unwrap(), 0);
        assert_eq!(encode_value(&raw, &7.9.into(), &scale).unwrap(), 7);
        assert_eq!(encode_value(&raw, &99.0.into(), &scale).unwrap(), 15);
        assert!(encode_value(&raw, &f64::NAN.into(), &scale).is_err());
    }
}
