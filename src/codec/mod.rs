//! Bitfield codec
//!
//! Pure conversions between raw bitfield values and the numbers a user
//! edits. Ratings live on a 25-110 scale and are stored either directly
//! (wide fields) or linearly scaled across the raw range (narrow fields).
//! Tendencies are a plain 0-100 linear mapping.

pub mod bits;

pub use bits::{extract_bits, insert_bits};

use serde::{Deserialize, Serialize};

/// Largest raw value of a `width`-bit field.
///
/// Width 0 yields 0; widths of 64 and above saturate to `u64::MAX`.
pub const fn max_raw(width: u8) -> u64 {
    if width == 0 {
        0
    } else if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Rating bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingScale {
    pub min: f64,
    pub max_true: f64,
}

impl Default for RatingScale {
    fn default() -> Self {
        RatingScale {
            min: 25.0,
            max_true: 110.0,
        }
    }
}

impl RatingScale {
    pub fn clamp(&self, rating: f64) -> f64 {
        rating.clamp(self.min, self.max_true)
    }

    fn span(&self) -> f64 {
        self.max_true - self.min
    }

    /// Storage convention for a field of `width` bits
    pub fn mode(&self, width: u8) -> StorageMode {
        if width > 0 && max_raw(width) as f64 >= self.max_true {
            StorageMode::Direct
        } else {
            StorageMode::Scale
        }
    }
}

/// How a rating is laid out in raw bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageMode {
    /// Raw value is the rating itself
    Direct,
    /// Raw range maps linearly onto the rating range
    Scale,
}

/// Round half up, then clamp into `0..=max`
fn round_to_raw(x: f64, max: u64) -> u64 {
    let rounded = (x + 0.5).floor();
    if rounded <= 0.0 {
        0
    } else if rounded >= max as f64 {
        max
    } else {
        rounded as u64
    }
}

fn round_half_up(x: f64) -> u32 {
    (x + 0.5).floor().max(0.0) as u32
}

/// Decodes a raw bitfield into a rating
pub fn decode_rating(raw: u64, width: u8, scale: &RatingScale) -> u32 {
    let max = max_raw(width);
    if max == 0 {
        return scale.min as u32;
    }
    let raw = raw.min(max);
    let rating = match scale.mode(width) {
        StorageMode::Direct => raw as f64,
        StorageMode::Scale => scale.min + (raw as f64 / max as f64) * scale.span(),
    };
    round_half_up(scale.clamp(rating))
}

/// Encodes a rating into a raw bitfield value
pub fn encode_rating(rating: f64, width: u8, scale: &RatingScale) -> u64 {
    let max = max_raw(width);
    if max == 0 {
        return 0;
    }
    let rating = scale.clamp(rating);
    match scale.mode(width) {
        StorageMode::Direct => round_to_raw(rating, max),
        StorageMode::Scale => {
            let fraction = ((rating - scale.min) / scale.span()).clamp(0.0, 1.0);
            round_to_raw(fraction * max as f64, max)
        }
    }
}

/// Upper bound of the tendency scale
pub const TENDENCY_MAX: f64 = 100.0;

/// Decodes a raw bitfield into a 0-100 tendency
pub fn decode_tendency(raw: u64, width: u8) -> u32 {
    let max = max_raw(width);
    if max == 0 {
        return 0;
    }
    let fraction = raw.min(max) as f64 / max as f64;
    round_half_up((fraction * TENDENCY_MAX).clamp(0.0, TENDENCY_MAX))
}

/// Encodes a 0-100 tendency into a raw bitfield value
pub fn encode_tendency(tendency: f64, width: u8) -> u64 {
    let max = max_raw(width);
    if max == 0 {
        return 0;
    }
    let fraction = tendency.clamp(0.0, TENDENCY_MAX) / TENDENCY_MAX;
    round_to_raw(fraction * max as f64, max)
}

/// Maps a 0-100 percentage linearly onto the raw range
pub fn encode_percentage(percent: f64, width: u8) -> u64 {
    encode_tendency(percent, width)
}
