//! Acceptance predicates for decoded text
//!
//! All functions here are pure so they can be tested without memory.

use std::collections::HashMap;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Minimum and maximum trimmed length of a plausible team label
pub const LABEL_MIN_CHARS: usize = 2;
pub const LABEL_MAX_CHARS: usize = 48;

/// Characters expected in player names
pub fn is_baseline_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == ' ' || c == '-' || c == '\''
}

/// Printable in the sense of "no control, format, separator, private-use
/// or unassigned code point". The plain space is the one separator allowed.
pub fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}

/// Team label acceptance: 2-48 chars after trimming, all printable,
/// at least two letters
pub fn is_plausible_label(label: &str) -> bool {
    let trimmed = label.trim();
    let len = trimmed.chars().count();
    if !(LABEL_MIN_CHARS..=LABEL_MAX_CHARS).contains(&len) {
        return false;
    }
    if !trimmed.chars().all(is_printable) {
        return false;
    }
    trimmed.chars().filter(|c| c.is_alphabetic()).count() >= 2
}

/// Counts decoded name characters outside the baseline set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JunkTally {
    pub total: usize,
    pub junk: usize,
}

impl JunkTally {
    pub fn add(&mut self, text: &str) {
        for c in text.chars() {
            self.total += 1;
            if !is_baseline_name_char(c) {
                self.junk += 1;
            }
        }
    }

    /// True when more than half of all characters are junk
    pub fn is_mostly_junk(&self) -> bool {
        self.total > 0 && self.junk * 2 > self.total
    }
}

/// Suffixes every label that occurs more than once with ` [slot]`.
///
/// Unique labels pass through unchanged. A suffixed label can collide with
/// a name that already carried the same suffix, so suffixing repeats on
/// whatever still collides until every label is distinct.
pub fn dedupe_labels(entries: &mut [(u32, String)]) {
    loop {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for (_, label) in entries.iter() {
            *counts.entry(label.clone()).or_default() += 1;
        }
        if counts.values().all(|&n| n == 1) {
            return;
        }
        for (slot, label) in entries.iter_mut() {
            if counts.get(label.as_str()).copied().unwrap_or(0) > 1 {
                *label = format!("{} [{}]", label, slot);
            }
        }
    }
}

/// Two-digit season suffix for an era value, e.g. 96 -> "95-96"
pub fn format_era(era: u8) -> Option<String> {
    if era == 0 {
        return None;
    }
    let start = 1899 + era as u32;
    let end = start + 1;
    Some(format!("{:02}-{:02}", start % 100, end % 100))
}

/// Base name plus the era suffix when the era is set
pub fn compose_label(name: &str, era: u8) -> String {
    match format_era(era) {
        Some(season) => format!("{} {}", name.trim(), season),
        None => name.trim().to_string(),
    }
}

/// Total order for team labels: labels starting with "team " sort after
/// the rest, then lexicographically
pub fn label_order(a: &str, b: &str) -> std::cmp::Ordering {
    let generic = |s: &str| s.to_lowercase().starts_with("team ");
    generic(a).cmp(&generic(b)).then_with(|| a.cmp(b))
}
