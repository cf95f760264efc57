//! Row imports
//!
//! Merges named rows of text values into one field category. The first
//! header cell names the player column; every other column is matched to a
//! field by normalized name, falling back to its position in the category.

pub mod normalize;

pub use normalize::{names_match, normalize_field_name, normalize_header, parse_cell};

use crate::accessor::FieldAccessor;
use crate::codec::{encode_percentage, encode_rating, encode_tendency, RatingScale};
use crate::core::types::{category, FieldDescriptor, Slot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Result of merging one table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Players with at least one field written
    pub players_updated: usize,
    /// Rows whose name matched no player
    pub rows_unmatched: usize,
    /// Columns mapped to no field
    pub columns_unmapped: usize,
}

/// Maps each data column (header cells after the first) to a field
pub fn map_columns<'f>(
    header: &[String],
    fields: &'f [FieldDescriptor],
) -> Vec<Option<&'f FieldDescriptor>> {
    let normalized: Vec<String> = fields.iter().map(|f| normalize_field_name(&f.name)).collect();
    header
        .iter()
        .skip(1)
        .enumerate()
        .map(|(i, cell)| {
            let norm = normalize_header(cell);
            normalized
                .iter()
                .position(|field| names_match(&norm, field))
                .or_else(|| (i < fields.len()).then_some(i))
                .map(|index| &fields[index])
        })
        .collect()
}

/// Raw value for an imported number, by category
pub fn import_raw(category_name: &str, field: &FieldDescriptor, value: f64, scale: &RatingScale) -> u64 {
    let width = field.span.width;
    match category_name {
        category::ATTRIBUTES | category::DURABILITY => encode_rating(value, width, scale),
        category::TENDENCIES => encode_tendency(value, width),
        _ => encode_percentage(value, width),
    }
}

/// Writes `rows` into the fields of `category_name`.
///
/// `find` resolves a row's player name to slots; every matching slot is
/// written. Unparseable cells are skipped and a failed write never stops
/// the rest of the row.
pub fn merge_rows<F>(
    accessor: &FieldAccessor<'_>,
    category_name: &str,
    fields: &[FieldDescriptor],
    header: &[String],
    rows: &[Vec<String>],
    scale: &RatingScale,
    find: F,
) -> ImportSummary
where
    F: Fn(&str) -> Vec<Slot>,
{
    let mut summary = ImportSummary::default();
    if header.len() < 2 || fields.is_empty() {
        debug!("Nothing to import into {}", category_name);
        return summary;
    }

    let columns = map_columns(header, fields);
    summary.columns_unmapped = columns.iter().filter(|c| c.is_none()).count();

    for row in rows {
        let Some((name, cells)) = row.split_first() else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() || cells.is_empty() {
            continue;
        }

        let slots = find(name);
        if slots.is_empty() {
            debug!("Import row {:?} matched no player", name);
            summary.rows_unmatched += 1;
            continue;
        }

        for slot in slots {
            let mut any_written = false;
            for (cell, field) in cells.iter().zip(&columns) {
                let (Some(field), Some(value)) = (field, parse_cell(cell)) else {
                    continue;
                };
                let raw = import_raw(category_name, field, value, scale);
                match accessor.set_field(slot, field.span, raw) {
                    Ok(()) => any_written = true,
                    Err(e) => warn!("Import of {} for slot {} failed: {}", field.name, slot, e),
                }
            }
            if any_written {
                summary.players_updated += 1;
            }
        }
    }

    info!(
        "Imported {}: {} players updated, {} rows unmatched",
        category_name, summary.players_updated, summary.rows_unmatched
    );
    summary
}
