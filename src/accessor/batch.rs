//! Batch edits
//!
//! Each edit is applied on its own: a failing edit or slot never stops the
//! rest of the batch, and nothing is rolled back.

use super::values::{encode_value, FieldValue};
use super::FieldAccessor;
use crate::codec::RatingScale;
use crate::core::types::{FieldDescriptor, Slot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, warn};

/// Which players an edit applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntitySelector {
    Slot(Slot),
    /// "First Last", case-insensitive; may match several players
    Name(String),
    /// Team display label; every member of the team
    Team(String),
}

impl fmt::Display for EntitySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntitySelector::Slot(slot) => write!(f, "slot {}", slot),
            EntitySelector::Name(name) => write!(f, "player {:?}", name),
            EntitySelector::Team(team) => write!(f, "team {:?}", team),
        }
    }
}

/// One field assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEdit {
    pub selector: EntitySelector,
    pub field: FieldDescriptor,
    pub value: FieldValue,
}

/// Tally for a single edit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOutcome {
    /// Players the selector matched
    pub matched: usize,
    pub written: usize,
    pub failed: usize,
    /// Why the edit failed as a whole, if it did
    pub error: Option<String>,
}

impl EditOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.failed == 0 && self.written > 0
    }
}

/// Per-edit outcomes plus the number of distinct players changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcomes: Vec<EditOutcome>,
    pub entities_updated: usize,
}

impl BatchReport {
    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.error.is_some() || o.failed > 0)
            .count()
    }
}

/// Applies edits through `accessor`, resolving selectors with `select`
pub fn apply_edits<F>(
    accessor: &FieldAccessor<'_>,
    edits: &[BatchEdit],
    scale: &RatingScale,
    select: F,
) -> BatchReport
where
    F: Fn(&EntitySelector) -> Vec<Slot>,
{
    let mut updated: BTreeSet<Slot> = BTreeSet::new();
    let mut outcomes = Vec::with_capacity(edits.len());

    for edit in edits {
        let slots = select(&edit.selector);
        let mut outcome = EditOutcome {
            matched: slots.len(),
            ..Default::default()
        };

        if slots.is_empty() {
            debug!("{} matched no players", edit.selector);
            outcome.error = Some(format!("no player matches {}", edit.selector));
            outcomes.push(outcome);
            continue;
        }

        let raw = match encode_value(&edit.field, &edit.value, scale) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Skipping edit of {} for {}: {}", edit.field.name, edit.selector, e);
                outcome.failed = slots.len();
                outcome.error = Some(e.to_string());
                outcomes.push(outcome);
                continue;
            }
        };

        for slot in slots {
            match accessor.set_field(slot, edit.field.span, raw) {
                Ok(()) => {
                    outcome.written += 1;
                    updated.insert(slot);
                }
                Err(e) => {
                    warn!("Failed to write {} for slot {}: {}", edit.field.name, slot, e);
                    outcome.failed += 1;
                }
            }
        }
        outcomes.push(outcome);
    }

    BatchReport {
        outcomes,
        entities_updated: updated.len(),
    }
}
