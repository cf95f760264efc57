//! Random rating plans
//!
//! A plan pairs every rating and tendency field of the randomizable
//! categories with an inclusive range. Drawing from a plan yields ordinary
//! [`BatchEdit`]s, so writes go through the same codec and tally as any
//! other batch.

use super::batch::{BatchEdit, EntitySelector};
use super::values::FieldValue;
use crate::config::OffsetMap;
use crate::core::types::{category, FieldDescriptor, FieldKind, Slot};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Categories a randomizer plan draws its fields from
pub const RANDOMIZED_CATEGORIES: [&str; 3] =
    [category::ATTRIBUTES, category::TENDENCIES, category::DURABILITY];

/// Inclusive user-facing value range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRange {
    pub min: u32,
    pub max: u32,
}

impl RatingRange {
    /// Bounds given in either order
    pub fn new(a: u32, b: u32) -> Self {
        RatingRange {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// 0-100 for tendencies, 25-99 for ratings
    pub fn default_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Tendency => RatingRange::new(0, 100),
            _ => RatingRange::new(25, 99),
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.min..=self.max)
    }
}

/// Fields to randomize and the range drawn for each
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RandomizePlan {
    fields: Vec<(FieldDescriptor, RatingRange)>,
}

impl RandomizePlan {
    /// Every rating and tendency field of the randomized categories, each
    /// with its default range
    pub fn from_offsets(offsets: &OffsetMap) -> Self {
        let fields = RANDOMIZED_CATEGORIES
            .iter()
            .filter_map(|name| offsets.category(name))
            .flat_map(|category| category.fields.iter())
            .filter(|field| matches!(field.kind, FieldKind::Rating | FieldKind::Tendency))
            .map(|field| (field.clone(), RatingRange::default_for(field.kind)))
            .collect();
        RandomizePlan { fields }
    }

    pub fn fields(&self) -> &[(FieldDescriptor, RatingRange)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Overrides the range of one field; false if the plan lacks it
    pub fn set_range(&mut self, category: &str, name: &str, range: RatingRange) -> bool {
        match self.find(category, name) {
            Some(entry) => {
                entry.1 = range;
                true
            }
            None => false,
        }
    }

    /// Leaves a field out of the plan; false if it was not in it
    pub fn exclude(&mut self, category: &str, name: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|(f, _)| !is_field(f, category, name));
        self.fields.len() != before
    }

    fn find(&mut self, category: &str, name: &str) -> Option<&mut (FieldDescriptor, RatingRange)> {
        self.fields.iter_mut().find(|(f, _)| is_field(f, category, name))
    }

    /// One edit per slot and field, each with a fresh draw
    pub fn edits<R: Rng + ?Sized>(&self, slots: &[Slot], rng: &mut R) -> Vec<BatchEdit> {
        let mut edits = Vec::with_capacity(slots.len() * self.fields.len());
        for &slot in slots {
            for (field, range) in &self.fields {
                edits.push(BatchEdit {
                    selector: EntitySelector::Slot(slot),
                    field: field.clone(),
                    value: FieldValue::Number(range.sample(rng) as f64),
                });
            }
        }
        edits
    }
}

fn is_field(field: &FieldDescriptor, category: &str, name: &str) -> bool {
    field.category.eq_ignore_ascii_case(category) && field.name.eq_ignore_ascii_case(name)
}
