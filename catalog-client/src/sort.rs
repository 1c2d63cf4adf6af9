//! In-page sort: a single active (field, direction) pair applied to the
//! currently loaded page only, never across the full filtered set — the
//! server returns one page at a time.

use crate::api::Document;
use crate::currency;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Emitter,
    TributeValue,
    LiquidValue,
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// At most one field is active at any time; selecting a new field resets
/// the previous one to no indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<(SortField, SortDirection)>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clicking a sort control: the same field cycles
    /// ascending → descending → ascending (never back to none once chosen);
    /// a different field starts ascending and deactivates the previous one.
    pub fn toggle(&mut self, field: SortField) {
        self.active = match self.active {
            Some((current, SortDirection::Ascending)) if current == field => {
                Some((field, SortDirection::Descending))
            }
            _ => Some((field, SortDirection::Ascending)),
        };
    }

    /// Indicator state for one column header.
    pub fn direction_of(&self, field: SortField) -> Option<SortDirection> {
        self.active
            .filter(|(active, _)| *active == field)
            .map(|(_, direction)| direction)
    }

    /// Stable sort of the fetched page. With no active field this is a
    /// no-op preserving fetch order.
    pub fn apply(&self, documents: &[Document]) -> Vec<Document> {
        let mut sorted = documents.to_vec();
        if let Some((field, direction)) = self.active {
            sorted.sort_by(|a, b| {
                let ordering = compare(field, a, b);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        sorted
    }
}

fn compare(field: SortField, a: &Document, b: &Document) -> Ordering {
    match field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::Emitter => a.emitter.cmp(&b.emitter),
        SortField::TributeValue => currency::comparable_value(&a.tribute_value)
            .total_cmp(&currency::comparable_value(&b.tribute_value)),
        SortField::LiquidValue => currency::comparable_value(&a.liquid_value)
            .total_cmp(&currency::comparable_value(&b.liquid_value)),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}
