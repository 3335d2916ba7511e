//! Type-annotation classification.
//!
//! A raw annotation (`[String: Int]?`, `UUID`, `(Int) -> Void`) is matched
//! against an ordered pattern table; the first hit decides the category.
//! Nothing here parses the annotation: matchers are suffix searches over the
//! literal text, so qualifiers and surrounding whitespace are tolerated.
//!
//! Classification is total. When no pattern matches, the annotation lands in
//! one of the two unresolved categories depending on a trailing `?`.
pub mod table;

use crate::category::Category;

pub use table::{Pattern, PatternTable};

const OPTIONAL_MARKER: char = '?';
const CLOSURE_ARROW: &str = "->";

// ------------------------------- Front API -------------------------------- //

#[derive(Debug, Clone, Copy)]
pub struct Classifier<'t> {
    table: &'t PatternTable,
}

impl<'t> Classifier<'t> {
    pub fn new(table: &'t PatternTable) -> Self {
        Self { table }
    }

    pub fn classify(&self, raw: &str) -> Category {
        let category = match self.table.first_match(raw) {
            Some(category) => category,
            None if is_optional(raw) => Category::UnknownOptional,
            None => Category::UnknownNonOptional,
        };
        tracing::trace!(raw, %category, "classified");
        category
    }
}

impl Classifier<'static> {
    pub fn standard() -> Self {
        Self::new(PatternTable::standard())
    }
}

impl Default for Classifier<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

/// Classify with the standard table.
pub fn classify(raw: &str) -> Category {
    Classifier::standard().classify(raw)
}

/// True when the annotation denotes a function type.
pub fn is_closure(raw: &str) -> bool {
    raw.contains(CLOSURE_ARROW)
}

pub fn is_optional(raw: &str) -> bool {
    raw.trim_end().ends_with(OPTIONAL_MARKER)
}

// ------------------------------- Tests ------------------------------------ //
