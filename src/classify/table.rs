use once_cell::sync::Lazy;
use regex::Regex;

use crate::category::Category;

// ------------------------------- Patterns --------------------------------- //

// One element slot: a plain or dotted token, optionally with a single generic
// argument list, optionally optional. Nested brackets are taken whole.
const ELEM: &str = r"(?:[\w.]+(?:<[^<>]*>)?\??|\[.*\]\??)";

/// Source text of the standard table, highest priority first.
///
/// Collections come before scalars so `[Int]` never lands on the integer
/// family, and the more specific numeric kinds come before the general ones.
/// Every matcher is an unanchored search ending at `$`, so qualifiers in front
/// of the recognized token (`Swift.String`, `CGFloat`) still match.
pub fn standard_sources() -> Vec<(Category, String)> {
    vec![
        (Category::Array, format!(r"\[\s*{ELEM}\s*\]\??\s*$")),
        (Category::Dictionary, format!(r"\[\s*[\w.]+\??\s*:\s*{ELEM}\s*\]\??\s*$")),
        (Category::Set, r"Set\s*<[^<>]+>\??\s*$".to_string()),
        (Category::Uuid, r"UUID\??\s*$".to_string()),
        (Category::String, r"String\??\s*$".to_string()),
        (Category::Date, r"Date\??\s*$".to_string()),
        (Category::TimeInterval, r"TimeInterval\??\s*$".to_string()),
        (Category::Bool, r"Bool\??\s*$".to_string()),
        (Category::Int, r"U?Int(?:8|16|32|64)?\??\s*$".to_string()),
        (Category::Decimal, r"Decimal\??\s*$".to_string()),
        (Category::Double, r"Double\??\s*$".to_string()),
        (Category::Float, r"Float\??\s*$".to_string()),
        (Category::Url, r"URL\??\s*$".to_string()),
    ]
}

static STANDARD: Lazy<PatternTable> = Lazy::new(|| PatternTable::compile(standard_sources()));

// --------------------------------- Table ---------------------------------- //

#[derive(Debug, Clone)]
pub struct Pattern {
    pub category: Category,
    pub source: String,
    /// `None` when the source failed to compile; such a pattern never matches.
    matcher: Option<Regex>,
}

impl Pattern {
    pub fn is_match(&self, raw: &str) -> bool {
        self.matcher.as_ref().is_some_and(|rx| rx.is_match(raw))
    }

    pub fn is_compiled(&self) -> bool {
        self.matcher.is_some()
    }
}

/// Ordered, immutable list of `(category, matcher)` pairs.
#[derive(Debug, Clone)]
pub struct PatternTable {
    patterns: Vec<Pattern>,
}

impl PatternTable {
    /// Compile a table in the given priority order.
    pub fn compile<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Category, S)>,
        S: Into<String>,
    {
        let patterns = entries
            .into_iter()
            .map(|(category, source)| {
                let source = source.into();
                let matcher = match Regex::new(&source) {
                    Ok(rx) => Some(rx),
                    Err(error) => {
                        tracing::warn!(
                            %category,
                            %source,
                            %error,
                            "pattern failed to compile; it will never match"
                        );
                        None
                    }
                };
                Pattern {
                    category,
                    source,
                    matcher,
                }
            })
            .collect();
        Self { patterns }
    }

    /// The process-wide standard table, compiled on first use.
    pub fn standard() -> &'static PatternTable {
        &STANDARD
    }

    pub fn first_match(&self, raw: &str) -> Option<Category> {
        self.patterns.iter().find(|p| p.is_match(raw)).map(|p| p.category)
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_compiles_every_pattern() {
        let table = PatternTable::standard();
        assert_eq!(table.patterns().len(), 13);
        assert!(table.patterns().iter().all(Pattern::is_compiled));
    }

    #[test]
    fn priority_order_is_fixed() {
        let order: Vec<Category> = PatternTable::standard()
            .patterns()
            .iter()
            .map(|p| p.category)
            .collect();
        assert_eq!(order, vec![
            Category::Array,
            Category::Dictionary,
            Category::Set,
            Category::Uuid,
            Category::String,
            Category::Date,
            Category::TimeInterval,
            Category::Bool,
            Category::Int,
            Category::Decimal,
            Category::Double,
            Category::Float,
            Category::Url,
        ]);
    }

    #[test]
    fn broken_pattern_degrades_to_never_matching() {
        let table = PatternTable::compile([
            (Category::Bool, "Bool(".to_string()),
            (Category::Int, r"Int$".to_string()),
        ]);
        assert!(!table.patterns()[0].is_compiled());
        assert_eq!(table.first_match("Bool("), None);
        assert_eq!(table.first_match("Int"), Some(Category::Int));
    }
}
