// Closed set of semantic kinds a type annotation can be classified into.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Uuid,
    String,
    Date,
    TimeInterval,
    Bool,
    Int,
    Decimal,
    Double,
    Float,
    Url,
    Array,
    Dictionary,
    Set,
    UnknownOptional,    // no pattern matched, annotation ends in `?`
    UnknownNonOptional, // no pattern matched, needs a hand-written default
}

impl Category {
    /// Every member, in declaration order.
    pub const ALL: [Category; 15] = [
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
        Category::Array,
        Category::Dictionary,
        Category::Set,
        Category::UnknownOptional,
        Category::UnknownNonOptional,
    ];

    pub fn is_unresolved(self) -> bool {
        matches!(self, Category::UnknownOptional | Category::UnknownNonOptional)
    }

    /// Categories whose synthesized literal never changes between runs.
    pub fn is_deterministic(self) -> bool {
        !matches!(
            self,
            Category::TimeInterval
                | Category::Int
                | Category::Decimal
                | Category::Double
                | Category::Float
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Uuid => "uuid",
            Category::String => "string",
            Category::Date => "date",
            Category::TimeInterval => "time_interval",
            Category::Bool => "bool",
            Category::Int => "int",
            Category::Decimal => "decimal",
            Category::Double => "double",
            Category::Float => "float",
            Category::Url => "url",
            Category::Array => "array",
            Category::Dictionary => "dictionary",
            Category::Set => "set",
            Category::UnknownOptional => "unknown_optional",
            Category::UnknownNonOptional => "unknown_non_optional",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_name_matches_as_str() {
        for c in Category::ALL {
            let json = serde_json::to_value(c).unwrap();
            assert_eq!(json.as_str(), Some(c.as_str()));
        }
    }

    #[test]
    fn unresolved_pair_is_exactly_two() {
        let n = Category::ALL.iter().filter(|c| c.is_unresolved()).count();
        assert_eq!(n, 2);
    }
}
