//! Literal synthesis per category.
//!
//! Deterministic categories (strings, dates, booleans, URLs, empty collections)
//! always yield the same text so generated mocks diff cleanly. Numeric kinds
//! draw from the injected generator on purpose; seed it for reproducible output.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::category::Category;

pub const FIXED_DATE: &str = "Date(timeIntervalSince1970: 1000)";
pub const PLACEHOLDER_URL: &str = "URL(string: \"https://foo.bar/\")!";
pub const UNFILLED_PLACEHOLDER: &str = "<#default value#>";

/// Ranges for the randomized kinds, inclusive on both ends.
const TIME_INTERVAL_RANGE: std::ops::RangeInclusive<u32> = 100..=200;
const INT_RANGE: std::ops::RangeInclusive<u32> = 0..=100;
const DOUBLE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=10.0;
const FLOAT_RANGE: std::ops::RangeInclusive<f32> = 0.0..=10.0;

/// Produce the literal for `category`, drawing from `rng` where needed.
pub fn synthesize_with<R: Rng>(category: Category, field_name: &str, rng: &mut R) -> String {
    match category {
        Category::Uuid => "UUID()".to_string(),
        Category::String => format!("{field_name:?}"),
        Category::Date => FIXED_DATE.to_string(),
        Category::TimeInterval => rng.gen_range(TIME_INTERVAL_RANGE).to_string(),
        Category::Bool => "false".to_string(),
        Category::Int => rng.gen_range(INT_RANGE).to_string(),
        Category::Decimal => format!("Decimal({})", rng.gen_range(INT_RANGE)),
        // Debug keeps the decimal point on whole values (`7.0`, not `7`)
        Category::Double => format!("{:?}", rng.gen_range(DOUBLE_RANGE)),
        Category::Float => format!("{:?}", rng.gen_range(FLOAT_RANGE)),
        Category::Url => PLACEHOLDER_URL.to_string(),
        Category::Array => "[]".to_string(),
        Category::Dictionary => "[:]".to_string(),
        Category::Set => "Set()".to_string(),
        Category::UnknownOptional => "nil".to_string(),
        Category::UnknownNonOptional => UNFILLED_PLACEHOLDER.to_string(),
    }
}

/// Owns the random source used for the non-deterministic categories.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    rng: ChaCha8Rng,
}

impl Synthesizer {
    /// Entropy-seeded; output varies between runs.
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Reproducible stream for tests and `--seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn synthesize(&mut self, category: Category, field_name: &str) -> String {
        synthesize_with(category, field_name, &mut self.rng)
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_yields_a_literal() {
        let mut s = Synthesizer::seeded(7);
        for c in Category::ALL {
            assert!(!s.synthesize(c, "anyName").is_empty(), "{c}");
        }
    }

    #[test]
    fn deterministic_categories_are_stable_across_generators() {
        let mut a = Synthesizer::new();
        let mut b = Synthesizer::seeded(1);
        for c in Category::ALL.into_iter().filter(|c| c.is_deterministic()) {
            assert_eq!(a.synthesize(c, "flag"), b.synthesize(c, "flag"), "{c}");
        }
        assert_eq!(a.synthesize(Category::Bool, "flag"), "false");
    }

    #[test]
    fn string_literal_quotes_the_field_name() {
        let mut s = Synthesizer::seeded(0);
        assert_eq!(s.synthesize(Category::String, "nickname"), "\"nickname\"");
    }

    #[test]
    fn fixed_literals() {
        let mut s = Synthesizer::seeded(0);
        assert_eq!(s.synthesize(Category::Uuid, "id"), "UUID()");
        assert_eq!(s.synthesize(Category::Date, "createdAt"), FIXED_DATE);
        assert_eq!(s.synthesize(Category::Url, "homepage"), PLACEHOLDER_URL);
        assert_eq!(s.synthesize(Category::Array, "tags"), "[]");
        assert_eq!(s.synthesize(Category::Dictionary, "meta"), "[:]");
        assert_eq!(s.synthesize(Category::Set, "ids"), "Set()");
        assert_eq!(s.synthesize(Category::UnknownOptional, "x"), "nil");
        assert_eq!(s.synthesize(Category::UnknownNonOptional, "x"), UNFILLED_PLACEHOLDER);
    }

    #[test]
    fn randomized_literals_stay_in_range() {
        let mut s = Synthesizer::seeded(42);
        for _ in 0..500 {
            let d: u32 = s.synthesize(Category::TimeInterval, "t").parse().unwrap();
            assert!((100..=200).contains(&d));

            let i: u32 = s.synthesize(Category::Int, "n").parse().unwrap();
            assert!(i <= 100);

            let dec = s.synthesize(Category::Decimal, "price");
            let inner = dec.strip_prefix("Decimal(").and_then(|r| r.strip_suffix(')')).unwrap();
            assert!(inner.parse::<u32>().unwrap() <= 100);

            let x: f64 = s.synthesize(Category::Double, "x").parse().unwrap();
            assert!((0.0..=10.0).contains(&x));

            let f: f32 = s.synthesize(Category::Float, "f").parse().unwrap();
            assert!((0.0..=10.0).contains(&f));
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = Synthesizer::seeded(99);
        let mut b = Synthesizer::seeded(99);
        for c in Category::ALL {
            assert_eq!(a.synthesize(c, "v"), b.synthesize(c, "v"));
        }
    }
}
