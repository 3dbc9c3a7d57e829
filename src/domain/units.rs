//! Normalization of the heterogeneous weight/volume encodings found in the
//! dish catalog.
//!
//! Catalog data mixes plain numbers, numeric strings with decimal commas, and
//! dual "150/75" portion encodings. Normalization is total: malformed input
//! degrades to zero so a half-built proposal stays computable at every step.

use serde::{Deserialize, Serialize};

/// Measurement unit attached to a dish portion.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Grams, the canonical mass unit.
    #[default]
    #[serde(rename = "г")]
    Gram,
    /// Kilograms, scaled to grams.
    #[serde(rename = "кг")]
    Kilogram,
    /// Millilitres, the canonical volume unit.
    #[serde(rename = "мл")]
    Milliliter,
    /// Litres, scaled to millilitres.
    #[serde(rename = "л")]
    Liter,
    /// Countable pieces, no scaling.
    #[serde(rename = "шт")]
    Piece,
}

impl Unit {
    /// Parses a unit tag. Unknown tags are treated as already-canonical
    /// values, so parsing never fails.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "г" | "гр" | "g" => Unit::Gram,
            "кг" | "kg" => Unit::Kilogram,
            "мл" | "ml" => Unit::Milliliter,
            "л" | "l" => Unit::Liter,
            "шт" | "pc" | "pcs" => Unit::Piece,
            _ => Unit::Gram,
        }
    }

    /// Factor converting one unit of measure into the canonical scale
    /// (grams for mass, millilitres for volume).
    pub const fn canonical_factor(self) -> f64 {
        match self {
            Unit::Kilogram | Unit::Liter => 1000.0,
            Unit::Gram | Unit::Milliliter | Unit::Piece => 1.0,
        }
    }
}

/// A portion figure as entered in the catalog: either a plain value or a
/// dual "A/B" encoding. The raw text is preserved for display; arithmetic
/// always uses the first component.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Portion(String);

impl Portion {
    pub fn new<S: Into<String>>(raw: S) -> Self {
        Self(raw.into().trim().to_string())
    }

    /// The text as the user entered it, for display and persistence.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the portion. For "A/B" duals only A is used.
    /// Decimal commas are accepted; anything unparseable yields 0.
    pub fn value(&self) -> f64 {
        let first = self.0.split('/').next().unwrap_or_default();
        parse_loose(first)
    }

    /// Portion scaled into canonical grams/millilitres.
    pub fn canonical(&self, unit: Unit) -> f64 {
        self.value() * unit.canonical_factor()
    }
}

impl From<f64> for Portion {
    fn from(value: f64) -> Self {
        Self(format_number(value))
    }
}

impl From<&str> for Portion {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Lenient numeric parsing: trims, accepts a decimal comma, drops a trailing
/// unit suffix, defaults to zero.
fn parse_loose(input: &str) -> f64 {
    let cleaned: String = input
        .trim()
        .replace(',', ".")
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().unwrap_or(0.0).max(0.0)
}

/// Category names that classify a dish as a drink. Drinks aggregate into the
/// volume figure and are excluded from the weight figure.
const BEVERAGE_CATEGORIES: &[&str] = &[
    "напитки",
    "бар",
    "лимонады",
    "соки",
    "алкоголь",
    "вино",
    "коктейли",
    "морсы",
];

/// Whether a category name belongs to the fixed beverage vocabulary.
pub fn is_beverage_category(category: &str) -> bool {
    let lowered = category.trim().to_lowercase();
    BEVERAGE_CATEGORIES
        .iter()
        .any(|known| lowered.contains(known))
}
