//! Dishes: catalog-backed entries and user-authored ("custom") entries.
//!
//! The original data model overloaded one id space, with negative ids
//! marking custom dishes. Here the two sources are an explicit tagged
//! variant so pricing and submission never branch on a sign.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::types::{CatalogDishId, DishName};
use crate::domain::units::{Portion, Unit, is_beverage_category};

/// Session-local identifier for a custom dish. Assigned by the ledger,
/// negative by convention to stay disjoint from catalog ids in payload logs.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDishId(i32);

impl LocalDishId {
    pub fn new(value: i32) -> Self {
        debug_assert!(value < 0, "local dish ids are negative");
        Self(value)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for LocalDishId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a dish line regardless of its source.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DishKey {
    /// Backed by the external catalog; immutable aside from local overrides.
    Catalog(CatalogDishId),
    /// Authored inside the proposal; freely editable, never sent as a
    /// catalog reference.
    Custom(LocalDishId),
}

impl DishKey {
    pub const fn is_custom(self) -> bool {
        matches!(self, DishKey::Custom(_))
    }
}

/// A dish as served by the catalog collaborator. Read-only reference data.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CatalogDish {
    pub id: CatalogDishId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Portion figure as entered upstream, possibly a "150/75" dual.
    pub portion: Portion,
    pub unit: Unit,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl CatalogDish {
    /// Whether the dish counts into the drink volume figure instead of the
    /// food weight figure.
    pub fn is_drink(&self) -> bool {
        is_beverage_category(&self.category)
    }
}

/// Lookup index over the catalog fetched once per builder session.
#[derive(Clone, Debug, Default)]
pub struct CatalogIndex {
    dishes: HashMap<CatalogDishId, CatalogDish>,
}

impl CatalogIndex {
    pub fn new(dishes: Vec<CatalogDish>) -> Self {
        Self {
            dishes: dishes.into_iter().map(|d| (d.id, d)).collect(),
        }
    }

    pub fn get(&self, id: CatalogDishId) -> Option<&CatalogDish> {
        self.dishes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
}

/// A dish authored by the user for this proposal only.
///
/// The name is optional while the row is being typed in; an unnamed custom
/// dish is invisible to aggregation and blocks the dish-selection gate.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomDish {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub portion: Portion,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub category: String,
}

impl CustomDish {
    pub fn key(&self) -> DishKey {
        DishKey::Custom(LocalDishId::new(self.id))
    }

    /// A custom dish participates in totals only once it has a name.
    pub fn is_named(&self) -> bool {
        DishName::new(self.name.as_str()).is_ok()
    }

    pub fn is_drink(&self) -> bool {
        is_beverage_category(&self.category)
    }
}
