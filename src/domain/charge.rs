//! Equipment and service line items ("charges").

use serde::{Deserialize, Serialize};

use crate::domain::types::SubcategoryId;

/// One equipment or service row: free-text name, quantity, unit price.
///
/// Quantities and prices arrive from half-filled form rows, so negative or
/// missing values degrade to zero instead of failing.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ChargeItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub price: f64,
    /// Equipment only: subcategory used for per-subcategory discount
    /// assignment.
    #[serde(default)]
    pub subcategory: Option<SubcategoryId>,
}

impl ChargeItem {
    pub fn new<S: Into<String>>(name: S, quantity: i32, price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
            subcategory: None,
        }
    }

    pub fn with_subcategory(mut self, subcategory: SubcategoryId) -> Self {
        self.subcategory = Some(subcategory);
        self
    }

    /// Row amount with negative inputs clamped to zero.
    pub fn amount(&self) -> f64 {
        f64::from(self.quantity.max(0)) * self.price.max(0.0)
    }
}
