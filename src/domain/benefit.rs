//! Percentage-based discount and cashback profiles ("benefits").
//!
//! Benefits are reference data owned by an external registry; the engine
//! only reads them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::types::BenefitId;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BenefitKind {
    Discount,
    Cashback,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Benefit {
    pub id: BenefitId,
    pub name: String,
    pub kind: BenefitKind,
    /// Percentage value, e.g. `10.0` for 10%.
    pub value: f64,
    #[serde(default)]
    pub is_active: bool,
}

/// Lookup index over active benefits fetched once per builder session.
#[derive(Clone, Debug, Default)]
pub struct BenefitIndex {
    benefits: HashMap<BenefitId, Benefit>,
}

impl BenefitIndex {
    pub fn new(benefits: Vec<Benefit>) -> Self {
        Self {
            benefits: benefits.into_iter().map(|b| (b.id, b)).collect(),
        }
    }

    /// Percentage of an active benefit of the given kind; inactive, missing
    /// or mismatched references resolve to no deduction at all.
    pub fn percentage(&self, id: BenefitId, kind: BenefitKind) -> f64 {
        self.benefits
            .get(&id)
            .filter(|benefit| benefit.is_active && benefit.kind == kind)
            .map(|benefit| benefit.value.max(0.0))
            .unwrap_or(0.0)
    }

    pub fn get(&self, id: BenefitId) -> Option<&Benefit> {
        self.benefits.get(&id)
    }
}
