//! Discount and cashback selections attached to a draft.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::types::{BenefitId, SubcategoryId};

/// The single discount a proposal may carry.
///
/// Older proposals stored one whole-proposal benefit plus three inclusion
/// switches; current ones scope benefits per category. Both shapes survive
/// hydration, so they are one sum type with an explicit tag instead of
/// parallel optional fields.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DiscountPolicy {
    #[default]
    None,
    /// Backward-compatible whole-proposal benefit with inclusion switches.
    Legacy {
        benefit: BenefitId,
        #[serde(default)]
        on_menu: bool,
        #[serde(default)]
        on_equipment: bool,
        #[serde(default)]
        on_service: bool,
    },
    /// Category-scoped benefits; the current model.
    Scoped {
        #[serde(default)]
        menu: Option<BenefitId>,
        #[serde(default)]
        equipment_general: Option<BenefitId>,
        /// Per-subcategory equipment overrides. When any override is set the
        /// general equipment benefit no longer applies to equipment rows,
        /// only to the loss charge.
        #[serde(default)]
        equipment_by_subcategory: BTreeMap<SubcategoryId, BenefitId>,
        #[serde(default)]
        service: Option<BenefitId>,
    },
}

impl DiscountPolicy {
    pub const fn is_legacy(&self) -> bool {
        matches!(self, DiscountPolicy::Legacy { .. })
    }

    /// Whether any scoped reference is actually set; an all-empty `Scoped`
    /// behaves like `None`.
    pub fn has_scoped_reference(&self) -> bool {
        match self {
            DiscountPolicy::Scoped {
                menu,
                equipment_general,
                equipment_by_subcategory,
                service,
            } => {
                menu.is_some()
                    || equipment_general.is_some()
                    || !equipment_by_subcategory.is_empty()
                    || service.is_some()
            }
            _ => false,
        }
    }
}

/// Cashback benefit reference plus the "redeem now" flag.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CashbackSelection {
    #[serde(default)]
    pub benefit: Option<BenefitId>,
    /// Subtract the computed amount from the final total instead of just
    /// reporting it as earned. Feasible only while the client's wallet
    /// covers the amount.
    #[serde(default)]
    pub redeem: bool,
}

impl CashbackSelection {
    pub const fn is_set(&self) -> bool {
        self.benefit.is_some()
    }
}
