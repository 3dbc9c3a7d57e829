//! The pricing engine: a pure function from the draft plus reference data
//! to a fully derived [`Quote`]. Recomputed on demand, never cached, so the
//! figures can not drift from the state they were derived from.

pub mod discount;

use crate::domain::benefit::BenefitIndex;
use crate::domain::dish::CatalogIndex;
use crate::domain::ledger::per_guest;
use crate::domain::proposal::ProposalDraft;
use crate::pricing::discount::{DiscountBreakdown, resolve_cashback, resolve_discount};

/// Every derived money/weight figure for one draft state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Quote {
    /// All dishes, catalog and named custom.
    pub food_total: f64,
    /// Catalog dishes only, the discountable base.
    pub regular_food_total: f64,
    pub equipment_items_total: f64,
    pub loss_charge: f64,
    pub equipment_total: f64,
    pub service_total: f64,
    pub transport_cost: f64,

    pub discount: DiscountBreakdown,
    /// Computed cashback; added to the client's wallet when not redeemed.
    pub cashback_amount: f64,
    /// Whether the cashback amount is subtracted from the final total.
    pub cashback_redeemed: bool,

    /// Sum of all charges before discount and cashback.
    pub subtotal: f64,
    /// The figure quoted to the client.
    pub total: f64,

    pub guests_for_pricing: i32,
    pub guests_for_weight: i32,
    pub price_per_guest: f64,
    pub total_weight_grams: f64,
    pub weight_per_guest_grams: f64,
    pub total_drink_volume_ml: f64,
    pub drink_volume_per_guest_ml: f64,
}

/// Derives the full quote for the current draft state.
pub fn compute_quote(
    draft: &ProposalDraft,
    catalog: &CatalogIndex,
    benefits: &BenefitIndex,
) -> Quote {
    let food_total = draft.ledger.food_total(catalog);
    let regular_food_total = draft.ledger.regular_food_total(catalog);
    let equipment_items_total = draft.ledger.equipment_items_total();
    let loss_charge = draft.ledger.loss_charge();
    let equipment_total = draft.ledger.equipment_total();
    let service_total = draft.ledger.service_total();
    let transport_cost = draft.ledger.transport_cost();

    let discount = resolve_discount(draft, catalog, benefits);
    let cashback_amount = resolve_cashback(draft, catalog, benefits, &discount);
    let cashback_redeemed = draft.cashback.redeem && cashback_amount > 0.0;

    let subtotal = food_total + equipment_total + service_total + transport_cost;
    let total = subtotal
        - discount.total()
        - if cashback_redeemed {
            cashback_amount
        } else {
            0.0
        };

    let guests_for_pricing = draft.guests_for_pricing();
    let guests_for_weight = draft.guests_for_weight();
    let total_weight_grams = draft.ledger.total_weight_grams(catalog);
    let total_drink_volume_ml = draft.ledger.total_drink_volume_ml(catalog);

    Quote {
        food_total,
        regular_food_total,
        equipment_items_total,
        loss_charge,
        equipment_total,
        service_total,
        transport_cost,
        discount,
        cashback_amount,
        cashback_redeemed,
        subtotal,
        total,
        guests_for_pricing,
        guests_for_weight,
        price_per_guest: per_guest(total, guests_for_pricing),
        total_weight_grams,
        weight_per_guest_grams: per_guest(total_weight_grams, guests_for_weight),
        total_drink_volume_ml,
        drink_volume_per_guest_ml: per_guest(total_drink_volume_ml, guests_for_weight),
    }
}
