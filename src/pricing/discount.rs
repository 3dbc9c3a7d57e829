//! Resolution of discount and cashback selections into money.
//!
//! Scopes are independent and additive; only the legacy whole-proposal
//! branch is exclusive with the scoped branches. Every scope amount is
//! clamped to the subtotal it applies against, so a discount can never
//! exceed its base or go negative.

use crate::domain::benefit::{BenefitIndex, BenefitKind};
use crate::domain::dish::CatalogIndex;
use crate::domain::discount::DiscountPolicy;
use crate::domain::proposal::ProposalDraft;
use crate::domain::types::BenefitId;

/// Per-scope discount amounts in currency units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DiscountBreakdown {
    /// Against the regular (catalog-only) dish subtotal.
    pub menu: f64,
    /// Against equipment rows and the loss charge.
    pub equipment: f64,
    /// Against the service subtotal.
    pub service: f64,
}

impl DiscountBreakdown {
    pub fn total(&self) -> f64 {
        self.menu + self.equipment + self.service
    }
}

fn percent_of(base: f64, percentage: f64) -> f64 {
    (base * percentage / 100.0).clamp(0.0, base.max(0.0))
}

fn discount_pct(benefits: &BenefitIndex, id: Option<BenefitId>) -> f64 {
    id.map(|id| benefits.percentage(id, BenefitKind::Discount))
        .unwrap_or(0.0)
}

/// Computes the per-scope discounts for the draft's current selection.
pub fn resolve_discount(
    draft: &ProposalDraft,
    catalog: &CatalogIndex,
    benefits: &BenefitIndex,
) -> DiscountBreakdown {
    let regular_total = draft.ledger.regular_food_total(catalog);
    let equipment_total = draft.ledger.equipment_total();
    let service_total = draft.ledger.service_total();

    match &draft.discount {
        DiscountPolicy::None => DiscountBreakdown::default(),
        DiscountPolicy::Legacy {
            benefit,
            on_menu,
            on_equipment,
            on_service,
        } => {
            let pct = benefits.percentage(*benefit, BenefitKind::Discount);
            DiscountBreakdown {
                menu: if *on_menu {
                    percent_of(regular_total, pct)
                } else {
                    0.0
                },
                equipment: if *on_equipment {
                    percent_of(equipment_total, pct)
                } else {
                    0.0
                },
                service: if *on_service {
                    percent_of(service_total, pct)
                } else {
                    0.0
                },
            }
        }
        DiscountPolicy::Scoped {
            menu,
            equipment_general,
            equipment_by_subcategory,
            service,
        } => {
            let equipment = if equipment_by_subcategory.is_empty() {
                percent_of(equipment_total, discount_pct(benefits, *equipment_general))
            } else {
                // Subcategory overrides shadow the general benefit on the
                // rows; the general benefit keeps applying to the loss
                // charge alone.
                let per_row: f64 = draft
                    .ledger
                    .equipment
                    .iter()
                    .filter_map(|item| {
                        let benefit = item
                            .subcategory
                            .and_then(|sub| equipment_by_subcategory.get(&sub))?;
                        let pct = benefits.percentage(*benefit, BenefitKind::Discount);
                        Some(percent_of(item.amount(), pct))
                    })
                    .sum();
                let on_loss = percent_of(
                    draft.ledger.loss_charge(),
                    discount_pct(benefits, *equipment_general),
                );
                (per_row + on_loss).clamp(0.0, equipment_total.max(0.0))
            };

            DiscountBreakdown {
                menu: percent_of(regular_total, discount_pct(benefits, *menu)),
                equipment,
                service: percent_of(service_total, discount_pct(benefits, *service)),
            }
        }
    }
}

/// Cashback amount for the draft's selection: a percentage of the
/// post-discount subtotals plus transport. Zero when no cashback benefit is
/// selected.
pub fn resolve_cashback(
    draft: &ProposalDraft,
    catalog: &CatalogIndex,
    benefits: &BenefitIndex,
    discount: &DiscountBreakdown,
) -> f64 {
    let Some(benefit) = draft.cashback.benefit else {
        return 0.0;
    };
    let pct = benefits.percentage(benefit, BenefitKind::Cashback);
    let base = (draft.ledger.food_total(catalog) - discount.menu)
        + (draft.ledger.equipment_total() - discount.equipment)
        + (draft.ledger.service_total() - discount.service)
        + draft.ledger.transport_cost();
    percent_of(base, pct)
}

/// Whether redeeming the computed cashback is feasible for the client.
pub fn can_redeem(wallet_balance: f64, cashback_amount: f64) -> bool {
    wallet_balance >= cashback_amount
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::benefit::Benefit;
    use crate::domain::charge::ChargeItem;
    use crate::domain::types::SubcategoryId;
    use std::collections::BTreeMap;

    fn benefits() -> BenefitIndex {
        BenefitIndex::new(vec![
            Benefit {
                id: BenefitId::new(1).unwrap(),
                name: "Скидка 10%".to_string(),
                kind: BenefitKind::Discount,
                value: 10.0,
                is_active: true,
            },
            Benefit {
                id: BenefitId::new(2).unwrap(),
                name: "Скидка 20%".to_string(),
                kind: BenefitKind::Discount,
                value: 20.0,
                is_active: true,
            },
            Benefit {
                id: BenefitId::new(3).unwrap(),
                name: "Кэшбэк 5%".to_string(),
                kind: BenefitKind::Cashback,
                value: 5.0,
                is_active: true,
            },
        ])
    }

    fn bid(raw: i32) -> BenefitId {
        BenefitId::new(raw).unwrap()
    }

    fn sub(raw: i32) -> SubcategoryId {
        SubcategoryId::new(raw).unwrap()
    }

    fn draft_with_equipment() -> ProposalDraft {
        let mut draft = ProposalDraft::default();
        draft
            .ledger
            .equipment
            .push(ChargeItem::new("Посуда", 10, 50.0).with_subcategory(sub(1)));
        draft
            .ledger
            .equipment
            .push(ChargeItem::new("Мебель", 2, 100.0).with_subcategory(sub(2)));
        draft.ledger.set_loss_charge(100.0);
        draft
    }

    #[test]
    fn general_equipment_benefit_covers_rows_and_loss() {
        let mut draft = draft_with_equipment();
        draft.discount = DiscountPolicy::Scoped {
            menu: None,
            equipment_general: Some(bid(1)),
            equipment_by_subcategory: BTreeMap::new(),
            service: None,
        };
        let breakdown = resolve_discount(&draft, &CatalogIndex::default(), &benefits());
        // 10% of (500 + 200 + 100)
        assert_eq!(breakdown.equipment, 80.0);
    }

    #[test]
    fn subcategory_override_shadows_general_on_rows() {
        let mut draft = draft_with_equipment();
        let mut overrides = BTreeMap::new();
        overrides.insert(sub(1), bid(2));
        draft.discount = DiscountPolicy::Scoped {
            menu: None,
            equipment_general: Some(bid(1)),
            equipment_by_subcategory: overrides,
            service: None,
        };
        let breakdown = resolve_discount(&draft, &CatalogIndex::default(), &benefits());
        // 20% of the overridden rows (500) + 10% of the loss charge (100);
        // the non-overridden row (200) gets nothing.
        assert_eq!(breakdown.equipment, 110.0);
    }

    #[test]
    fn legacy_applies_only_to_flagged_scopes() {
        let mut draft = draft_with_equipment();
        draft
            .ledger
            .services
            .push(ChargeItem::new("Официанты", 4, 250.0));
        draft.discount = DiscountPolicy::Legacy {
            benefit: bid(1),
            on_menu: true,
            on_equipment: false,
            on_service: true,
        };
        let breakdown = resolve_discount(&draft, &CatalogIndex::default(), &benefits());
        assert_eq!(breakdown.menu, 0.0); // no dishes selected
        assert_eq!(breakdown.equipment, 0.0);
        assert_eq!(breakdown.service, 100.0);
        assert_eq!(breakdown.total(), 100.0);
    }

    #[test]
    fn discount_never_exceeds_its_base() {
        let mut draft = ProposalDraft::default();
        draft.ledger.services.push(ChargeItem::new("Логистика", 1, 100.0));
        draft.discount = DiscountPolicy::Scoped {
            menu: None,
            equipment_general: None,
            equipment_by_subcategory: BTreeMap::new(),
            service: Some(bid(1)),
        };
        // A corrupt 150% benefit must still clamp to the base.
        let index = BenefitIndex::new(vec![Benefit {
            id: bid(1),
            name: "Сломанная скидка".to_string(),
            kind: BenefitKind::Discount,
            value: 150.0,
            is_active: true,
        }]);
        let breakdown = resolve_discount(&draft, &CatalogIndex::default(), &index);
        assert_eq!(breakdown.service, 100.0);
    }

    #[test]
    fn cashback_uses_post_discount_base_plus_transport() {
        let mut draft = draft_with_equipment();
        draft.ledger.set_transport_cost(200.0);
        draft.cashback.benefit = Some(bid(3));
        let discount = DiscountBreakdown {
            menu: 0.0,
            equipment: 80.0,
            service: 0.0,
        };
        let amount = resolve_cashback(&draft, &CatalogIndex::default(), &benefits(), &discount);
        // 5% of (0 + (800 − 80) + 0 + 200)
        assert_eq!(amount, 46.0);
    }

    #[test]
    fn wallet_gating() {
        assert!(can_redeem(50.0, 46.0));
        assert!(!can_redeem(45.0, 46.0));
    }
}
