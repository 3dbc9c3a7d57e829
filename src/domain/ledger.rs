//! The line-item ledger: every priced row of the proposal.
//!
//! Holds the catalog dish selection with local overrides, user-authored
//! custom dishes, equipment and service charges, and the loss/transport
//! figures. Aggregation is total and never raises: rows referencing a dish
//! the catalog no longer serves simply contribute zero while staying
//! selected, so a failed catalog refresh cannot wipe a draft.

use serde::{Deserialize, Serialize};

use crate::domain::charge::ChargeItem;
use crate::domain::dish::{CatalogIndex, CustomDish, DishKey, LocalDishId};
use crate::domain::types::CatalogDishId;
use crate::domain::units::Portion;

/// One selected catalog dish with its per-proposal state. Quantity and
/// overrides live on the row itself, so removing the row removes them with
/// it and no orphaned entries can survive.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SelectedDish {
    pub id: CatalogDishId,
    pub quantity: i32,
    #[serde(default)]
    pub price_override: Option<f64>,
    #[serde(default)]
    pub portion_override: Option<Portion>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LineItemLedger {
    /// Ordered catalog selection.
    #[serde(default)]
    dishes: Vec<SelectedDish>,
    /// User-authored dishes, session-local negative ids.
    #[serde(default)]
    custom_dishes: Vec<CustomDish>,
    #[serde(default)]
    next_local_id: i32,
    #[serde(default)]
    pub equipment: Vec<ChargeItem>,
    #[serde(default)]
    pub services: Vec<ChargeItem>,
    /// Loss/breakage charge, discounted only by the general equipment
    /// benefit.
    #[serde(default)]
    loss_charge: f64,
    /// Transport cost; enters the grand total and the cashback base, never
    /// a discount scope.
    #[serde(default)]
    transport_cost: f64,
}

impl LineItemLedger {
    /// Toggles a catalog dish in or out of the selection. A newly added dish
    /// starts with the current guest count as quantity, or 1 when unset.
    pub fn toggle_dish(&mut self, id: CatalogDishId, guest_count: i32) {
        if let Some(pos) = self.dishes.iter().position(|row| row.id == id) {
            self.dishes.remove(pos);
        } else {
            self.dishes.push(SelectedDish {
                id,
                quantity: if guest_count > 0 { guest_count } else { 1 },
                price_override: None,
                portion_override: None,
            });
        }
    }

    pub fn is_selected(&self, id: CatalogDishId) -> bool {
        self.dishes.iter().any(|row| row.id == id)
    }

    pub fn selected_dishes(&self) -> &[SelectedDish] {
        &self.dishes
    }

    pub fn custom_dishes(&self) -> &[CustomDish] {
        &self.custom_dishes
    }

    /// Sets the quantity of a selected catalog or custom dish. Unknown keys
    /// are ignored.
    pub fn set_quantity(&mut self, key: DishKey, quantity: i32) {
        match key {
            DishKey::Catalog(id) => {
                if let Some(row) = self.dishes.iter_mut().find(|row| row.id == id) {
                    row.quantity = quantity;
                }
            }
            DishKey::Custom(local) => {
                if let Some(dish) = self
                    .custom_dishes
                    .iter_mut()
                    .find(|dish| dish.id == local.get())
                {
                    dish.quantity = quantity;
                }
            }
        }
    }

    /// Overrides the unit price of a selected catalog dish; `None` restores
    /// the catalog price.
    pub fn set_price_override(&mut self, id: CatalogDishId, price: Option<f64>) {
        if let Some(row) = self.dishes.iter_mut().find(|row| row.id == id) {
            row.price_override = price;
        }
    }

    /// Overrides the portion of a selected catalog dish; `None` restores
    /// the catalog figure.
    pub fn set_portion_override(&mut self, id: CatalogDishId, portion: Option<Portion>) {
        if let Some(row) = self.dishes.iter_mut().find(|row| row.id == id) {
            row.portion_override = portion;
        }
    }

    /// Adds an empty custom dish row and returns its local id.
    pub fn add_custom_dish(&mut self, guest_count: i32) -> LocalDishId {
        self.next_local_id -= 1;
        let id = self.next_local_id;
        self.custom_dishes.push(CustomDish {
            id,
            quantity: if guest_count > 0 { guest_count } else { 1 },
            ..CustomDish::default()
        });
        LocalDishId::new(id)
    }

    pub fn custom_dish_mut(&mut self, id: LocalDishId) -> Option<&mut CustomDish> {
        self.custom_dishes
            .iter_mut()
            .find(|dish| dish.id == id.get())
    }

    pub fn remove_custom_dish(&mut self, id: LocalDishId) {
        self.custom_dishes.retain(|dish| dish.id != id.get());
    }

    pub fn loss_charge(&self) -> f64 {
        self.loss_charge
    }

    pub fn set_loss_charge(&mut self, charge: f64) {
        self.loss_charge = charge.max(0.0);
    }

    pub fn transport_cost(&self) -> f64 {
        self.transport_cost
    }

    pub fn set_transport_cost(&mut self, cost: f64) {
        self.transport_cost = cost.max(0.0);
    }

    /// Unit price of a selected row, local override first.
    pub fn resolved_price(&self, row: &SelectedDish, catalog: &CatalogIndex) -> f64 {
        row.price_override
            .or_else(|| catalog.get(row.id).map(|dish| dish.price))
            .unwrap_or(0.0)
            .max(0.0)
    }

    /// Food total over all catalog rows plus named custom dishes.
    pub fn food_total(&self, catalog: &CatalogIndex) -> f64 {
        self.regular_food_total(catalog)
            + self
                .custom_dishes
                .iter()
                .filter(|dish| dish.is_named())
                .map(|dish| dish.price.max(0.0) * f64::from(dish.quantity.max(0)))
                .sum::<f64>()
    }

    /// Catalog-only food total: the base every menu discount applies to.
    pub fn regular_food_total(&self, catalog: &CatalogIndex) -> f64 {
        self.dishes
            .iter()
            .map(|row| self.resolved_price(row, catalog) * f64::from(row.quantity.max(0)))
            .sum()
    }

    /// Total weight of non-drink dishes, in grams.
    pub fn total_weight_grams(&self, catalog: &CatalogIndex) -> f64 {
        let from_catalog: f64 = self
            .dishes
            .iter()
            .filter_map(|row| catalog.get(row.id).map(|dish| (row, dish)))
            .filter(|(_, dish)| !dish.is_drink())
            .map(|(row, dish)| {
                let portion = row.portion_override.as_ref().unwrap_or(&dish.portion);
                portion.canonical(dish.unit) * f64::from(row.quantity.max(0))
            })
            .sum();
        let from_custom: f64 = self
            .custom_dishes
            .iter()
            .filter(|dish| dish.is_named() && !dish.is_drink())
            .map(|dish| dish.portion.canonical(dish.unit) * f64::from(dish.quantity.max(0)))
            .sum();
        from_catalog + from_custom
    }

    /// Total volume of beverage dishes, in millilitres.
    pub fn total_drink_volume_ml(&self, catalog: &CatalogIndex) -> f64 {
        let from_catalog: f64 = self
            .dishes
            .iter()
            .filter_map(|row| catalog.get(row.id).map(|dish| (row, dish)))
            .filter(|(_, dish)| dish.is_drink())
            .map(|(row, dish)| {
                let portion = row.portion_override.as_ref().unwrap_or(&dish.portion);
                portion.canonical(dish.unit) * f64::from(row.quantity.max(0))
            })
            .sum();
        let from_custom: f64 = self
            .custom_dishes
            .iter()
            .filter(|dish| dish.is_named() && dish.is_drink())
            .map(|dish| dish.portion.canonical(dish.unit) * f64::from(dish.quantity.max(0)))
            .sum();
        from_catalog + from_custom
    }

    /// Equipment rows without the loss charge.
    pub fn equipment_items_total(&self) -> f64 {
        self.equipment.iter().map(ChargeItem::amount).sum()
    }

    /// Equipment rows plus the loss charge: the general equipment discount
    /// base.
    pub fn equipment_total(&self) -> f64 {
        self.equipment_items_total() + self.loss_charge
    }

    pub fn service_total(&self) -> f64 {
        self.services.iter().map(ChargeItem::amount).sum()
    }

    /// Whether the dish-selection step has anything to price: a selected
    /// catalog dish or at least one named custom dish.
    pub fn has_priceable_dishes(&self) -> bool {
        !self.dishes.is_empty() || self.custom_dishes.iter().any(CustomDish::is_named)
    }

    /// Custom rows that exist but still have no name.
    pub fn unnamed_custom_count(&self) -> usize {
        self.custom_dishes
            .iter()
            .filter(|dish| !dish.is_named())
            .count()
    }
}

/// Per-guest figure with a guard against empty events: a non-positive guest
/// count yields zero instead of dividing.
pub fn per_guest(total: f64, guest_count: i32) -> f64 {
    if guest_count > 0 {
        total / f64::from(guest_count)
    } else {
        0.0
    }
}
