//! The flattened proposal shape handed to the persistence collaborator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::benefit::BenefitIndex;
use crate::domain::dish::{CatalogIndex, DishKey};
use crate::domain::discount::{CashbackSelection, DiscountPolicy};
use crate::domain::event_format::ServiceGroup;
use crate::domain::proposal::ProposalDraft;
use crate::domain::types::{CatalogDishId, ClientId, SubcategoryId, TemplateId};
use crate::pricing::compute_quote;

/// One catalog dish line: a reference plus quantity, with the local
/// overrides the user made, if any.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PayloadItem {
    pub item_id: CatalogDishId,
    pub quantity: i32,
    #[serde(default)]
    pub price_override: Option<f64>,
    #[serde(default)]
    pub portion_override: Option<String>,
}

/// A user-authored dish, sent with its full fields — never as a catalog
/// reference.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PayloadCustomItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub portion: String,
    #[serde(default)]
    pub unit: String,
    pub price: f64,
    pub quantity: i32,
}

/// One equipment or service row.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PayloadCharge {
    pub name: String,
    pub quantity: i32,
    pub price: f64,
    #[serde(default)]
    pub subcategory: Option<SubcategoryId>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PayloadFormat {
    pub name: String,
    pub time_window: String,
    pub guest_count: i32,
    pub order_index: usize,
}

/// Everything the persistence service needs to store one proposal.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProposalPayload {
    pub client_id: Option<ClientId>,
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,

    pub event_date: Option<NaiveDate>,
    pub event_time: String,
    pub venue: String,
    pub coordinator: String,
    pub service_group: Option<ServiceGroup>,
    /// Guest figure shown on the document; per-person pricing fallback.
    pub guest_count: i32,

    pub items: Vec<PayloadItem>,
    pub custom_items: Vec<PayloadCustomItem>,
    pub equipment: Vec<PayloadCharge>,
    pub services: Vec<PayloadCharge>,
    pub loss_charge: f64,
    pub transport_cost: f64,

    pub formats: Vec<PayloadFormat>,

    pub discount: DiscountPolicy,
    pub cashback: CashbackSelection,

    pub subtotal: f64,
    pub discount_total: f64,
    pub cashback_amount: f64,
    pub cashback_redeemed: bool,
    pub total: f64,
    pub price_per_guest: f64,
    pub total_weight_grams: f64,
    pub total_drink_volume_ml: f64,
    /// Guest figure backing the weight/volume display (sum across formats
    /// when the proposal-level count is unset; differs from `guest_count`
    /// on purpose).
    pub weight_guest_count: i32,

    pub template_id: Option<TemplateId>,
    pub send_email: bool,
    pub send_telegram: bool,
    pub email_message: String,
    pub telegram_message: String,
}

/// Flattens the draft into the persistence payload.
///
/// Dish lines are the union of the unscoped ledger selection and every
/// format's selection: each dish becomes exactly one line regardless of how
/// many formats reference it.
pub fn build_payload(
    draft: &ProposalDraft,
    catalog: &CatalogIndex,
    benefits: &BenefitIndex,
) -> ProposalPayload {
    let quote = compute_quote(draft, catalog, benefits);

    let mut items: Vec<PayloadItem> = draft
        .ledger
        .selected_dishes()
        .iter()
        .map(|row| PayloadItem {
            item_id: row.id,
            quantity: row.quantity.max(0),
            price_override: row.price_override,
            portion_override: row
                .portion_override
                .as_ref()
                .map(|portion| portion.as_str().to_string()),
        })
        .collect();

    // Formats may still reference a dish the unscoped selection never held
    // (e.g. a hydrated legacy proposal); emit those once with quantity 1.
    for format in draft.formats.formats() {
        for key in &format.dishes {
            if let DishKey::Catalog(id) = key
                && !items.iter().any(|item| item.item_id == *id)
            {
                items.push(PayloadItem {
                    item_id: *id,
                    quantity: 1,
                    price_override: None,
                    portion_override: None,
                });
            }
        }
    }

    let custom_items = draft
        .ledger
        .custom_dishes()
        .iter()
        .filter(|dish| dish.is_named())
        .map(|dish| PayloadCustomItem {
            name: dish.name.clone(),
            description: dish.description.clone(),
            portion: dish.portion.as_str().to_string(),
            unit: serde_json::to_value(dish.unit)
                .ok()
                .and_then(|value| value.as_str().map(str::to_string))
                .unwrap_or_default(),
            price: dish.price.max(0.0),
            quantity: dish.quantity.max(0),
        })
        .collect();

    let charge = |item: &crate::domain::charge::ChargeItem| PayloadCharge {
        name: item.name.clone(),
        quantity: item.quantity.max(0),
        price: item.price.max(0.0),
        subcategory: item.subcategory,
    };

    ProposalPayload {
        client_id: draft.client_id,
        client_name: draft.client_name.clone(),
        client_email: draft.client_email.as_ref().map(|email| email.to_string()),
        client_phone: draft.client_phone.as_ref().map(|phone| phone.to_string()),
        event_date: draft.event_date,
        event_time: draft.event_time.clone(),
        venue: draft.venue.clone(),
        coordinator: draft.coordinator.clone(),
        service_group: draft.service_group,
        guest_count: quote.guests_for_pricing,
        items,
        custom_items,
        equipment: draft.ledger.equipment.iter().map(charge).collect(),
        services: draft.ledger.services.iter().map(charge).collect(),
        loss_charge: draft.ledger.loss_charge(),
        transport_cost: draft.ledger.transport_cost(),
        formats: draft
            .formats
            .formats()
            .iter()
            .map(|format| PayloadFormat {
                name: format.name.clone(),
                time_window: format.time_window.clone(),
                guest_count: format.guest_count.max(0),
                order_index: format.id,
            })
            .collect(),
        discount: draft.discount.clone(),
        cashback: draft.cashback.clone(),
        subtotal: quote.subtotal,
        discount_total: quote.discount.total(),
        cashback_amount: quote.cashback_amount,
        cashback_redeemed: quote.cashback_redeemed,
        total: quote.total,
        price_per_guest: quote.price_per_guest,
        total_weight_grams: quote.total_weight_grams,
        total_drink_volume_ml: quote.total_drink_volume_ml,
        weight_guest_count: quote.guests_for_weight,
        template_id: draft.template,
        send_email: draft.delivery.by_email,
        send_telegram: draft.delivery.by_telegram,
        email_message: draft.delivery.email_message.clone(),
        telegram_message: draft.delivery.telegram_message.clone(),
    }
}
