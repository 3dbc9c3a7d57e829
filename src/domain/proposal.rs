//! The `ProposalDraft` aggregate: the complete in-progress state of one
//! commercial proposal being built.
//!
//! Every field defaults, so a partially stored draft always deserializes;
//! unknown fields from older versions are ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::client::{Checklist, Client, Questionnaire};
use crate::domain::dish::DishKey;
use crate::domain::discount::{CashbackSelection, DiscountPolicy};
use crate::domain::event_format::{EventFormatRegistry, ServiceGroup};
use crate::domain::ledger::LineItemLedger;
use crate::domain::types::{
    CatalogDishId, ClientEmail, ClientId, DraftKey, PhoneNumber, ProposalId, TemplateId,
};
use crate::steps::Step;

/// Outbound delivery channels and their message bodies.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DeliverySettings {
    #[serde(default)]
    pub by_email: bool,
    #[serde(default)]
    pub by_telegram: bool,
    #[serde(default)]
    pub email_message: String,
    #[serde(default)]
    pub telegram_message: String,
}

impl DeliverySettings {
    /// Stores a sanitized email body; markup is stripped before the text
    /// ever reaches the draft.
    pub fn set_email_message<S: AsRef<str>>(&mut self, message: S) {
        self.email_message = ammonia::clean(message.as_ref());
    }

    pub fn set_telegram_message<S: AsRef<str>>(&mut self, message: S) {
        self.telegram_message = ammonia::clean(message.as_ref());
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProposalDraft {
    /// Storage key for this draft slot.
    pub draft_key: DraftKey,
    /// Set when editing an already persisted proposal.
    pub proposal_id: Option<ProposalId>,

    /// Whether the user picked an existing client instead of typing one in.
    pub existing_client: bool,
    pub client_id: Option<ClientId>,
    pub client_name: String,
    pub client_email: Option<ClientEmail>,
    pub client_phone: Option<PhoneNumber>,

    pub event_date: Option<NaiveDate>,
    pub event_time: String,
    pub venue: String,
    pub coordinator: String,
    pub service_group: Option<ServiceGroup>,
    /// Proposal-level guest count; when unset the format registry supplies
    /// the fallback figures.
    pub guest_count: Option<i32>,

    pub ledger: LineItemLedger,
    pub formats: EventFormatRegistry,
    pub discount: DiscountPolicy,
    pub cashback: CashbackSelection,

    pub template: Option<TemplateId>,
    pub delivery: DeliverySettings,

    pub step: Step,
}

impl Default for ProposalDraft {
    fn default() -> Self {
        Self {
            draft_key: DraftKey::new(),
            proposal_id: None,
            existing_client: false,
            client_id: None,
            client_name: String::new(),
            client_email: None,
            client_phone: None,
            event_date: None,
            event_time: String::new(),
            venue: String::new(),
            coordinator: String::new(),
            service_group: None,
            guest_count: None,
            ledger: LineItemLedger::default(),
            formats: EventFormatRegistry::default(),
            discount: DiscountPolicy::default(),
            cashback: CashbackSelection::default(),
            template: None,
            delivery: DeliverySettings::default(),
            step: Step::default(),
        }
    }
}

impl ProposalDraft {
    /// Guest count used for per-person pricing: the proposal-level figure,
    /// falling back to the **max** across formats.
    pub fn guests_for_pricing(&self) -> i32 {
        match self.guest_count {
            Some(count) if count > 0 => count,
            _ => self.formats.guests_for_pricing(),
        }
    }

    /// Guest count used for the weight/volume display: the proposal-level
    /// figure, falling back to the **sum** across formats.
    pub fn guests_for_weight(&self) -> i32 {
        match self.guest_count {
            Some(count) if count > 0 => count,
            _ => self.formats.guests_for_weight(),
        }
    }

    /// Chooses the proposal-level service group and reconciles existing
    /// formats with it.
    pub fn set_service_group(&mut self, group: ServiceGroup) {
        self.service_group = Some(group);
        self.formats.reconcile_group(group);
    }

    /// Toggles a catalog dish; on removal the dish also leaves every
    /// format's selection so no format references a dish the ledger lost.
    pub fn toggle_catalog_dish(&mut self, id: CatalogDishId) {
        let was_selected = self.ledger.is_selected(id);
        self.ledger.toggle_dish(id, self.guests_for_pricing());
        if was_selected {
            self.formats.remove_dish_everywhere(DishKey::Catalog(id));
        }
    }

    /// Pre-populates contact fields from an existing client record.
    pub fn apply_client(&mut self, client: &Client) {
        self.existing_client = true;
        self.client_id = Some(client.id);
        self.client_name = client.name.as_str().to_string();
        self.client_email = client.email.clone();
        self.client_phone = client.phone.clone();
    }

    /// Pre-populates event metadata; a checklist wins over the legacy
    /// questionnaire when both exist. Only empty fields are filled, a value
    /// the user already typed is never overwritten.
    pub fn apply_event_source(
        &mut self,
        checklist: Option<&Checklist>,
        questionnaire: Option<&Questionnaire>,
    ) {
        if let Some(checklist) = checklist {
            self.fill_event_fields(
                checklist.event_date,
                checklist.event_time.as_deref(),
                checklist.venue.as_deref(),
                checklist.guest_count,
            );
            if self.coordinator.is_empty()
                && let Some(coordinator) = checklist.coordinator.as_deref()
            {
                self.coordinator = coordinator.to_string();
            }
        } else if let Some(questionnaire) = questionnaire {
            self.fill_event_fields(
                questionnaire.event_date,
                None,
                questionnaire.venue.as_deref(),
                questionnaire.guest_count,
            );
        }
    }

    fn fill_event_fields(
        &mut self,
        date: Option<NaiveDate>,
        time: Option<&str>,
        venue: Option<&str>,
        guest_count: Option<i32>,
    ) {
        if self.event_date.is_none() {
            self.event_date = date;
        }
        if self.event_time.is_empty()
            && let Some(time) = time
        {
            self.event_time = time.to_string();
        }
        if self.venue.is_empty()
            && let Some(venue) = venue
        {
            self.venue = venue.to_string();
        }
        if self.guest_count.is_none() {
            self.guest_count = guest_count.filter(|count| *count > 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ClientName;

    #[test]
    fn restores_from_partial_json() {
        let draft: ProposalDraft =
            serde_json::from_str(r#"{"client_name":"ООО Ромашка","unknown_field":42}"#).unwrap();
        assert_eq!(draft.client_name, "ООО Ромашка");
        assert_eq!(draft.step, Step::ClientAndEvent);
        assert!(draft.ledger.selected_dishes().is_empty());
    }

    #[test]
    fn pricing_and_weight_fallbacks_differ() {
        let mut draft = ProposalDraft::default();
        let a = draft.formats.create("Welcome drink");
        let b = draft.formats.create("Банкет");
        draft.formats.set_guest_count(a, 30);
        draft.formats.set_guest_count(b, 20);
        assert_eq!(draft.guests_for_pricing(), 30);
        assert_eq!(draft.guests_for_weight(), 50);

        draft.guest_count = Some(40);
        assert_eq!(draft.guests_for_pricing(), 40);
        assert_eq!(draft.guests_for_weight(), 40);
    }

    #[test]
    fn removing_dish_clears_format_selections() {
        let mut draft = ProposalDraft::default();
        let id = CatalogDishId::new(7).unwrap();
        draft.toggle_catalog_dish(id);
        let format = draft.formats.create("Банкет");
        draft.formats.add_dish(format, DishKey::Catalog(id));

        draft.toggle_catalog_dish(id);
        assert!(!draft.ledger.is_selected(id));
        assert!(draft.formats.get(format).unwrap().dishes.is_empty());
    }

    #[test]
    fn checklist_wins_over_questionnaire() {
        let mut draft = ProposalDraft::default();
        let checklist = Checklist {
            event_date: NaiveDate::from_ymd_opt(2026, 9, 12),
            venue: Some("Лофт на Неве".to_string()),
            guest_count: Some(45),
            ..Checklist::default()
        };
        let questionnaire = Questionnaire {
            event_date: NaiveDate::from_ymd_opt(2026, 1, 1),
            venue: Some("Старый адрес".to_string()),
            guest_count: Some(10),
        };
        draft.apply_event_source(Some(&checklist), Some(&questionnaire));
        assert_eq!(draft.event_date, NaiveDate::from_ymd_opt(2026, 9, 12));
        assert_eq!(draft.venue, "Лофт на Неве");
        assert_eq!(draft.guest_count, Some(45));
    }

    #[test]
    fn user_typed_fields_survive_autofill() {
        let mut draft = ProposalDraft::default();
        draft.venue = "Уже выбрано".to_string();
        let client = Client {
            id: ClientId::new(3).unwrap(),
            name: ClientName::new("Иванова Анна").unwrap(),
            email: None,
            phone: None,
            wallet_balance: 0.0,
            last_event_date: None,
            last_event_venue: None,
        };
        draft.apply_client(&client);
        draft.apply_event_source(
            Some(&Checklist {
                venue: Some("Другая площадка".to_string()),
                ..Checklist::default()
            }),
            None,
        );
        assert_eq!(draft.client_name, "Иванова Анна");
        assert_eq!(draft.venue, "Уже выбрано");
    }

    #[test]
    fn delivery_messages_are_sanitized() {
        let mut delivery = DeliverySettings::default();
        delivery.set_email_message("<script>alert(1)</script>Здравствуйте!");
        assert_eq!(delivery.email_message, "Здравствуйте!");
    }
}
