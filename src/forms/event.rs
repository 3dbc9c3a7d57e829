use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::event_format::ServiceGroup;
use crate::domain::proposal::ProposalDraft;
use crate::domain::types::{ClientEmail, ClientId, PhoneNumber};
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
/// Form data for the client-and-event step.
pub struct EventDetailsForm {
    /// Whether the user picked an existing client instead of typing one in.
    #[serde(default)]
    pub existing_client: bool,
    /// Reference to the picked client, when `existing_client` is set.
    #[serde(default)]
    pub client_id: Option<i32>,
    /// Client display name.
    #[validate(length(min = 1))]
    pub client_name: String,
    /// Contact email; empty means none.
    #[serde(default)]
    pub client_email: String,
    /// Contact phone; empty means none.
    #[serde(default)]
    pub client_phone: String,
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub event_time: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub coordinator: String,
    /// `box` or `catering`; empty means not chosen yet.
    #[serde(default)]
    pub service_group: String,
    #[serde(default)]
    pub guest_count: Option<i32>,
}

impl EventDetailsForm {
    /// Validates the form and writes it into the draft. Contact fields are
    /// normalized through the domain value objects; choosing a service group
    /// reconciles existing formats with it.
    pub fn apply_to(&self, draft: &mut ProposalDraft) -> Result<(), FormError> {
        self.validate()?;

        let email = match self.client_email.trim() {
            "" => None,
            raw => Some(ClientEmail::new(raw).map_err(|_| FormError::InvalidEmail)?),
        };
        let phone = match self.client_phone.trim() {
            "" => None,
            raw => Some(PhoneNumber::new(raw).map_err(|_| FormError::InvalidPhoneNumber)?),
        };
        let group = match self.service_group.trim() {
            "" => None,
            "box" => Some(ServiceGroup::BoxDelivery),
            "catering" => Some(ServiceGroup::Catering),
            _ => return Err(FormError::UnknownServiceGroup),
        };

        draft.existing_client = self.existing_client;
        draft.client_id = self
            .client_id
            .filter(|_| self.existing_client)
            .and_then(|id| ClientId::new(id).ok());
        draft.client_name = self.client_name.trim().to_string();
        draft.client_email = email;
        draft.client_phone = phone;
        draft.event_date = self.event_date;
        draft.event_time = self.event_time.trim().to_string();
        draft.venue = self.venue.trim().to_string();
        draft.coordinator = self.coordinator.trim().to_string();
        draft.guest_count = self.guest_count.filter(|count| *count > 0);
        if let Some(group) = group {
            draft.set_service_group(group);
        }
        Ok(())
    }
}
