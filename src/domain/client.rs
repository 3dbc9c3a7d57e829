//! Clients and their event-metadata autofill sources.
//!
//! All of these are read-only snapshots served by external registries;
//! selecting a client pre-populates the draft's contact and event fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientEmail, ClientId, ClientName, PhoneNumber};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub name: ClientName,
    pub email: Option<ClientEmail>,
    pub phone: Option<PhoneNumber>,
    /// Cashback wallet balance, gates "redeem now".
    #[serde(default)]
    pub wallet_balance: f64,
    /// Event fields remembered from the client's previous orders.
    #[serde(default)]
    pub last_event_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_event_venue: Option<String>,
}

/// Event metadata collected by a coordinator checklist. Preferred autofill
/// source when both a checklist and a questionnaire exist.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Checklist {
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub event_time: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub guest_count: Option<i32>,
    #[serde(default)]
    pub coordinator: Option<String>,
}

/// Legacy self-service questionnaire; used only when no checklist exists.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Questionnaire {
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub guest_count: Option<i32>,
}
