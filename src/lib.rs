//! Commercial-proposal ("КП") builder engine for catering and event services.
//!
//! The crate models one proposal being built: the dish/line-item ledger, the
//! event sub-formats, discount and cashback selections, the seven-step
//! workflow with forward gates, pricing, and the durable draft store backing
//! the session. Catalog, benefit, client, template, persistence, and
//! rendering registries are external collaborators consumed through the
//! traits in [`repository`].

pub mod db;
pub mod domain;
pub mod draft;
pub mod dto;
pub mod forms;
pub mod models;
pub mod pricing;
pub mod repository;
pub mod schema;
pub mod services;
pub mod steps;
