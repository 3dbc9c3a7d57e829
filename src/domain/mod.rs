//! Domain aggregates exposed by the proposal-builder service layer.
//!
//! No I/O in this layer; malformed numeric input degrades to zero so every
//! intermediate draft state stays computable.

pub mod benefit;
pub mod charge;
pub mod client;
pub mod discount;
pub mod dish;
pub mod event_format;
pub mod ledger;
pub mod proposal;
pub mod template;
pub mod types;
pub mod units;
