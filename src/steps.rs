//! The ordered builder workflow: seven steps, gated forward transitions,
//! unrestricted backward navigation.
//!
//! Gate failures are data, not exceptions: the caller receives one message
//! per violated rule and the current step stays unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::proposal::ProposalDraft;

/// Builder phases in forward order.
#[derive(
    Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum Step {
    /// Client identity and event metadata.
    #[default]
    ClientAndEvent,
    /// Catalog and custom dish selection.
    DishSelection,
    /// Equipment line items and the loss charge.
    EquipmentCalc,
    /// Service line items and transport.
    ServiceCalc,
    /// Event formats and per-format dish assignment.
    Constructor,
    /// Totals review.
    Preview,
    /// Template choice and delivery channels; submission lives here.
    TemplateAndSend,
}

impl Step {
    pub const ALL: [Step; 7] = [
        Step::ClientAndEvent,
        Step::DishSelection,
        Step::EquipmentCalc,
        Step::ServiceCalc,
        Step::Constructor,
        Step::Preview,
        Step::TemplateAndSend,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|step| *step == self).unwrap_or(0)
    }

    pub fn next(self) -> Option<Step> {
        Self::ALL.get(self.index() + 1).copied()
    }
}

/// One violated forward-gate rule, rendered as a field-level message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateViolation {
    /// Machine-readable field tag for the UI to anchor the message.
    pub field: &'static str,
    /// User-facing message.
    pub message: &'static str,
}

impl GateViolation {
    const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// A forward transition (or submission) was refused; the step is unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("переход заблокирован: {}", messages(.violations))]
pub struct StepBlocked {
    pub violations: Vec<GateViolation>,
}

fn messages(violations: &[GateViolation]) -> String {
    violations
        .iter()
        .map(|violation| violation.message)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Rules that must hold before leaving the given step forward.
pub fn forward_gate_violations(draft: &ProposalDraft) -> Vec<GateViolation> {
    let mut violations = Vec::new();
    match draft.step {
        Step::ClientAndEvent => {
            if draft.client_name.trim().is_empty() {
                violations.push(GateViolation::new("client_name", "Укажите имя клиента"));
            }
            if draft.event_date.is_none() {
                violations.push(GateViolation::new("event_date", "Укажите дату мероприятия"));
            }
            if draft.service_group.is_none() {
                violations.push(GateViolation::new(
                    "service_group",
                    "Выберите формат обслуживания: бокс или кейтеринг",
                ));
            }
            if draft.existing_client && draft.client_id.is_none() {
                violations.push(GateViolation::new(
                    "client_id",
                    "Выберите клиента из списка",
                ));
            }
        }
        Step::DishSelection => {
            if !draft.ledger.has_priceable_dishes() {
                violations.push(GateViolation::new(
                    "dishes",
                    "Добавьте хотя бы одно блюдо в предложение",
                ));
            }
            if draft.ledger.unnamed_custom_count() > 0 {
                violations.push(GateViolation::new(
                    "custom_dishes",
                    "У каждого добавленного вручную блюда должно быть название",
                ));
            }
        }
        _ => {}
    }
    violations
}

/// Rules that must hold before submission is enabled on the final step.
pub fn submission_violations(draft: &ProposalDraft) -> Vec<GateViolation> {
    let mut violations = Vec::new();
    if draft.step != Step::TemplateAndSend {
        violations.push(GateViolation::new(
            "step",
            "Отправка доступна только на последнем шаге",
        ));
    }
    if draft.template.is_none() {
        violations.push(GateViolation::new("template", "Выберите шаблон КП"));
    }
    if draft.delivery.by_email && draft.client_email.is_none() {
        violations.push(GateViolation::new(
            "client_email",
            "Укажите email клиента для отправки письма",
        ));
    }
    violations
}

/// Attempts to move one step forward. On success the draft's step advances
/// and the new step is returned; on failure the draft is untouched.
pub fn advance(draft: &mut ProposalDraft) -> Result<Step, StepBlocked> {
    let violations = forward_gate_violations(draft);
    if !violations.is_empty() {
        return Err(StepBlocked { violations });
    }
    if let Some(next) = draft.step.next() {
        draft.step = next;
    }
    Ok(draft.step)
}

/// Moves to any earlier step. Backward navigation is never gated; a request
/// for the current or a later step is ignored.
pub fn step_back(draft: &mut ProposalDraft, target: Step) -> Step {
    if target.index() < draft.step.index() {
        draft.step = target;
    }
    draft.step
}
