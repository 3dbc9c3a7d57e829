use crate::domain::benefit::BenefitIndex;
use crate::domain::client::Client;
use crate::domain::dish::CatalogIndex;
use crate::domain::proposal::ProposalDraft;
use crate::domain::types::{BenefitId, ProposalId, TemplateId};
use crate::draft::Autosave;
use crate::dto::payload::build_payload;
use crate::pricing::discount::{can_redeem, resolve_cashback, resolve_discount};
use crate::repository::{DraftWriter, ProposalRenderer, ProposalWriter};
use crate::services::draft::save_draft;
use crate::services::{ServiceError, ServiceResult};
use crate::steps::{self, Step};

/// Tries to move one step forward. A successful transition is persisted
/// immediately and any pending debounce is superseded by that write.
pub fn advance_step<R>(
    repo: &R,
    autosave: &mut Autosave,
    draft: &mut ProposalDraft,
) -> ServiceResult<Step>
where
    R: DraftWriter + ?Sized,
{
    let step = steps::advance(draft)?;
    autosave.cancel();
    save_draft(repo, draft)?;
    Ok(step)
}

/// Moves back to an earlier step; never gated, also persisted immediately.
pub fn step_back<R>(
    repo: &R,
    autosave: &mut Autosave,
    draft: &mut ProposalDraft,
    target: Step,
) -> ServiceResult<Step>
where
    R: DraftWriter + ?Sized,
{
    let step = steps::step_back(draft, target);
    autosave.cancel();
    save_draft(repo, draft)?;
    Ok(step)
}

/// Applies a cashback selection. Choosing a benefit is always allowed;
/// switching "redeem now" on is refused while the client's wallet does not
/// cover the computed amount, and the flag stays off.
pub fn select_cashback(
    draft: &mut ProposalDraft,
    catalog: &CatalogIndex,
    benefits: &BenefitIndex,
    client: Option<&Client>,
    benefit: Option<BenefitId>,
    redeem: bool,
) -> ServiceResult<()> {
    draft.cashback.benefit = benefit;
    if !redeem || benefit.is_none() {
        draft.cashback.redeem = false;
        return Ok(());
    }

    let discount = resolve_discount(draft, catalog, benefits);
    let amount = resolve_cashback(draft, catalog, benefits, &discount);
    let wallet = client.map(|client| client.wallet_balance).unwrap_or(0.0);
    if !can_redeem(wallet, amount) {
        draft.cashback.redeem = false;
        return Err(ServiceError::Conflict(
            "Недостаточно средств на бонусном счёте клиента".to_string(),
        ));
    }

    draft.cashback.redeem = true;
    Ok(())
}

/// Validates and submits the finished draft to the persistence service.
///
/// The draft itself is not mutated: on success the stored draft slot is
/// cleared and the pending autosave disarmed, on any failure both the
/// in-memory and the stored state survive untouched and the call is safe to
/// retry.
pub fn submit_proposal<R, D>(
    repo: &R,
    drafts: &D,
    autosave: &mut Autosave,
    draft: &ProposalDraft,
    catalog: &CatalogIndex,
    benefits: &BenefitIndex,
    client: Option<&Client>,
) -> ServiceResult<ProposalId>
where
    R: ProposalWriter + ?Sized,
    D: DraftWriter + ?Sized,
{
    let violations = steps::submission_violations(draft);
    if !violations.is_empty() {
        return Err(steps::StepBlocked { violations }.into());
    }

    if draft.discount.is_legacy() && draft.cashback.is_set() {
        return Err(ServiceError::Conflict(
            "Общая скидка по КП и кэшбэк не применяются одновременно".to_string(),
        ));
    }

    if draft.cashback.redeem {
        let discount = resolve_discount(draft, catalog, benefits);
        let amount = resolve_cashback(draft, catalog, benefits, &discount);
        let wallet = client.map(|client| client.wallet_balance).unwrap_or(0.0);
        if !can_redeem(wallet, amount) {
            return Err(ServiceError::Conflict(
                "Недостаточно средств на бонусном счёте клиента".to_string(),
            ));
        }
    }

    let payload = build_payload(draft, catalog, benefits);
    let proposal_id = match draft.proposal_id {
        Some(id) => {
            repo.update_proposal(id, &payload).map_err(|err| {
                log::error!("Failed to update proposal {id}: {err}");
                err
            })?;
            id
        }
        None => repo.create_proposal(&payload).map_err(|err| {
            log::error!("Failed to create proposal: {err}");
            err
        })?,
    };

    autosave.cancel();
    if let Err(err) = drafts.delete_draft(draft.draft_key) {
        // The proposal is persisted; a leftover draft row is only noise.
        log::warn!("Failed to clear draft {}: {err}", draft.draft_key);
    }

    Ok(proposal_id)
}

/// Renders a persisted proposal with the given template. Failures are
/// reported to the caller and never affect the surrounding flow.
pub fn render_preview<R>(
    repo: &R,
    proposal_id: ProposalId,
    template_id: TemplateId,
) -> ServiceResult<Vec<u8>>
where
    R: ProposalRenderer + ?Sized,
{
    repo.generate(proposal_id, template_id).map_err(|err| {
        log::error!("Failed to render proposal {proposal_id}: {err}");
        ServiceError::from(err)
    })
}
