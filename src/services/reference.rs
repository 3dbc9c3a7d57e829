use crate::domain::benefit::BenefitIndex;
use crate::domain::client::Client;
use crate::domain::dish::CatalogIndex;
use crate::domain::proposal::ProposalDraft;
use crate::domain::template::Template;
use crate::domain::types::ClientId;
use crate::repository::{
    BenefitReader, CatalogReader, ClientReader, EventSourceReader, TemplateReader,
};
use crate::services::{ServiceError, ServiceResult};

/// Fetches the active dish catalog for this builder session.
pub fn load_catalog<R>(repo: &R) -> ServiceResult<CatalogIndex>
where
    R: CatalogReader + ?Sized,
{
    let dishes = repo.list_dishes().map_err(|err| {
        log::error!("Failed to load catalog: {err}");
        err
    })?;
    Ok(CatalogIndex::new(
        dishes.into_iter().filter(|dish| dish.is_active).collect(),
    ))
}

/// Fetches active benefits.
pub fn load_benefits<R>(repo: &R) -> ServiceResult<BenefitIndex>
where
    R: BenefitReader + ?Sized,
{
    let benefits = repo.list_benefits().map_err(|err| {
        log::error!("Failed to load benefits: {err}");
        err
    })?;
    Ok(BenefitIndex::new(
        benefits
            .into_iter()
            .filter(|benefit| benefit.is_active)
            .collect(),
    ))
}

pub fn list_clients<R>(repo: &R) -> ServiceResult<Vec<Client>>
where
    R: ClientReader + ?Sized,
{
    repo.list_clients().map_err(ServiceError::from)
}

pub fn list_templates<R>(repo: &R) -> ServiceResult<Vec<Template>>
where
    R: TemplateReader + ?Sized,
{
    repo.list_templates().map_err(ServiceError::from)
}

/// Pre-populates the draft from an existing client and their best
/// event-metadata source. Every collaborator call completes before the
/// draft is touched, so a failed fetch leaves it exactly as it was.
pub fn autofill_from_client<R>(
    repo: &R,
    draft: &mut ProposalDraft,
    client_id: ClientId,
) -> ServiceResult<()>
where
    R: ClientReader + EventSourceReader + ?Sized,
{
    let client = repo
        .get_client_by_id(client_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;
    let checklist = repo.latest_checklist(client_id).map_err(|err| {
        log::error!("Failed to load checklist for client {client_id}: {err}");
        err
    })?;
    let questionnaire = repo.latest_questionnaire(client_id).map_err(|err| {
        log::error!("Failed to load questionnaire for client {client_id}: {err}");
        err
    })?;

    draft.apply_client(&client);
    draft.apply_event_source(checklist.as_ref(), questionnaire.as_ref());
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::client::Checklist;
    use crate::domain::types::ClientName;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn client(id: i32) -> Client {
        Client {
            id: ClientId::new(id).unwrap(),
            name: ClientName::new("ООО Ромашка").unwrap(),
            email: None,
            phone: None,
            wallet_balance: 0.0,
            last_event_date: None,
            last_event_venue: None,
        }
    }

    #[test]
    fn autofill_prefers_checklist() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .returning(|id| Ok(Some(client(id.get()))));
        repo.expect_latest_checklist().returning(|_| {
            Ok(Some(Checklist {
                venue: Some("Лофт на Неве".to_string()),
                ..Checklist::default()
            }))
        });
        repo.expect_latest_questionnaire().returning(|_| Ok(None));

        let mut draft = ProposalDraft::default();
        autofill_from_client(&repo, &mut draft, ClientId::new(3).unwrap()).unwrap();
        assert_eq!(draft.client_name, "ООО Ромашка");
        assert_eq!(draft.venue, "Лофт на Неве");
    }

    #[test]
    fn failed_fetch_leaves_draft_untouched() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .returning(|id| Ok(Some(client(id.get()))));
        repo.expect_latest_checklist()
            .returning(|_| Err(RepositoryError::Backend("timeout".to_string())));

        let mut draft = ProposalDraft::default();
        let before = draft.clone();
        let err = autofill_from_client(&repo, &mut draft, ClientId::new(3).unwrap()).unwrap_err();
        assert!(matches!(err, ServiceError::Repository(_)));
        assert_eq!(draft, before);
    }
}
