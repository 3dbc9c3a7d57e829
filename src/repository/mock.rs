//! Mock repository implementations for isolating services in tests.

use chrono::NaiveDateTime;
use mockall::mock;

use crate::domain::benefit::Benefit;
use crate::domain::client::{Checklist, Client, Questionnaire};
use crate::domain::dish::CatalogDish;
use crate::domain::template::Template;
use crate::domain::types::{ClientId, DraftKey, ProposalId, TemplateId};
use crate::dto::payload::ProposalPayload;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    BenefitReader, CatalogReader, ClientReader, DraftReader, DraftWriter, EventSourceReader,
    ProposalReader, ProposalRenderer, ProposalWriter, StoredDraft, TemplateReader,
};

mock! {
    pub Repository {}

    impl CatalogReader for Repository {
        fn list_dishes(&self) -> RepositoryResult<Vec<CatalogDish>>;
    }

    impl BenefitReader for Repository {
        fn list_benefits(&self) -> RepositoryResult<Vec<Benefit>>;
    }

    impl ClientReader for Repository {
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    }

    impl EventSourceReader for Repository {
        fn latest_checklist(&self, client_id: ClientId) -> RepositoryResult<Option<Checklist>>;
        fn latest_questionnaire(
            &self,
            client_id: ClientId,
        ) -> RepositoryResult<Option<Questionnaire>>;
    }

    impl TemplateReader for Repository {
        fn list_templates(&self) -> RepositoryResult<Vec<Template>>;
    }

    impl ProposalWriter for Repository {
        fn create_proposal(&self, payload: &ProposalPayload) -> RepositoryResult<ProposalId>;
        fn update_proposal(
            &self,
            id: ProposalId,
            payload: &ProposalPayload,
        ) -> RepositoryResult<()>;
    }

    impl ProposalReader for Repository {
        fn get_proposal(&self, id: ProposalId) -> RepositoryResult<Option<ProposalPayload>>;
    }

    impl ProposalRenderer for Repository {
        fn generate(
            &self,
            proposal_id: ProposalId,
            template_id: TemplateId,
        ) -> RepositoryResult<Vec<u8>>;
    }

    impl DraftReader for Repository {
        fn get_draft(&self, key: DraftKey) -> RepositoryResult<Option<StoredDraft>>;
        fn list_drafts(&self) -> RepositoryResult<Vec<StoredDraft>>;
    }

    impl DraftWriter for Repository {
        fn upsert_draft(&self, key: DraftKey, payload: &str) -> RepositoryResult<()>;
        fn delete_draft(&self, key: DraftKey) -> RepositoryResult<()>;
        fn purge_stale_drafts(&self, before: NaiveDateTime) -> RepositoryResult<usize>;
    }
}
