//! Collaborator boundary of the builder.
//!
//! Reference registries (catalog, benefits, clients, templates), the
//! proposal persistence/rendering services, and the local draft store are
//! all consumed through these traits, so the service layer stays testable
//! against mocks and the engine owns no transport.

use chrono::NaiveDateTime;

use crate::domain::benefit::Benefit;
use crate::domain::client::{Checklist, Client, Questionnaire};
use crate::domain::dish::CatalogDish;
use crate::domain::template::Template;
use crate::domain::types::{ClientId, DraftKey, ProposalId, TemplateId};
use crate::dto::payload::ProposalPayload;
use crate::repository::errors::RepositoryResult;

pub mod draft;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// A stored draft row as the repository sees it: the payload stays an opaque
/// JSON string, tolerant decoding happens in the draft module.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDraft {
    pub key: DraftKey,
    pub payload: String,
    pub updated_at: NaiveDateTime,
}

pub trait CatalogReader {
    /// Active dishes, fetched once per builder session.
    fn list_dishes(&self) -> RepositoryResult<Vec<CatalogDish>>;
}

pub trait BenefitReader {
    fn list_benefits(&self) -> RepositoryResult<Vec<Benefit>>;
}

pub trait ClientReader {
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
}

/// Event-metadata autofill sources for a client.
pub trait EventSourceReader {
    fn latest_checklist(&self, client_id: ClientId) -> RepositoryResult<Option<Checklist>>;
    fn latest_questionnaire(&self, client_id: ClientId) -> RepositoryResult<Option<Questionnaire>>;
}

pub trait TemplateReader {
    fn list_templates(&self) -> RepositoryResult<Vec<Template>>;
}

pub trait ProposalWriter {
    fn create_proposal(&self, payload: &ProposalPayload) -> RepositoryResult<ProposalId>;
    fn update_proposal(&self, id: ProposalId, payload: &ProposalPayload) -> RepositoryResult<()>;
}

pub trait ProposalReader {
    fn get_proposal(&self, id: ProposalId) -> RepositoryResult<Option<ProposalPayload>>;
}

/// Rendering of a persisted proposal into an output document.
pub trait ProposalRenderer {
    fn generate(&self, proposal_id: ProposalId, template_id: TemplateId)
    -> RepositoryResult<Vec<u8>>;
}

pub trait DraftReader {
    fn get_draft(&self, key: DraftKey) -> RepositoryResult<Option<StoredDraft>>;
    /// All stored drafts with their last-write stamps, newest first.
    fn list_drafts(&self) -> RepositoryResult<Vec<StoredDraft>>;
}

pub trait DraftWriter {
    fn upsert_draft(&self, key: DraftKey, payload: &str) -> RepositoryResult<()>;
    fn delete_draft(&self, key: DraftKey) -> RepositoryResult<()>;
    /// Removes drafts last written before the cutoff, returning the count.
    fn purge_stale_drafts(&self, before: NaiveDateTime) -> RepositoryResult<usize>;
}
