use std::time::Instant;

use crate::domain::proposal::ProposalDraft;
use crate::domain::types::DraftKey;
use crate::draft::{Autosave, decode, encode};
use crate::repository::{DraftReader, DraftWriter};
use crate::services::{ServiceError, ServiceResult};

/// Persists the full draft snapshot immediately.
pub fn save_draft<R>(repo: &R, draft: &ProposalDraft) -> ServiceResult<()>
where
    R: DraftWriter + ?Sized,
{
    let payload = encode(draft).map_err(|err| {
        log::error!("Failed to serialize draft {}: {err}", draft.draft_key);
        ServiceError::Internal(err.to_string())
    })?;
    repo.upsert_draft(draft.draft_key, &payload)
        .map_err(ServiceError::from)
}

/// Restores the draft stored under the key, or a fresh one when the slot is
/// empty or unreadable. Restoring twice yields the same state as once.
pub fn restore_draft<R>(repo: &R, key: DraftKey) -> ServiceResult<ProposalDraft>
where
    R: DraftReader + ?Sized,
{
    let stored = repo.get_draft(key).map_err(ServiceError::from)?;
    Ok(decode(key, stored.as_ref().map(|row| row.payload.as_str())))
}

/// Drops the stored draft and disarms any pending autosave so a late timer
/// cannot resurrect the cleared state.
pub fn discard_draft<R>(repo: &R, autosave: &mut Autosave, key: DraftKey) -> ServiceResult<()>
where
    R: DraftWriter + ?Sized,
{
    autosave.cancel();
    repo.delete_draft(key).map_err(ServiceError::from)
}

/// Debounce tick: flushes the draft when its quiet period has elapsed.
/// Returns whether a save happened.
pub fn autosave_tick<R>(
    repo: &R,
    autosave: &mut Autosave,
    draft: &ProposalDraft,
    now: Instant,
) -> ServiceResult<bool>
where
    R: DraftWriter + ?Sized,
{
    if !autosave.take_due(now) {
        return Ok(false);
    }
    save_draft(repo, draft)?;
    Ok(true)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use std::time::Duration;

    #[test]
    fn tick_before_deadline_does_not_touch_storage() {
        let mut autosave = Autosave::default();
        let draft = ProposalDraft::default();
        let now = Instant::now();
        autosave.mark_dirty(now);

        let repo = MockRepository::new();
        let saved = autosave_tick(&repo, &mut autosave, &draft, now).unwrap();
        assert!(!saved);
    }

    #[test]
    fn tick_after_deadline_saves_once() {
        let mut autosave = Autosave::default();
        let draft = ProposalDraft::default();
        let now = Instant::now();
        autosave.mark_dirty(now);

        let mut repo = MockRepository::new();
        repo.expect_upsert_draft().times(1).returning(|_, _| Ok(()));

        let later = now + Duration::from_secs(1);
        assert!(autosave_tick(&repo, &mut autosave, &draft, later).unwrap());
        assert!(!autosave_tick(&repo, &mut autosave, &draft, later).unwrap());
    }

    #[test]
    fn discard_cancels_pending_save() {
        let mut autosave = Autosave::default();
        autosave.mark_dirty(Instant::now());

        let mut repo = MockRepository::new();
        repo.expect_delete_draft().times(1).returning(|_| Ok(()));

        discard_draft(&repo, &mut autosave, DraftKey::new()).unwrap();
        assert!(!autosave.is_pending());
    }
}
