//! Draft snapshots and the autosave scheduler.
//!
//! Encoding is plain JSON; decoding is total. A missing, partial, or
//! corrupt payload yields a usable draft (missing fields defaulted, unknown
//! fields ignored, unparseable text replaced by a fresh draft under the
//! same key), so restore can never fail a builder session.

use std::time::{Duration, Instant};

use crate::domain::proposal::ProposalDraft;
use crate::domain::types::DraftKey;

/// Quiet period after the last mutation before the draft is flushed.
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Serializes the aggregate for storage.
pub fn encode(draft: &ProposalDraft) -> serde_json::Result<String> {
    serde_json::to_string(draft)
}

/// Rebuilds a draft from a stored payload. Always succeeds; the returned
/// draft carries the requested key even when the payload predates it.
pub fn decode(key: DraftKey, payload: Option<&str>) -> ProposalDraft {
    let mut draft = payload
        .and_then(|payload| match serde_json::from_str::<ProposalDraft>(payload) {
            Ok(draft) => Some(draft),
            Err(err) => {
                log::warn!("Discarding unreadable draft {key}: {err}");
                None
            }
        })
        .unwrap_or_default();
    draft.draft_key = key;
    draft
}

/// Debounced save scheduler with last-write-wins semantics.
///
/// Mutations call [`Autosave::mark_dirty`]; the host polls
/// [`Autosave::take_due`] on its tick and flushes when it fires. Step
/// transitions flush immediately and [`Autosave::cancel`] disarms any
/// pending write so a cleared draft cannot be resurrected by a late timer.
#[derive(Debug, Clone)]
pub struct Autosave {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for Autosave {
    fn default() -> Self {
        Self::new(AUTOSAVE_DEBOUNCE)
    }
}

impl Autosave {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Records a mutation, re-arming the deadline from `now`.
    pub fn mark_dirty(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consumes the deadline when it has passed. Returns whether the caller
    /// should flush.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Disarms without saving.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_missing_payload_yields_fresh_draft_under_key() {
        let key = DraftKey::new();
        let draft = decode(key, None);
        assert_eq!(draft.draft_key, key);
        assert_eq!(draft, ProposalDraft {
            draft_key: key,
            ..ProposalDraft::default()
        });
    }

    #[test]
    fn decode_corrupt_payload_never_fails() {
        let key = DraftKey::new();
        let draft = decode(key, Some("{not json"));
        assert_eq!(draft.draft_key, key);
        assert_eq!(draft.client_name, "");
    }

    #[test]
    fn decode_is_idempotent() {
        let mut original = ProposalDraft::default();
        original.client_name = "ООО Ромашка".to_string();
        original.formats.create("Банкет");
        let payload = encode(&original).unwrap();

        let once = decode(original.draft_key, Some(&payload));
        let twice = decode(original.draft_key, Some(&encode(&once).unwrap()));
        assert_eq!(once, original);
        assert_eq!(twice, once);
    }

    #[test]
    fn autosave_fires_only_after_the_quiet_period() {
        let mut autosave = Autosave::default();
        let start = Instant::now();
        autosave.mark_dirty(start);

        assert!(!autosave.take_due(start + Duration::from_millis(100)));
        // A new mutation pushes the deadline out.
        autosave.mark_dirty(start + Duration::from_millis(400));
        assert!(!autosave.take_due(start + Duration::from_millis(600)));
        assert!(autosave.take_due(start + Duration::from_millis(900)));
        // Consumed: a second tick does not fire again.
        assert!(!autosave.take_due(start + Duration::from_secs(5)));
    }

    #[test]
    fn cancel_disarms_pending_save() {
        let mut autosave = Autosave::default();
        let start = Instant::now();
        autosave.mark_dirty(start);
        autosave.cancel();
        assert!(!autosave.is_pending());
        assert!(!autosave.take_due(start + Duration::from_secs(1)));
    }
}
