//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by the builder host and the draft janitor.
pub struct AppConfig {
    pub database_url: String,
    /// Debounce window for draft autosave, milliseconds.
    #[serde(default = "default_autosave_debounce_ms")]
    pub autosave_debounce_ms: u64,
    /// Drafts idle longer than this are purged by the janitor.
    #[serde(default = "default_draft_retention_days")]
    pub draft_retention_days: i64,
}

fn default_autosave_debounce_ms() -> u64 {
    500
}

fn default_draft_retention_days() -> i64 {
    30
}
