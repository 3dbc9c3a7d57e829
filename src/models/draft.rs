use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::repository::StoredDraft;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::drafts)]
#[diesel(primary_key(key))]
/// Diesel model for a stored [`crate::domain::proposal::ProposalDraft`]
/// snapshot. The payload column is the opaque JSON text.
pub struct DraftRow {
    pub key: String,
    pub payload: String,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::drafts)]
/// Insertable/updatable form of [`DraftRow`].
pub struct NewDraftRow<'a> {
    pub key: &'a str,
    pub payload: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<DraftRow> for StoredDraft {
    type Error = crate::domain::types::TypeConstraintError;

    fn try_from(row: DraftRow) -> Result<Self, Self::Error> {
        Ok(Self {
            key: row.key.parse()?,
            payload: row.payload,
            updated_at: row.updated_at,
        })
    }
}
