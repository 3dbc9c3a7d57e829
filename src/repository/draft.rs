use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::db::DbPool;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DraftReader, DraftWriter, StoredDraft};
use crate::domain::types::DraftKey;

/// Diesel/SQLite implementation of the local draft store.
#[derive(Clone)]
pub struct DieselDraftRepository {
    pool: DbPool,
}

impl DieselDraftRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl DraftReader for DieselDraftRepository {
    fn get_draft(&self, key: DraftKey) -> RepositoryResult<Option<StoredDraft>> {
        use crate::models::draft::DraftRow;
        use crate::schema::drafts;

        let mut conn = self.pool.get()?;
        let row = drafts::table
            .find(key.to_string())
            .first::<DraftRow>(&mut conn)
            .optional()?;

        // A row whose key does not parse back is treated as absent rather
        // than surfaced; restore must stay total.
        Ok(row.and_then(|row| StoredDraft::try_from(row).ok()))
    }

    fn list_drafts(&self) -> RepositoryResult<Vec<StoredDraft>> {
        use crate::models::draft::DraftRow;
        use crate::schema::drafts;

        let mut conn = self.pool.get()?;
        let rows = drafts::table
            .order(drafts::updated_at.desc())
            .load::<DraftRow>(&mut conn)?;

        Ok(rows
            .into_iter()
            .filter_map(|row| StoredDraft::try_from(row).ok())
            .collect())
    }
}

impl DraftWriter for DieselDraftRepository {
    fn upsert_draft(&self, key: DraftKey, payload: &str) -> RepositoryResult<()> {
        use crate::models::draft::NewDraftRow;
        use crate::schema::drafts;

        let mut conn = self.pool.get()?;
        let key = key.to_string();
        let row = NewDraftRow {
            key: &key,
            payload,
            updated_at: Utc::now().naive_utc(),
        };

        diesel::insert_into(drafts::table)
            .values(&row)
            .on_conflict(drafts::key)
            .do_update()
            .set((
                drafts::payload.eq(payload),
                drafts::updated_at.eq(row.updated_at),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    fn delete_draft(&self, key: DraftKey) -> RepositoryResult<()> {
        use crate::schema::drafts;

        let mut conn = self.pool.get()?;
        diesel::delete(drafts::table.find(key.to_string())).execute(&mut conn)?;

        Ok(())
    }

    fn purge_stale_drafts(&self, before: NaiveDateTime) -> RepositoryResult<usize> {
        use crate::schema::drafts;

        let mut conn = self.pool.get()?;
        let removed = diesel::delete(drafts::table.filter(drafts::updated_at.lt(before)))
            .execute(&mut conn)?;

        Ok(removed)
    }
}
