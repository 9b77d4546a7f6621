//! PostgreSQL-backed `MarksRepository` implementation.
//!
//! Subjects live in a JSONB array on one row per student. Appends go through
//! a single `INSERT ... ON CONFLICT` so that two first writes for the same
//! student converge on one row.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Jsonb, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{MarksRepository, MarksRepositoryError};
use crate::domain::{MarksRecord, StudentId, SubjectEntry};

use super::error_mapping::map_basic_diesel_error;
use super::models::MarksRow;
use super::pool::{DbPool, PoolError};
use super::schema::marks;

const APPEND_SUBJECT_SQL: &str = r#"
INSERT INTO marks (id, student_id, subjects)
VALUES ($1, $2, $3)
ON CONFLICT (student_id)
DO UPDATE SET
    subjects = marks.subjects || EXCLUDED.subjects,
    updated_at = now()
RETURNING id, student_id, subjects, created_at, updated_at
"#;

/// Diesel-backed implementation of the marks repository port.
#[derive(Clone)]
pub struct DieselMarksRepository {
    pool: DbPool,
}

impl DieselMarksRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MarksRepositoryError {
    MarksRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: &diesel::result::Error) -> MarksRepositoryError {
    map_basic_diesel_error(
        error,
        |message| MarksRepositoryError::query(message),
        |message| MarksRepositoryError::connection(message),
    )
}

fn row_to_record(row: MarksRow) -> Result<MarksRecord, MarksRepositoryError> {
    MarksRecord::try_from(row).map_err(MarksRepositoryError::query)
}

fn encode_subjects(subjects: &[SubjectEntry]) -> Result<serde_json::Value, MarksRepositoryError> {
    serde_json::to_value(subjects)
        .map_err(|err| MarksRepositoryError::query(format!("failed to encode subjects: {err}")))
}

#[async_trait]
impl MarksRepository for DieselMarksRepository {
    async fn find_by_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<MarksRecord>, MarksRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<MarksRow> = marks::table
            .filter(marks::student_id.eq(*student_id.as_uuid()))
            .select(MarksRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err))?;

        row.map(row_to_record).transpose()
    }

    async fn append_subject(
        &self,
        student_id: &StudentId,
        entry: &SubjectEntry,
    ) -> Result<MarksRecord, MarksRepositoryError> {
        let subjects = encode_subjects(std::slice::from_ref(entry))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: MarksRow = sql_query(APPEND_SUBJECT_SQL)
            .bind::<SqlUuid, _>(Uuid::new_v4())
            .bind::<SqlUuid, _>(*student_id.as_uuid())
            .bind::<Jsonb, _>(subjects)
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;

        row_to_record(row)
    }

    async fn replace_subjects(
        &self,
        student_id: &StudentId,
        subjects: &[SubjectEntry],
    ) -> Result<Option<MarksRecord>, MarksRepositoryError> {
        let encoded = encode_subjects(subjects)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<MarksRow> =
            diesel::update(marks::table.filter(marks::student_id.eq(*student_id.as_uuid())))
                .set((marks::subjects.eq(encoded), marks::updated_at.eq(Utc::now())))
                .returning(MarksRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|err| map_diesel_error(&err))?;

        row.map(row_to_record).transpose()
    }

    async fn delete_by_student(&self, student_id: &StudentId) -> Result<bool, MarksRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed =
            diesel::delete(marks::table.filter(marks::student_id.eq(*student_id.as_uuid())))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(&err))?;

        Ok(removed > 0)
    }
}
