//! PostgreSQL-backed `StudentRepository` implementation using Diesel ORM.
//!
//! Email uniqueness is enforced by the `students_email_key` constraint; a
//! violation on insert or update surfaces as
//! [`StudentRepositoryError::DuplicateEmail`].

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{NewStudent, Student, StudentChanges, StudentId};

use super::error_mapping::{
    DieselFailure, classify_diesel_error, map_basic_diesel_error, to_sql_offset,
};
use super::models::{NewStudentRow, StudentRow, StudentUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::students;

/// Diesel-backed implementation of the student repository port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StudentRepositoryError {
    StudentRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: &diesel::result::Error) -> StudentRepositoryError {
    map_basic_diesel_error(
        error,
        |message| StudentRepositoryError::query(message),
        |message| StudentRepositoryError::connection(message),
    )
}

/// Like [`map_diesel_error`] but reports unique violations against `email`.
fn map_write_error(error: &diesel::result::Error, email: &str) -> StudentRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::UniqueViolation => StudentRepositoryError::duplicate_email(email),
        _ => map_diesel_error(error),
    }
}

fn row_to_student(row: StudentRow) -> Result<Student, StudentRepositoryError> {
    Student::try_from(row).map_err(StudentRepositoryError::query)
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn insert(&self, student: &NewStudent) -> Result<Student, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewStudentRow {
            id: Uuid::new_v4(),
            name: student.name.as_ref(),
            email: student.email.as_ref(),
            age: student.age.value(),
        };

        let stored = diesel::insert_into(students::table)
            .values(&row)
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(&err, student.email.as_ref()))?;

        row_to_student(stored)
    }

    async fn list(&self, offset: u64, limit: u32) -> Result<Vec<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<StudentRow> = students::table
            .order((students::created_at.asc(), students::id.asc()))
            .offset(to_sql_offset(offset))
            .limit(i64::from(limit))
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;

        rows.into_iter().map(row_to_student).collect()
    }

    async fn count(&self) -> Result<u64, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = students::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;

        u64::try_from(total).map_err(|_| StudentRepositoryError::query("negative student count"))
    }

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StudentRow> = students::table
            .find(*id.as_uuid())
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err))?;

        row.map(row_to_student).transpose()
    }

    async fn update(
        &self,
        id: &StudentId,
        changes: &StudentChanges,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = StudentUpdate {
            name: changes.name.as_ref().map(AsRef::as_ref),
            email: changes.email.as_ref().map(AsRef::as_ref),
            age: changes.age.map(|age| age.value()),
            updated_at: Utc::now(),
        };

        let row: Option<StudentRow> = diesel::update(students::table.find(*id.as_uuid()))
            .set(&update)
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(&err, update.email.unwrap_or_default()))?;

        row.map(row_to_student).transpose()
    }

    async fn delete(&self, id: &StudentId) -> Result<bool, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(students::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;

        Ok(removed > 0)
    }
}
