//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer. Conversions into domain types
//! re-run the value object checks, so a hand-edited row surfaces as a query
//! error rather than an invalid entity.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Age, EmailAddress, MarksRecord, Student, StudentId, StudentName, SubjectEntry,
};

use super::schema::{marks, students};

/// Row read from `students`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<StudentRow> for Student {
    type Error = String;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        let invalid = |err: crate::domain::StudentValidationError| {
            format!("stored student {} is invalid: {err}", row.id)
        };
        Ok(Self {
            id: StudentId::from_uuid(row.id),
            name: StudentName::new(&row.name).map_err(invalid)?,
            email: EmailAddress::new(&row.email).map_err(invalid)?,
            age: Age::new(i64::from(row.age)).map_err(invalid)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable student row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub age: i32,
}

/// Partial student update; `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = students)]
pub(crate) struct StudentUpdate<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub age: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

/// Row read from `marks`, either through the query builder or a raw
/// `RETURNING` clause.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = marks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MarksRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub subjects: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<MarksRow> for MarksRecord {
    type Error = String;

    fn try_from(row: MarksRow) -> Result<Self, Self::Error> {
        let subjects: Vec<SubjectEntry> = serde_json::from_value(row.subjects)
            .map_err(|err| format!("stored marks {} are invalid: {err}", row.id))?;
        Ok(Self {
            id: row.id,
            student_id: StudentId::from_uuid(row.student_id),
            subjects,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
