//! Per-student marks record and its subject entries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::StudentId;

/// Validation errors raised by the marks value objects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarksValidationError {
    /// Subject is blank once trimmed.
    #[error("subject must not be empty")]
    EmptySubject,
    /// Score is negative or too large.
    #[error("marks must be a non-negative integer no greater than {max}")]
    MarksOutOfRange {
        /// Upper bound accepted.
        max: i64,
    },
}

/// Subject name, trimmed and non-empty.
///
/// Names compare case-sensitively as values; use [`SubjectName::matches`] for
/// the case-insensitive lookup used when removing subjects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectName(String);

impl SubjectName {
    /// Trim and validate a subject name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, MarksValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MarksValidationError::EmptySubject);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Case-insensitive comparison against another subject name.
    ///
    /// # Examples
    /// ```
    /// use student_records::domain::SubjectName;
    ///
    /// let stored = SubjectName::new("Math").unwrap();
    /// assert!(stored.matches(&SubjectName::new(" MATH ").unwrap()));
    /// ```
    pub fn matches(&self, other: &Self) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl AsRef<str> for SubjectName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SubjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<SubjectName> for String {
    fn from(value: SubjectName) -> Self {
        value.0
    }
}

impl TryFrom<String> for SubjectName {
    type Error = MarksValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Largest accepted score.
pub const MARKS_MAX: i64 = u32::MAX as i64;

/// Non-negative integer score for one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Marks(u32);

impl Marks {
    /// Validate a score.
    pub fn new(value: i64) -> Result<Self, MarksValidationError> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| MarksValidationError::MarksOutOfRange { max: MARKS_MAX })
    }

    /// Numeric value.
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<Marks> for i64 {
    fn from(value: Marks) -> Self {
        Self::from(value.0)
    }
}

impl TryFrom<i64> for Marks {
    type Error = MarksValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// One `{subject, marks}` pair inside a marks record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectEntry {
    /// Subject name.
    pub subject: SubjectName,
    /// Score achieved.
    pub marks: Marks,
}

impl SubjectEntry {
    /// Pair a subject with its score.
    pub const fn new(subject: SubjectName, marks: Marks) -> Self {
        Self { subject, marks }
    }
}

/// All subject entries recorded for one student.
///
/// ## Invariants
/// - At most one record exists per `student_id`.
/// - `subjects` keeps insertion order and may hold repeated names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarksRecord {
    /// Record identifier.
    pub id: Uuid,
    /// Owning student.
    pub student_id: StudentId,
    /// Subject entries in insertion order.
    pub subjects: Vec<SubjectEntry>,
    /// Creation time set by storage.
    pub created_at: DateTime<Utc>,
    /// Last modification time set by storage.
    pub updated_at: DateTime<Utc>,
}

impl MarksRecord {
    /// Remove every entry whose subject matches `subject` case-insensitively.
    ///
    /// Returns the number of entries removed.
    pub fn remove_subject(&mut self, subject: &SubjectName) -> usize {
        let before = self.subjects.len();
        self.subjects.retain(|entry| !entry.subject.matches(subject));
        before.saturating_sub(self.subjects.len())
    }
}
