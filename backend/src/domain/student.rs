//! Student entity and its value objects.
//!
//! Each value object re-checks its invariant on construction so a repository
//! never receives an unnormalised name, email or age.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Largest accepted age; ages are stored in a 32-bit signed column.
pub const AGE_MAX: i64 = i32::MAX as i64;

/// Validation errors raised by the student value objects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudentValidationError {
    /// Identifier is not a canonical UUID.
    #[error("student id must be a valid UUID")]
    InvalidId,
    /// Name is blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// Email is not a syntactically valid address.
    #[error("email must be a valid email address")]
    InvalidEmail,
    /// Age is negative or too large.
    #[error("age must be a non-negative integer no greater than {max}")]
    AgeOutOfRange {
        /// Upper bound accepted.
        max: i64,
    },
}

const HYPHENATED_LEN: usize = uuid::fmt::Hyphenated::LENGTH;

/// Stable student identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentId(Uuid);

impl StudentId {
    /// Parse an identifier from its hyphenated textual form.
    ///
    /// Surrounding whitespace is rejected rather than trimmed, as are the
    /// simple, braced and URN renderings.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, StudentValidationError> {
        let raw = raw.as_ref();
        if raw.len() != HYPHENATED_LEN {
            return Err(StudentValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| StudentValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID loaded from storage.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for StudentId {
    type Err = StudentValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<StudentId> for String {
    fn from(value: StudentId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for StudentId {
    type Error = StudentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Student display name, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentName(String);

impl StudentName {
    /// Trim and validate a name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, StudentValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(StudentValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for StudentName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StudentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<StudentName> for String {
    fn from(value: StudentName) -> Self {
        value.0
    }
}

impl TryFrom<String> for StudentName {
    type Error = StudentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One `@`, no whitespace, and a dot somewhere in the domain part.
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address stored in canonical form: trimmed and lowercased.
///
/// Two addresses that differ only by case or surrounding whitespace are
/// equal once normalised, which is what the storage uniqueness check sees.
///
/// # Examples
/// ```
/// use student_records::domain::EmailAddress;
///
/// let email = EmailAddress::new("  Ada@Example.COM ").unwrap();
/// assert_eq!(email.as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate an address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, StudentValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if !email_regex().is_match(&normalised) {
            return Err(StudentValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = StudentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Non-negative age in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Age(i32);

impl Age {
    /// Validate an age.
    pub fn new(value: i64) -> Result<Self, StudentValidationError> {
        i32::try_from(value)
            .ok()
            .filter(|age| *age >= 0)
            .map(Self)
            .ok_or(StudentValidationError::AgeOutOfRange { max: AGE_MAX })
    }

    /// Numeric value.
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl From<Age> for i64 {
    fn from(value: Age) -> Self {
        Self::from(value.0)
    }
}

impl TryFrom<i64> for Age {
    type Error = StudentValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Persisted student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Stable identifier.
    pub id: StudentId,
    /// Trimmed display name.
    pub name: StudentName,
    /// Canonical, unique email address.
    pub email: EmailAddress,
    /// Age in years.
    pub age: Age,
    /// Creation time set by storage.
    pub created_at: DateTime<Utc>,
    /// Last modification time set by storage.
    pub updated_at: DateTime<Utc>,
}

/// Validated payload for creating a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    /// Display name.
    pub name: StudentName,
    /// Email address.
    pub email: EmailAddress,
    /// Age in years.
    pub age: Age,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentChanges {
    /// Replacement name.
    pub name: Option<StudentName>,
    /// Replacement email.
    pub email: Option<EmailAddress>,
    /// Replacement age.
    pub age: Option<Age>,
}

impl StudentChanges {
    /// True when no field is set.
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }

    /// Apply the changes to `student`, leaving timestamps to the caller.
    pub fn apply_to(&self, student: &mut Student) {
        if let Some(name) = &self.name {
            student.name = name.clone();
        }
        if let Some(email) = &self.email {
            student.email = email.clone();
        }
        if let Some(age) = self.age {
            student.age = age;
        }
    }
}
