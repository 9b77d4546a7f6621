//! Request validation for inbound HTTP adapters.
//!
//! Bodies are read as raw JSON and checked field by field, so one response
//! reports every problem. Each failure becomes a `{path, message, code}`
//! violation and the whole list is returned as an `invalid_request` error
//! with `details.violations`.

use std::fmt::Display;

use serde_json::{Map, Value, json};

use crate::domain::{Error, StudentId};

/// Machine-readable reason attached to each violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ViolationCode {
    MissingField,
    InvalidType,
    NotAnInteger,
    Negative,
    EmptyString,
    InvalidEmail,
    InvalidUuid,
    OutOfRange,
    InvalidBody,
}

impl ViolationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidType => "invalid_type",
            Self::NotAnInteger => "not_an_integer",
            Self::Negative => "negative",
            Self::EmptyString => "empty_string",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidUuid => "invalid_uuid",
            Self::OutOfRange => "out_of_range",
            Self::InvalidBody => "invalid_body",
        }
    }
}

/// Newtype wrapper for request field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Violation {
    path: String,
    message: String,
    code: ViolationCode,
}

/// Accumulates violations for one request.
#[derive(Debug, Default)]
pub(crate) struct Violations(Vec<Violation>);

impl Violations {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(
        &mut self,
        field: FieldName,
        code: ViolationCode,
        message: impl Into<String>,
    ) {
        self.0.push(Violation {
            path: field.as_str().to_owned(),
            message: message.into(),
            code,
        });
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn into_error(self) -> Error {
        let violations: Vec<Value> = self
            .0
            .into_iter()
            .map(|violation| {
                json!({
                    "path": violation.path,
                    "message": violation.message,
                    "code": violation.code.as_str(),
                })
            })
            .collect();
        Error::invalid_request("request validation failed")
            .with_details(json!({ "violations": violations }))
    }
}

/// Require the body to be a JSON object.
pub(crate) fn object_body(body: &Value) -> Result<&Map<String, Value>, Error> {
    body.as_object().ok_or_else(|| {
        let mut violations = Violations::new();
        violations.push(
            FieldName::new("$"),
            ViolationCode::InvalidBody,
            "request body must be a JSON object",
        );
        violations.into_error()
    })
}

fn present<'a>(body: &'a Map<String, Value>, field: FieldName) -> Option<&'a Value> {
    body.get(field.as_str()).filter(|value| !value.is_null())
}

/// Read a string field, recording a violation when it is missing (and
/// `required`), not a string, or blank.
pub(crate) fn read_string(
    body: &Map<String, Value>,
    field: FieldName,
    required: bool,
    violations: &mut Violations,
) -> Option<String> {
    let Some(value) = present(body, field) else {
        if required {
            violations.push(
                field,
                ViolationCode::MissingField,
                format!("{} is required", field.as_str()),
            );
        }
        return None;
    };
    let Some(text) = value.as_str() else {
        violations.push(
            field,
            ViolationCode::InvalidType,
            format!("{} must be a string", field.as_str()),
        );
        return None;
    };
    if text.trim().is_empty() {
        violations.push(
            field,
            ViolationCode::EmptyString,
            format!("{} must not be empty", field.as_str()),
        );
        return None;
    }
    Some(text.to_owned())
}

/// Read a non-negative integer field. Floats with no fractional part are
/// accepted as integers.
pub(crate) fn read_non_negative_integer(
    body: &Map<String, Value>,
    field: FieldName,
    required: bool,
    violations: &mut Violations,
) -> Option<i64> {
    let Some(value) = present(body, field) else {
        if required {
            violations.push(
                field,
                ViolationCode::MissingField,
                format!("{} is required", field.as_str()),
            );
        }
        return None;
    };
    let Some(number) = value.as_number() else {
        violations.push(
            field,
            ViolationCode::InvalidType,
            format!("{} must be a number", field.as_str()),
        );
        return None;
    };

    let integer = number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|float| float.fract() == 0.0 && float.abs() < 9.0e15)
            .map(|float| float as i64)
    });
    let Some(integer) = integer else {
        let integral = number.as_u64().is_some()
            || number.as_f64().is_some_and(|float| float.fract() == 0.0);
        let (code, message) = match number.as_f64() {
            _ if !integral => (ViolationCode::NotAnInteger, "must be an integer"),
            Some(float) if float < 0.0 => (ViolationCode::Negative, "must not be negative"),
            _ => (ViolationCode::OutOfRange, "is too large"),
        };
        violations.push(field, code, format!("{} {message}", field.as_str()));
        return None;
    };
    if integer < 0 {
        violations.push(
            field,
            ViolationCode::Negative,
            format!("{} must not be negative", field.as_str()),
        );
        return None;
    }
    Some(integer)
}

/// Run a value-object constructor, turning its error into a violation.
pub(crate) fn parse_field<R, T, E>(
    raw: Option<R>,
    field: FieldName,
    code: ViolationCode,
    violations: &mut Violations,
    parse: impl FnOnce(R) -> Result<T, E>,
) -> Option<T>
where
    E: Display,
{
    match parse(raw?) {
        Ok(value) => Some(value),
        Err(error) => {
            violations.push(field, code, error.to_string());
            None
        }
    }
}

/// Parse an identifier taken from the request path.
pub(crate) fn parse_student_id(raw: &str, field: FieldName) -> Result<StudentId, Error> {
    StudentId::new(raw).map_err(|error| {
        let mut violations = Violations::new();
        violations.push(field, ViolationCode::InvalidUuid, error.to_string());
        violations.into_error()
    })
}
