//! Domain entities, ports and services for student records.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failure payload.
//! - [`Student`], [`NewStudent`], [`StudentChanges`] and their value objects.
//! - [`MarksRecord`], [`SubjectEntry`] and their value objects.
//! - [`StudentService`] and [`MarksService`]: implementations of the driving
//!   ports in [`ports`].

pub mod error;
pub mod marks;
mod marks_service;
pub mod ports;
pub mod student;
mod student_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::marks::{
    MARKS_MAX, Marks, MarksRecord, MarksValidationError, SubjectEntry, SubjectName,
};
pub use self::marks_service::MarksService;
pub use self::student::{
    AGE_MAX, Age, EmailAddress, NewStudent, Student, StudentChanges, StudentId, StudentName,
    StudentValidationError,
};
pub use self::student_service::StudentService;
pub use self::trace_id::TraceId;
