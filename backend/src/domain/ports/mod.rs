//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by storage adapters and
//! return typed port errors. Driving ports (`*Command`, `*Query`) are
//! implemented by the domain services and return the domain [`Error`], which
//! inbound adapters translate for their transport.
//!
//! [`Error`]: crate::domain::Error

mod macros;
pub(crate) use macros::define_port_error;

mod marks_command;
mod marks_query;
mod marks_repository;
mod student_repository;
mod students_command;
mod students_query;

#[cfg(test)]
pub use marks_command::MockMarksCommand;
pub use marks_command::{AddSubjectRequest, MarksCommand};
#[cfg(test)]
pub use marks_query::MockMarksQuery;
pub use marks_query::MarksQuery;
#[cfg(test)]
pub use marks_repository::MockMarksRepository;
pub use marks_repository::{MarksRepository, MarksRepositoryError};
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{StudentRepository, StudentRepositoryError};
#[cfg(test)]
pub use students_command::MockStudentsCommand;
pub use students_command::StudentsCommand;
#[cfg(test)]
pub use students_query::MockStudentsQuery;
pub use students_query::{StudentWithMarks, StudentsQuery};
