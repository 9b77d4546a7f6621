//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between internal Diesel rows and domain types and
//! map every failure onto their port error. Row structs (`models.rs`) and the
//! table definitions (`schema.rs`) never leave this module.
//!
//! ```ignore
//! use student_records::outbound::persistence::{DbPool, DieselStudentRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/records")).await?;
//! let students = DieselStudentRepository::new(pool);
//! ```

mod diesel_marks_repository;
mod diesel_student_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_marks_repository::DieselMarksRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
