//! In-process adapters for the repository ports.
//!
//! Used when no database URL is configured and by handler tests. State lives
//! behind `Arc<Mutex<_>>`, so clones share one store.

mod marks_repository;
mod student_repository;

pub use marks_repository::InMemoryMarksRepository;
pub use student_repository::InMemoryStudentRepository;
