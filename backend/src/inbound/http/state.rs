//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so they can be exercised with in-memory adapters or mocks.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    MarksCommand, MarksQuery, MarksRepository, StudentRepository, StudentsCommand, StudentsQuery,
};
use crate::domain::{MarksService, StudentService};
use crate::outbound::memory::{InMemoryMarksRepository, InMemoryStudentRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub students: Arc<dyn StudentsCommand>,
    pub students_query: Arc<dyn StudentsQuery>,
    pub marks: Arc<dyn MarksCommand>,
    pub marks_query: Arc<dyn MarksQuery>,
}

impl HttpState {
    /// Bundle the four driving ports.
    ///
    /// A single service usually implements both halves of a pair, so the
    /// same `Arc` is commonly passed twice.
    pub fn new(
        students: Arc<dyn StudentsCommand>,
        students_query: Arc<dyn StudentsQuery>,
        marks: Arc<dyn MarksCommand>,
        marks_query: Arc<dyn MarksQuery>,
    ) -> Self {
        Self {
            students,
            students_query,
            marks,
            marks_query,
        }
    }

    /// Wrap a repository pair in the domain services and expose them as
    /// ports.
    pub fn over_repositories<S, M>(students: Arc<S>, marks: Arc<M>) -> Self
    where
        S: StudentRepository + 'static,
        M: MarksRepository + 'static,
    {
        let student_service = Arc::new(StudentService::new(students.clone(), marks.clone()));
        let marks_service = Arc::new(MarksService::new(marks, students));
        Self::new(
            student_service.clone(),
            student_service,
            marks_service.clone(),
            marks_service,
        )
    }

    /// State over fresh in-memory repositories stamped by `clock`.
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self::over_repositories(
            Arc::new(InMemoryStudentRepository::new(clock.clone())),
            Arc::new(InMemoryMarksRepository::new(clock)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Age, EmailAddress, NewStudent, StudentName};
    use mockable::DefaultClock;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn in_memory_ports_share_one_store() {
        let state = HttpState::in_memory(Arc::new(DefaultClock));
        let created = state
            .students
            .create(NewStudent {
                name: StudentName::new("Alice").expect("name"),
                email: EmailAddress::new("a@x.com").expect("email"),
                age: Age::new(20).expect("age"),
            })
            .await
            .expect("create");

        let fetched = state
            .students_query
            .get_with_marks(created.id)
            .await
            .expect("visible through the query port");

        assert_eq!(fetched.student, created);
        assert!(fetched.marks.is_empty());
    }
}
