//! In-process student store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{NewStudent, Student, StudentChanges, StudentId};

/// `StudentRepository` over a vector kept in insertion order.
///
/// Email uniqueness is checked under the same lock as the write, so two
/// concurrent inserts with one address still yield a single success.
#[derive(Clone)]
pub struct InMemoryStudentRepository {
    students: Arc<Mutex<Vec<Student>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStudentRepository {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            students: Arc::new(Mutex::new(Vec::new())),
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Student>> {
        self.students.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn email_taken(students: &[Student], email: &str, except: Option<&StudentId>) -> bool {
    students
        .iter()
        .any(|student| student.email.as_ref() == email && Some(&student.id) != except)
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn insert(&self, student: &NewStudent) -> Result<Student, StudentRepositoryError> {
        let now = self.clock.utc();
        let mut students = self.lock();
        if email_taken(&students, student.email.as_ref(), None) {
            return Err(StudentRepositoryError::duplicate_email(
                student.email.as_ref(),
            ));
        }

        let stored = Student {
            id: StudentId::random(),
            name: student.name.clone(),
            email: student.email.clone(),
            age: student.age,
            created_at: now,
            updated_at: now,
        };
        students.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self, offset: u64, limit: u32) -> Result<Vec<Student>, StudentRepositoryError> {
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self.lock().iter().skip(skip).take(take).cloned().collect())
    }

    async fn count(&self) -> Result<u64, StudentRepositoryError> {
        Ok(self.lock().len() as u64)
    }

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        Ok(self.lock().iter().find(|student| &student.id == id).cloned())
    }

    async fn update(
        &self,
        id: &StudentId,
        changes: &StudentChanges,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let now = self.clock.utc();
        let mut students = self.lock();
        let Some(index) = students.iter().position(|student| &student.id == id) else {
            return Ok(None);
        };
        if let Some(email) = &changes.email {
            if email_taken(&students, email.as_ref(), Some(id)) {
                return Err(StudentRepositoryError::duplicate_email(email.as_ref()));
            }
        }

        let student = &mut students[index];
        changes.apply_to(student);
        student.updated_at = now;
        Ok(Some(student.clone()))
    }

    async fn delete(&self, id: &StudentId) -> Result<bool, StudentRepositoryError> {
        let mut students = self.lock();
        let before = students.len();
        students.retain(|student| &student.id != id);
        Ok(students.len() != before)
    }
}
