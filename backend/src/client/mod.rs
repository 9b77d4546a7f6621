//! Typed HTTP client for the records REST API.
//!
//! ```no_run
//! # async fn run() -> Result<(), student_records::client::ClientError> {
//! use student_records::client::RecordsClient;
//!
//! let client = RecordsClient::new("http://localhost:3000/api")?;
//! let created = client.create_student("Alice", "alice@example.com", 20).await?;
//! let page = client.list_students(Some(1), Some(10)).await?;
//! assert!(page.total >= 1);
//! client.delete_student(&created.id.to_string()).await?;
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::ClientError;

use pagination::Paginated;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

use crate::domain::ports::StudentWithMarks;
use crate::domain::{Error, MarksRecord, Student, SubjectEntry};

/// Default API base used by the `records` binary.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Partial update sent with [`RecordsClient::update_student`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StudentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
}

/// Confirmation body returned after deleting a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub message: String,
}

/// Body returned after removing a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectDeleted {
    pub message: String,
    pub subjects: Vec<SubjectEntry>,
}

/// Client for one records API deployment.
///
/// Identifiers are passed through as strings so that the server performs
/// validation and reports malformed values in its own envelope.
#[derive(Debug, Clone)]
pub struct RecordsClient {
    http: Client,
    base: Url,
}

impl RecordsClient {
    /// Build a client rooted at `base_url`, e.g. `http://host:3000/api`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] when `base_url` does not parse
    /// or cannot carry path segments.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base_url)
    }

    /// Build a client reusing an existing reqwest [`Client`].
    ///
    /// # Errors
    ///
    /// See [`RecordsClient::new`].
    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url)
            .map_err(|err| ClientError::invalid_base_url(base_url, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::invalid_base_url(
                base_url,
                "URL cannot carry path segments",
            ));
        }
        Ok(Self { http, base })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ClientError::invalid_base_url(self.base.as_str(), "URL cannot carry path segments")
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ClientError> {
        Ok(self.http.request(method, self.endpoint(segments)?))
    }

    /// Create a student.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] with 400 for invalid fields or 409 for a taken
    /// email; transport failures otherwise.
    pub async fn create_student(
        &self,
        name: &str,
        email: &str,
        age: i64,
    ) -> Result<Student, ClientError> {
        let request = self
            .request(Method::POST, &["students"])?
            .json(&json!({ "name": name, "email": email, "age": age }));
        send(request).await
    }

    /// Fetch one page of students. `None` leaves the server default.
    ///
    /// # Errors
    ///
    /// Transport or decode failures.
    pub async fn list_students(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Paginated<Student>, ClientError> {
        let mut query = Vec::new();
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        let request = self.request(Method::GET, &["students"])?.query(&query);
        send(request).await
    }

    /// Fetch a student together with their subject entries.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] with 400 for a malformed id or 404 when unknown.
    pub async fn get_student(&self, id: &str) -> Result<StudentWithMarks, ClientError> {
        send(self.request(Method::GET, &["students", id])?).await
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] with 400, 404 or 409.
    pub async fn update_student(
        &self,
        id: &str,
        patch: &StudentPatch,
    ) -> Result<Student, ClientError> {
        let request = self.request(Method::PUT, &["students", id])?.json(patch);
        send(request).await
    }

    /// Delete a student and their marks record.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] with 400 or 404.
    pub async fn delete_student(&self, id: &str) -> Result<Confirmation, ClientError> {
        send(self.request(Method::DELETE, &["students", id])?).await
    }

    /// Append a subject entry to a student's marks record.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] with 400 for invalid fields or 404 for an unknown
    /// student.
    pub async fn add_mark(
        &self,
        student_id: &str,
        subject: &str,
        marks: i64,
    ) -> Result<MarksRecord, ClientError> {
        let request = self.request(Method::POST, &["marks"])?.json(&json!({
            "studentId": student_id,
            "subject": subject,
            "marks": marks,
        }));
        send(request).await
    }

    /// List a student's subject entries.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] with 400 for a malformed id.
    pub async fn list_marks(&self, student_id: &str) -> Result<Vec<SubjectEntry>, ClientError> {
        send(self.request(Method::GET, &["marks", "student", student_id])?).await
    }

    /// Remove every entry for `subject`, matched case-insensitively.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] with 400, or 404 when the record or subject is
    /// missing.
    pub async fn delete_subject(
        &self,
        student_id: &str,
        subject: &str,
    ) -> Result<SubjectDeleted, ClientError> {
        let request = self
            .request(Method::DELETE, &["marks", "student", student_id, "subject"])?
            .json(&json!({ "subject": subject }));
        send(request).await
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(match serde_json::from_slice::<Error>(&body) {
            Ok(error) => ClientError::Api { status, error },
            Err(_) => ClientError::UnexpectedStatus {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            },
        });
    }
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
mod tests;
