//! Request middleware.
//!
//! [`Trace`] assigns each request a [`TraceId`](crate::domain::TraceId),
//! echoes it in the `trace-id` response header and logs the completed request.

pub mod trace;

pub use trace::Trace;
