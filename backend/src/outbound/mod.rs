//! Outbound adapters implementing the domain's repository ports.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM.
//! - **memory**: in-process repositories for database-less runs and tests.
//!
//! Adapters only translate between domain types and their storage
//! representation. They contain no business logic.

pub mod memory;
pub mod persistence;
