//! Outbound adapters implementing the domain repository ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM.
//! - **memory**: mutex-guarded in-process store for database-less runs and
//!   tests.
//!
//! Adapters translate between domain records and storage representations and
//! contain no business rules.

pub mod memory;
pub mod persistence;
