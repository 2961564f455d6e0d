//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel
//! - **memory**: mutex-guarded in-memory repositories, used when no
//!   database is configured and as the fixture backend in tests
//!
//! Adapters translate between domain types and infrastructure
//! representations; they contain no business logic.

pub mod memory;
pub mod persistence;
