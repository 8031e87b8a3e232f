//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **identity**: bearer token verification
//! - **storage**: signed resume uploads to the object store
//! - **mail**: SMTP notification delivery
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod identity;
pub mod mail;
pub mod persistence;
pub mod storage;
