//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Guards that must hold at write time live in the `WHERE`
//!   clause of a single statement.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Bounded calls**: every query runs under the pool's query timeout and
//!   a timeout surfaces as a connection error.
//!
//! ```ignore
//! use trustyhire::outbound::persistence::{DbPool, DieselJobRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/hire")).await?;
//! let jobs = DieselJobRepository::new(pool);
//! ```

mod diesel_application_repository;
pub(crate) mod diesel_helpers;
mod diesel_job_repository;
mod diesel_saved_job_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_application_repository::DieselApplicationRepository;
pub use diesel_job_repository::DieselJobRepository;
pub use diesel_saved_job_repository::DieselSavedJobRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
