//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`). Only
//! compiled for tests or with the `test-support` feature.

mod adapters;
mod clock;
mod identity;
mod memory;

pub use adapters::{MemoryResumeStorage, RecordingNotifier};
pub use clock::MutableClock;
pub use identity::{FIXTURE_SECRET, FixtureIdentity, mint_token};
pub use memory::InMemoryStore;
