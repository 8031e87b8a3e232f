//! Resume object store adapters.
//!
//! Provides a signed-upload implementation of the `ResumeStorage` port.

mod cloudinary;

pub use cloudinary::CloudinaryResumeStorage;
