//! # Scribe Core
//!
//! The domain layer of the Scribe blog backend.
//! This crate contains the post rules and the service that coordinates the
//! ports; it has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use services::PostService;
