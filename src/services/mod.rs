//! Service layer for duoscan business logic.
//!
//! This module contains domain logic separated from transport concerns.
//! Services can be used by the CLI or the web server.

pub mod extraction;

pub use extraction::{DualExtractor, ExtractionOptions};
