//! Conversational query layer for newsgenie.
//!
//! Routes free-text questions over a [`newsgenie_pipeline::Corpus`] through an
//! ordered rule table, with keyword search and an optional text generator as
//! fallbacks. [`Session`] keeps per-user history on top of a shared cache.

pub mod error;
pub mod format;
pub mod generative;
pub mod generator;
pub mod router;
pub mod session;

pub use error::GeneratorError;
pub use generative::GenerativeAdapter;
pub use generator::{HttpGenerator, TextGenerator};
pub use router::{Intent, Region, Router, NO_DATA};
pub use session::{Session, Turn};
