//! Build a persona summary from a Reddit user's public posts and comments.
//!
//! [`core`] holds the extraction and ranking engine and does no I/O.
//! [`reddit`] fetches listings, [`report`] renders the result and
//! [`config`] resolves settings.

pub mod config;
pub mod core;
pub mod error;
pub mod reddit;
pub mod report;

pub use config::Config;
pub use error::{PersonaError, Result};
