//! Answer model types.
//!
//! This module defines the intermediate representation that bridges the
//! upstream response shapes and rendering. Every upstream variant is mapped
//! onto the same ordered sequence of [`Section`]s.

mod section;

pub use section::{QueryResult, Section};
