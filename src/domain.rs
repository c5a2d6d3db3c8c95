//! Domain models for the course catalog.
//!
//! This module contains the course types, the ordered [`CatalogIndex`], and
//! the sort and search primitives used to validate prerequisites.

/// Course values and identifiers.
pub mod course;
pub use course::{Course, CourseId};

mod config;
pub use config::{Config, ConfigError};

/// The ordered, append-only course index.
pub mod index;
pub use index::{CatalogIndex, InOrder};

pub mod search;
pub use search::SortedIds;

pub mod sort;
