//! Course catalog planning
//!
//! Courses are read from a comma-separated catalog file into an ordered
//! in-memory index. Prerequisites are checked against every id in the file
//! while loading, and unknown ones are dropped with a diagnostic.

pub mod domain;
pub use domain::{CatalogIndex, Config, Course, CourseId, SortedIds};

/// Loading catalogs from text sources.
pub mod storage;
pub use storage::{LoadEvent, LoadReport, Loader};
