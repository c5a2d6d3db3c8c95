pub mod loader;
pub mod source;

pub use loader::{LoadError, LoadEvent, LoadReport, Loader};
pub use source::{SourceError, check_catalog_path, open};
