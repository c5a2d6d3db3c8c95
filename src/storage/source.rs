//! Locating and opening catalog files.
//!
//! These checks run before a [`Loader`](crate::Loader) is handed a reader;
//! the loader itself assumes a readable text stream.

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use crate::domain::Config;

/// Errors raised while locating or opening a catalog file.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Nothing exists at the path.
    #[error("no such file found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file extension is not one the config recognises.
    #[error(
        "incompatible file type: {} (expected one of: {})",
        .path.display(),
        .expected.join(", ")
    )]
    UnrecognisedExtension {
        /// The rejected path.
        path: PathBuf,
        /// The recognised extensions.
        expected: Vec<String>,
    },

    /// The file exists but could not be opened.
    #[error("failed to open {}", .path.display())]
    Io {
        /// The path being opened.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

/// Confirms that `path` is an existing file with a recognised extension.
///
/// # Errors
///
/// Returns [`SourceError::NotFound`] if the path is not a file, or
/// [`SourceError::UnrecognisedExtension`] if its extension is not listed in
/// the config.
pub fn check_catalog_path(path: &Path, config: &Config) -> Result<(), SourceError> {
    if !path.is_file() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }

    if !config.is_extension_recognised(path) {
        return Err(SourceError::UnrecognisedExtension {
            path: path.to_path_buf(),
            expected: config.extensions().to_vec(),
        });
    }

    Ok(())
}

/// Opens a catalog file for buffered, rewindable reading.
///
/// # Errors
///
/// Returns [`SourceError::Io`] if the file cannot be opened.
pub fn open(path: &Path) -> Result<BufReader<File>, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Opened catalog {}", path.display());
    Ok(BufReader::new(file))
}
