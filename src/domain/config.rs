use std::{ffi::OsStr, io, path::Path};

use serde::{Deserialize, Serialize};

/// Settings that control how a catalog file is located and parsed.
///
/// Every field has a default, so a config file only needs to name the
/// settings it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File extensions accepted as catalog sources, compared
    /// case-insensitively. A leading `.` is ignored.
    ///
    /// Defaults to `["csv"]`.
    extensions: Vec<String>,

    /// Whether prerequisite ids are matched against the id universe without
    /// regard to case.
    ///
    /// When `false` (default) the raw prerequisite text must match a raw id
    /// exactly. When `true` both sides are uppercased before matching and
    /// prerequisites are stored uppercased.
    pub case_insensitive_prerequisites: bool,

    /// Whether surrounding whitespace is trimmed from every field.
    pub trim_fields: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: vec!["csv".to_string()],
            case_insensitive_prerequisites: false,
            trim_fields: false,
        }
    }
}

/// Errors raised while reading or writing a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("failed to access config file: {0}")]
    Io(#[from] io::Error),

    /// The file is not valid TOML for a [`Config`].
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be rendered as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Loads the configuration at `path`, falling back to the defaults if the
    /// file is missing or invalid.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config from {}: {e}", path.display());
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The recognised catalog file extensions.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Adds a recognised extension.
    ///
    /// Returns `true` if the extension was added, `false` if it was already
    /// recognised.
    pub fn add_extension(&mut self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        if self.recognises(extension) {
            false
        } else {
            self.extensions.push(extension.to_lowercase());
            true
        }
    }

    /// Checks whether the path carries a recognised catalog extension.
    #[must_use]
    pub fn is_extension_recognised(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.recognises(ext))
    }

    fn recognises(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|known| known.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;
    use test_case::test_case;

    use super::*;

    #[test_case("courses.csv", true; "lowercase csv")]
    #[test_case("COURSES.CSV", true; "uppercase csv")]
    #[test_case("data/courses.csv", true; "nested path")]
    #[test_case("courses.txt", false; "other extension")]
    #[test_case("courses", false; "no extension")]
    #[test_case("courses.csv.bak", false; "csv not last")]
    fn default_extensions(path: &str, expected: bool) {
        let config = Config::default();
        assert_eq!(config.is_extension_recognised(&PathBuf::from(path)), expected);
    }

    #[test]
    fn added_extension_is_recognised() {
        let mut config = Config::default();
        assert!(config.add_extension(".TXT"));
        assert!(!config.add_extension("txt"));
        assert!(config.is_extension_recognised(Path::new("catalog.txt")));
        assert_eq!(config.extensions(), ["csv", "txt"]);
    }

    #[test]
    fn partial_file_uses_defaults_for_missing_fields() {
        let config: Config = toml::from_str("trim_fields = true").unwrap();
        assert!(config.trim_fields);
        assert!(!config.case_insensitive_prerequisites);
        assert_eq!(config.extensions(), ["csv"]);
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("planner.toml");

        let mut config = Config::default();
        config.case_insensitive_prerequisites = true;
        config.add_extension("tsv");
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("planner.toml");
        std::fs::write(&path, "extensions = 3").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }
}
