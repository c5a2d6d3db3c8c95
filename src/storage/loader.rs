//! Two-pass catalog loading.
//!
//! A catalog source is a comma-separated text stream with one course per
//! line: `id,name[,prerequisite]*`.
//!
//! The first pass collects the first field of every line into a sorted id
//! universe. The second pass re-reads the source, checks each prerequisite
//! against that universe, and inserts every course that has a name into the
//! [`CatalogIndex`]. Problems with individual records are reported as
//! [`LoadEvent`]s and never abort the load.

use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead, Cursor, Seek},
    iter,
};

use non_empty_string::NonEmptyString;
use tracing::instrument;

use crate::domain::{CatalogIndex, Config, Course, CourseId, SortedIds};

/// A recoverable problem found in a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent {
    /// A prerequisite did not name any id in the source and was left out of
    /// the course.
    PrerequisiteDropped {
        /// The course the prerequisite was listed on.
        course: CourseId,
        /// The prerequisite text as it appeared in the source.
        prerequisite: String,
        /// One-based line number of the record.
        line: usize,
    },

    /// The record had no name and was not added to the catalog.
    MissingName {
        /// The id of the rejected record.
        course: CourseId,
        /// One-based line number of the record.
        line: usize,
    },
}

impl LoadEvent {
    /// One-based line number of the record that raised the event.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::PrerequisiteDropped { line, .. } | Self::MissingName { line, .. } => *line,
        }
    }
}

impl fmt::Display for LoadEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrerequisiteDropped {
                course,
                prerequisite,
                ..
            } => write!(
                f,
                "{prerequisite} was not added as a prerequisite for {course} because it is not \
                 found in the course list."
            ),
            Self::MissingName { course, .. } => write!(
                f,
                "{course} does not have a name, and was not added to the course list."
            ),
        }
    }
}

/// The outcome of a completed load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of records inserted into the index.
    pub accepted: usize,
    /// Diagnostics, in the order they were raised.
    pub events: Vec<LoadEvent>,
}

impl LoadReport {
    /// Events for prerequisites that were dropped.
    pub fn dropped_prerequisites(&self) -> impl Iterator<Item = &LoadEvent> {
        self.events
            .iter()
            .filter(|event| matches!(event, LoadEvent::PrerequisiteDropped { .. }))
    }

    /// Events for records that were rejected.
    pub fn rejected(&self) -> impl Iterator<Item = &LoadEvent> {
        self.events
            .iter()
            .filter(|event| matches!(event, LoadEvent::MissingName { .. }))
    }
}

/// Failure to read the catalog source.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Reading a line failed.
    #[error("failed to read line {line} of the catalog")]
    Read {
        /// One-based line number that could not be read.
        line: usize,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// Seeking back to the start for the second pass failed.
    #[error("failed to rewind the catalog for the second pass")]
    Rewind(#[source] io::Error),
}

/// Reads catalog sources into a [`CatalogIndex`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Loader {
    case_insensitive_prerequisites: bool,
    trim_fields: bool,
}

impl From<&Config> for Loader {
    fn from(config: &Config) -> Self {
        Self::new(config)
    }
}

impl Loader {
    /// Creates a loader using the parsing settings from `config`.
    #[must_use]
    pub const fn new(config: &Config) -> Self {
        Self {
            case_insensitive_prerequisites: config.case_insensitive_prerequisites,
            trim_fields: config.trim_fields,
        }
    }

    /// Loads every course from `reader` into `index`.
    ///
    /// The reader is consumed twice: once to build the id universe and once,
    /// after rewinding to the start, to parse the records.
    ///
    /// # Errors
    ///
    /// Returns an error only if the source cannot be read or rewound. Records
    /// with missing names or unknown prerequisites are reported in the
    /// returned [`LoadReport`] instead.
    #[instrument(level = "debug", skip_all)]
    pub fn load<R: BufRead + Seek>(
        &self,
        mut reader: R,
        index: &mut CatalogIndex,
    ) -> Result<LoadReport, LoadError> {
        let universe = self.build_universe(&mut reader)?;
        tracing::debug!("Collected {} course ids", universe.len());

        reader.rewind().map_err(LoadError::Rewind)?;

        let report = self.parse_records(&mut reader, &universe, index)?;
        tracing::info!("{} courses loaded", report.accepted);

        Ok(report)
    }

    /// Loads every course from an in-memory string.
    ///
    /// # Errors
    ///
    /// Reading from memory cannot fail, so this never returns an error in
    /// practice. The signature matches [`Loader::load`].
    pub fn load_str(&self, text: &str, index: &mut CatalogIndex) -> Result<LoadReport, LoadError> {
        self.load(Cursor::new(text), index)
    }

    /// First pass: the first field of every line, sorted.
    fn build_universe<R: BufRead>(&self, reader: &mut R) -> Result<SortedIds, LoadError> {
        let mut ids = Vec::new();

        for (number, line) in numbered_lines(reader) {
            let line = line.map_err(|source| LoadError::Read {
                line: number,
                source,
            })?;
            let raw_id = line.split(',').next().unwrap_or_default();
            ids.push(self.universe_key(self.field(raw_id)));
        }

        Ok(SortedIds::from_unsorted(ids))
    }

    /// Second pass: parse, validate and insert each record.
    fn parse_records<R: BufRead>(
        &self,
        reader: &mut R,
        universe: &SortedIds,
        index: &mut CatalogIndex,
    ) -> Result<LoadReport, LoadError> {
        let mut report = LoadReport::default();

        for (number, line) in numbered_lines(reader) {
            let line = line.map_err(|source| LoadError::Read {
                line: number,
                source,
            })?;

            if let Some(course) = self.parse_record(&line, number, universe, &mut report.events) {
                index.insert(course);
                report.accepted += 1;
            }
        }

        Ok(report)
    }

    fn parse_record(
        &self,
        line: &str,
        number: usize,
        universe: &SortedIds,
        events: &mut Vec<LoadEvent>,
    ) -> Option<Course> {
        let mut fields = line.split(',').map(|field| self.field(field));

        let id = CourseId::new(fields.next().unwrap_or_default());
        let name = fields.next().unwrap_or_default().to_string();

        let mut prerequisites = Vec::new();
        for candidate in fields.filter(|field| !field.is_empty()) {
            let key = self.universe_key(candidate);
            if universe.contains(&key) {
                prerequisites.push(key);
            } else {
                let event = LoadEvent::PrerequisiteDropped {
                    course: id.clone(),
                    prerequisite: candidate.to_string(),
                    line: number,
                };
                tracing::warn!("line {number}: {event}");
                events.push(event);
            }
        }

        let Ok(name) = NonEmptyString::new(name) else {
            let event = LoadEvent::MissingName {
                course: id,
                line: number,
            };
            tracing::warn!("line {number}: {event}");
            events.push(event);
            return None;
        };

        Some(Course::new(id, name).with_prerequisites(prerequisites))
    }

    fn field<'a>(&self, raw: &'a str) -> &'a str {
        if self.trim_fields { raw.trim() } else { raw }
    }

    fn universe_key(&self, raw: &str) -> String {
        if self.case_insensitive_prerequisites {
            raw.to_uppercase()
        } else {
            raw.to_string()
        }
    }
}

/// Lines of the reader numbered from one, without their `\n` or `\r\n`
/// ending.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD so a single badly
/// encoded record can't abort the load.
fn numbered_lines<R: BufRead>(
    mut reader: R,
) -> impl Iterator<Item = (usize, io::Result<String>)> {
    let mut buf = Vec::new();
    let mut number = 0;

    iter::from_fn(move || {
        buf.clear();
        number += 1;
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
                let line = match String::from_utf8_lossy(&buf) {
                    Cow::Borrowed(text) => text.to_string(),
                    Cow::Owned(text) => {
                        tracing::warn!("line {number}: invalid UTF-8 replaced");
                        text
                    }
                };
                Some((number, Ok(line)))
            }
            Err(err) => Some((number, Err(err))),
        }
    })
}
