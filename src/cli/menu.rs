//! The interactive course planner menu.

use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use clap::Parser;
use planner::{
    CatalogIndex, Config, CourseId, Loader,
    storage::{SourceError, check_catalog_path, open},
};
use tracing::instrument;

#[derive(Debug, Default, Parser)]
#[command(about = "Start the interactive course planner")]
pub struct Menu {
    /// Load this catalog before showing the menu
    #[arg(long, value_name = "FILE")]
    load: Option<PathBuf>,
}

impl Menu {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut session = Session::new(config.clone(), stdin.lock(), stdout.lock());

        if let Some(path) = &self.load {
            session.load(path)?;
        }

        session.run()?;
        Ok(())
    }
}

/// A menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Load,
    PrintList,
    PrintCourse,
    Exit,
}

impl TryFrom<i64> for Choice {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Load),
            2 => Ok(Self::PrintList),
            3 => Ok(Self::PrintCourse),
            9 => Ok(Self::Exit),
            other => Err(other),
        }
    }
}

/// Parses a menu selection.
///
/// Accepts an optional sign followed by ASCII digits and nothing else.
fn parse_choice(input: &str) -> Option<i64> {
    let digits = input.strip_prefix(['+', '-']).unwrap_or(input);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

/// Menu state: the loaded catalog plus the streams it talks over.
struct Session<R, W> {
    config: Config,
    input: R,
    output: W,
    catalog: CatalogIndex,
}

impl<R: BufRead, W: Write> Session<R, W> {
    const fn new(config: Config, input: R, output: W) -> Self {
        Self {
            config,
            input,
            output,
            catalog: CatalogIndex::new(),
        }
    }

    /// Runs until the user exits or input ends.
    fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to the course planner:")?;

        loop {
            self.print_menu()?;

            let Some(line) = self.read_line()? else {
                break;
            };

            let Some(number) = parse_choice(&line) else {
                writeln!(self.output, "{line} is not a valid option.")?;
                continue;
            };

            match Choice::try_from(number) {
                Ok(Choice::Load) => self.prompt_load()?,
                Ok(Choice::PrintList) => self.print_list()?,
                Ok(Choice::PrintCourse) => self.prompt_course()?,
                Ok(Choice::Exit) => break,
                Err(other) => writeln!(self.output, "{other} is not a valid option.")?,
            }
        }

        Ok(())
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "     1. Load Data Structure.")?;
        writeln!(self.output, "     2. Print Course List.")?;
        writeln!(self.output, "     3. Print Course.")?;
        writeln!(self.output, "     9. Exit")?;
        write!(self.output, "What would you like to do? ")?;
        self.output.flush()
    }

    /// Reads one line without its line ending, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn prompt_load(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        write!(
            self.output,
            "Please enter file path of course data. File path: "
        )?;
        self.output.flush()?;

        let Some(path) = self.read_line()? else {
            return Ok(());
        };
        self.load(Path::new(&path))
    }

    /// Replaces the current catalog with the one at `path`.
    ///
    /// Problems with the file are reported to the user rather than returned.
    fn load(&mut self, path: &Path) -> io::Result<()> {
        match check_catalog_path(path, &self.config) {
            Ok(()) => {}
            Err(SourceError::NotFound(_)) => {
                writeln!(self.output, "No such file found.")?;
                return writeln!(self.output, "Returning to main menu...");
            }
            Err(SourceError::UnrecognisedExtension { expected, .. }) => {
                let expected: Vec<_> = expected.iter().map(|ext| format!(".{ext}")).collect();
                writeln!(
                    self.output,
                    "Incompatible file type. Please enter the file path ending in {}.",
                    expected.join(" or ")
                )?;
                return writeln!(self.output, "Returning to main menu...");
            }
            Err(err) => return writeln!(self.output, "{err}"),
        }

        writeln!(self.output, "Loading CSV file {}...", path.display())?;

        let reader = match open(path) {
            Ok(reader) => reader,
            Err(err) => return writeln!(self.output, "{err}"),
        };

        let mut catalog = CatalogIndex::new();
        match Loader::new(&self.config).load(reader, &mut catalog) {
            Ok(report) => {
                for event in &report.events {
                    writeln!(self.output, "{event}")?;
                }
                writeln!(
                    self.output,
                    "{} courses loaded from file.",
                    report.accepted
                )?;
                self.catalog = catalog;
            }
            Err(err) => {
                tracing::error!("{err}");
                writeln!(self.output, "Failed to load {}: {err}", path.display())?;
            }
        }

        Ok(())
    }

    fn print_list(&mut self) -> io::Result<()> {
        for course in &self.catalog {
            writeln!(self.output, "{course}")?;
        }
        Ok(())
    }

    fn prompt_course(&mut self) -> io::Result<()> {
        write!(self.output, "Input course ID to search: ")?;
        self.output.flush()?;

        let Some(id) = self.read_line()? else {
            return Ok(());
        };

        let Some(course) = self.catalog.find_by_id(&id) else {
            return writeln!(self.output, "No course found with Id {}", CourseId::new(&id));
        };
        super::write_details(&mut self.output, course, false)
    }
}
