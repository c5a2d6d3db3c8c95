use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

mod list;
mod menu;
mod show;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use list::List;
use menu::Menu;
use planner::{
    CatalogIndex, Config, Course, LoadReport, Loader,
    storage::{check_catalog_path, open},
};
use show::Show;
use terminal::Style;

/// Default config file, looked up in the working directory.
const CONFIG_FILE: &str = "planner.toml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the config file (default: ./planner.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = self.config.as_deref().map_or_else(
            || Config::load_or_default(Path::new(CONFIG_FILE)),
            Config::load_or_default,
        );

        self.command
            .unwrap_or_else(|| Command::Menu(Menu::default()))
            .run(&config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Print every course in id order
    List(List),

    /// Show a single course and its prerequisites
    Show(Show),

    /// Start the interactive menu (default)
    Menu(Menu),
}

impl Command {
    fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::List(command) => command.run(config)?,
            Self::Show(command) => command.run(config)?,
            Self::Menu(command) => command.run(config)?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

/// Checks, opens and loads the catalog at `path` into a fresh index.
fn load_catalog(path: &Path, config: &Config) -> anyhow::Result<(CatalogIndex, LoadReport)> {
    check_catalog_path(path, config)?;
    let reader = open(path)?;

    let mut index = CatalogIndex::new();
    let report = Loader::new(config)
        .load(reader, &mut index)
        .with_context(|| format!("failed to load {}", path.display()))?;

    Ok((index, report))
}

/// Prints load diagnostics to stderr.
fn print_events(report: &LoadReport) {
    for event in &report.events {
        eprintln!("{}", terminal::paint(&event.to_string(), Style::Warning));
    }
}

/// Writes `ID, Name` followed by the prerequisite list, if any.
fn write_details<W: Write>(out: &mut W, course: &Course, styled: bool) -> io::Result<()> {
    writeln!(out, "{course}")?;

    if !course.prerequisites().is_empty() {
        let label = terminal::paint_if("Prerequisites:", Style::Dim, styled);
        writeln!(out, "{label} {}", course.prerequisites().join(", "))?;
    }

    Ok(())
}
