use std::{io, path::PathBuf, process};

use clap::Parser;
use planner::{Config, CourseId};
use tracing::instrument;

use super::{OutputFormat, terminal};

#[derive(Debug, Parser)]
#[command(about = "Display a course and its prerequisites")]
pub struct Show {
    /// Path to the catalog file
    path: PathBuf,

    /// The course id to display (case-insensitive)
    id: String,

    /// Output format
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t)]
    output: OutputFormat,
}

impl Show {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let (index, report) = super::load_catalog(&self.path, config)?;
        super::print_events(&report);

        let Some(course) = index.find_by_id(&self.id) else {
            eprintln!("No course found with Id {}", CourseId::new(&self.id));
            process::exit(1);
        };

        match self.output {
            OutputFormat::Pretty => {
                super::write_details(&mut io::stdout().lock(), course, terminal::supports_color())?;
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(course)?),
        }

        Ok(())
    }
}
