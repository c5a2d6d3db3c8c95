use std::path::PathBuf;

use clap::Parser;
use planner::Config;
use tracing::instrument;

use super::{
    OutputFormat,
    terminal::{self, Style},
};

/// Command arguments for `planner list`.
#[derive(Debug, Parser)]
#[command(about = "Print every course in id order")]
pub struct List {
    /// Path to the catalog file
    path: PathBuf,

    /// Output format (default: pretty).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Print course count and tree depth after the listing.
    #[arg(long)]
    stats: bool,
}

impl List {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let (index, report) = super::load_catalog(&self.path, config)?;
        super::print_events(&report);

        match self.output {
            OutputFormat::Pretty => {
                for course in &index {
                    println!("{course}");
                }
            }
            OutputFormat::Json => {
                let courses: Vec<_> = index.iter().collect();
                println!("{}", serde_json::to_string_pretty(&courses)?);
            }
        }

        if self.stats {
            let stats = format!(
                "{} courses loaded, {} rejected, tree depth {}",
                report.accepted,
                report.rejected().count(),
                index.depth()
            );
            eprintln!("{}", terminal::paint(&stats, Style::Dim));
        }

        Ok(())
    }
}
