use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;
use textbank_core::analysis::send_counts;
use textbank_core::csvio::RowReader;

#[derive(Subcommand)]
pub enum AnalysisSubcommand {
    /// Count outbound messages per sending number in a message-log export
    NumberStats {
        /// Message log CSV with Direction and From columns
        input: PathBuf,
    },
}

pub fn run(subcmd: AnalysisSubcommand) -> anyhow::Result<()> {
    match subcmd {
        AnalysisSubcommand::NumberStats { input } => number_stats(&input),
    }
}

fn number_stats(input: &Path) -> anyhow::Result<()> {
    let mut reader = RowReader::from_path(input)
        .with_context(|| format!("could not open {}", input.display()))?;
    let counts = send_counts(&mut reader)?;

    println!("Breakdown by number sent from:");
    for (number, count) in counts.iter() {
        println!("{number}: {count}");
    }
    Ok(())
}
