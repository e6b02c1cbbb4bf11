use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;
use textbank_core::config::SpokeConfig;
use textbank_core::csvio::{RowReader, RowWriter};
use textbank_core::{dedup, spoke};

#[derive(Subcommand)]
pub enum SpokeSubcommand {
    /// Export every opted-out cell number to a CSV
    Optouts {
        /// Where to write the cell column
        output: PathBuf,
    },

    /// Remove contact rows whose number appears in an opt-out export
    Dedup {
        /// Contact list CSV with a cell column
        superset: PathBuf,
        /// Opt-out CSV with a contact[cell] column
        subset: PathBuf,
        /// Where to write the kept rows
        output: PathBuf,
    },
}

pub fn run(subcmd: SpokeSubcommand) -> anyhow::Result<()> {
    match subcmd {
        SpokeSubcommand::Optouts { output } => optouts(&output),
        SpokeSubcommand::Dedup {
            superset,
            subset,
            output,
        } => dedup(&superset, &subset, &output),
    }
}

fn optouts(output: &Path) -> anyhow::Result<()> {
    let config = SpokeConfig::from_env()?;
    let runtime = tokio::runtime::Runtime::new().context("could not start async runtime")?;
    let cells = runtime.block_on(async {
        let pool = spoke::connect(&config).await?;
        spoke::fetch_optout_cells(&pool).await
    })?;

    let mut writer = RowWriter::from_path(output)
        .with_context(|| format!("could not create {}", output.display()))?;
    writer.write_record(["cell"])?;
    for cell in &cells {
        writer.write_record([cell.as_str()])?;
    }
    println!("Exported {} opt-outs to {}", cells.len(), output.display());
    Ok(())
}

fn dedup(superset: &Path, subset: &Path, output: &Path) -> anyhow::Result<()> {
    let mut superset_reader = RowReader::from_path(superset)
        .with_context(|| format!("could not open {}", superset.display()))?;
    let mut subset_reader = RowReader::from_path(subset)
        .with_context(|| format!("could not open {}", subset.display()))?;
    let mut writer = RowWriter::from_path(output)
        .with_context(|| format!("could not create {}", output.display()))?;

    let stats = dedup::filter_superset(&mut superset_reader, &mut subset_reader, &mut writer)?;
    println!("Removed {}", stats.removed);
    println!("There were {} remaining", stats.kept);
    Ok(())
}
