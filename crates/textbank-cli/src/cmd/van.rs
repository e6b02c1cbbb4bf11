use anyhow::Context;
use clap::Subcommand;
use textbank_core::config::{SpokeConfig, VanConfig};
use textbank_core::van::VanClient;
use textbank_core::{spoke, sync};

#[derive(Subcommand)]
pub enum VanSubcommand {
    /// Post canvass responses from Spoke to VAN
    Sync,
}

pub fn run(subcmd: VanSubcommand) -> anyhow::Result<()> {
    match subcmd {
        VanSubcommand::Sync => sync_canvasses(),
    }
}

fn sync_canvasses() -> anyhow::Result<()> {
    let spoke_config = SpokeConfig::from_env()?;
    let van = VanClient::new(VanConfig::from_env()?)?;

    let runtime = tokio::runtime::Runtime::new().context("could not start async runtime")?;
    let responses = runtime.block_on(async {
        let pool = spoke::connect(&spoke_config).await?;
        spoke::fetch_canvass_responses(&pool).await
    })?;

    println!("Syncing {} canvass responses", responses.len());
    let report = sync::sync_canvasses(&van, &responses)?;

    println!("Posted {} responses to VAN", report.posted);
    if !report.failures.is_empty() {
        println!("\n{} failures:", report.failures.len());
        for failure in &report.failures {
            println!(
                "{}: {} {}",
                failure.external_id, failure.status, failure.reason
            );
        }
    }
    Ok(())
}
