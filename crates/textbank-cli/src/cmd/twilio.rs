use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;
use textbank_core::config::TwilioConfig;
use textbank_core::csvio::{RowReader, RowWriter};
use textbank_core::enrich::{self, DEFAULT_TARGET_ERROR_CODE};
use textbank_core::inventory;
use textbank_core::purchase::{self, Prompt, DEFAULT_BULK_CAP};
use textbank_core::twilio::TwilioClient;
use textbank_core::TextbankError;

use crate::prompt::StdinPrompt;

#[derive(Subcommand)]
pub enum TwilioSubcommand {
    /// Count the numbers the account owns
    Count {
        /// Also break the count down by area code
        #[arg(long, short = 'g')]
        group_by_area_code: bool,
    },

    /// Buy numbers per area code from a request CSV
    Purchase {
        /// CSV with area_code and quantity columns
        input: PathBuf,
        /// Where to write one result row per attempted number
        output: PathBuf,
        /// Accept reduced quantities without prompting
        #[arg(long, short = 'y')]
        auto_purchase: bool,
        /// Attach each purchased number to this messaging service
        #[arg(long, short = 's')]
        service_sid: Option<String>,
    },

    /// Buy all SMS-capable numbers up to a cap into a new messaging service
    PurchaseBulk {
        /// Friendly name for the new messaging service
        label: String,
        /// Most numbers to buy
        #[arg(long, default_value_t = DEFAULT_BULK_CAP)]
        cap: usize,
        /// Inbound webhook to configure on the new service
        #[arg(long)]
        inbound_url: Option<String>,
    },

    /// Annotate an error-log export with carrier names
    Sms {
        /// Error log CSV with ErrorCode and To columns
        input: PathBuf,
        /// Where to write the annotated rows
        output: PathBuf,
        /// Error code that triggers a carrier lookup
        #[arg(long, default_value = DEFAULT_TARGET_ERROR_CODE)]
        error_code: String,
        /// Do not print stats, only write the output CSV
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Messaging service membership
    Service {
        #[command(subcommand)]
        subcommand: ServiceSubcommand,
    },
}

#[derive(Subcommand)]
pub enum ServiceSubcommand {
    /// Count the numbers attached to a messaging service
    Count { service_sid: String },

    /// Attach already-owned numbers from a CSV to a messaging service
    Add {
        /// CSV with a number column
        input: PathBuf,
        service_sid: String,
    },
}

pub fn run(subcmd: TwilioSubcommand) -> anyhow::Result<()> {
    match subcmd {
        TwilioSubcommand::Count { group_by_area_code } => count(group_by_area_code),
        TwilioSubcommand::Purchase {
            input,
            output,
            auto_purchase,
            service_sid,
        } => purchase(&input, &output, auto_purchase, service_sid.as_deref()),
        TwilioSubcommand::PurchaseBulk {
            label,
            cap,
            inbound_url,
        } => purchase_bulk(&label, cap, inbound_url.as_deref()),
        TwilioSubcommand::Sms {
            input,
            output,
            error_code,
            quiet,
        } => sms(&input, &output, &error_code, quiet),
        TwilioSubcommand::Service { subcommand } => match subcommand {
            ServiceSubcommand::Count { service_sid } => service_count(&service_sid),
            ServiceSubcommand::Add { input, service_sid } => service_add(&input, &service_sid),
        },
    }
}

fn client() -> anyhow::Result<TwilioClient> {
    let config = TwilioConfig::from_env().context("twilio credentials")?;
    Ok(TwilioClient::new(config)?)
}

fn count(group_by_area_code: bool) -> anyhow::Result<()> {
    let client = client()?;
    let report = inventory::count_owned(&client, group_by_area_code)?;

    println!("Number of Twilio SMS Numbers: {}", report.total);
    if let Some(by_area_code) = report.by_area_code {
        println!("\nBy area code:");
        for (area_code, count) in by_area_code.iter() {
            println!("({area_code}): {count}");
        }
    }
    Ok(())
}

fn purchase(
    input: &Path,
    output: &Path,
    auto_purchase: bool,
    service_sid: Option<&str>,
) -> anyhow::Result<()> {
    let client = client()?;
    let mut reader = RowReader::from_path(input)
        .with_context(|| format!("could not open {}", input.display()))?;
    let requests = purchase::read_requests(&mut reader)?;

    let mut prompt = StdinPrompt;
    let order = purchase::plan_order(&client, &requests, auto_purchase, &mut prompt)?;

    for skip in &order.skipped {
        println!(
            "Area code ({}) has {} available numbers. Skipping this area code.",
            skip.area_code, skip.available
        );
    }

    let mut writer = RowWriter::from_path(output)
        .with_context(|| format!("could not create {}", output.display()))?;

    println!("Please confirm your order:");
    for line in &order.lines {
        println!("({}): {}", line.area_code, line.numbers.len());
    }
    if !prompt.confirm("\nIs this correct?") {
        anyhow::bail!("order not confirmed");
    }

    let summary = purchase::execute_order(&client, &order, service_sid, &mut writer)?;
    println!(
        "Purchased {} of {} numbers ({} purchase failures, {} attach failures).",
        summary.purchased, summary.attempted, summary.purchase_failures, summary.attach_failures
    );
    Ok(())
}

fn purchase_bulk(label: &str, cap: usize, inbound_url: Option<&str>) -> anyhow::Result<()> {
    let client = client()?;
    let summary = purchase::purchase_bulk(&client, label, cap, inbound_url)?;

    println!("Created messaging service {}", summary.service_sid);
    println!(
        "Purchased {} numbers, attached {} ({} failures).",
        summary.purchased, summary.attached, summary.failures
    );
    Ok(())
}

fn sms(input: &Path, output: &Path, error_code: &str, quiet: bool) -> anyhow::Result<()> {
    let client = client()?;
    let mut reader = RowReader::from_path(input)
        .with_context(|| format!("could not open {}", input.display()))?;
    let mut writer = RowWriter::from_path(output)
        .with_context(|| format!("could not create {}", output.display()))?;

    let stats = enrich::annotate_carriers(&client, &mut reader, &mut writer, error_code)?;
    if quiet {
        return Ok(());
    }

    println!("Results");
    println!("(full results in {})\n", output.display());

    println!("Breakdown by error type:");
    for (code, count) in stats.error_counts.iter() {
        println!("{code}: {count}");
    }

    println!("\n{error_code} breakdown by carrier:");
    for (carrier, count) in stats.carrier_counts.iter() {
        println!("{carrier}: {count}");
    }
    Ok(())
}

fn service_count(service_sid: &str) -> anyhow::Result<()> {
    let client = client()?;
    let numbers = client.service_numbers(service_sid)?;
    println!("Found {} numbers in service {}", numbers.len(), service_sid);
    Ok(())
}

fn service_add(input: &Path, service_sid: &str) -> anyhow::Result<()> {
    let client = client()?;
    let mut reader = RowReader::from_path(input)
        .with_context(|| format!("could not open {}", input.display()))?;

    let mut added = 0usize;
    for row in reader.rows() {
        let row = row?;
        let number = row.require("number")?;
        let owned = client
            .find_owned(number)?
            .ok_or_else(|| TextbankError::NumberNotFound(number.to_string()))?;
        client.attach_number(service_sid, &owned.sid)?;
        added += 1;
    }
    println!("Added {added} numbers to service {service_sid}");
    Ok(())
}
