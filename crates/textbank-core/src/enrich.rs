use std::io::{Read, Write};

use crate::csvio::{RowReader, RowWriter};
use crate::error::Result;
use crate::phone::PhoneNumber;
use crate::tally::Tally;
use crate::twilio::TwilioClient;

/// Error code Twilio uses for carrier-filtered messages.
pub const DEFAULT_TARGET_ERROR_CODE: &str = "30007";

#[derive(Debug, Clone, Default)]
pub struct EnrichStats {
    pub error_counts: Tally,
    pub carrier_counts: Tally,
}

/// Streams an error-log export, appending a `Carrier` column.
///
/// Every row's error code is tallied, but only rows matching the target
/// code pay for a carrier lookup; all other rows pass through with an empty
/// carrier cell. Output rows are written one-to-one with input, in order.
pub fn annotate_carriers<R: Read, W: Write>(
    client: &TwilioClient,
    input: &mut RowReader<R>,
    output: &mut RowWriter<W>,
    target_error_code: &str,
) -> Result<EnrichStats> {
    let mut header: Vec<String> = input.headers().to_vec();
    header.push("Carrier".to_string());
    output.write_record(&header)?;

    let mut stats = EnrichStats::default();
    for row in input.rows() {
        let row = row?;
        let code = row.require("ErrorCode")?;
        stats.error_counts.bump(code);
        let carrier = if code == target_error_code {
            let destination = PhoneNumber::canonicalize(row.require("To")?);
            let name = client.lookup_carrier(destination.as_str())?;
            stats.carrier_counts.bump(name.as_str());
            name
        } else {
            String::new()
        };
        output.write_record(row.values().chain(std::iter::once(carrier.as_str())))?;
    }
    Ok(stats)
}
