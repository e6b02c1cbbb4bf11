use std::io::Read;

use crate::csvio::RowReader;
use crate::error::Result;
use crate::tally::Tally;

/// Tallies outbound messages per sending number from a message-log export.
///
/// Inbound rows are replies from contacts, not sends, so they are skipped.
pub fn send_counts<R: Read>(reader: &mut RowReader<R>) -> Result<Tally> {
    let mut counts = Tally::new();
    for row in reader.rows() {
        let row = row?;
        if row.require("Direction")? == "inbound" {
            continue;
        }
        counts.bump(row.require("From")?);
    }
    Ok(counts)
}
