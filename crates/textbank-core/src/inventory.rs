use crate::error::Result;
use crate::phone::area_code_of;
use crate::tally::Tally;
use crate::twilio::TwilioClient;

/// Counts of currently owned numbers, optionally grouped by area code.
#[derive(Debug, Clone)]
pub struct InventoryReport {
    pub total: usize,
    pub by_area_code: Option<Tally>,
}

/// Fetches the account's owned numbers and tallies them.
///
/// Grouping slices the area code straight out of the E.164 string the API
/// returns; numbers too short to carry one land under the empty key.
pub fn count_owned(client: &TwilioClient, group_by_area_code: bool) -> Result<InventoryReport> {
    let numbers = client.owned_numbers()?;
    let total = numbers.len();
    let by_area_code = if group_by_area_code {
        let mut tally = Tally::new();
        for number in &numbers {
            tally.bump(area_code_of(&number.phone_number));
        }
        Some(tally)
    } else {
        None
    };
    Ok(InventoryReport {
        total,
        by_area_code,
    })
}
