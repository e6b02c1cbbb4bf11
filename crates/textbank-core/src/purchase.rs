//! Number purchasing: per-area-code orders and bulk buys.
//!
//! An order is planned first (availability checks, operator prompts for
//! reduced quantities), then executed against the provider. Any failure of
//! a purchase or attach call becomes a per-row status field; only writing
//! the result CSV is fatal mid-batch.

use std::io::{Read, Write};

use tracing::warn;

use crate::csvio::{RowReader, RowWriter};
use crate::error::{Result, TextbankError};
use crate::twilio::TwilioClient;

/// Cap on a bulk buy when the operator does not give one.
pub const DEFAULT_BULK_CAP: usize = 400;

/// Column order of the purchase-result CSV.
pub const RESULT_HEADER: [&str; 5] = [
    "area_code",
    "number",
    "purchase_status",
    "service_status",
    "message",
];

/// Operator confirmation seam. The CLI asks on stdin; tests script answers.
pub trait Prompt {
    fn confirm(&mut self, message: &str) -> bool;
}

// ---------------------------------------------------------------------------
// Order input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub area_code: String,
    pub quantity: usize,
}

/// Reads `area_code, quantity` rows. A quantity that does not parse is a
/// malformed input file, not a per-row condition, so it aborts the run.
pub fn read_requests<R: Read>(input: &mut RowReader<R>) -> Result<Vec<PurchaseRequest>> {
    let mut requests = Vec::new();
    for row in input.rows() {
        let row = row?;
        let area_code = row.require("area_code")?.trim().to_string();
        let raw_quantity = row.require("quantity")?.trim();
        let quantity = raw_quantity
            .parse::<usize>()
            .map_err(|_| TextbankError::InvalidValue {
                column: "quantity".to_string(),
                value: raw_quantity.to_string(),
            })?;
        requests.push(PurchaseRequest {
            area_code,
            quantity,
        });
    }
    Ok(requests)
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Candidate numbers to buy in one area code.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub area_code: String,
    pub numbers: Vec<String>,
}

/// An area code dropped from the order, with the counts that caused it.
#[derive(Debug, Clone)]
pub struct SkippedAreaCode {
    pub area_code: String,
    pub available: usize,
    pub requested: usize,
}

/// The full order, fixed once planned. Execution never re-queries
/// availability; it buys exactly the numbers listed here.
#[derive(Debug, Clone)]
pub struct PurchaseOrder {
    pub lines: Vec<OrderLine>,
    pub skipped: Vec<SkippedAreaCode>,
}

impl PurchaseOrder {
    pub fn total_numbers(&self) -> usize {
        self.lines.iter().map(|line| line.numbers.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Plans an order from per-area-code requests.
///
/// Area codes with nothing available are skipped outright. When fewer
/// numbers are available than requested, the operator is asked to accept
/// the reduced quantity unless `auto_purchase` short-circuits the prompt;
/// declining skips the whole area code. Candidates are taken in the order
/// the provider listed them. The order is keyed by area code: a repeated
/// request row replaces the line planned for that code earlier.
pub fn plan_order(
    client: &TwilioClient,
    requests: &[PurchaseRequest],
    auto_purchase: bool,
    prompt: &mut dyn Prompt,
) -> Result<PurchaseOrder> {
    let mut lines: Vec<OrderLine> = Vec::new();
    let mut skipped = Vec::new();
    for request in requests {
        let available = client.available_numbers(Some(&request.area_code), false)?;
        if available.is_empty() {
            skipped.push(SkippedAreaCode {
                area_code: request.area_code.clone(),
                available: 0,
                requested: request.quantity,
            });
            continue;
        }
        if available.len() < request.quantity && !auto_purchase {
            let message = format!(
                "Area code ({}) only has {} available numbers, you requested {}. Purchase {} instead?",
                request.area_code,
                available.len(),
                request.quantity,
                available.len()
            );
            if !prompt.confirm(&message) {
                skipped.push(SkippedAreaCode {
                    area_code: request.area_code.clone(),
                    available: available.len(),
                    requested: request.quantity,
                });
                continue;
            }
        }
        let take = available.len().min(request.quantity);
        let numbers: Vec<String> = available
            .into_iter()
            .take(take)
            .map(|n| n.phone_number)
            .collect();
        if let Some(line) = lines
            .iter_mut()
            .find(|line| line.area_code == request.area_code)
        {
            line.numbers = numbers;
        } else {
            lines.push(OrderLine {
                area_code: request.area_code.clone(),
                numbers,
            });
        }
    }
    Ok(PurchaseOrder { lines, skipped })
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurchaseSummary {
    pub attempted: usize,
    pub purchased: usize,
    pub purchase_failures: usize,
    pub attach_failures: usize,
}

/// Buys every number in the order, writing one result row per attempt.
///
/// Rows are flushed as they are written, so an interrupted run keeps the
/// results of every purchase already made. A purchase call that fails for
/// any reason records an error row and moves on; it never stops the batch.
/// A successful purchase whose attach fails stays purchased, with the
/// attach error recorded on the row.
pub fn execute_order<W: Write>(
    client: &TwilioClient,
    order: &PurchaseOrder,
    service_sid: Option<&str>,
    output: &mut RowWriter<W>,
) -> Result<PurchaseSummary> {
    output.write_record(RESULT_HEADER)?;
    let mut summary = PurchaseSummary::default();
    for line in &order.lines {
        for number in &line.numbers {
            summary.attempted += 1;
            let mut purchase_status = "success";
            let mut service_status = "";
            let mut message = String::new();
            match client.purchase_number(number) {
                Ok(owned) => {
                    summary.purchased += 1;
                    if let Some(sid) = service_sid {
                        match client.attach_number(sid, &owned.sid) {
                            Ok(()) => service_status = "success",
                            Err(err) => {
                                service_status = "error";
                                message = err.to_string();
                                summary.attach_failures += 1;
                            }
                        }
                    }
                }
                Err(err) => {
                    purchase_status = "error";
                    message = err.to_string();
                    summary.purchase_failures += 1;
                }
            }
            output.write_record([
                line.area_code.as_str(),
                number.as_str(),
                purchase_status,
                service_status,
                message.as_str(),
            ])?;
        }
    }
    Ok(summary)
}

// ---------------------------------------------------------------------------
// Bulk purchasing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct BulkSummary {
    pub service_sid: String,
    pub purchased: usize,
    pub attached: usize,
    pub failures: usize,
}

/// Creates a messaging service and buys SMS-capable numbers into it until
/// the cap is hit or inventory runs dry.
///
/// Each pass re-queries nationwide availability and walks the list. A pass
/// that buys nothing ends the run: the provider is returning only numbers
/// we cannot buy, and another pass would see the same list. Failed
/// purchases and attaches are logged and skipped without consuming
/// capacity.
pub fn purchase_bulk(
    client: &TwilioClient,
    service_label: &str,
    cap: usize,
    inbound_url: Option<&str>,
) -> Result<BulkSummary> {
    let service = client.create_service(service_label, inbound_url)?;
    let mut summary = BulkSummary {
        service_sid: service.sid.clone(),
        ..Default::default()
    };
    let mut remaining = cap;
    while remaining > 0 {
        let available = client.available_numbers(None, true)?;
        if available.is_empty() {
            break;
        }
        let purchased_before = summary.purchased;
        for candidate in available {
            if remaining == 0 {
                break;
            }
            match client.purchase_number(&candidate.phone_number) {
                Ok(owned) => {
                    remaining -= 1;
                    summary.purchased += 1;
                    match client.attach_number(&service.sid, &owned.sid) {
                        Ok(()) => summary.attached += 1,
                        Err(err) => {
                            summary.failures += 1;
                            warn!(
                                "could not attach {} to {}: {}",
                                candidate.phone_number, service.sid, err
                            );
                        }
                    }
                }
                Err(err) => {
                    summary.failures += 1;
                    warn!("could not purchase {}: {}", candidate.phone_number, err);
                }
            }
        }
        if summary.purchased == purchased_before {
            break;
        }
    }
    Ok(summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TwilioConfig;
    use mockito::Matcher;
    use std::collections::VecDeque;

    fn client_for(server: &mockito::ServerGuard) -> TwilioClient {
        TwilioClient::new(TwilioConfig {
            account_sid: "AC123".to_string(),
            auth_token: "secret".to_string(),
            api_base: server.url(),
            messaging_base: server.url(),
            lookups_base: server.url(),
        })
        .unwrap()
    }

    struct ScriptedPrompt {
        answers: VecDeque<bool>,
        asked: Vec<String>,
    }

    impl ScriptedPrompt {
        fn answering(answers: &[bool]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompt for ScriptedPrompt {
        fn confirm(&mut self, message: &str) -> bool {
            self.asked.push(message.to_string());
            self.answers.pop_front().unwrap_or(false)
        }
    }

    fn available_body(numbers: &[&str]) -> String {
        let items: Vec<String> = numbers
            .iter()
            .map(|n| format!(r#"{{"phone_number":"{n}"}}"#))
            .collect();
        format!(r#"{{"available_phone_numbers":[{}]}}"#, items.join(","))
    }

    fn mock_availability(
        server: &mut mockito::ServerGuard,
        area_code: &str,
        numbers: &[&str],
    ) -> mockito::Mock {
        server
            .mock(
                "GET",
                "/2010-04-01/Accounts/AC123/AvailablePhoneNumbers/US/Local.json",
            )
            .match_query(Matcher::UrlEncoded("AreaCode".into(), area_code.into()))
            .with_body(available_body(numbers))
            .create()
    }

    #[test]
    fn read_requests_parses_rows() {
        let csv = "area_code,quantity\n517,3\n906, 2 \n";
        let mut reader = RowReader::from_reader(csv.as_bytes()).unwrap();
        let requests = read_requests(&mut reader).unwrap();
        assert_eq!(
            requests,
            vec![
                PurchaseRequest {
                    area_code: "517".to_string(),
                    quantity: 3
                },
                PurchaseRequest {
                    area_code: "906".to_string(),
                    quantity: 2
                },
            ]
        );
    }

    #[test]
    fn read_requests_rejects_bad_quantity() {
        let csv = "area_code,quantity\n517,lots\n";
        let mut reader = RowReader::from_reader(csv.as_bytes()).unwrap();
        let err = read_requests(&mut reader).unwrap_err();
        assert!(matches!(err, TextbankError::InvalidValue { .. }));
    }

    #[test]
    fn plan_takes_requested_count_when_plentiful() {
        let mut server = mockito::Server::new();
        mock_availability(
            &mut server,
            "517",
            &["+15175550001", "+15175550002", "+15175550003"],
        );

        let requests = [PurchaseRequest {
            area_code: "517".to_string(),
            quantity: 2,
        }];
        let mut prompt = ScriptedPrompt::answering(&[]);
        let order = plan_order(&client_for(&server), &requests, false, &mut prompt).unwrap();

        assert_eq!(order.total_numbers(), 2);
        assert_eq!(
            order.lines[0].numbers,
            vec!["+15175550001", "+15175550002"]
        );
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn auto_purchase_takes_reduced_count_without_asking() {
        let mut server = mockito::Server::new();
        mock_availability(&mut server, "517", &["+15175550001", "+15175550002"]);

        let requests = [PurchaseRequest {
            area_code: "517".to_string(),
            quantity: 5,
        }];
        let mut prompt = ScriptedPrompt::answering(&[]);
        let order = plan_order(&client_for(&server), &requests, true, &mut prompt).unwrap();

        assert_eq!(order.total_numbers(), 2);
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn declined_reduced_prompt_skips_the_area_code() {
        let mut server = mockito::Server::new();
        mock_availability(&mut server, "517", &["+15175550001"]);

        let requests = [PurchaseRequest {
            area_code: "517".to_string(),
            quantity: 5,
        }];
        let mut prompt = ScriptedPrompt::answering(&[false]);
        let order = plan_order(&client_for(&server), &requests, false, &mut prompt).unwrap();

        assert!(order.is_empty());
        assert_eq!(order.skipped.len(), 1);
        assert_eq!(order.skipped[0].available, 1);
        assert_eq!(order.skipped[0].requested, 5);
        assert_eq!(prompt.asked.len(), 1);
    }

    #[test]
    fn accepted_reduced_prompt_takes_what_is_there() {
        let mut server = mockito::Server::new();
        mock_availability(&mut server, "517", &["+15175550001"]);

        let requests = [PurchaseRequest {
            area_code: "517".to_string(),
            quantity: 5,
        }];
        let mut prompt = ScriptedPrompt::answering(&[true]);
        let order = plan_order(&client_for(&server), &requests, false, &mut prompt).unwrap();

        assert_eq!(order.total_numbers(), 1);
        assert!(order.skipped.is_empty());
    }

    #[test]
    fn empty_area_code_is_skipped_without_prompting() {
        let mut server = mockito::Server::new();
        mock_availability(&mut server, "989", &[]);

        let requests = [PurchaseRequest {
            area_code: "989".to_string(),
            quantity: 3,
        }];
        let mut prompt = ScriptedPrompt::answering(&[]);
        let order = plan_order(&client_for(&server), &requests, false, &mut prompt).unwrap();

        assert!(order.is_empty());
        assert_eq!(order.skipped[0].available, 0);
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn repeated_area_code_replaces_the_earlier_line() {
        let mut server = mockito::Server::new();
        let availability = server
            .mock(
                "GET",
                "/2010-04-01/Accounts/AC123/AvailablePhoneNumbers/US/Local.json",
            )
            .match_query(Matcher::UrlEncoded("AreaCode".into(), "517".into()))
            .with_body(available_body(&[
                "+15175550001",
                "+15175550002",
                "+15175550003",
            ]))
            .expect(2)
            .create();

        let requests = [
            PurchaseRequest {
                area_code: "517".to_string(),
                quantity: 3,
            },
            PurchaseRequest {
                area_code: "517".to_string(),
                quantity: 2,
            },
        ];
        let mut prompt = ScriptedPrompt::answering(&[]);
        let order = plan_order(&client_for(&server), &requests, false, &mut prompt).unwrap();

        assert_eq!(order.lines.len(), 1);
        assert_eq!(
            order.lines[0].numbers,
            vec!["+15175550001", "+15175550002"]
        );
        availability.assert();
    }

    #[test]
    fn one_failed_purchase_does_not_stop_the_batch() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/2010-04-01/Accounts/AC123/IncomingPhoneNumbers.json")
            .match_body(Matcher::UrlEncoded(
                "PhoneNumber".into(),
                "+15175550001".into(),
            ))
            .with_status(400)
            .with_body(r#"{"code":21422,"message":"not available","status":400}"#)
            .create();
        server
            .mock("POST", "/2010-04-01/Accounts/AC123/IncomingPhoneNumbers.json")
            .match_body(Matcher::UrlEncoded(
                "PhoneNumber".into(),
                "+15175550002".into(),
            ))
            .with_body(r#"{"sid":"PN2","phone_number":"+15175550002"}"#)
            .create();

        let order = PurchaseOrder {
            lines: vec![OrderLine {
                area_code: "517".to_string(),
                numbers: vec!["+15175550001".to_string(), "+15175550002".to_string()],
            }],
            skipped: vec![],
        };
        let mut output = RowWriter::from_writer(vec![]);
        let summary = execute_order(&client_for(&server), &order, None, &mut output).unwrap();

        assert_eq!(summary.attempted, 2);
        assert_eq!(summary.purchased, 1);
        assert_eq!(summary.purchase_failures, 1);

        let text = String::from_utf8(output.into_inner().unwrap()).unwrap();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            "area_code,number,purchase_status,service_status,message"
        );
        assert!(rows[1].starts_with("517,+15175550001,error,,"));
        assert_eq!(rows[2], "517,+15175550002,success,,");
    }

    #[test]
    fn malformed_purchase_response_records_an_error_row() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/2010-04-01/Accounts/AC123/IncomingPhoneNumbers.json")
            .match_body(Matcher::UrlEncoded(
                "PhoneNumber".into(),
                "+15175550001".into(),
            ))
            .with_body("upstream proxy error")
            .create();
        server
            .mock("POST", "/2010-04-01/Accounts/AC123/IncomingPhoneNumbers.json")
            .match_body(Matcher::UrlEncoded(
                "PhoneNumber".into(),
                "+15175550002".into(),
            ))
            .with_body(r#"{"sid":"PN2","phone_number":"+15175550002"}"#)
            .create();

        let order = PurchaseOrder {
            lines: vec![OrderLine {
                area_code: "517".to_string(),
                numbers: vec!["+15175550001".to_string(), "+15175550002".to_string()],
            }],
            skipped: vec![],
        };
        let mut output = RowWriter::from_writer(vec![]);
        let summary = execute_order(&client_for(&server), &order, None, &mut output).unwrap();

        assert_eq!(summary.attempted, 2);
        assert_eq!(summary.purchased, 1);
        assert_eq!(summary.purchase_failures, 1);

        let text = String::from_utf8(output.into_inner().unwrap()).unwrap();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].starts_with("517,+15175550001,error,,"));
        assert_eq!(rows[2], "517,+15175550002,success,,");
    }

    #[test]
    fn attach_failure_keeps_the_purchase() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/2010-04-01/Accounts/AC123/IncomingPhoneNumbers.json")
            .with_body(r#"{"sid":"PN1","phone_number":"+15175550001"}"#)
            .create();
        server
            .mock("POST", "/v1/Services/MG42/PhoneNumbers")
            .with_status(409)
            .with_body(r#"{"message":"number already in a service","status":409}"#)
            .create();

        let order = PurchaseOrder {
            lines: vec![OrderLine {
                area_code: "517".to_string(),
                numbers: vec!["+15175550001".to_string()],
            }],
            skipped: vec![],
        };
        let mut output = RowWriter::from_writer(vec![]);
        let summary =
            execute_order(&client_for(&server), &order, Some("MG42"), &mut output).unwrap();

        assert_eq!(summary.purchased, 1);
        assert_eq!(summary.attach_failures, 1);

        let text = String::from_utf8(output.into_inner().unwrap()).unwrap();
        assert!(text.contains("517,+15175550001,success,error,"));
        assert!(text.contains("number already in a service"));
    }

    #[test]
    fn attach_success_is_recorded_on_the_row() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/2010-04-01/Accounts/AC123/IncomingPhoneNumbers.json")
            .with_body(r#"{"sid":"PN1","phone_number":"+15175550001"}"#)
            .create();
        server
            .mock("POST", "/v1/Services/MG42/PhoneNumbers")
            .match_body(Matcher::UrlEncoded("PhoneNumberSid".into(), "PN1".into()))
            .with_body(r#"{"sid":"PN1","phone_number":"+15175550001"}"#)
            .create();

        let order = PurchaseOrder {
            lines: vec![OrderLine {
                area_code: "517".to_string(),
                numbers: vec!["+15175550001".to_string()],
            }],
            skipped: vec![],
        };
        let mut output = RowWriter::from_writer(vec![]);
        execute_order(&client_for(&server), &order, Some("MG42"), &mut output).unwrap();

        let text = String::from_utf8(output.into_inner().unwrap()).unwrap();
        assert!(text.contains("517,+15175550001,success,success,"));
    }

    #[test]
    fn bulk_stops_at_the_cap() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/v1/Services")
            .with_body(r#"{"sid":"MG42"}"#)
            .create();
        let availability = server
            .mock(
                "GET",
                "/2010-04-01/Accounts/AC123/AvailablePhoneNumbers/US/Local.json",
            )
            .match_query(Matcher::UrlEncoded("SmsEnabled".into(), "true".into()))
            .with_body(available_body(&[
                "+15175550001",
                "+15175550002",
                "+15175550003",
            ]))
            .expect(1)
            .create();
        let purchases = server
            .mock("POST", "/2010-04-01/Accounts/AC123/IncomingPhoneNumbers.json")
            .with_body(r#"{"sid":"PN1","phone_number":"+15175550001"}"#)
            .expect(2)
            .create();
        server
            .mock("POST", "/v1/Services/MG42/PhoneNumbers")
            .with_body(r#"{"sid":"PN1","phone_number":"+15175550001"}"#)
            .expect(2)
            .create();

        let summary = purchase_bulk(&client_for(&server), "wave-3", 2, None).unwrap();
        assert_eq!(summary.service_sid, "MG42");
        assert_eq!(summary.purchased, 2);
        assert_eq!(summary.attached, 2);
        assert_eq!(summary.failures, 0);
        availability.assert();
        purchases.assert();
    }

    #[test]
    fn bulk_with_no_inventory_buys_nothing() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/v1/Services")
            .with_body(r#"{"sid":"MG42"}"#)
            .create();
        server
            .mock(
                "GET",
                "/2010-04-01/Accounts/AC123/AvailablePhoneNumbers/US/Local.json",
            )
            .match_query(Matcher::UrlEncoded("SmsEnabled".into(), "true".into()))
            .with_body(available_body(&[]))
            .expect(1)
            .create();

        let summary = purchase_bulk(&client_for(&server), "wave-3", 10, None).unwrap();
        assert_eq!(summary.purchased, 0);
        assert_eq!(summary.service_sid, "MG42");
    }

    #[test]
    fn bulk_ends_after_a_pass_with_no_progress() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/v1/Services")
            .with_body(r#"{"sid":"MG42"}"#)
            .create();
        let availability = server
            .mock(
                "GET",
                "/2010-04-01/Accounts/AC123/AvailablePhoneNumbers/US/Local.json",
            )
            .match_query(Matcher::UrlEncoded("SmsEnabled".into(), "true".into()))
            .with_body(available_body(&["+15175550001"]))
            .expect(1)
            .create();
        server
            .mock("POST", "/2010-04-01/Accounts/AC123/IncomingPhoneNumbers.json")
            .with_status(400)
            .with_body(r#"{"code":21422,"message":"not available","status":400}"#)
            .expect(1)
            .create();

        let summary = purchase_bulk(&client_for(&server), "wave-3", 10, None).unwrap();
        assert_eq!(summary.purchased, 0);
        assert_eq!(summary.failures, 1);
        availability.assert();
    }

    #[test]
    fn bulk_failed_purchase_does_not_consume_capacity() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/v1/Services")
            .with_body(r#"{"sid":"MG42"}"#)
            .create();
        let availability = server
            .mock(
                "GET",
                "/2010-04-01/Accounts/AC123/AvailablePhoneNumbers/US/Local.json",
            )
            .match_query(Matcher::UrlEncoded("SmsEnabled".into(), "true".into()))
            .with_body(available_body(&[
                "+15175550001",
                "+15175550002",
                "+15175550003",
            ]))
            .expect(1)
            .create();
        server
            .mock("POST", "/2010-04-01/Accounts/AC123/IncomingPhoneNumbers.json")
            .match_body(Matcher::UrlEncoded(
                "PhoneNumber".into(),
                "+15175550001".into(),
            ))
            .with_body("upstream proxy error")
            .create();
        let purchases = server
            .mock("POST", "/2010-04-01/Accounts/AC123/IncomingPhoneNumbers.json")
            .match_body(Matcher::AnyOf(vec![
                Matcher::UrlEncoded("PhoneNumber".into(), "+15175550002".into()),
                Matcher::UrlEncoded("PhoneNumber".into(), "+15175550003".into()),
            ]))
            .with_body(r#"{"sid":"PN2","phone_number":"+15175550002"}"#)
            .expect(2)
            .create();
        server
            .mock("POST", "/v1/Services/MG42/PhoneNumbers")
            .with_body(r#"{"sid":"PN2","phone_number":"+15175550002"}"#)
            .expect(2)
            .create();

        let summary = purchase_bulk(&client_for(&server), "wave-3", 2, None).unwrap();
        assert_eq!(summary.purchased, 2);
        assert_eq!(summary.attached, 2);
        assert_eq!(summary.failures, 1);
        availability.assert();
        purchases.assert();
    }
}
