use crate::error::{Result, TextbankError};
use crate::spoke::CanvassResponse;
use crate::van::{Canvass, CanvassAnswer, CanvassPayload, VanClient};

/// One person whose canvass post VAN refused.
#[derive(Debug, Clone)]
pub struct SyncFailure {
    pub external_id: String,
    pub status: u16,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub posted: usize,
    pub failures: Vec<SyncFailure>,
}

/// Builds the VAN post body for one canvass response.
///
/// The action date is the day the answer was recorded in Spoke; the answer
/// itself travels as the pre-mapped external question and response.
pub fn payload_for(response: &CanvassResponse) -> CanvassPayload {
    CanvassPayload {
        canvass: Canvass {
            action_date: response.qr_created_at.format("%Y-%m-%d").to_string(),
            contact_type: "phone".to_string(),
        },
        add_answers: vec![CanvassAnswer {
            action: "record_answer".to_string(),
            question: response.external_question.clone(),
            responses: vec![response.external_response.clone()],
        }],
    }
}

/// Posts every response to VAN, collecting refusals instead of stopping.
///
/// A non-200 from VAN lands in the report's failure list and the run keeps
/// going; a transport failure is fatal, since every remaining post would
/// hit the same wall.
pub fn sync_canvasses(van: &VanClient, responses: &[CanvassResponse]) -> Result<SyncReport> {
    let mut report = SyncReport::default();
    for response in responses {
        match van.record_canvass(&response.cc_external_id, &payload_for(response)) {
            Ok(()) => report.posted += 1,
            Err(TextbankError::Van {
                person_id,
                status,
                reason,
            }) => {
                report.failures.push(SyncFailure {
                    external_id: person_id,
                    status,
                    reason,
                });
            }
            Err(other) => return Err(other),
        }
    }
    Ok(report)
}
