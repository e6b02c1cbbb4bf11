//! Blocking client for the VAN OSDI API.
//!
//! One endpoint matters here: `record_canvass_helper`, which posts a canvass
//! result against a person id. VAN signals success with exactly HTTP 200;
//! any other status is surfaced with its code and reason so callers can
//! collect per-person failures.

use serde::Serialize;

use crate::config::VanConfig;
use crate::error::{Result, TextbankError};

/// Body of a `record_canvass_helper` post.
#[derive(Debug, Clone, Serialize)]
pub struct CanvassPayload {
    pub canvass: Canvass,
    pub add_answers: Vec<CanvassAnswer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Canvass {
    pub action_date: String,
    pub contact_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CanvassAnswer {
    pub action: String,
    pub question: String,
    pub responses: Vec<String>,
}

pub struct VanClient {
    http: reqwest::blocking::Client,
    config: VanConfig,
}

impl VanClient {
    pub fn new(config: VanConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder().build()?;
        Ok(Self { http, config })
    }

    /// Posts one canvass result for `person_id`.
    pub fn record_canvass(&self, person_id: &str, payload: &CanvassPayload) -> Result<()> {
        let url = format!(
            "{}/people/{}/record_canvass_helper",
            self.config.api_base, person_id
        );
        let resp = self
            .http
            .post(&url)
            .header("OSDI-API-Token", &self.config.api_token)
            .json(payload)
            .send()?;
        let status = resp.status();
        if status.as_u16() == 200 {
            return Ok(());
        }
        Err(TextbankError::Van {
            person_id: person_id.to_string(),
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        })
    }
}
