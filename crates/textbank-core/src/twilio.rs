//! Blocking client for the Twilio REST API.
//!
//! Covers the slices of the API the commands need: owned-number inventory,
//! available-number search, purchasing, messaging services and carrier
//! lookups. List endpoints follow Twilio's pagination links until exhausted.

use serde::Deserialize;

use crate::config::TwilioConfig;
use crate::error::{Result, TextbankError};

// ---------------------------------------------------------------------------
// Resource payloads
// ---------------------------------------------------------------------------

/// A phone number owned by the account.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnedNumber {
    pub sid: String,
    pub phone_number: String,
}

/// A number available for purchase in a search result.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailableNumber {
    pub phone_number: String,
}

/// A messaging service container.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagingService {
    pub sid: String,
}

/// A phone number attached to a messaging service.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceNumber {
    pub sid: String,
    pub phone_number: String,
}

#[derive(Debug, Deserialize)]
struct OwnedNumberPage {
    incoming_phone_numbers: Vec<OwnedNumber>,
    next_page_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AvailableNumberPage {
    available_phone_numbers: Vec<AvailableNumber>,
}

#[derive(Debug, Deserialize)]
struct ServiceNumberPage {
    phone_numbers: Vec<ServiceNumber>,
    meta: PageMeta,
}

#[derive(Debug, Deserialize)]
struct PageMeta {
    next_page_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CarrierEnvelope {
    carrier: Option<CarrierInfo>,
}

#[derive(Debug, Deserialize)]
struct CarrierInfo {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct TwilioClient {
    http: reqwest::blocking::Client,
    config: TwilioConfig,
}

impl TwilioClient {
    pub fn new(config: TwilioConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder().build()?;
        Ok(Self { http, config })
    }

    /// Every phone number owned by the account, across all pages.
    pub fn owned_numbers(&self) -> Result<Vec<OwnedNumber>> {
        let mut numbers = Vec::new();
        let mut url = self.account_url("IncomingPhoneNumbers.json");
        loop {
            let page: OwnedNumberPage = self.get(&url, &[])?.json()?;
            numbers.extend(page.incoming_phone_numbers);
            match page.next_page_uri {
                Some(next) => url = format!("{}{}", self.config.api_base, next),
                None => break,
            }
        }
        Ok(numbers)
    }

    /// Looks up an owned number by its E.164 value.
    pub fn find_owned(&self, e164: &str) -> Result<Option<OwnedNumber>> {
        let url = self.account_url("IncomingPhoneNumbers.json");
        let page: OwnedNumberPage = self.get(&url, &[("PhoneNumber", e164)])?.json()?;
        Ok(page.incoming_phone_numbers.into_iter().next())
    }

    /// Searches US local numbers available for purchase.
    ///
    /// `area_code` narrows the search; `sms_only` restricts results to
    /// SMS-capable numbers.
    pub fn available_numbers(
        &self,
        area_code: Option<&str>,
        sms_only: bool,
    ) -> Result<Vec<AvailableNumber>> {
        let url = self.account_url("AvailablePhoneNumbers/US/Local.json");
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(code) = area_code {
            query.push(("AreaCode", code));
        }
        if sms_only {
            query.push(("SmsEnabled", "true"));
        }
        let page: AvailableNumberPage = self.get(&url, &query)?.json()?;
        Ok(page.available_phone_numbers)
    }

    /// Buys a number. The returned resource carries the sid needed to attach
    /// it to a messaging service.
    pub fn purchase_number(&self, e164: &str) -> Result<OwnedNumber> {
        let url = self.account_url("IncomingPhoneNumbers.json");
        let number = self.post_form(&url, &[("PhoneNumber", e164)])?.json()?;
        Ok(number)
    }

    /// Creates a messaging service, optionally wired to an inbound webhook.
    pub fn create_service(
        &self,
        friendly_name: &str,
        inbound_request_url: Option<&str>,
    ) -> Result<MessagingService> {
        let url = format!("{}/v1/Services", self.config.messaging_base);
        let mut form = vec![("FriendlyName", friendly_name)];
        if let Some(webhook) = inbound_request_url {
            form.push(("InboundRequestUrl", webhook));
        }
        let service = self.post_form(&url, &form)?.json()?;
        Ok(service)
    }

    /// Every phone number attached to a messaging service, across all pages.
    pub fn service_numbers(&self, service_sid: &str) -> Result<Vec<ServiceNumber>> {
        let mut numbers = Vec::new();
        let mut url = format!(
            "{}/v1/Services/{}/PhoneNumbers",
            self.config.messaging_base, service_sid
        );
        loop {
            let page: ServiceNumberPage = self.get(&url, &[])?.json()?;
            numbers.extend(page.phone_numbers);
            match page.meta.next_page_url {
                Some(next) => url = next,
                None => break,
            }
        }
        Ok(numbers)
    }

    /// Attaches an owned number to a messaging service.
    pub fn attach_number(&self, service_sid: &str, number_sid: &str) -> Result<()> {
        let url = format!(
            "{}/v1/Services/{}/PhoneNumbers",
            self.config.messaging_base, service_sid
        );
        self.post_form(&url, &[("PhoneNumberSid", number_sid)])?;
        Ok(())
    }

    /// Carrier name for a number, via the Lookups API.
    pub fn lookup_carrier(&self, e164: &str) -> Result<String> {
        let url = format!("{}/v1/PhoneNumbers/{}", self.config.lookups_base, e164);
        let envelope: CarrierEnvelope = self.get(&url, &[("Type", "carrier")])?.json()?;
        Ok(envelope
            .carrier
            .and_then(|c| c.name)
            .unwrap_or_else(|| "unknown".to_string()))
    }

    fn account_url(&self, resource: &str) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/{}",
            self.config.api_base, self.config.account_sid, resource
        )
    }

    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<reqwest::blocking::Response> {
        let resp = self
            .http
            .get(url)
            .query(query)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .send()?;
        check(resp)
    }

    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<reqwest::blocking::Response> {
        let resp = self
            .http
            .post(url)
            .form(form)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .send()?;
        check(resp)
    }
}

/// Maps non-2xx responses to an error carrying Twilio's own message when the
/// body has one.
fn check(resp: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp
        .json::<ApiErrorBody>()
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    Err(TextbankError::Twilio {
        status: status.as_u16(),
        message,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
