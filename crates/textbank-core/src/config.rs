use crate::error::{Result, TextbankError};

const DEFAULT_TWILIO_API_BASE: &str = "https://api.twilio.com";
const DEFAULT_TWILIO_MESSAGING_BASE: &str = "https://messaging.twilio.com";
const DEFAULT_TWILIO_LOOKUPS_BASE: &str = "https://lookups.twilio.com";
const DEFAULT_VAN_API_BASE: &str = "https://osdi.ngpvan.com/api/v1";

/// Credentials and endpoints for the Twilio REST API.
///
/// The base URLs are overridable so tests can point the client at a local
/// mock server.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub api_base: String,
    pub messaging_base: String,
    pub lookups_base: String,
}

impl TwilioConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            account_sid: required("TWILIO_ACCOUNT_SID")?,
            auth_token: required("TWILIO_AUTH_TOKEN")?,
            api_base: optional("TWILIO_API_BASE", DEFAULT_TWILIO_API_BASE),
            messaging_base: optional("TWILIO_MESSAGING_BASE", DEFAULT_TWILIO_MESSAGING_BASE),
            lookups_base: optional("TWILIO_LOOKUPS_BASE", DEFAULT_TWILIO_LOOKUPS_BASE),
        })
    }
}

/// Token and endpoint for the VAN OSDI API.
#[derive(Debug, Clone)]
pub struct VanConfig {
    pub api_token: String,
    pub api_base: String,
}

impl VanConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_token: required("VAN_API_TOKEN")?,
            api_base: optional("VAN_API_BASE", DEFAULT_VAN_API_BASE),
        })
    }
}

/// Connection string for the Spoke postgres database.
#[derive(Debug, Clone)]
pub struct SpokeConfig {
    pub database_url: String,
}

impl SpokeConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: required("SPOKE_DATABASE_URL")?,
        })
    }
}

fn required(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| TextbankError::NotConfigured(name.to_string()))
}

fn optional(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
