use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextbankError {
    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("invalid value '{value}' in column '{column}'")]
    InvalidValue { column: String, value: String },

    #[error("not configured: set {0}")]
    NotConfigured(String),

    #[error("number not found in account: {0}")]
    NumberNotFound(String),

    #[error("twilio returned {status}: {message}")]
    Twilio { status: u16, message: String },

    #[error("van returned {status} for person {person_id}: {reason}")]
    Van {
        person_id: String,
        status: u16,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, TextbankError>;
