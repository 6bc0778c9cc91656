use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("unknown calculator: {0}")]
    UnknownCalculator(String),

    #[error("invalid value for {key}: {reason}")]
    InvalidField { key: String, reason: String },

    #[error("input does not match calculator fields: {source}")]
    Decode {
        #[from]
        source: serde_json::Error,
    },

    #[error("failed to encode share query: {source}")]
    Encode {
        #[from]
        source: serde_urlencoded::ser::Error,
    },

    #[error("failed to decode query string: {source}")]
    Query {
        #[from]
        source: serde_urlencoded::de::Error,
    },

    #[error("reference data {table} is unavailable: {reason}")]
    Reference { table: &'static str, reason: String },

    #[error("server error: {source}")]
    Server {
        #[from]
        source: std::io::Error,
    },
}

impl CalcError {
    pub fn invalid_field(key: &str, reason: impl Into<String>) -> Self {
        CalcError::InvalidField {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
