use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Invalid timestamp {value:?} on issue {issue}: {source}")]
    InvalidTimestamp {
        issue: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Failed to decode Jira response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0} must be set")]
    MissingVar(String),
    #[error("Invalid value {value:?} for {name}")]
    InvalidVar { name: String, value: String },
}
