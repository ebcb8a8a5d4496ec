use thiserror::Error;

/// Failures surfaced by ingestion.
///
/// Malformed individual frames are not errors; they are dropped inside
/// the decoder. Only operation-level failures end up here.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("generation failed: {0}")]
    Remote(String),

    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    #[error("read statement: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse statement json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parse statement csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("unexpected statement shape: {0}")]
    UnexpectedShape(String),

    #[error("unsupported statement format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;
