use barscan_decode::DecodeError;

/// Errors raised before any frame is processed.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("please specify an image for barcode extraction")]
    NoImage,
    #[error("`--frames` is only valid in live mode")]
    FramesOutsideLive,
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors that end a scan session.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("frame source `{source_name}` unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("display error: {0}")]
    Display(String),
}

impl ScanError {
    pub(crate) fn source_unavailable(name: impl Into<String>, reason: impl ToString) -> Self {
        ScanError::SourceUnavailable {
            source_name: name.into(),
            reason: reason.to_string(),
        }
    }
}
