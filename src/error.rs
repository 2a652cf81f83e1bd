use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum PaymentError {
    #[error("Usage error: {0}")]
    #[diagnostic(
        code(payplan::usage),
        help("usage: payplan <ORDERS_JSON> <PAYMENT_METHODS_JSON>")
    )]
    Usage(String),
    #[error("I/O error reading {}: {source}", path.display())]
    #[diagnostic(code(payplan::io))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed input in {}: {source}", path.display())]
    #[diagnostic(code(payplan::format))]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid argument: {0}")]
    #[diagnostic(code(payplan::validation))]
    Validation(String),
    #[error("Output error: {0}")]
    #[diagnostic(code(payplan::output))]
    Output(#[from] csv::Error),
    #[error("Unexpected error: {0}")]
    #[diagnostic(code(payplan::unexpected))]
    Unexpected(String),
}

impl PaymentError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Prefixes a validation message with the entity it concerns.
    pub fn context(self, owner: &str) -> Self {
        match self {
            Self::Validation(message) => Self::Validation(format!("{owner}: {message}")),
            other => other,
        }
    }

    /// Process exit status reported for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 1,
            Self::Io { .. } | Self::Format { .. } => 2,
            Self::Validation(_) => 3,
            Self::Output(_) | Self::Unexpected(_) => 4,
        }
    }
}

impl From<std::io::Error> for PaymentError {
    fn from(err: std::io::Error) -> Self {
        Self::Unexpected(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;
