//! JSON loaders for orders and payment methods.

pub mod orders_reader;
pub mod payment_methods_reader;

use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A numeric field as written in the source file: `"10.50"` or `10.50`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Text(String),
    Number(serde_json::Number),
}

impl RawDecimal {
    /// Parses the field exactly; `field` and `owner` only feed the error message.
    fn parse(&self, field: &str, owner: &str) -> Result<Decimal> {
        let text = match self {
            Self::Text(text) => text.trim().to_string(),
            Self::Number(number) => number.to_string(),
        };
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(|_| {
                PaymentError::validation(format!("Invalid {field} format for {owner}: {text:?}"))
            })
    }
}

fn open(path: &Path) -> Result<File> {
    if !path.is_file() {
        return Err(PaymentError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "file not found or it's not a file",
            ),
        });
    }
    File::open(path).map_err(|source| PaymentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn format_error(origin: &Path, source: serde_json::Error) -> PaymentError {
    if source.is_io() {
        PaymentError::Io {
            path: origin.to_path_buf(),
            source: source.into(),
        }
    } else {
        PaymentError::Format {
            path: origin.to_path_buf(),
            source,
        }
    }
}

fn unnamed_origin() -> PathBuf {
    PathBuf::from("<input>")
}
