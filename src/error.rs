//! Error plumbing for the exporter.
//!
//! Failures are classified at the boundary where they occur by attaching an [`ErrorType`] label
//! as the outermost context. No failure is retried; each ends the current run and is reported to
//! the user. An empty fetch result is not an error and never reaches this module.

use serde::{Deserialize, Serialize};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies a failure for user-facing display.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Missing or placeholder credentials, bad config file.
    Config,
    /// Login failed or the auth response had no token.
    Auth,
    /// Network failure or timeout while talking to the API.
    Connection,
    /// The API responded with something that is not the expected JSON.
    Data,
    /// I/O or workbook failure while writing the spreadsheet.
    Export,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

impl ErrorType {
    fn label(&self) -> &'static str {
        match self {
            ErrorType::Config => "Configuration error",
            ErrorType::Auth => "Authentication error",
            ErrorType::Connection => "Connection error",
            ErrorType::Data => "Data error",
            ErrorType::Export => "Export error",
        }
    }
}

/// Attaches an [`ErrorType`] label as the outermost error context.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| e.into().context(error_type.label()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_type_label_is_outermost() {
        let inner: Result<()> = Err(anyhow::anyhow!("connection refused"));
        let err = inner.pub_result(ErrorType::Connection).unwrap_err();
        assert_eq!(err.to_string(), "Connection error");
        let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
        assert_eq!(chain, vec!["Connection error", "connection refused"]);
    }

    #[test]
    fn test_error_type_serde_names() {
        assert_eq!(ErrorType::Config.to_string(), "config");
        assert_eq!("export".parse::<ErrorType>().unwrap(), ErrorType::Export);
    }
}
