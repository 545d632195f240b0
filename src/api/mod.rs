//! Clients for the partner receivables API.
//!
//! The protocol is a two-step sequence: exchange the company credentials for a bearer token at
//! the auth endpoint, then fetch the overdue operations for a due-date window from the data
//! endpoint. Each call is a single attempt with a bounded timeout; nothing is retried.

mod http_client;
mod test_client;

use crate::args::WriteOff;
use crate::{CompanyCredential, Result};
use serde::{Deserialize, Serialize};

pub(crate) use http_client::HttpReceivables;
pub(crate) use test_client::TestReceivables;

/// The raw fetch response: operations grouped under tax-id keys. Each value is expected to be an
/// array of operation objects, but is kept as a plain JSON value so that malformed entries can be
/// skipped during normalization instead of failing the whole run. The groups live in an
/// insertion-ordered map (serde_json with `preserve_order`) so that the spreadsheet rows come out
/// in the order the API returned them.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(crate) struct Payload {
    #[serde(default)]
    data: serde_json::Map<String, serde_json::Value>,
}

impl Payload {
    pub(crate) fn data(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.data
    }
}

/// The two-step login-then-fetch contract against the partner API.
#[async_trait::async_trait]
pub(crate) trait Receivables {
    /// Exchanges the company credentials for a bearer token, held by the client for subsequent
    /// fetches.
    async fn login(&mut self) -> Result<()>;

    /// Fetches the operations whose due date falls in `[start, end]` (both `dd/mm/yyyy`).
    /// Requires a prior successful [`login`](Receivables::login).
    async fn fetch(&mut self, start: &str, end: &str, write_off: WriteOff) -> Result<Payload>;
}

/// Whether to use the real HTTP client or the in-memory test client.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    #[default]
    Http,
    Test,
}

impl Mode {
    /// Returns `Mode::Test` when `BASE800_IN_TEST_MODE` is set and non-zero in length, otherwise
    /// `Mode::Http`.
    pub fn from_env() -> Self {
        match std::env::var("BASE800_IN_TEST_MODE") {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Http,
        }
    }
}

/// Creates the `Receivables` client for `mode`.
pub(crate) fn receivables(
    credential: &CompanyCredential,
    mode: Mode,
) -> Result<Box<dyn Receivables + Send>> {
    Ok(match mode {
        Mode::Http => Box::new(HttpReceivables::new(credential.clone())?),
        Mode::Test => Box::new(TestReceivables::default()),
    })
}
