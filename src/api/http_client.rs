//! Implements the `Receivables` trait over HTTP with reqwest.

use crate::api::{Payload, Receivables};
use crate::args::WriteOff;
use crate::error::{ErrorType, IntoResult};
use crate::{CompanyCredential, Result};
use anyhow::Context;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, trace};

const LOGIN_TIMEOUT: Duration = Duration::from_secs(10);
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// How much of an error-response body is carried into the user-facing message.
const BODY_SNIPPET_LEN: usize = 200;

/// Talks to the partner API over HTTP. Holds the bearer token obtained by `login`.
pub(crate) struct HttpReceivables {
    credential: CompanyCredential,
    client: reqwest::Client,
    token: Option<String>,
}

impl HttpReceivables {
    pub(crate) fn new(credential: CompanyCredential) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Unable to create the HTTP client")
            .pub_result(ErrorType::Connection)?;
        Ok(Self {
            credential,
            client,
            token: None,
        })
    }
}

#[async_trait::async_trait]
impl Receivables for HttpReceivables {
    async fn login(&mut self) -> Result<()> {
        debug!("logging in at {}", self.credential.auth_url());
        let body = serde_json::json!({
            "usuario": self.credential.usuario(),
            "senha": self.credential.senha(),
            "client_id": self.credential.client_id(),
        });

        let response = self
            .client
            .post(self.credential.auth_url())
            .timeout(LOGIN_TIMEOUT)
            .json(&body)
            .send()
            .await
            .context("Failed to connect to the authentication endpoint")
            .pub_result(ErrorType::Connection)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = body_snippet(response).await;
            return Err(anyhow::anyhow!(
                "Login failed with HTTP status {status}: {body}"
            ))
            .pub_result(ErrorType::Auth);
        }

        let text = response
            .text()
            .await
            .context("Failed to read the authentication response")
            .pub_result(ErrorType::Connection)?;
        let json: Value = serde_json::from_str(&text)
            .with_context(|| {
                format!(
                    "The authentication response is not valid JSON: {}",
                    truncate(&text, 100)
                )
            })
            .pub_result(ErrorType::Data)?;

        let token = json
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .context(
                "The authentication response contains no token, check usuario/senha/client_id",
            )
            .pub_result(ErrorType::Auth)?;

        self.token = Some(token.to_string());
        Ok(())
    }

    async fn fetch(&mut self, start: &str, end: &str, write_off: WriteOff) -> Result<Payload> {
        let token = self
            .token
            .as_deref()
            .context("fetch called before a successful login")
            .pub_result(ErrorType::Auth)?;

        trace!(
            "fetching operations from {} for {start}..{end}, baixaPdd={write_off}",
            self.credential.data_url()
        );
        let write_off = write_off.to_string();
        let response = self
            .client
            .get(self.credential.data_url())
            .timeout(FETCH_TIMEOUT)
            .query(&[
                ("vencimentoInicio", start),
                ("vencimentoFinal", end),
                ("baixaPdd", write_off.as_str()),
            ])
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to connect to the data endpoint")
            .pub_result(ErrorType::Connection)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = body_snippet(response).await;
            return Err(anyhow::anyhow!(
                "Fetching operations failed with HTTP status {status}: {body}"
            ))
            .pub_result(ErrorType::Data);
        }

        let text = response
            .text()
            .await
            .context("Failed to read the data response")
            .pub_result(ErrorType::Connection)?;
        serde_json::from_str(&text)
            .with_context(|| {
                format!(
                    "The data response is not the expected JSON: {}",
                    truncate(&text, 100)
                )
            })
            .pub_result(ErrorType::Data)
    }
}

/// Reads up to [`BODY_SNIPPET_LEN`] characters of an error-response body.
async fn body_snippet(response: reqwest::Response) -> String {
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read response body".to_string());
    truncate(&body, BODY_SNIPPET_LEN)
}

/// Truncates on a character boundary, appending an ellipsis when anything was cut.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}
