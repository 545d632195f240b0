//! Implements the `Receivables` trait using in-memory data for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the
//! whole app, top-to-bottom, without talking to a partner API (set `BASE800_IN_TEST_MODE`).

use crate::api::{Payload, Receivables};
use crate::args::WriteOff;
use crate::error::{ErrorType, IntoResult};
use crate::Result;
use anyhow::Context;

/// An implementation of the `Receivables` trait that does not use the network. It can hold any
/// payload in memory and, by default, is seeded with a couple of operations.
pub(crate) struct TestReceivables {
    payload: Payload,
    logged_in: bool,
}

impl TestReceivables {
    /// Create a new `TestReceivables` that will answer every fetch with `payload`.
    pub(crate) fn new(payload: Payload) -> Self {
        Self {
            payload,
            logged_in: false,
        }
    }
}

impl Default for TestReceivables {
    /// Loads the seed data from this module.
    fn default() -> Self {
        Self::new(seed_payload())
    }
}

#[async_trait::async_trait]
impl Receivables for TestReceivables {
    async fn login(&mut self) -> Result<()> {
        self.logged_in = true;
        Ok(())
    }

    async fn fetch(&mut self, _start: &str, _end: &str, _write_off: WriteOff) -> Result<Payload> {
        if !self.logged_in {
            return Err(anyhow::anyhow!("fetch called before a successful login"))
                .pub_result(ErrorType::Auth);
        }
        Ok(self.payload.clone())
    }
}

/// Provides the seed data for this module.
fn seed_payload() -> Payload {
    serde_json::from_str(SEED_DATA)
        .context("The seed payload does not parse")
        .unwrap()
}

const SEED_DATA: &str = r#"{
  "data": {
    "11122233344": [
      {
        "tipo": "F",
        "mci": "100234",
        "nr_ficha": "7781",
        "nome": "Maria da Silva",
        "cpf_cnpj": "11122233344",
        "vencimento": "15/04/2026",
        "vl_venda": 1234.5,
        "vl_vencido": "432.1",
        "benefs_contrato": "Titular e dependentes"
      }
    ],
    "55566677788": [
      {
        "tipo": "F",
        "mci": "100235",
        "nome": "José Pereira",
        "cpf_cnpj": "55566677788",
        "vencimento": "16/04/2026",
        "vl_vencido": 90
      }
    ]
  }
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_payload_round_trip() {
        let mut client = TestReceivables::default();
        client.login().await.unwrap();
        let payload = client
            .fetch("01/01/2026", "08/01/2026", WriteOff::Exclude)
            .await
            .unwrap();
        assert_eq!(payload.data().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_requires_login() {
        let mut client = TestReceivables::default();
        let err = client
            .fetch("01/01/2026", "08/01/2026", WriteOff::Exclude)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Authentication error");
    }
}
