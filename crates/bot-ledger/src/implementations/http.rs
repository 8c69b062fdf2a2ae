//! HTTP row-store implementation of the ledger sink.
//!
//! Posts JSON commands to a configured row-store endpoint (for example a
//! spreadsheet web-app bridge). Each call is a single POST with a fixed
//! timeout; the store's availability is entirely its own problem.

use crate::{LedgerError, LedgerInterface, LedgerRow, LEDGER_HEADERS};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Timeout for one record-store call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Command envelope understood by the row-store endpoint.
#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum LedgerCommand<'a> {
	EnsureHeaders { headers: &'a [&'a str] },
	AppendRow { row: &'a LedgerRow },
	UpdateStatus { order_id: &'a str, status: &'a str },
}

/// Ledger store that talks to an HTTP row-store endpoint.
pub struct HttpLedger {
	client: reqwest::Client,
	url: String,
	credential: Option<String>,
}

impl HttpLedger {
	/// Creates a store for the given endpoint and optional credential.
	pub fn new(url: String, credential: Option<String>) -> Result<Self, LedgerError> {
		let client = reqwest::Client::builder()
			.timeout(REQUEST_TIMEOUT)
			.build()
			.map_err(|e| LedgerError::Network(e.to_string()))?;

		Ok(Self {
			client,
			url,
			credential,
		})
	}

	async fn post(&self, command: &LedgerCommand<'_>) -> Result<(), LedgerError> {
		let mut request = self.client.post(&self.url).json(command);
		if let Some(credential) = &self.credential {
			request = request.bearer_auth(credential);
		}

		let response = request
			.send()
			.await
			.map_err(|e| LedgerError::Network(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(LedgerError::Store {
				status: status.as_u16(),
				body,
			});
		}

		Ok(())
	}
}

#[async_trait]
impl LedgerInterface for HttpLedger {
	async fn ensure_headers(&self) -> Result<(), LedgerError> {
		self.post(&LedgerCommand::EnsureHeaders {
			headers: &LEDGER_HEADERS,
		})
		.await
	}

	async fn append_order(&self, row: &LedgerRow) -> Result<(), LedgerError> {
		self.post(&LedgerCommand::AppendRow { row }).await
	}

	async fn update_status(&self, order_id: &str, status: &str) -> Result<(), LedgerError> {
		self.post(&LedgerCommand::UpdateStatus { order_id, status })
			.await
	}
}
