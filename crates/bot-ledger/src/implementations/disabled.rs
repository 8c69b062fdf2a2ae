//! No-op ledger store used when no record store is configured.
//!
//! Keeps the rest of the system oblivious to whether bookkeeping is on:
//! every call succeeds without doing anything.

use crate::{LedgerError, LedgerInterface, LedgerRow};
use async_trait::async_trait;

/// Ledger store that accepts and discards everything.
pub struct DisabledLedger;

#[async_trait]
impl LedgerInterface for DisabledLedger {
	async fn ensure_headers(&self) -> Result<(), LedgerError> {
		Ok(())
	}

	async fn append_order(&self, _row: &LedgerRow) -> Result<(), LedgerError> {
		Ok(())
	}

	async fn update_status(&self, _order_id: &str, _status: &str) -> Result<(), LedgerError> {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_all_operations_succeed() {
		let ledger = DisabledLedger;

		ledger.ensure_headers().await.unwrap();
		ledger.update_status("ORD1-001", "Shipped").await.unwrap();
	}
}
