//! Store identity shown in customer-facing copy.

use serde::{Deserialize, Serialize};

/// Name and contact details of the store the bot fronts.
///
/// Used by message templates (order confirmations, shipping notices,
/// contact info) so the copy stays consistent everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreProfile {
	/// Store name.
	pub name: String,
	/// Phone number customers can call.
	pub contact_phone: String,
	/// Street address of the store.
	pub address: String,
	/// Opening hours line.
	pub hours: String,
}

impl Default for StoreProfile {
	fn default() -> Self {
		StoreProfile {
			name: "FreshMart".to_string(),
			contact_phone: "555-1234".to_string(),
			address: "123 Main Street".to_string(),
			hours: "7 AM - 10 PM Daily".to_string(),
		}
	}
}
