//! Session types: the per-customer position in the dialogue.
//!
//! Each customer has exactly one active session state at a time. The
//! checkout wizard threads the fields collected so far through the state
//! itself, so a step cannot be entered without the data it depends on.

use serde::{Deserialize, Serialize};

/// The dialogue position of one customer (or the admin operator).
///
/// Transitions are the only way to move between states; terminal events
/// reset the state to `MainMenu` rather than deleting it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum SessionState {
	/// At the main menu, no flow in progress.
	#[default]
	MainMenu,
	/// Browsing the item list of one category.
	BrowsingCategory {
		/// Category currently shown.
		category: String,
	},
	/// Checkout wizard: waiting for the customer's full name.
	AwaitingName,
	/// Checkout wizard: waiting for the phone number.
	AwaitingPhone {
		/// Name collected in the previous step.
		name: String,
	},
	/// Checkout wizard: waiting for the delivery address.
	AwaitingAddress {
		/// Name collected earlier in the wizard.
		name: String,
		/// Phone number collected in the previous step.
		phone: String,
	},
	/// Checkout wizard: waiting for special delivery instructions.
	AwaitingInstructions {
		/// Name collected earlier in the wizard.
		name: String,
		/// Phone number collected earlier in the wizard.
		phone: String,
		/// Delivery address collected in the previous step.
		address: String,
	},
	/// Admin flow: waiting for a cancellation reason for an order.
	AwaitingCancelReason {
		/// Order the pending cancellation applies to.
		order_id: String,
	},
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_is_main_menu() {
		assert_eq!(SessionState::default(), SessionState::MainMenu);
	}

	#[test]
	fn test_serde_round_trip_with_fields() {
		let state = SessionState::AwaitingAddress {
			name: "Alice".to_string(),
			phone: "555-0101".to_string(),
		};
		let json = serde_json::to_string(&state).unwrap();
		let back: SessionState = serde_json::from_str(&json).unwrap();
		assert_eq!(back, state);
	}
}
