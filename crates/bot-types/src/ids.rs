//! Customer identifier type.
//!
//! Chat transports address both customers and the admin operator by a
//! numeric chat identifier. The newtype keeps those ids from being mixed
//! up with quantities or other integers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a chat participant (customer or admin operator).
///
/// Doubles as the key for carts, sessions and order ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<i64> for ChatId {
	fn from(id: i64) -> Self {
		ChatId(id)
	}
}
