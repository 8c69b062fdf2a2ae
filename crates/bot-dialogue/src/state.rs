//! Cart and session state layer of the dialogue engine.
//!
//! Thin typed facade over the storage service: carts and sessions are
//! keyed by customer chat id and default to empty/initial state for
//! customers the store has never seen.

use crate::DialogueError;
use bot_storage::{StorageKey, StorageService};
use bot_types::{Cart, Catalog, CatalogItem, ChatId, SessionState};
use std::sync::Arc;

/// Typed access to per-customer carts and sessions.
pub struct CustomerStateStore {
	storage: Arc<StorageService>,
}

impl CustomerStateStore {
	/// Creates a new state store over the given storage service.
	pub fn new(storage: Arc<StorageService>) -> Self {
		Self { storage }
	}

	/// Returns the customer's cart, empty for unknown customers.
	pub async fn cart(&self, customer: ChatId) -> Result<Cart, DialogueError> {
		Ok(self
			.storage
			.retrieve_or_default(StorageKey::Carts.as_str(), &customer.to_string())
			.await?)
	}

	/// Adds one unit of a catalog item to the customer's cart.
	///
	/// The item is looked up across all categories; the returned item is
	/// the frozen snapshot stored in the cart line. Fails with
	/// [`DialogueError::ItemNotFound`] when no category has the item.
	pub async fn add_item(
		&self,
		customer: ChatId,
		catalog: &Catalog,
		item_name: &str,
	) -> Result<CatalogItem, DialogueError> {
		let item = catalog
			.find_item(item_name)
			.ok_or_else(|| DialogueError::ItemNotFound(item_name.to_string()))?
			.clone();

		let mut cart = self.cart(customer).await?;
		cart.add(&item);
		self.storage
			.store(StorageKey::Carts.as_str(), &customer.to_string(), &cart)
			.await?;

		Ok(item)
	}

	/// Empties the customer's cart. Idempotent.
	pub async fn clear_cart(&self, customer: ChatId) -> Result<(), DialogueError> {
		self.storage
			.remove(StorageKey::Carts.as_str(), &customer.to_string())
			.await?;
		Ok(())
	}

	/// Returns the customer's session state, `MainMenu` when unknown.
	pub async fn session(&self, customer: ChatId) -> Result<SessionState, DialogueError> {
		Ok(self
			.storage
			.retrieve_or_default(StorageKey::Sessions.as_str(), &customer.to_string())
			.await?)
	}

	/// Overwrites the customer's session state.
	pub async fn set_session(
		&self,
		customer: ChatId,
		state: SessionState,
	) -> Result<(), DialogueError> {
		self.storage
			.store(StorageKey::Sessions.as_str(), &customer.to_string(), &state)
			.await?;
		Ok(())
	}
}
