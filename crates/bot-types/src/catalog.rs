//! Catalog types for the ordering bot.
//!
//! The catalog is static, read-only reference data loaded at startup:
//! a list of categories, each mapping item names to a price per unit.
//! Carts and orders take snapshots of these prices; later catalog edits
//! never reach an existing cart or order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single purchasable item with its price per unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
	/// Item name as shown to the customer and used as the cart key.
	pub name: String,
	/// Price for one unit of the item.
	pub price: Decimal,
	/// Unit the price applies to (kg, liter, pack, ...).
	pub unit: String,
}

/// A named group of catalog items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
	/// Category name as shown in the category menu.
	pub name: String,
	/// Items available in this category.
	pub items: Vec<CatalogItem>,
}

/// The full store catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
	/// Categories in menu display order.
	pub categories: Vec<Category>,
}

impl Catalog {
	/// Looks up an item by name across all categories.
	pub fn find_item(&self, name: &str) -> Option<&CatalogItem> {
		self.categories
			.iter()
			.flat_map(|c| c.items.iter())
			.find(|item| item.name == name)
	}

	/// Returns the category with the given name, if any.
	pub fn category(&self, name: &str) -> Option<&Category> {
		self.categories.iter().find(|c| c.name == name)
	}

	/// Returns all category names in display order.
	pub fn category_names(&self) -> Vec<&str> {
		self.categories.iter().map(|c| c.name.as_str()).collect()
	}
}

impl Default for Catalog {
	/// The built-in store catalog, used when configuration provides none.
	fn default() -> Self {
		let item = |name: &str, cents: i64, unit: &str| CatalogItem {
			name: name.to_string(),
			price: Decimal::new(cents, 2),
			unit: unit.to_string(),
		};

		Catalog {
			categories: vec![
				Category {
					name: "Fresh Produce".to_string(),
					items: vec![
						item("Apples", 399, "kg"),
						item("Bananas", 199, "kg"),
						item("Carrots", 249, "kg"),
						item("Spinach", 499, "bunch"),
						item("Tomatoes", 349, "kg"),
					],
				},
				Category {
					name: "Meat & Poultry".to_string(),
					items: vec![
						item("Chicken Breast", 1299, "kg"),
						item("Beef Steak", 2499, "kg"),
						item("Salmon Fillet", 1899, "kg"),
						item("Bacon", 899, "pack"),
					],
				},
				Category {
					name: "Dairy & Eggs".to_string(),
					items: vec![
						item("Milk", 299, "liter"),
						item("Cheese", 699, "block"),
						item("Eggs", 499, "dozen"),
						item("Butter", 399, "block"),
					],
				},
			],
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_find_item_across_categories() {
		let catalog = Catalog::default();

		let apples = catalog.find_item("Apples").unwrap();
		assert_eq!(apples.price, Decimal::new(399, 2));
		assert_eq!(apples.unit, "kg");

		let milk = catalog.find_item("Milk").unwrap();
		assert_eq!(milk.price, Decimal::new(299, 2));
		assert_eq!(milk.unit, "liter");

		assert!(catalog.find_item("Caviar").is_none());
	}

	#[test]
	fn test_category_lookup() {
		let catalog = Catalog::default();

		let produce = catalog.category("Fresh Produce").unwrap();
		assert_eq!(produce.items.len(), 5);
		assert!(catalog.category("Frozen").is_none());
	}

	#[test]
	fn test_category_names_in_order() {
		let catalog = Catalog::default();
		assert_eq!(
			catalog.category_names(),
			vec!["Fresh Produce", "Meat & Poultry", "Dairy & Eggs"]
		);
	}
}
