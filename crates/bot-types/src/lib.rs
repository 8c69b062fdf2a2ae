//! Common types module for the FreshMart ordering bot.
//!
//! This module defines the core data types and structures used throughout
//! the bot. It provides a centralized location for shared types to ensure
//! consistency across all components.

/// Cart types: per-customer selected items with frozen price snapshots.
pub mod cart;
/// Catalog types: static category/item/price reference data.
pub mod catalog;
/// Chat types: inbound events, action tokens and outbound messages/menus.
pub mod chat;
/// Customer identifier type.
pub mod ids;
/// Order types and the order status lifecycle.
pub mod order;
/// Pricing rule shared by every component that shows totals.
pub mod pricing;
/// Session types: the per-customer dialogue position.
pub mod session;
/// Store identity shown in customer-facing copy.
pub mod shop;
/// Utility functions for formatting shared across components.
pub mod utils;

// Re-export all types for convenient access
pub use cart::*;
pub use catalog::*;
pub use chat::*;
pub use ids::*;
pub use order::*;
pub use pricing::*;
pub use session::*;
pub use shop::*;
pub use utils::*;
