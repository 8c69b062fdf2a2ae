//! Dialogue handlers, one module per flow.

mod admin;
mod cart;
mod checkout;
mod menu;
mod tracking;
