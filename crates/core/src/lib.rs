//! QuickBite Core - Shared domain types and logic.
//!
//! This crate provides the types and pure logic used across all QuickBite
//! components:
//! - `server` - Public ordering API plus the admin console API
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP handlers. This keeps it lightweight and allows
//! it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, and statuses
//! - [`catalog`] - Categories, menu items, and the menu settings singleton
//! - [`cart`] - Session-scoped cart and its totals arithmetic
//! - [`order`] - Customers, orders, order lines, and the invoice projection
//! - [`normalize`] - Tolerant numeric coercion for the three lenient fields
//! - [`stats`] - Dashboard aggregates derived from orders and the catalog
//! - [`error`] - The validation error taxonomy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod error;
pub mod normalize;
pub mod order;
pub mod stats;
pub mod types;

pub use error::ValidationError;
pub use types::*;
