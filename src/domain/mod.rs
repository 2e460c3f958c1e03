//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains some of:
//! - `mod.rs`: Rich domain types (validated, business-logic-ready)
//! - `wire.rs`: Raw serde structs matching backend responses
//! - `convert.rs`: `TryFrom`/`From` conversions with validation
//! - `state.rs`: State containers with update methods
//! - `client.rs`: Sub-client with HTTP methods
//!
//! `filter` has no wire side of its own; it translates into the listing
//! search request and filters cached pages locally.

pub mod filter;
pub mod listing;
pub mod notification;
pub mod user;
pub mod wishlist;
