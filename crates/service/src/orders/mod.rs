//! Orders: placing, listing, annotating and deleting a user's orders.
//!
//! Every operation is scoped to the calling user; an order owned by someone
//! else behaves exactly like a missing one.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::OrderService;
