//! Service layer providing the business operations on top of models.
//! - Separates business logic from data access (repository traits).
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod auth;
pub mod catalog;
pub mod orders;
#[cfg(test)]
pub mod test_support;
