//! Service layer providing the catalog operations on top of models.
//! - Request schemas validate raw JSON into typed commands.
//! - Integrity rules are left to the store; its violations are classified
//!   into `ServiceError::Conflict` / `ServiceError::NotFound`.
//! - Every mutation re-reads the affected rows and returns view shapes.

pub mod errors;
pub mod validation;
pub mod catalog;
#[cfg(test)]
pub mod test_support;
