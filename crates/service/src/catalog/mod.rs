//! Tariffs, service types and the services that tie them together.

pub mod inputs;
pub mod views;
pub mod tariffs;
pub mod service_types;
pub mod services;

use uuid::Uuid;

use crate::errors::ServiceError;

/// Parse an identifier taken from a URL path.
///
/// Ids are opaque to callers; a string that is not a UUID cannot name an
/// existing row, so it is reported as missing rather than malformed.
pub fn parse_id(raw: &str, entity: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ServiceError::not_found(entity))
}
