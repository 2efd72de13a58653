pub mod errors;
pub mod db;
pub mod validate;
pub mod tariff;
pub mod service_type;
pub mod service;

#[cfg(test)]
mod tests;
