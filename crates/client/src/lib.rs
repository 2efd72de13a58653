//! Typed client for the tariff admin API and the view model a front end
//! renders from it.

pub mod api;
pub mod error;
pub mod notice;
pub mod render;
pub mod session;
pub mod state;

pub use api::ApiClient;
pub use error::ClientError;
pub use session::{Intent, Session};
pub use state::Snapshot;
