//! Pieces shared by every crate in the workspace: logging setup, startup
//! environment checks, the JSON view types exchanged between server and
//! client, and small collection helpers.

pub mod types;
pub mod utils;
pub mod env;
