pub mod grouping;
pub mod logging;
