//! Service observability.

pub mod logger;

pub use logger::{Logger, Severity};
