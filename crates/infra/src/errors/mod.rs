mod conversions;

pub use conversions::{backend_error, InfraError};
