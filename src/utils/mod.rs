//! Shared helpers

pub mod encoding;
pub mod paths;

pub use encoding::{read_with_fallback, FallbackEncoding};
pub use paths::resolve_absolute;
