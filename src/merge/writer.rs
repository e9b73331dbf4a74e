//! Merged output format.
//!
//! ```text
//! --- File path: <path> ---
//!
//! <content or error marker>
//!
//! --- End of file ---
//!
//! ```

use crate::utils::FallbackEncoding;
use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;

pub const HEADER_PREFIX: &str = "--- File path: ";
pub const FOOTER: &str = "--- End of file ---";

/// Writes header/content/footer triples to an exclusively owned sink.
pub struct EntryWriter<W: Write> {
    inner: W,
}

impl<W: Write> EntryWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write_header(&mut self, path: &Path) -> io::Result<()> {
        write!(self.inner, "{}{} ---\n\n", HEADER_PREFIX, path.display())
    }

    pub fn write_content(&mut self, text: &str) -> io::Result<()> {
        self.inner.write_all(text.as_bytes())
    }

    pub fn write_error_marker(
        &mut self,
        path: &Path,
        encoding: FallbackEncoding,
        error: &dyn Display,
    ) -> io::Result<()> {
        self.inner.write_all(error_marker(path, encoding, error).as_bytes())
    }

    pub fn write_footer(&mut self) -> io::Result<()> {
        write!(self.inner, "\n\n{}\n\n", FOOTER)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// The line written in place of content when a file cannot be read.
pub fn error_marker(path: &Path, encoding: FallbackEncoding, error: &dyn Display) -> String {
    format!(
        "*** Could not read file '{}' (attempted with {} encoding): {} ***",
        path.display(),
        encoding,
        error
    )
}
