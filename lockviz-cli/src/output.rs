//! Binary image output
//!
//! The chart is the only thing written to stdout. Handlers write through
//! [`ImageWriter`] so tests can capture the bytes in memory.

use std::io::Write;

use crate::error::CliError;

/// Destination for rendered image bytes.
pub struct ImageWriter<W: Write> {
    inner: W,
}

impl ImageWriter<std::io::Stdout> {
    /// Write to the process stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ImageWriter<W> {
    /// Wrap an arbitrary writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Write the whole image and flush.
    pub fn write_image(&mut self, bytes: &[u8]) -> Result<(), CliError> {
        self.inner.write_all(bytes)?;
        self.inner.flush()?;
        Ok(())
    }

    /// Unwrap the underlying writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.inner
    }
}
