//! Byte-stream transport abstraction
//!
//! The interpreter never talks to hardware directly. A serial port, a USB CDC
//! endpoint or a test double only has to implement [`Read`] and [`Write`]:
//!
//! - [`Read::read`] must not block. Returning `Ok(0)` means "no byte available
//!   right now" and turns the current poll cycle into a no-op.
//! - [`Write::write`] carries echo, prompts, error reports and handler output.

#![deny(unsafe_code)]

use core::fmt;

/// Re-exports of the transport traits
pub mod prelude {
    pub use super::{Read, Transport, Write};
}

/// Non-blocking byte source
pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Read whatever is available into `buf`, returning `Ok(0)` when nothing is
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Byte sink
pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write data to the transport
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// A bidirectional console transport
pub trait Transport: Read + Write {}

impl<T: Read + Write> Transport for T {}

/// Adapter exposing a transport [`Write`] as a [`core::fmt::Write`].
///
/// Handlers receive one of these so they can use `write!` to print on the
/// console without knowing the concrete transport type.
pub struct FmtWriter<'a, W: Write> {
    inner: &'a mut W,
    failed: bool,
}

impl<'a, W: Write> FmtWriter<'a, W> {
    /// Wrap a transport writer
    pub fn new(inner: &'a mut W) -> Self {
        Self {
            inner,
            failed: false,
        }
    }

    /// Whether any write through this adapter has failed
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Write raw bytes, looping until the transport accepted all of them
    pub fn write_bytes(&mut self, mut bytes: &[u8]) -> fmt::Result {
        while !bytes.is_empty() {
            match self.inner.write(bytes) {
                Ok(0) | Err(_) => {
                    self.failed = true;
                    return Err(fmt::Error);
                }
                Ok(n) => bytes = &bytes[n..],
            }
        }
        Ok(())
    }
}

impl<W: Write> fmt::Write for FmtWriter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes())
    }
}

impl<W: Write> fmt::Debug for FmtWriter<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FmtWriter")
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}
