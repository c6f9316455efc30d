//! Line accumulation with minimal editing.
//!
//! [`LineBuffer`] collects bytes as they arrive from the transport until a
//! carriage return completes the line. It performs no output itself; the
//! [`Feed`] value returned for every byte tells the caller what to echo.

use heapless::Vec;

/// Maximum length of a command line.
///
/// A printable byte arriving while the buffer holds this many bytes discards
/// the whole line.
pub const MAX_LINE_LEN: usize = 256;

// ASCII control character constants for input processing
/// ASCII end of transmission (0x04).
pub const ASCII_EOT: u8 = 0x04;
/// ASCII enquiry (0x05).
pub const ASCII_ENQ: u8 = 0x05;
/// ASCII backspace character (0x08).
pub const ASCII_BACKSPACE: u8 = 0x08;
/// ASCII horizontal tab (0x09).
pub const ASCII_TAB: u8 = 0x09;
/// ASCII line feed character (0x0A).
pub const ASCII_LF: u8 = 0x0A;
/// ASCII vertical tab (0x0B).
pub const ASCII_VT: u8 = 0x0B;
/// ASCII form feed (0x0C), used to clear the terminal.
pub const ASCII_FF: u8 = 0x0C;
/// ASCII carriage return character (0x0D).
pub const ASCII_CR: u8 = 0x0D;
/// ASCII space character (0x20).
pub const ASCII_SPACE: u8 = 0x20;
/// ASCII delete character (0x7F).
pub const ASCII_DEL: u8 = 0x7F;

/// What a single byte did to the line buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// The byte was appended to the line.
    Stored(u8),
    /// The control byte (backspace or delete) removed the last byte.
    Erased(u8),
    /// The byte had no effect.
    Ignored,
    /// A carriage return terminated a non-empty line, see [`LineBuffer::line`].
    Complete,
    /// The buffer was full; the line has been discarded.
    Overflow,
}

/// Fixed-capacity edit buffer for one command line.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buffer: Vec<u8, MAX_LINE_LEN>,
}

impl LineBuffer {
    /// Create an empty line buffer.
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Process one byte.
    ///
    /// - Printable ASCII and horizontal tab are stored.
    /// - Backspace and delete erase the last byte, if any.
    /// - Carriage return completes a non-empty line.
    /// - Everything else (EOT, ENQ, LF, VT, FF, other control bytes and
    ///   non-ASCII bytes) is ignored.
    pub fn feed(&mut self, byte: u8) -> Feed {
        match byte {
            ASCII_CR => {
                if self.buffer.is_empty() {
                    Feed::Ignored
                } else {
                    Feed::Complete
                }
            }
            ASCII_BACKSPACE | ASCII_DEL => match self.buffer.pop() {
                Some(_) => Feed::Erased(byte),
                None => Feed::Ignored,
            },
            ASCII_TAB | ASCII_SPACE..=0x7E => {
                if self.buffer.push(byte).is_ok() {
                    Feed::Stored(byte)
                } else {
                    self.clear();
                    Feed::Overflow
                }
            }
            _ => Feed::Ignored,
        }
    }

    /// The current content of the buffer.
    ///
    /// Only ASCII bytes are ever stored, so the conversion cannot fail.
    pub fn line(&self) -> &str {
        core::str::from_utf8(&self.buffer).unwrap_or_default()
    }

    /// Discard the buffered line.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Whether another byte would overflow the buffer.
    pub fn is_full(&self) -> bool {
        self.buffer.is_full()
    }
}
