//! # libcli - command interpreter for byte-stream consoles
//!
//! A small, allocation-free command line interpreter for serial consoles and
//! other byte transports. Incoming bytes are accumulated into a line, the line
//! is split into a command name and arguments, the command is looked up in a
//! registered table, its getopt-style options are decoded into typed values
//! and the registered handler is called with them.
//!
//! ## Features
//!
//! - **Line editing**: backspace/delete, echo, carriage-return termination
//! - **Command table**: bounded registry with a built-in `help` command
//! - **Typed options**: getopt option-strings (`"t:v:"`) paired with
//!   option-types (`"%i%f"`) decode into integers, floats and strings
//! - **Non-blocking**: one byte per poll cycle, never waits for input
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libcli = "0.1.0"
//! ```
//!
//! Then implement [`transport::Read`] and [`transport::Write`] for your
//! console and drive a [`cli::Shell`] from the main loop, see [`cli`].
//!
//! ## Targets
//!
//! Everything lives in fixed-capacity buffers and only `core` is required, so
//! the interpreter runs on bare-metal microcontrollers behind a UART as well as
//! on a host talking to a pseudo terminal (see `applications/host-demo`).
//!
//! ## Cargo features
//!
//! - `std`: build against the standard library
//! - `defmt`: emit debug and warning logs through `defmt`

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod fmt;

/// Command interpreter: line buffer, tokenizers, registry, option decoder and
/// dispatcher.
pub mod cli;

/// Byte-stream transport abstraction.
///
/// The traits the interpreter uses to read input and write output.
pub mod transport;
