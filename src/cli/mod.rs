//! Line-oriented command interpreter.
//!
//! This module turns a raw byte stream into typed command invocations. It is
//! designed for serial consoles on `no_std` targets and uses fixed-capacity
//! buffers only.
//!
//! # Pipeline
//!
//! - **[`line`]**: accumulates bytes, handles backspace/delete and carriage
//!   return
//! - **[`token`]**: splits lines into tokens and option-type strings into type
//!   tags
//! - **[`registry`]**: the command table with the built-in `help`
//! - **[`option`]**: getopt-style option scanning and typed decoding
//! - **[`shell`]**: the dispatcher driving a line through all of the above
//!
//! # Usage
//!
//! ```rust,no_run
//! use core::fmt::Write;
//! use libcli::cli::{handler_fn, CommandSpec, ParsedArg, Shell};
//! # use libcli::transport::{Read, Write as TransportWrite};
//! # struct Uart;
//! # impl Read for Uart {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, ()> { Ok(0) }
//! # }
//! # impl TransportWrite for Uart {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, ()> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), ()> { Ok(()) }
//! # }
//!
//! let mut set = handler_fn(|_argc, args, out| {
//!     for arg in args.unwrap_or_default() {
//!         match arg {
//!             ParsedArg::Int(value) => { let _ = writeln!(out, "int {}", value); }
//!             ParsedArg::Float(value) => { let _ = writeln!(out, "float {}", value); }
//!             ParsedArg::Str(value) => { let _ = writeln!(out, "str {}", value); }
//!         }
//!     }
//! });
//!
//! let mut shell = Shell::new(Uart);
//! shell
//!     .register(CommandSpec {
//!         name: "set",
//!         help: "set target and value",
//!         optstring: "t:v:",
//!         optypes: "%i%f",
//!         argc: 2,
//!         callback: Some(&mut set),
//!     })
//!     .unwrap();
//!
//! loop {
//!     let _ = shell.poll();
//! }
//! ```

/// Runtime configuration.
pub mod config;

/// Common error types for command line processing.
pub mod error;

/// Line accumulation with minimal editing.
pub mod line;

/// getopt-style option scanning and typed decoding.
pub mod option;

/// Command table.
pub mod registry;

/// Command dispatcher.
pub mod shell;

/// Line and option-type tokenizers.
pub mod token;

pub use config::Config;
pub use error::Error;
pub use line::{Feed, LineBuffer, MAX_LINE_LEN};
pub use option::{
    Decoded, Getopt, GetoptError, NumberPolicy, Opt, ParsedArg, ParsedArgs, count_arguments,
    decode, parse_float_lenient, parse_int_lenient,
};
pub use registry::{CommandSpec, HELP_COMMAND, Handler, MAX_COMMANDS, Registry, handler_fn};
pub use shell::{Dispatch, PROMPT, Shell, State};
pub use token::{MAX_TOKENS, Tokens, TypeTags, ValueType, tokenize_args, tokenize_types};
