//! Command dispatcher.
//!
//! [`Shell`] ties the pieces together. It owns the transport, the line buffer
//! and the command table, and drives every completed line through
//! tokenize → match → decode → dispatch:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Transport     │───▶│   LineBuffer    │───▶│   Tokenizer     │
//! │   (poll/feed)   │    │   (editing)     │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!                                                        │
//!                                                        ▼
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Handler       │◀───│   Option        │◀───│   Registry      │
//! │   (callback)    │    │   Decoder       │    │   (lookup)      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! On the console a completed line produces a form feed (when echo is on),
//! `cli> <line>\n`, and then the handler output, `invalid number of
//! arguments\n` or `command <name> not found\n`.

use core::fmt;

use super::config::Config;
use super::error::Error;
use super::line::{ASCII_FF, Feed, LineBuffer};
use super::option::decode;
use super::registry::{CommandSpec, Registry};
use super::token::tokenize_args;
use crate::transport::{FmtWriter, Transport};

/// Prompt printed in front of every processed line.
pub const PROMPT: &str = "cli> ";

/// Where the dispatcher is in the processing of a line.
///
/// Processing is synchronous, so from the outside the shell is only observed
/// in [`State::Idle`] or [`State::Collecting`]. The other states are passed
/// through while a completed line is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// The line buffer is empty.
    Idle,
    /// Bytes are being accumulated.
    Collecting,
    /// A carriage return completed the line.
    LineReady,
    /// The command name is being looked up.
    Matching,
    /// Option values are being decoded.
    Decoding,
    /// The handler is running.
    Dispatched,
}

/// Summary of a line that reached its handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// Registry slot of the command.
    pub index: usize,
    /// Argument count passed to the handler.
    pub argc: usize,
    /// Number of decoded option values passed to the handler.
    pub values: usize,
}

/// Line-oriented command interpreter over a byte transport.
///
/// # Examples
///
/// ```rust
/// use core::fmt::Write;
/// use libcli::cli::{handler_fn, CommandSpec, Shell};
/// # use libcli::transport::{Read, Write as TransportWrite};
/// # #[derive(Default)]
/// # struct Console { out: Vec<u8> }
/// # impl Read for Console {
/// #     type Error = ();
/// #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, ()> { Ok(0) }
/// # }
/// # impl TransportWrite for Console {
/// #     type Error = ();
/// #     fn write(&mut self, buf: &[u8]) -> Result<usize, ()> { self.out.extend_from_slice(buf); Ok(buf.len()) }
/// #     fn flush(&mut self) -> Result<(), ()> { Ok(()) }
/// # }
///
/// let mut pong = handler_fn(|_argc, _args, out| {
///     let _ = writeln!(out, "pong");
/// });
///
/// let mut shell = Shell::new(Console::default());
/// shell
///     .register(CommandSpec {
///         name: "ping",
///         help: "reply with pong",
///         optstring: "",
///         optypes: "",
///         argc: 0,
///         callback: Some(&mut pong),
///     })
///     .unwrap();
///
/// shell.input(b"ping\r").unwrap();
/// ```
#[derive(Debug)]
pub struct Shell<'a, T: Transport> {
    transport: T,
    line: LineBuffer,
    registry: Registry<'a>,
    config: Config,
    state: State,
}

impl<'a, T: Transport> Shell<'a, T> {
    /// Create a shell with the default [`Config`] and only `help` registered.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, Config::default())
    }

    /// Create a shell with an explicit configuration.
    pub fn with_config(transport: T, config: Config) -> Self {
        Self {
            transport,
            line: LineBuffer::new(),
            registry: Registry::new(),
            config,
            state: State::Idle,
        }
    }

    /// Enable or disable echo.
    pub fn set_echo(&mut self, enabled: bool) {
        self.config.echo = enabled;
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current dispatcher state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The command table.
    pub fn registry(&self) -> &Registry<'a> {
        &self.registry
    }

    /// Register one command, see [`Registry::register`].
    pub fn register(&mut self, spec: CommandSpec<'a>) -> Result<(), Error> {
        self.registry.register(spec)
    }

    /// Register an ordered list of commands, see
    /// [`Registry::register_commands`].
    pub fn register_commands<I>(&mut self, specs: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = CommandSpec<'a>>,
    {
        self.registry.register_commands(specs)
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get a mutable reference to the underlying transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the shell and return the transport
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Run one poll cycle: read at most one byte and process it.
    ///
    /// A transport with nothing to deliver makes this a no-op.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`] if reading fails, otherwise as [`Shell::feed`].
    pub fn poll(&mut self) -> Result<Option<Dispatch>, Error> {
        let mut byte = [0u8; 1];
        match self.transport.read(&mut byte) {
            Ok(0) => Ok(None),
            Ok(_) => self.feed(byte[0]),
            Err(_) => {
                warn!("transport read failed");
                Err(Error::Transport)
            }
        }
    }

    /// Process a slice of input bytes, returning how many lines reached their
    /// handler.
    ///
    /// Line-level failures are reported on the console and do not stop
    /// processing of the remaining bytes.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`] if writing to the transport fails.
    pub fn input(&mut self, data: &[u8]) -> Result<usize, Error> {
        let mut dispatched = 0;
        for &byte in data {
            match self.feed(byte) {
                Ok(Some(_)) => dispatched += 1,
                Ok(None) => {}
                Err(Error::Transport) => return Err(Error::Transport),
                Err(_) => {}
            }
        }
        Ok(dispatched)
    }

    /// Process one input byte.
    ///
    /// Returns `Ok(Some(_))` when the byte completed a line whose handler
    /// ran, and `Ok(None)` when no handler ran.
    ///
    /// # Errors
    ///
    /// - [`Error::BufferFull`] when the byte overflowed the line buffer; the
    ///   line is discarded silently.
    /// - [`Error::CommandNotFound`], [`Error::ArgumentCountMismatch`],
    ///   [`Error::MalformedNumber`], [`Error::TooManyTokens`] for rejected
    ///   lines, after reporting them on the console.
    /// - [`Error::Transport`] if echoing or reporting fails.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Dispatch>, Error> {
        match self.line.feed(byte) {
            Feed::Stored(byte) => {
                self.state = State::Collecting;
                self.echo(&[byte])?;
                Ok(None)
            }
            Feed::Erased(byte) => {
                if self.line.is_empty() {
                    self.state = State::Idle;
                }
                self.echo(&[byte])?;
                Ok(None)
            }
            Feed::Ignored => Ok(None),
            Feed::Overflow => {
                self.state = State::Idle;
                warn!("line buffer full, line discarded");
                Err(Error::BufferFull)
            }
            Feed::Complete => {
                self.state = State::LineReady;
                let result = self.process_line();
                self.line.clear();
                self.state = State::Idle;
                result
            }
        }
    }

    fn echo(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if !self.config.echo {
            return Ok(());
        }
        FmtWriter::new(&mut self.transport)
            .write_bytes(bytes)
            .map_err(|_| Error::Transport)
    }

    fn process_line(&mut self) -> Result<Option<Dispatch>, Error> {
        let Shell {
            transport,
            line,
            registry,
            config,
            state,
        } = self;

        let mut out = FmtWriter::new(transport);
        if config.echo && config.clear_screen {
            out.write_bytes(&[ASCII_FF]).map_err(|_| Error::Transport)?;
        }
        print(&mut out, format_args!("{}{}\n", PROMPT, line.line()))?;

        let tokens = match tokenize_args(line.line()) {
            Ok(tokens) => tokens,
            Err(err) => {
                print(&mut out, format_args!("too many arguments\n"))?;
                return Err(err);
            }
        };
        let Some(&name) = tokens.first() else {
            return Ok(None);
        };

        *state = State::Matching;
        let Some(index) = registry.position(name) else {
            debug!("command {} not found", name);
            print(&mut out, format_args!("command {} not found\n", name))?;
            return Err(Error::CommandNotFound);
        };
        let spec = registry.get(index).ok_or(Error::CommandNotFound)?;

        *state = State::Decoding;
        let decoded = match decode(&tokens, spec, config.numbers) {
            Ok(decoded) => decoded,
            Err(err) => {
                let message = match err {
                    Error::ArgumentCountMismatch => "invalid number of arguments",
                    Error::MalformedNumber => "invalid numeric argument",
                    _ => "invalid command definition",
                };
                print(&mut out, format_args!("{}\n", message))?;
                return Err(err);
            }
        };

        *state = State::Dispatched;
        debug!("dispatching {} with {} arguments", name, decoded.argc);
        if registry.is_help(index) {
            registry.write_help(&mut out).map_err(|_| Error::Transport)?;
        } else if let Some(callback) = registry.callback_mut(index) {
            callback.call(decoded.argc, decoded.args.as_deref(), &mut out);
        }

        if out.failed() {
            return Err(Error::Transport);
        }
        transport.flush().map_err(|_| Error::Transport)?;

        Ok(Some(Dispatch {
            index,
            argc: decoded.argc,
            values: decoded.args.as_ref().map_or(0, |args| args.len()),
        }))
    }
}

fn print<W: fmt::Write>(out: &mut W, args: fmt::Arguments<'_>) -> Result<(), Error> {
    out.write_fmt(args).map_err(|_| Error::Transport)
}
