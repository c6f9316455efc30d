//! Command table.
//!
//! The [`Registry`] is a bounded, insertion-ordered table of [`CommandSpec`]s.
//! Slot 0 always holds the built-in `help` command, which lists every
//! registered command with its argument count, option-string, option-types and
//! help text.

use core::fmt;

use heapless::Vec;

use super::error::Error;
use super::option::{ParsedArg, value_option_count};
use super::token::tokenize_types;

/// Maximum number of commands, the built-in `help` included.
pub const MAX_COMMANDS: usize = 32;

/// Name of the built-in help command.
pub const HELP_COMMAND: &str = "help";

const HELP_SLOT: usize = 0;

/// Callback invoked when a command line is dispatched.
///
/// `argc` counts the command name plus every argument on the line. `args`
/// holds the decoded option values and is `None` for commands declared without
/// arguments. Anything written to `out` goes to the console.
///
/// The trait is implemented for every closure with the matching signature;
/// see [`handler_fn`] for a helper that pins the signature down.
///
/// # Examples
///
/// ```rust
/// use core::fmt::Write;
/// use libcli::cli::{Handler, ParsedArg};
///
/// struct Sum;
///
/// impl Handler for Sum {
///     fn call(&mut self, _argc: usize, args: Option<&[ParsedArg<'_>]>, out: &mut dyn Write) {
///         let total: i32 = args
///             .unwrap_or_default()
///             .iter()
///             .filter_map(ParsedArg::as_int)
///             .sum();
///         let _ = writeln!(out, "sum = {}", total);
///     }
/// }
/// ```
pub trait Handler {
    /// Handle one dispatched command line.
    fn call(&mut self, argc: usize, args: Option<&[ParsedArg<'_>]>, out: &mut dyn fmt::Write);
}

impl<F> Handler for F
where
    F: FnMut(usize, Option<&[ParsedArg<'_>]>, &mut dyn fmt::Write),
{
    fn call(&mut self, argc: usize, args: Option<&[ParsedArg<'_>]>, out: &mut dyn fmt::Write) {
        self(argc, args, out)
    }
}

/// Identity function that fixes the signature of a handler closure.
///
/// Closures passed straight to a `&mut dyn Handler` slot sometimes fail to
/// infer a signature that is general over the argument lifetimes; routing them
/// through this function avoids that.
///
/// ```rust
/// use libcli::cli::handler_fn;
///
/// let mut calls = 0;
/// let mut handler = handler_fn(|_argc, _args, _out| calls += 1);
/// # let _ = &mut handler;
/// ```
pub fn handler_fn<F>(f: F) -> F
where
    F: FnMut(usize, Option<&[ParsedArg<'_>]>, &mut dyn fmt::Write),
{
    f
}

/// One command table entry.
///
/// `optstring` uses getopt syntax (`"t:v:"`), `optypes` lists one
/// `%`-prefixed type tag per value-taking option (`"%i%f"`), and `argc` is the
/// number of arguments the command expects. The three must agree, which
/// [`Registry::register`] checks.
///
/// # Examples
///
/// ```rust
/// use libcli::cli::CommandSpec;
///
/// let spec = CommandSpec {
///     name: "set",
///     help: "set target and value",
///     optstring: "t:v:",
///     optypes: "%i%f",
///     argc: 2,
///     callback: None,
/// };
/// assert!(spec.validate().is_ok());
/// ```
pub struct CommandSpec<'a> {
    /// The command name as typed by the user.
    pub name: &'a str,
    /// Help text shown by the built-in `help` command.
    pub help: &'a str,
    /// getopt-style option-string.
    pub optstring: &'a str,
    /// `%`-prefixed type tags, one per value-taking option.
    pub optypes: &'a str,
    /// Declared number of arguments, command name excluded.
    pub argc: usize,
    /// Handler invoked on dispatch. Commands without one are matched and
    /// validated but do nothing.
    pub callback: Option<&'a mut dyn Handler>,
}

impl<'a> CommandSpec<'a> {
    /// Check that the option-string, option-types and argument count agree.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyName`] if the name is empty.
    /// - [`Error::InconsistentSpec`] if `optstring` or `optypes` does not
    ///   describe exactly `argc` values.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.is_empty() {
            return Err(Error::EmptyName);
        }

        if value_option_count(self.optstring) != self.argc {
            return Err(Error::InconsistentSpec);
        }

        let types = tokenize_types(self.optypes).map_err(|_| Error::InconsistentSpec)?;
        if types.len() != self.argc {
            return Err(Error::InconsistentSpec);
        }

        Ok(())
    }

    fn help() -> Self {
        Self {
            name: HELP_COMMAND,
            help: "print this help",
            optstring: "",
            optypes: "",
            argc: 0,
            callback: None,
        }
    }
}

impl fmt::Debug for CommandSpec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("help", &self.help)
            .field("optstring", &self.optstring)
            .field("optypes", &self.optypes)
            .field("argc", &self.argc)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Bounded command table with the built-in `help` in the first slot.
#[derive(Debug)]
pub struct Registry<'a> {
    commands: Vec<CommandSpec<'a>, MAX_COMMANDS>,
}

impl Default for Registry<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Registry<'a> {
    /// Create a table holding only the built-in `help` command.
    pub fn new() -> Self {
        let mut commands = Vec::new();
        let _ = commands.push(CommandSpec::help());
        Self { commands }
    }

    /// Register a command.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyName`] / [`Error::InconsistentSpec`] from
    ///   [`CommandSpec::validate`].
    /// - [`Error::DuplicateCommand`] if the name is already taken.
    /// - [`Error::RegistryFull`] if all [`MAX_COMMANDS`] slots are used.
    pub fn register(&mut self, spec: CommandSpec<'a>) -> Result<(), Error> {
        spec.validate()?;

        if self.position(spec.name).is_some() {
            warn!("command {} already registered", spec.name);
            return Err(Error::DuplicateCommand);
        }

        debug!("registering command {}", spec.name);
        self.commands.push(spec).map_err(|_| Error::RegistryFull)
    }

    /// Register an ordered list of commands.
    ///
    /// Registration stops at the first rejected command; the commands before
    /// it stay registered.
    pub fn register_commands<I>(&mut self, specs: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = CommandSpec<'a>>,
    {
        for spec in specs {
            self.register(spec)?;
        }
        Ok(())
    }

    /// Find a command by exact name.
    pub fn find(&self, name: &str) -> Option<&CommandSpec<'a>> {
        self.commands.iter().find(|spec| spec.name == name)
    }

    /// Slot index of a command.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.commands.iter().position(|spec| spec.name == name)
    }

    /// The command in slot `index`.
    pub fn get(&self, index: usize) -> Option<&CommandSpec<'a>> {
        self.commands.get(index)
    }

    /// Whether slot `index` is the built-in `help` command.
    pub fn is_help(&self, index: usize) -> bool {
        index == HELP_SLOT
    }

    /// Mutable access to the handler in slot `index`.
    pub fn callback_mut(&mut self, index: usize) -> Option<&mut (dyn Handler + 'a)> {
        self.commands.get_mut(index)?.callback.as_deref_mut()
    }

    /// Registered commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec<'a>> {
        self.commands.iter()
    }

    /// Number of registered commands, `help` included.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Always `false`: the `help` command is permanently registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Write the `help` listing, one line per command:
    /// `[name] [argc] [optstring] [optypes] [help]`.
    pub fn write_help(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        for spec in &self.commands {
            writeln!(
                out,
                "[{}] [{}] [{}] [{}] [{}]",
                spec.name,
                spec.argc,
                or_placeholder(spec.optstring, "noargs"),
                or_placeholder(spec.optypes, "notypes"),
                spec.help
            )?;
        }
        Ok(())
    }
}

fn or_placeholder<'s>(value: &'s str, placeholder: &'s str) -> &'s str {
    if value.is_empty() { placeholder } else { value }
}
