//! Common error types for command line processing

/// A common error type for the command line interpreter.
///
/// Every variant is recoverable: after reporting it the shell returns to
/// [`State::Idle`](super::State::Idle) and waits for the next line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A printable byte arrived while the line buffer was full. The line was
    /// discarded.
    BufferFull,
    /// A line split into more than [`MAX_TOKENS`](super::MAX_TOKENS) tokens.
    TooManyTokens,
    /// No registered command matches the first token of the line.
    CommandNotFound,
    /// The number of arguments on the line disagrees with the declared count.
    ArgumentCountMismatch,
    /// A numeric option value could not be parsed (strict policy only).
    MalformedNumber,
    /// The option-string, option-types and argument count of a command spec
    /// do not describe the same number of values.
    InconsistentSpec,
    /// The command table has no free slot left.
    RegistryFull,
    /// A command with the same name is already registered.
    DuplicateCommand,
    /// A command was registered with an empty name.
    EmptyName,
    /// The underlying transport failed to read or write.
    Transport,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::BufferFull => defmt::write!(f, "BufferFull"),
            Error::TooManyTokens => defmt::write!(f, "TooManyTokens"),
            Error::CommandNotFound => defmt::write!(f, "CommandNotFound"),
            Error::ArgumentCountMismatch => defmt::write!(f, "ArgumentCountMismatch"),
            Error::MalformedNumber => defmt::write!(f, "MalformedNumber"),
            Error::InconsistentSpec => defmt::write!(f, "InconsistentSpec"),
            Error::RegistryFull => defmt::write!(f, "RegistryFull"),
            Error::DuplicateCommand => defmt::write!(f, "DuplicateCommand"),
            Error::EmptyName => defmt::write!(f, "EmptyName"),
            Error::Transport => defmt::write!(f, "Transport"),
        }
    }
}
