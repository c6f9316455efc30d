//! Tokenizers for command lines and option-type strings.
//!
//! Both tokenizers borrow from their input: tokens are plain `&str` slices
//! into the line, so nothing is copied and the line is left untouched.

use heapless::Vec;

use super::error::Error;

/// Maximum number of tokens in one line, command name included.
pub const MAX_TOKENS: usize = 32;

/// Whitespace-delimited tokens of a line.
pub type Tokens<'a> = Vec<&'a str, MAX_TOKENS>;

/// Type tags parsed from an option-types string.
pub type TypeTags = Vec<ValueType, MAX_TOKENS>;

/// ASCII whitespace as understood by the tokenizer.
///
/// Unlike [`u8::is_ascii_whitespace`] this includes the vertical tab.
pub fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Split a line into non-empty whitespace-delimited tokens.
///
/// # Errors
///
/// [`Error::TooManyTokens`] if the line holds more than [`MAX_TOKENS`] tokens.
///
/// # Examples
///
/// ```rust
/// use libcli::cli::tokenize_args;
///
/// let tokens = tokenize_args("  set -t 3\t-v 2.5 ").unwrap();
/// assert_eq!(tokens.as_slice(), &["set", "-t", "3", "-v", "2.5"]);
/// ```
pub fn tokenize_args(line: &str) -> Result<Tokens<'_>, Error> {
    let mut tokens = Tokens::new();
    for token in line.split(|c: char| c.is_ascii() && is_space(c as u8)) {
        if token.is_empty() {
            continue;
        }
        tokens.push(token).map_err(|_| Error::TooManyTokens)?;
    }
    Ok(tokens)
}

/// The declared type of one value-taking option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// `%s`: the raw option text.
    String,
    /// `%i`: a signed integer.
    Integer,
    /// `%f`: a float.
    Float,
    /// `%d`, `%o`, `%x` or `%c`: recognized but not decoded.
    Reserved(char),
}

impl ValueType {
    /// Map a type character to its value type, if it is a recognized one.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b's' => Some(ValueType::String),
            b'i' => Some(ValueType::Integer),
            b'f' => Some(ValueType::Float),
            b'd' | b'o' | b'x' | b'c' => Some(ValueType::Reserved(tag as char)),
            _ => None,
        }
    }

    /// The type character of this value type.
    pub fn tag(self) -> char {
        match self {
            ValueType::String => 's',
            ValueType::Integer => 'i',
            ValueType::Float => 'f',
            ValueType::Reserved(tag) => tag,
        }
    }
}

/// Extract the `%`-prefixed type tags of an option-types string.
///
/// Characters that are not a recognized type tag, or that are not directly
/// preceded by `%`, are skipped.
///
/// # Errors
///
/// [`Error::TooManyTokens`] if the string holds more than [`MAX_TOKENS`] tags.
///
/// # Examples
///
/// ```rust
/// use libcli::cli::{tokenize_types, ValueType};
///
/// let tags = tokenize_types("%i%f%s").unwrap();
/// assert_eq!(tags.as_slice(), &[ValueType::Integer, ValueType::Float, ValueType::String]);
/// ```
pub fn tokenize_types(optypes: &str) -> Result<TypeTags, Error> {
    let mut tags = TypeTags::new();
    for pair in optypes.as_bytes().windows(2) {
        if pair[0] != b'%' {
            continue;
        }
        if let Some(value_type) = ValueType::from_tag(pair[1]) {
            tags.push(value_type).map_err(|_| Error::TooManyTokens)?;
        }
    }
    Ok(tags)
}
