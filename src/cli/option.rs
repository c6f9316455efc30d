//! POSIX-style short option scanning and typed decoding.
//!
//! A command declares its options with a getopt option-string such as
//! `"t:v:"` (each letter is an option, a trailing `:` means the option takes a
//! value) and the value types with an option-types string such as `"%i%f"`.
//! The Nth value-carrying option on the line is decoded with the Nth type tag.
//!
//! ```rust
//! use libcli::cli::{decode, CommandSpec, NumberPolicy, ParsedArg};
//!
//! let spec = CommandSpec {
//!     name: "set",
//!     help: "",
//!     optstring: "t:v:",
//!     optypes: "%i%f",
//!     argc: 2,
//!     callback: None,
//! };
//!
//! let tokens = ["set", "-t", "3", "-v2.5"];
//! let decoded = decode(&tokens, &spec, NumberPolicy::Lenient).unwrap();
//! assert_eq!(decoded.argc, 3);
//! assert_eq!(
//!     decoded.args.as_deref(),
//!     Some(&[ParsedArg::Int(3), ParsedArg::Float(2.5)][..])
//! );
//! ```

use core::iter::FusedIterator;

use heapless::Vec;
use serde::{Deserialize, Serialize};

use super::error::Error;
use super::registry::CommandSpec;
use super::token::{MAX_TOKENS, ValueType, is_space, tokenize_types};

/// Decoded arguments of one command invocation.
pub type ParsedArgs<'a> = Vec<ParsedArg<'a>, MAX_TOKENS>;

/// One decoded option value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedArg<'a> {
    /// A `%s` value, borrowed from the command line.
    Str(&'a str),
    /// A `%i` value.
    Int(i32),
    /// A `%f` value.
    Float(f32),
}

impl<'a> ParsedArg<'a> {
    /// The type tag this value was decoded with.
    pub fn tag(&self) -> char {
        match self {
            ParsedArg::Str(_) => 's',
            ParsedArg::Int(_) => 'i',
            ParsedArg::Float(_) => 'f',
        }
    }

    /// The string value, if this is a `%s` argument.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            ParsedArg::Str(value) => Some(*value),
            _ => None,
        }
    }

    /// The integer value, if this is a `%i` argument.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            ParsedArg::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The float value, if this is a `%f` argument.
    pub fn as_float(&self) -> Option<f32> {
        match self {
            ParsedArg::Float(value) => Some(*value),
            _ => None,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ParsedArg<'_> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ParsedArg::Str(value) => defmt::write!(f, "Str({})", value),
            ParsedArg::Int(value) => defmt::write!(f, "Int({})", value),
            ParsedArg::Float(value) => defmt::write!(f, "Float({})", value),
        }
    }
}

/// How numeric option values that fail to parse are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberPolicy {
    /// C `atoi`/`atof` semantics: the longest numeric prefix is used and
    /// text without one decodes to zero.
    #[default]
    Lenient,
    /// The whole value must be a number, otherwise decoding fails with
    /// [`Error::MalformedNumber`].
    Strict,
}

/// Whether `letter` is declared in `optstring` and takes a value.
///
/// Returns `None` for letters that are not declared at all.
pub fn takes_value(optstring: &str, letter: char) -> Option<bool> {
    if letter == ':' {
        return None;
    }
    let index = optstring.find(letter)?;
    Some(optstring[index + letter.len_utf8()..].starts_with(':'))
}

/// Number of value-taking options declared in `optstring`.
pub fn value_option_count(optstring: &str) -> usize {
    optstring
        .chars()
        .zip(optstring.chars().skip(1))
        .filter(|&(letter, next)| letter != ':' && next == ':')
        .count()
}

/// A recognized option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opt<'a> {
    /// The option letter.
    pub letter: char,
    /// The option value, for value-taking options.
    pub value: Option<&'a str>,
}

/// Why option scanning stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetoptError {
    /// The letter is not declared in the option-string.
    Unrecognized(char),
    /// A value-taking option was the last token on the line.
    MissingValue(char),
}

/// Iterator over the short options of a token list.
///
/// `args[0]` is the command name and is skipped. Scanning follows POSIX
/// `getopt`: clustered flags (`-ab`), attached values (`-t3`), detached values
/// (`-t 3`), and stops at the first operand or after `--`. Once it has
/// returned `None` it keeps returning `None`.
#[derive(Debug, Clone)]
pub struct Getopt<'a, 'o> {
    args: &'a [&'a str],
    optstring: &'o str,
    optind: usize,
    nextchar: usize,
    done: bool,
}

impl<'a, 'o> Getopt<'a, 'o> {
    /// Start scanning `args` against `optstring`.
    pub fn new(args: &'a [&'a str], optstring: &'o str) -> Self {
        Self {
            args,
            optstring,
            optind: 1,
            nextchar: 0,
            done: false,
        }
    }

    /// Index of the next token to be scanned.
    ///
    /// Once the iterator is exhausted this is the index of the first operand.
    pub fn optind(&self) -> usize {
        self.optind
    }

    fn advance(&mut self) {
        self.optind += 1;
        self.nextchar = 0;
    }

    fn finish(&mut self) -> Option<Result<Opt<'a>, GetoptError>> {
        self.done = true;
        None
    }
}

impl<'a> Iterator for Getopt<'a, '_> {
    type Item = Result<Opt<'a>, GetoptError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let Some(&arg) = self.args.get(self.optind) else {
            return self.finish();
        };

        if self.nextchar == 0 {
            if arg == "--" {
                self.optind += 1;
                return self.finish();
            }
            if arg.len() < 2 || !arg.starts_with('-') {
                return self.finish();
            }
            self.nextchar = 1;
        }

        let Some(letter) = arg[self.nextchar..].chars().next() else {
            return self.finish();
        };
        self.nextchar += letter.len_utf8();
        let rest = &arg[self.nextchar..];

        match takes_value(self.optstring, letter) {
            None => {
                if rest.is_empty() {
                    self.advance();
                }
                Some(Err(GetoptError::Unrecognized(letter)))
            }
            Some(false) => {
                if rest.is_empty() {
                    self.advance();
                }
                Some(Ok(Opt {
                    letter,
                    value: None,
                }))
            }
            Some(true) => {
                self.advance();
                if !rest.is_empty() {
                    return Some(Ok(Opt {
                        letter,
                        value: Some(rest),
                    }));
                }
                match self.args.get(self.optind) {
                    Some(&value) => {
                        self.optind += 1;
                        Some(Ok(Opt {
                            letter,
                            value: Some(value),
                        }))
                    }
                    None => Some(Err(GetoptError::MissingValue(letter))),
                }
            }
        }
    }
}

impl FusedIterator for Getopt<'_, '_> {}

/// Count the logical arguments of a token list, command name included.
///
/// A value-taking option and its detached value (`-t 3`) count as one
/// argument, exactly like the attached form (`-t3`). Tokens made only of
/// declared flags carry no value and are not counted, so `-a -t 3` and
/// `-at 3` count the same.
pub fn count_arguments(tokens: &[&str], optstring: &str) -> usize {
    let Some((_, rest)) = tokens.split_first() else {
        return 0;
    };

    let mut count = 1;
    let mut scanning = true;
    let mut index = 0;

    while index < rest.len() {
        let token = rest[index];
        index += 1;
        if !scanning {
            count += 1;
            continue;
        }
        if token == "--" || token.len() < 2 || !token.starts_with('-') {
            scanning = false;
            count += 1;
            continue;
        }
        match classify_cluster(&token[1..], optstring) {
            Cluster::Flags => {}
            Cluster::Value { detached } => {
                count += 1;
                if detached && index < rest.len() {
                    index += 1;
                }
            }
            Cluster::Unknown => count += 1,
        }
    }

    count
}

enum Cluster {
    /// Only declared flags.
    Flags,
    /// Ends with a value-taking option; `detached` when its value is the next token.
    Value { detached: bool },
    /// Holds an undeclared letter before any value-taking option.
    Unknown,
}

fn classify_cluster(cluster: &str, optstring: &str) -> Cluster {
    for (offset, letter) in cluster.char_indices() {
        match takes_value(optstring, letter) {
            Some(true) => {
                return Cluster::Value {
                    detached: offset + letter.len_utf8() == cluster.len(),
                };
            }
            Some(false) => {}
            None => return Cluster::Unknown,
        }
    }
    Cluster::Flags
}

/// Parse an integer the way C `atoi` does.
///
/// Leading whitespace and an optional sign are accepted, then as many decimal
/// digits as follow. Text without digits decodes to `0`.
pub fn parse_int_lenient(text: &str) -> i32 {
    let bytes = trim_leading_space(text).as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let value = digits
        .iter()
        .take_while(|byte| byte.is_ascii_digit())
        .fold(0i32, |value, byte| {
            value.wrapping_mul(10).wrapping_add(i32::from(byte - b'0'))
        });

    if negative { value.wrapping_neg() } else { value }
}

/// Parse a float the way C `atof` does.
///
/// The longest prefix of the form `[+-]digits[.digits][e[+-]digits]` is
/// parsed. Text without such a prefix decodes to `0.0`.
pub fn parse_float_lenient(text: &str) -> f32 {
    let text = trim_leading_space(text);
    let end = float_prefix_len(text.as_bytes());
    text[..end].parse().unwrap_or(0.0)
}

fn trim_leading_space(text: &str) -> &str {
    text.trim_start_matches(|c: char| c.is_ascii() && is_space(c as u8))
}

fn float_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |start: usize| {
        bytes[start.min(bytes.len())..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_digits = digits_from(exponent);
        if exponent_digits > 0 {
            end = exponent + exponent_digits;
        }
    }

    end
}

fn parse_int(text: &str, policy: NumberPolicy) -> Result<i32, Error> {
    match policy {
        NumberPolicy::Lenient => Ok(parse_int_lenient(text)),
        NumberPolicy::Strict => text.parse().map_err(|_| Error::MalformedNumber),
    }
}

fn parse_float(text: &str, policy: NumberPolicy) -> Result<f32, Error> {
    match policy {
        NumberPolicy::Lenient => Ok(parse_float_lenient(text)),
        NumberPolicy::Strict => text.parse().map_err(|_| Error::MalformedNumber),
    }
}

/// Outcome of decoding a token list against a command spec.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<'a> {
    /// Logical argument count passed to the handler, command name included.
    pub argc: usize,
    /// Decoded option values, `None` for commands without arguments.
    pub args: Option<ParsedArgs<'a>>,
}

/// Decode the options of `tokens` (command name first) against `spec`.
///
/// # Errors
///
/// - [`Error::ArgumentCountMismatch`] when the line does not carry
///   `spec.argc` arguments.
/// - [`Error::InconsistentSpec`] when `spec.optypes` does not hold
///   `spec.argc` type tags.
/// - [`Error::MalformedNumber`] for unparsable numbers under
///   [`NumberPolicy::Strict`].
pub fn decode<'t>(
    tokens: &'t [&'t str],
    spec: &CommandSpec<'_>,
    policy: NumberPolicy,
) -> Result<Decoded<'t>, Error> {
    let argc = count_arguments(tokens, spec.optstring);
    if argc != spec.argc + 1 {
        debug!("expected {} arguments, got {}", spec.argc + 1, argc);
        return Err(Error::ArgumentCountMismatch);
    }

    let types = tokenize_types(spec.optypes).map_err(|_| Error::InconsistentSpec)?;
    if types.len() != spec.argc {
        warn!("option types of {} do not match its argument count", spec.name);
        return Err(Error::InconsistentSpec);
    }
    if spec.argc == 0 {
        return Ok(Decoded { argc, args: None });
    }

    let mut args = ParsedArgs::new();
    let mut slots = types.iter();
    for opt in Getopt::new(tokens, spec.optstring) {
        let Ok(opt) = opt else {
            break;
        };
        let Some(text) = opt.value else {
            continue;
        };
        // Every value-carrying option consumes its type slot, reserved ones included
        let Some(&value_type) = slots.next() else {
            break;
        };

        let arg = match value_type {
            ValueType::String => ParsedArg::Str(text),
            ValueType::Integer => ParsedArg::Int(parse_int(text, policy)?),
            ValueType::Float => ParsedArg::Float(parse_float(text, policy)?),
            ValueType::Reserved(_) => continue,
        };
        args.push(arg).map_err(|_| Error::TooManyTokens)?;
    }

    Ok(Decoded {
        argc,
        args: Some(args),
    })
}
