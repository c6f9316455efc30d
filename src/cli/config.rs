//! Runtime configuration of a [`Shell`](super::Shell).
//!
//! The configuration is small enough to live in a flash page; it can be
//! stored and restored as JSON with [`Config::to_json`] and
//! [`Config::from_json`].

use serde::{Deserialize, Serialize};

use super::option::NumberPolicy;

/// Shell options.
///
/// # Examples
///
/// ```rust
/// use libcli::cli::{Config, NumberPolicy};
///
/// let config = Config::from_json(br#"{"echo":false,"numbers":"strict"}"#).unwrap();
/// assert!(!config.echo);
/// assert!(config.clear_screen);
/// assert_eq!(config.numbers, NumberPolicy::Strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Echo typed bytes and erasures back to the terminal.
    pub echo: bool,
    /// Send a form feed before a completed line is processed. Only takes
    /// effect while echo is enabled.
    pub clear_screen: bool,
    /// Treatment of malformed numeric option values.
    pub numbers: NumberPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            echo: true,
            clear_screen: true,
            numbers: NumberPolicy::Lenient,
        }
    }
}

impl Config {
    /// Load a configuration from JSON. Missing fields take their default.
    pub fn from_json(json: &[u8]) -> Result<Self, serde_json_core::de::Error> {
        serde_json_core::from_slice(json).map(|(config, _)| config)
    }

    /// Serialize the configuration as JSON into `buf`, returning the length.
    pub fn to_json(&self, buf: &mut [u8]) -> Result<usize, serde_json_core::ser::Error> {
        serde_json_core::to_slice(self, buf)
    }
}
