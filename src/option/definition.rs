//! The option description record

use serde::Deserialize;

use super::value::OptionValue;
use crate::error::Result;

/// Describes a configuration option for the program.
///
/// An option connects a configuration key to its default value, command-line
/// flag, environment variable, and usage text. Every field except `default`
/// is optional:
///
/// - empty `name` with a non-empty `flag` makes the option flag-only;
/// - empty `flag` with a non-empty `name` makes the option config/env-only;
/// - empty `name` and empty `flag` together are legal but inert;
/// - `short` is meaningful only when `flag` is set, `env` only when `name` is.
///
/// Options are plain values. The registrar never mutates them, so one option
/// can be registered into several flag sets or stores.
///
/// A serialized list of options decodes directly:
///
/// ```
/// use optreg::ConfigOption;
///
/// let options: Vec<ConfigOption> = serde_json::from_str(
///     r#"[{"name": "port", "default": 8080, "flag": "port", "short": "p", "env": "PORT"}]"#,
/// ).unwrap();
/// assert_eq!(options[0].name, "port");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConfigOption {
    /// The configuration key. Supports nesting using dots, e.g. `blob.chunk_size`.
    #[serde(default)]
    pub name: String,

    /// The default value. Mandatory; its kind determines the flag type.
    pub default: OptionValue,

    /// A description of the option, shown in flag help text.
    #[serde(default)]
    pub usage: String,

    /// The name of the command-line flag.
    #[serde(default)]
    pub flag: String,

    /// A single-character shorthand for the flag.
    #[serde(default)]
    pub short: Option<char>,

    /// An environment variable to bind this option to.
    #[serde(default)]
    pub env: String,
}

impl ConfigOption {
    /// Create an option with a configuration key and a default value.
    pub fn new<N, V>(name: N, default: V) -> Self
    where
        N: Into<String>,
        V: Into<OptionValue>,
    {
        Self {
            name: name.into(),
            default: default.into(),
            usage: String::new(),
            flag: String::new(),
            short: None,
            env: String::new(),
        }
    }

    pub fn with_usage<S: Into<String>>(mut self, usage: S) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn with_flag<S: Into<String>>(mut self, flag: S) -> Self {
        self.flag = flag.into();
        self
    }

    pub fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn with_env<S: Into<String>>(mut self, env: S) -> Self {
        self.env = env.into();
        self
    }

    /// A human-readable label for error context: the configuration key when
    /// present, otherwise the flag name.
    pub fn label(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else {
            &self.flag
        }
    }
}

/// Decode a serialized list of option descriptions from JSON.
///
/// Numeric defaults keep their shape: integral numbers become integer
/// options, fractional ones float options. Composite defaults (arrays,
/// objects) are unsupported and fail decoding.
pub fn options_from_json(json: &str) -> Result<Vec<ConfigOption>> {
    Ok(serde_json::from_str(json)?)
}
