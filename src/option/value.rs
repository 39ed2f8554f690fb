//! Typed default values for configuration options
//!
//! The default value of an option determines which kind of command-line flag
//! is created for it. Five kinds are supported: boolean, integer, float,
//! string, and duration.

use std::fmt;
use std::time::Duration;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use crate::error::{OptregError, Result};

/// The default value of a configuration option.
///
/// The variant determines the type of flag created when the option is added
/// to a flag set, and the typed accessor used when a bound flag is read back
/// at resolve time.
///
/// Numbers decoded from serialized option lists keep their shape: an integral
/// number (`8080`) becomes [`OptionValue::Int`], a fractional one (`0.5`)
/// becomes [`OptionValue::Float`]. There is no coercion between the two; a
/// float default always produces a float flag.
///
/// Durations have no representation in JSON or TOML option lists and are
/// constructed programmatically. On the flag, environment, and file surface a
/// duration is expressed as a whole number of seconds.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Duration(Duration),
}

/// The kind of an [`OptionValue`], used for flag dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Bool,
    Int,
    Float,
    Str,
    Duration,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptionKind::Bool => "boolean",
            OptionKind::Int => "integer",
            OptionKind::Float => "float",
            OptionKind::Str => "string",
            OptionKind::Duration => "duration",
        };
        write!(f, "{name}")
    }
}

impl OptionValue {
    /// The kind of this value.
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionValue::Bool(_) => OptionKind::Bool,
            OptionValue::Int(_) => OptionKind::Int,
            OptionValue::Float(_) => OptionKind::Float,
            OptionValue::Str(_) => OptionKind::Str,
            OptionValue::Duration(_) => OptionKind::Duration,
        }
    }

    /// Render the value the way it appears on the command line, suitable for
    /// a clap default value.
    pub fn to_flag_default(&self) -> String {
        match self {
            OptionValue::Bool(b) => b.to_string(),
            OptionValue::Int(i) => i.to_string(),
            OptionValue::Float(f) => f.to_string(),
            OptionValue::Str(s) => s.clone(),
            OptionValue::Duration(d) => d.as_secs().to_string(),
        }
    }

    /// Convert into the configuration store's value type.
    ///
    /// Durations are stored as whole seconds.
    pub fn to_config_value(&self) -> config::Value {
        match self {
            OptionValue::Bool(b) => config::Value::from(*b),
            OptionValue::Int(i) => config::Value::from(*i),
            OptionValue::Float(f) => config::Value::from(*f),
            OptionValue::Str(s) => config::Value::from(s.clone()),
            OptionValue::Duration(d) => {
                config::Value::from(i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
            }
        }
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        OptionValue::Int(v)
    }
}

impl From<i32> for OptionValue {
    fn from(v: i32) -> Self {
        OptionValue::Int(v.into())
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        OptionValue::Float(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::Str(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::Str(v)
    }
}

impl From<Duration> for OptionValue {
    fn from(v: Duration) -> Self {
        OptionValue::Duration(v)
    }
}

/// Convert a dynamic JSON value into an option default.
///
/// Null, arrays, and objects are not valid defaults and fail with an
/// unsupported-type error naming the offending kind.
impl TryFrom<&serde_json::Value> for OptionValue {
    type Error = OptregError;

    fn try_from(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Bool(b) => Ok(OptionValue::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(OptionValue::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(OptionValue::Float(f))
                } else {
                    Err(OptregError::unsupported_type("integer out of range"))
                }
            }
            serde_json::Value::String(s) => Ok(OptionValue::Str(s.clone())),
            serde_json::Value::Null => Err(OptregError::unsupported_type("null")),
            serde_json::Value::Array(_) => Err(OptregError::unsupported_type("array")),
            serde_json::Value::Object(_) => Err(OptregError::unsupported_type("object")),
        }
    }
}

impl<'de> Deserialize<'de> for OptionValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OptionValueVisitor;

        impl<'de> Visitor<'de> for OptionValueVisitor {
            type Value = OptionValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean, number, or string")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Self::Value, E> {
                Ok(OptionValue::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
                Ok(OptionValue::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
                i64::try_from(v)
                    .map(OptionValue::Int)
                    .map_err(|_| E::custom("unsupported option type: integer out of range"))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
                Ok(OptionValue::Float(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                Ok(OptionValue::Str(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Self::Value, E> {
                Ok(OptionValue::Str(v))
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Err(E::custom("unsupported option type: null"))
            }

            fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Err(E::custom("unsupported option type: null"))
            }

            fn visit_seq<A>(self, _seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                Err(de::Error::custom("unsupported option type: sequence"))
            }

            fn visit_map<A>(self, _map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                Err(de::Error::custom("unsupported option type: map"))
            }
        }

        deserializer.deserialize_any(OptionValueVisitor)
    }
}
