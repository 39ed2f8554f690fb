//! Layered configuration store
//!
//! Wraps the `config` crate's builder together with the environment-variable
//! and flag bindings collected during registration. Resolution applies the
//! precedence: command-line flag > environment variable > file source >
//! default value.

use clap::parser::ValueSource;
use clap::ArgMatches;
use config::{Config, ConfigBuilder};
use tracing::debug;

use crate::error::{OptregError, Result};
use crate::option::{OptionKind, OptionValue};

#[derive(Debug, Clone)]
struct EnvBinding {
    key: String,
    var: String,
}

#[derive(Debug, Clone)]
struct FlagBinding {
    key: String,
    flag: String,
    kind: OptionKind,
}

/// A layered key-value store for configuration values.
///
/// Defaults, file sources, environment variables, and command-line flags all
/// merge under one key namespace. Keys use dots for nesting, e.g.
/// `blob.chunk_size`. The store is caller-owned and passed explicitly; it is
/// not a process-wide singleton.
#[derive(Default)]
pub struct ConfigStore {
    builder: ConfigBuilder<config::builder::DefaultState>,
    env_bindings: Vec<EnvBinding>,
    flag_bindings: Vec<FlagBinding>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default value for a configuration key.
    pub fn set_default(&mut self, key: &str, value: &OptionValue) -> Result<()> {
        debug!(key, kind = %value.kind(), "setting default");
        let builder = self.builder.clone();
        self.builder = builder.set_default(key, value.to_config_value())?;
        Ok(())
    }

    /// Bind an environment variable to a configuration key. When the variable
    /// is set at resolve time, its value overrides defaults and file sources
    /// for that key.
    pub fn bind_env(&mut self, key: &str, var: &str) -> Result<()> {
        if key.is_empty() {
            return Err(OptregError::invalid_binding(
                "environment binding requires a configuration key",
            ));
        }
        if var.is_empty() {
            return Err(OptregError::invalid_binding(format!(
                "environment binding for key '{key}' requires a variable name"
            )));
        }
        debug!(key, var, "binding environment variable");
        self.env_bindings.push(EnvBinding {
            key: key.to_string(),
            var: var.to_string(),
        });
        Ok(())
    }

    /// Bind a command-line flag to a configuration key. When the flag is
    /// passed at resolve time, its parsed value overrides every other source
    /// for that key.
    pub fn bind_flag(&mut self, key: &str, flag: &str, kind: OptionKind) -> Result<()> {
        if key.is_empty() || flag.is_empty() {
            return Err(OptregError::invalid_binding(
                "flag binding requires both a configuration key and a flag name",
            ));
        }
        debug!(key, flag, %kind, "binding flag");
        self.flag_bindings.push(FlagBinding {
            key: key.to_string(),
            flag: flag.to_string(),
            kind,
        });
        Ok(())
    }

    /// Add a layered source, typically a configuration file. Sources sit
    /// above defaults and below environment variables and flags.
    pub fn add_source<S>(&mut self, source: S)
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = std::mem::take(&mut self.builder);
        self.builder = builder.add_source(source);
    }

    /// Build the merged configuration, applying bound environment variables
    /// and, when parse results are supplied, bound flags that were actually
    /// passed on the command line. Flag defaults never override an
    /// environment variable or file value.
    ///
    /// The store is left untouched, so callers can resolve repeatedly.
    pub fn resolve(&self, matches: Option<&ArgMatches>) -> Result<Config> {
        let mut builder = self.builder.clone();

        for binding in &self.env_bindings {
            // Environment values stay strings; the store coerces on read.
            if let Ok(value) = std::env::var(&binding.var) {
                debug!(key = %binding.key, var = %binding.var, "applying environment override");
                builder = builder.set_override(&binding.key, value)?;
            }
        }

        if let Some(matches) = matches {
            for binding in &self.flag_bindings {
                if let Some(value) = flag_override(matches, binding)? {
                    debug!(key = %binding.key, flag = %binding.flag, "applying flag override");
                    builder = builder.set_override(&binding.key, value)?;
                }
            }
        }

        Ok(builder.build()?)
    }
}

/// Extract the override value for one flag binding, if the flag was passed on
/// the command line. Bindings against flags the given matches do not know are
/// skipped; a kind mismatch between the binding and the flag definition is an
/// error.
fn flag_override(matches: &ArgMatches, binding: &FlagBinding) -> Result<Option<config::Value>> {
    match matches.try_contains_id(&binding.flag) {
        Ok(_) => {}
        Err(_) => return Ok(None),
    }
    if matches.value_source(&binding.flag) != Some(ValueSource::CommandLine) {
        return Ok(None);
    }

    let value = match binding.kind {
        OptionKind::Bool => matches
            .try_get_one::<bool>(&binding.flag)?
            .copied()
            .map(config::Value::from),
        OptionKind::Int => matches
            .try_get_one::<i64>(&binding.flag)?
            .copied()
            .map(config::Value::from),
        OptionKind::Float => matches
            .try_get_one::<f64>(&binding.flag)?
            .copied()
            .map(config::Value::from),
        OptionKind::Str => matches
            .try_get_one::<String>(&binding.flag)?
            .cloned()
            .map(config::Value::from),
        OptionKind::Duration => matches
            .try_get_one::<u64>(&binding.flag)?
            .map(|secs| config::Value::from(i64::try_from(*secs).unwrap_or(i64::MAX))),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_env_requires_key_and_var() {
        let mut store = ConfigStore::new();
        assert!(matches!(
            store.bind_env("", "PORT"),
            Err(OptregError::InvalidBinding(_))
        ));
        assert!(matches!(
            store.bind_env("port", ""),
            Err(OptregError::InvalidBinding(_))
        ));
        assert!(store.bind_env("port", "PORT").is_ok());
    }

    #[test]
    fn test_defaults_resolve_with_nested_keys() {
        let mut store = ConfigStore::new();
        store
            .set_default("blob.chunk_size", &OptionValue::Int(4))
            .unwrap();
        let config = store.resolve(None).unwrap();
        assert_eq!(config.get_int("blob.chunk_size").unwrap(), 4);
    }

    #[test]
    fn test_unset_env_binding_leaves_default() {
        let mut store = ConfigStore::new();
        store.set_default("region", &OptionValue::from("eastus")).unwrap();
        store.bind_env("region", "OPTREG_STORE_TEST_UNSET").unwrap();
        let config = store.resolve(None).unwrap();
        assert_eq!(config.get_string("region").unwrap(), "eastus");
    }
}
