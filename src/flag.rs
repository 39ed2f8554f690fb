//! Command-line flag set
//!
//! A thin wrapper around `clap::Command` that creates one typed flag per
//! option and answers lookups by flag name. Flag parsing itself stays with
//! clap; this module only owns flag definition and lookup.

use std::ffi::OsString;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing::debug;

use crate::error::{OptregError, Result};
use crate::option::{ConfigOption, OptionKind};

/// A set of command-line flags backed by a `clap::Command`.
pub struct FlagSet {
    command: Command,
}

impl FlagSet {
    /// Create an empty flag set. `name` becomes the clap command name.
    pub fn new<S: Into<clap::builder::Str>>(name: S) -> Self {
        Self {
            command: Command::new(name),
        }
    }

    /// Wrap an existing clap command so options can add flags to it.
    pub fn from_command(command: Command) -> Self {
        Self { command }
    }

    /// Add a typed flag for `opt`. The kind of the option's default value
    /// selects the value parser; the default itself becomes the flag default.
    ///
    /// Boolean flags accept a bare `--flag` (meaning true) as well as
    /// `--flag=false`. Duration flags take a whole number of seconds.
    ///
    /// Fails if a flag with the same name is already defined.
    pub fn add(&mut self, opt: &ConfigOption) -> Result<()> {
        if self.contains(&opt.flag) {
            return Err(OptregError::flag_redefined(&opt.flag));
        }

        let mut arg = Arg::new(opt.flag.clone())
            .long(opt.flag.clone())
            .action(ArgAction::Set)
            .help(opt.usage.clone())
            .default_value(opt.default.to_flag_default());
        if let Some(short) = opt.short {
            arg = arg.short(short);
        }

        arg = match opt.default.kind() {
            OptionKind::Bool => arg
                .value_parser(value_parser!(bool))
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true"),
            OptionKind::Int => arg.value_parser(value_parser!(i64)),
            OptionKind::Float => arg.value_parser(value_parser!(f64)),
            OptionKind::Str => arg.value_parser(value_parser!(String)),
            OptionKind::Duration => arg.value_parser(value_parser!(u64)).value_name("SECONDS"),
        };

        debug!(flag = %opt.flag, kind = %opt.default.kind(), "adding flag");
        let command = std::mem::replace(&mut self.command, Command::new(""));
        self.command = command.arg(arg);
        Ok(())
    }

    /// Whether a flag with the given name is defined in this set.
    pub fn contains(&self, flag: &str) -> bool {
        self.command
            .get_arguments()
            .any(|arg| arg.get_id().as_str() == flag)
    }

    /// Parse the given arguments against this flag set. The first argument is
    /// taken as the binary name, matching `std::env::args`.
    ///
    /// Returns clap's own error so callers keep clap's help and version
    /// handling.
    pub fn try_parse_from<I, T>(&self, args: I) -> std::result::Result<ArgMatches, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.command.clone().try_get_matches_from(args)
    }

    /// Borrow the underlying clap command.
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Consume the flag set, returning the underlying clap command.
    pub fn into_command(self) -> Command {
        self.command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_carries_name_short_default_and_usage() {
        let opt = ConfigOption::new("port", 8080)
            .with_flag("port")
            .with_short('p')
            .with_usage("the port to listen on");
        let mut flags = FlagSet::new("test");
        flags.add(&opt).unwrap();

        let arg = flags
            .command()
            .get_arguments()
            .find(|a| a.get_id().as_str() == "port")
            .unwrap();
        assert_eq!(arg.get_long(), Some("port"));
        assert_eq!(arg.get_short(), Some('p'));
        let defaults: Vec<String> = arg
            .get_default_values()
            .iter()
            .map(|v| v.to_string_lossy().into_owned())
            .collect();
        assert_eq!(defaults, vec!["8080"]);
        assert_eq!(arg.get_help().map(|h| h.to_string()).as_deref(), Some("the port to listen on"));
    }

    #[test]
    fn test_redefined_flag_is_rejected() {
        let opt = ConfigOption::new("port", 8080).with_flag("port");
        let mut flags = FlagSet::new("test");
        flags.add(&opt).unwrap();

        let err = flags.add(&opt).unwrap_err();
        assert!(matches!(err, OptregError::FlagRedefined { ref flag } if flag == "port"));
    }

    #[test]
    fn test_bool_flag_bare_and_explicit_forms() {
        let opt = ConfigOption::new("debug", false).with_flag("debug");
        let mut flags = FlagSet::new("test");
        flags.add(&opt).unwrap();

        let matches = flags.try_parse_from(["prog", "--debug"]).unwrap();
        assert_eq!(matches.get_one::<bool>("debug"), Some(&true));

        let matches = flags.try_parse_from(["prog", "--debug=false"]).unwrap();
        assert_eq!(matches.get_one::<bool>("debug"), Some(&false));

        let matches = flags.try_parse_from(["prog"]).unwrap();
        assert_eq!(matches.get_one::<bool>("debug"), Some(&false));
    }

    #[test]
    fn test_typed_parsing_per_kind() {
        let mut flags = FlagSet::new("test");
        flags
            .add(&ConfigOption::new("ratio", 0.5).with_flag("ratio"))
            .unwrap();
        flags
            .add(&ConfigOption::new("region", "eastus").with_flag("region"))
            .unwrap();
        flags
            .add(
                &ConfigOption::new("cache-ttl", std::time::Duration::from_secs(300))
                    .with_flag("cache-ttl"),
            )
            .unwrap();

        let matches = flags
            .try_parse_from(["prog", "--ratio", "0.75", "--cache-ttl", "600"])
            .unwrap();
        assert_eq!(matches.get_one::<f64>("ratio"), Some(&0.75));
        assert_eq!(matches.get_one::<String>("region").map(String::as_str), Some("eastus"));
        assert_eq!(matches.get_one::<u64>("cache-ttl"), Some(&600));
    }
}
