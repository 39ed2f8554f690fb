//! Option registration and binding
//!
//! The operations that copy an option description into the flag set and the
//! configuration store. Adding an option installs its default value and its
//! typed flag; binding connects its environment variable and parsed flag to
//! the configuration key. Batch variants apply a list in order and stop at
//! the first failure, without undoing earlier side effects.

use tracing::debug;

use crate::error::{OptregError, Result};
use crate::flag::FlagSet;
use crate::option::ConfigOption;
use crate::store::ConfigStore;

/// Add an option to the program: set its default value in the store and, when
/// a flag set is supplied and the option names a flag, create the typed flag.
///
/// Pass `None` for `flags` to skip flag creation. An option with an empty
/// `name` registers no default; one with an empty `flag` creates no flag.
///
/// If flag creation fails, a default already set in step one is not rolled
/// back.
pub fn add_option(opt: &ConfigOption, store: &mut ConfigStore, flags: Option<&mut FlagSet>) -> Result<()> {
    if !opt.name.is_empty() {
        store.set_default(&opt.name, &opt.default)?;
    }

    if let Some(flags) = flags {
        if !opt.flag.is_empty() {
            flags.add(opt)?;
        }
    }

    Ok(())
}

/// Add a list of options in order, stopping at the first failure. Options
/// after the failing one are not processed; earlier ones stay applied.
pub fn add_options(
    opts: &[ConfigOption],
    store: &mut ConfigStore,
    mut flags: Option<&mut FlagSet>,
) -> Result<()> {
    for opt in opts {
        add_option(opt, store, flags.as_deref_mut())
            .map_err(|e| OptregError::add_option(opt.label(), e))?;
    }
    Ok(())
}

/// Bind an option's external sources to its configuration key: the
/// environment variable when both `name` and `env` are set, and the
/// previously created flag when a flag set is supplied and `flag` is set.
///
/// Fails if the flag was never added to the given flag set.
pub fn bind_option(opt: &ConfigOption, store: &mut ConfigStore, flags: Option<&FlagSet>) -> Result<()> {
    if !opt.name.is_empty() && !opt.env.is_empty() {
        store.bind_env(&opt.name, &opt.env)?;
    }

    if let Some(flags) = flags {
        if !opt.flag.is_empty() {
            if !flags.contains(&opt.flag) {
                return Err(OptregError::flag_not_found(&opt.flag));
            }
            if !opt.name.is_empty() {
                store.bind_flag(&opt.name, &opt.flag, opt.default.kind())?;
            }
        }
    }

    Ok(())
}

/// Bind a list of options in order, stopping at the first failure.
pub fn bind_options(
    opts: &[ConfigOption],
    store: &mut ConfigStore,
    flags: Option<&FlagSet>,
) -> Result<()> {
    for opt in opts {
        bind_option(opt, store, flags)
            .map_err(|e| OptregError::bind_option(opt.label(), e))?;
    }
    Ok(())
}

/// Add then bind a single option. If adding fails, binding is not attempted
/// and its side effects never occur.
pub fn add_and_bind_option(
    opt: &ConfigOption,
    store: &mut ConfigStore,
    flags: Option<&mut FlagSet>,
) -> Result<()> {
    debug!(name = %opt.name, flag = %opt.flag, "adding and binding option");
    match flags {
        Some(flags) => {
            add_option(opt, store, Some(&mut *flags))
                .map_err(|e| OptregError::add_option(opt.label(), e))?;
            bind_option(opt, store, Some(&*flags))
                .map_err(|e| OptregError::bind_option(opt.label(), e))?;
        }
        None => {
            add_option(opt, store, None).map_err(|e| OptregError::add_option(opt.label(), e))?;
            bind_option(opt, store, None).map_err(|e| OptregError::bind_option(opt.label(), e))?;
        }
    }
    Ok(())
}

/// Add and bind a list of options in order, stopping at the first failure.
pub fn add_and_bind_options(
    opts: &[ConfigOption],
    store: &mut ConfigStore,
    mut flags: Option<&mut FlagSet>,
) -> Result<()> {
    for opt in opts {
        add_and_bind_option(opt, store, flags.as_deref_mut())?;
    }
    Ok(())
}
