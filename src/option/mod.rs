//! Option description model
//!
//! This module defines the option description record and the typed default
//! value it carries. An option binds one logical setting to its configuration
//! key, default value, command-line flag, shorthand, environment variable,
//! and usage text.

pub mod definition;
pub mod value;

pub use definition::*;
pub use value::*;
