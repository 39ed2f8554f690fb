//! optreg - unified configuration option registration
//!
//! Define a configuration option once and register it consistently as a
//! command-line flag (via `clap`), an environment variable binding, and a
//! default value in a layered configuration store (via the `config` crate).
//! Flag parsing, environment lookup, and file decoding stay with those
//! crates; this crate only supplies the glue.
//!
//! ```no_run
//! use optreg::{add_and_bind_option, ConfigOption, ConfigStore, FlagSet};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let name = ConfigOption::new("name", "World")
//!         .with_usage("the name of the person you wish to greet")
//!         .with_flag("name")
//!         .with_short('n')
//!         .with_env("HELLO_NAME");
//!
//!     let mut store = ConfigStore::new();
//!     let mut flags = FlagSet::new("hello");
//!     add_and_bind_option(&name, &mut store, Some(&mut flags))?;
//!
//!     // Optionally layer a configuration file between defaults and the
//!     // environment.
//!     store.add_source(config::File::with_name("hello").required(false));
//!
//!     let matches = flags.try_parse_from(std::env::args())?;
//!     let config = store.resolve(Some(&matches))?;
//!
//!     // Precedence: --name > HELLO_NAME > hello.toml > "World"
//!     println!("Hello, {}!", config.get_string("name")?);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod flag;
pub mod option;
pub mod registrar;
pub mod store;

// Re-export commonly used types
pub use error::{OptregError, Result};
pub use flag::FlagSet;
pub use option::{options_from_json, ConfigOption, OptionKind, OptionValue};
pub use registrar::{
    add_and_bind_option, add_and_bind_options, add_option, add_options, bind_option, bind_options,
};
pub use store::ConfigStore;
