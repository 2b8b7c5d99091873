//! # treeconf
//!
//! A structured, human-editable configuration file library.
//!
//! Text is parsed into a typed setting tree that the host can read, mutate and
//! write back out in a canonical form.
//!
//! ## Features
//!
//! - **Typed settings**: Int, Float, String and Bool scalars whose type is
//!   fixed by the first assignment
//! - **Groups and arrays**: named members, and flat arrays of one scalar type
//! - **Path lookup**: `a.b.c`, `a:b:c` and `a/b/c` address nested settings
//! - **Sentinel reads**: typed getters return zero values instead of errors
//! - **All-or-nothing reads**: a parse error leaves the tree empty and records
//!   the offending line
//! - **Host hooks**: attach arbitrary data to a setting and get it back through
//!   a teardown callback when the setting is destroyed
//!
//! ## Format
//!
//! ```text
//! # comments start with '#' or '//', or are wrapped in /* */
//! name = "value";
//! ratio = 0.75;
//! sizes = [ 1, 2, 3 ];
//! window
//!   {
//!   fullscreen = FALSE;
//!   }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use treeconf::{Config, SettingType};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = Config::new();
//!
//! config.read_str(r#"
//! title = "demo";
//! window
//!   {
//!   width = 800;
//!   height = 600;
//!   }
//! "#)?;
//!
//! assert_eq!(config.lookup_int("window.width"), 800);
//! assert_eq!(config.lookup_string("title"), Some("demo"));
//! assert_eq!(config.lookup_int("window.depth"), 0);
//!
//! // Mutate through handles
//! let window = config.lookup("window").unwrap();
//! let scale = config.add(window, Some("scale"), SettingType::Float)?;
//! config.setting_mut(scale).unwrap().set_float(1.5)?;
//!
//! assert!(config.serialize().contains("scale = 1.50000000;"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Arrays
//!
//! ```rust
//! use treeconf::{Config, ConfigError, SettingType};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = Config::new();
//! let root = config.root();
//! let ports = config.add(root, Some("ports"), SettingType::Array)?;
//!
//! config.set_int_elem(ports, None, 80)?;
//! config.set_int_elem(ports, None, 443)?;
//!
//! // The first element fixed the array's type
//! assert!(matches!(
//!     config.set_string_elem(ports, None, "http"),
//!     Err(ConfigError::TypeMismatch { .. })
//! ));
//! assert_eq!(config.get_int_elem(ports, 1), 443);
//! # Ok(())
//! # }
//! ```

// Module declarations
mod builder;
mod config;
mod error;
mod escaping;
mod lexer;
mod list;
mod lookup;
mod setting;
mod types;
mod writer;

// Public API exports
pub use config::{Config, ConfigOptions, Destructor, IO_ERROR_TEXT, is_valid_name};
pub use error::{ConfigError, ParseResult};
pub use setting::{Setting, SettingId};
pub use types::{SettingType, Value};

// Re-export submodules for advanced usage
pub use builder::Builder;
pub use escaping::{escape, unescape};
pub use lexer::{LibconfLexer, Spanned, Token};
pub use list::{CHUNK_SIZE, SettingList};
pub use lookup::{PATH_DELIMITERS, compare_names, names_match};
pub use writer::Writer;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
