//! Annotation-driven configuration for environment variables and `.env` files
//!
//! `tagconf` populates a struct from string-valued sources using per-field
//! annotations: a lookup key, an optional default and an optional
//! "may be empty" flag. The same annotations produce a commented `.env`
//! template documenting every setting.
//!
//! # Features
//!
//! - **Declarative**: `#[derive(Config)]` with `#[conf(...)]` field annotations
//! - **Layered sources**: process environment, dotenv files, in-memory maps;
//!   the first source with a non-empty value wins
//! - **Nested groups**: config structs nest to any depth, and errors name the
//!   full path to the failing field
//! - **Pluggable parsing**: coercers are looked up by exact type, then by
//!   primitive kind, across an ordered list of providers
//! - **Template generation**: render a `.env` template from the same struct
//!
//! # Value Parsing
//!
//! The built-in coercers handle:
//! - `bool`: `1 t T TRUE true True` / `0 f F FALSE false False`
//! - integers of every width, range-checked: `MAX_CONNECTIONS=42`
//! - `f32`, `f64`: `RATIO=0.75`
//! - `Duration`: `TIMEOUT=1m30s`, `POLL=250ms`
//! - `String`, `Vec<u8>` (raw bytes)
//! - `Vec<String>`: `HOSTS=a,b,c` (split on commas, not trimmed)
//! - `Vec<i64>`: `PORTS=80, 443` (split on commas, trimmed)
//!
//! # Example
//!
//! ```rust
//! use tagconf::{Config, Loader};
//!
//! #[derive(Debug, Default, Config)]
//! struct Database {
//!     #[conf(env = "DATABASE_URL", description = "Connection string")]
//!     pub url: String,
//!
//!     #[conf(env = "DATABASE_POOL_SIZE", default = "10")]
//!     pub pool_size: u32,
//! }
//!
//! #[derive(Debug, Default, Config)]
//! struct AppConfig {
//!     #[conf(env = "APP_NAME,omitempty")]
//!     pub name: String,
//!
//!     #[conf(title = "Database")]
//!     pub database: Database,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("DATABASE_URL", "postgres://localhost/db");
//! let config: AppConfig = Loader::new().load()?;
//! assert_eq!(config.database.pool_size, 10);
//! #     Ok(())
//! # }
//! ```
//!
//! # Annotations
//!
//! ## `#[conf(env = "KEY")]`
//!
//! The key looked up in every source. Append `,omitempty` to accept a missing
//! value: the field is then set to its zero value (`false`, `0`, `""`, an
//! empty list, a zero duration).
//!
//! A leaf field without a key annotation is still resolved, under the empty
//! key, so it normally fails unless it allows empty values or has a default.
//!
//! ## `#[conf(default = "value")]`
//!
//! Used when no source has a value and the loader has
//! [`use_defaults`](Loader::use_defaults) set; a warning is logged through
//! `tracing` each time. With [`force_defaults`](Loader::force_defaults) the
//! default always wins and no warning is logged.
//!
//! ## `#[conf(description = "...", example = "...", title = "...")]`
//!
//! Documentation only. `title` names the group of a nested config field.
//!
//! ```rust
//! # use tagconf::{Config, EnvDocGenerator, Loader};
//! #[derive(Config)]
//! struct Settings {
//!     #[conf(env = "LOG_LEVEL", default = "info", description = "Minimum level")]
//!     pub log_level: String,
//! }
//!
//! let mut generator = EnvDocGenerator::new(Vec::new());
//! Loader::new().generate_doc::<Settings, _>(&mut generator).unwrap();
//! let template = String::from_utf8(generator.into_inner()).unwrap();
//! assert!(template.contains("LOG_LEVEL=info"));
//! ```

// Lets macro-generated `::tagconf::` paths resolve inside this crate's tests.
extern crate self as tagconf;

mod coerce;
mod doc;
mod docgen;
mod duration;
mod error;
mod field;
mod loader;
mod source;
mod value;

pub use coerce::{parse_bool, Coercer, CoercerProvider, CoercerTable, DefaultCoercers};
pub use doc::{DocBuilder, DocTree};
pub use docgen::{DocGenerator, EnvDocGenerator};
pub use duration::{parse_duration, DurationError};
pub use error::{ParseError, ResolveError, SourceError};
pub use field::{Config, Field, FieldDescriptor, FieldInfo, TagNames};
pub use loader::Loader;
pub use source::{DotenvSource, EnvSource, MapSource, ValueSource, DEFAULT_DOTENV_FILE};
pub use tagconf_derive::Config;
pub use value::{FieldType, Kind, Leaf, Value};
