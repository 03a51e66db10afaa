pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::FileRegistryLoader;
pub use config::toml_config::TomlConfig;
pub use core::engine::{LookupEngine, LookupReport, LookupRequest};
pub use core::query::Query;
pub use domain::model::{DatabaseLocation, Registry, Service};
pub use utils::error::{Result, SvdbError};
