pub mod cli;
pub mod toml_config;

use crate::core::DatabaseLocation;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_required_field};
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use crate::core::{engine::LookupRequest, query::Query};
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

pub const DEFAULT_DB_FILE: &str = ".svdb";
pub const DEFAULT_SEED_PATH: &str = "./db.json";

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "svdb")]
#[command(about = "svdb, the service database.")]
pub struct CliConfig {
    /// Query by port number(s) (comma separated list of ports)
    #[arg(short = 'p', long = "port", value_name = "PORTS", conflicts_with = "pattern")]
    pub port: Option<String>,

    /// Query service database by regular expression pattern matching
    #[arg(short = 'X', long = "match", value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Output in JSON format
    #[arg(short, long)]
    pub json: bool,

    /// Reduce output to the given fields (port,description,tcp,udp,status)
    #[arg(short, long, value_name = "FIELDS")]
    pub select: Option<String>,

    /// Path to the service database
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Seed database copied into place when the database does not exist yet
    #[arg(long, value_name = "PATH")]
    pub seed: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 空字串視同未提供
    pub fn query(&self) -> Option<Query> {
        let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());

        non_empty(&self.port)
            .map(Query::Ports)
            .or_else(|| non_empty(&self.pattern).map(Query::Pattern))
    }

    pub fn load_file_config(&self) -> Result<Option<TomlConfig>> {
        match &self.config {
            Some(path) => {
                let file_config = TomlConfig::from_file(path)?;
                file_config.validate()?;
                Ok(Some(file_config))
            }
            None => Ok(None),
        }
    }

    /// 優先順序: 命令列 > 設定檔 > 預設值
    pub fn database_location(&self, file: Option<&TomlConfig>) -> Result<DatabaseLocation> {
        let path = self
            .db
            .clone()
            .or_else(|| file.and_then(|f| f.database_path()).map(Path::to_path_buf));
        let seed = self
            .seed
            .clone()
            .or_else(|| file.and_then(|f| f.seed_path()).map(Path::to_path_buf));

        resolve_location(path, seed, home_dir())
    }

    pub fn lookup_request(&self, file: Option<&TomlConfig>) -> Option<LookupRequest> {
        let json = self.json || file.is_some_and(TomlConfig::json_output);
        self.query()
            .map(|query| LookupRequest::new(query, self.select.as_deref(), json))
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(db) = &self.db {
            validate_path("db", db)?;
        }
        if let Some(seed) = &self.seed {
            validate_path("seed", seed)?;
        }
        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }
        Ok(())
    }
}

fn home_dir() -> Option<String> {
    std::env::var("HOME").ok().filter(|home| !home.is_empty())
}

/// Fill in the defaults: `$HOME/.svdb` for the database, `./db.json` for the seed.
pub fn resolve_location(
    path: Option<PathBuf>,
    seed: Option<PathBuf>,
    home: Option<String>,
) -> Result<DatabaseLocation> {
    let path = match path {
        Some(path) => path,
        None => Path::new(validate_required_field("HOME", &home)?).join(DEFAULT_DB_FILE),
    };
    let seed = seed.unwrap_or_else(|| PathBuf::from(DEFAULT_SEED_PATH));

    validate_path("database.path", &path)?;
    validate_path("database.seed", &seed)?;

    Ok(DatabaseLocation::new(path, Some(seed)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SvdbError;
    #[cfg(feature = "cli")]
    use crate::core::render::OutputMode;

    #[test]
    fn test_resolve_location_defaults() {
        let location = resolve_location(None, None, Some("/home/alice".to_string())).unwrap();
        assert_eq!(location.path, PathBuf::from("/home/alice/.svdb"));
        assert_eq!(location.seed, Some(PathBuf::from("./db.json")));
    }

    #[test]
    fn test_resolve_location_requires_home_without_path() {
        assert!(matches!(
            resolve_location(None, None, None),
            Err(SvdbError::MissingConfigError { .. })
        ));
        let location = resolve_location(Some("/srv/db.json".into()), None, None).unwrap();
        assert_eq!(location.path, PathBuf::from("/srv/db.json"));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_flags() {
        let config = CliConfig::try_parse_from(["svdb", "-p", "22,80", "--select=port"]).unwrap();
        assert_eq!(config.query(), Some(Query::Ports("22,80".to_string())));

        let request = config.lookup_request(None).unwrap();
        assert_eq!(request.mode, OutputMode::Filtered { columns: 1 });
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_rejects_unknown_and_conflicting_flags() {
        assert!(CliConfig::try_parse_from(["svdb", "--bogus"]).is_err());
        assert!(CliConfig::try_parse_from(["svdb", "-p", "22", "-X", "ssh"]).is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_without_query() {
        let config = CliConfig::try_parse_from(["svdb", "-j"]).unwrap();
        assert!(config.lookup_request(None).is_none());

        let config = CliConfig::try_parse_from(["svdb", "-p", ""]).unwrap();
        assert!(config.query().is_none());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_flags_override_file_config() {
        let file = TomlConfig::from_toml_str(
            "[database]\npath = \"/etc/svdb.json\"\nseed = \"/usr/share/svdb.json\"\n[output]\njson = true\n",
        )
        .unwrap();

        let config =
            CliConfig::try_parse_from(["svdb", "-X", "ssh", "--db", "/tmp/mine.json"]).unwrap();
        let location = config.database_location(Some(&file)).unwrap();
        assert_eq!(location.path, PathBuf::from("/tmp/mine.json"));
        assert_eq!(location.seed, Some(PathBuf::from("/usr/share/svdb.json")));

        let request = config.lookup_request(Some(&file)).unwrap();
        assert_eq!(request.mode, OutputMode::Json);
    }
}
