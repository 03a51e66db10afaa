use crate::core::{DatabaseLocation, Registry, RegistryLoader};
use crate::utils::error::{Result, SvdbError};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads the registry from a JSON file, copying the seed database into
/// place on first run.
#[derive(Debug, Clone)]
pub struct FileRegistryLoader {
    location: DatabaseLocation,
}

impl FileRegistryLoader {
    pub fn new(location: DatabaseLocation) -> Self {
        Self { location }
    }

    fn bootstrap(&self) -> Result<()> {
        let path = &self.location.path;
        let seed = self
            .location
            .seed
            .as_ref()
            .ok_or_else(|| SvdbError::DatabaseNotFound {
                path: path.clone(),
                reason: "no seed database configured".to_string(),
            })?;

        if !seed.is_file() {
            return Err(SvdbError::DatabaseNotFound {
                path: path.clone(),
                reason: format!("seed database {} does not exist", seed.display()),
            });
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // 先複製到同目錄的暫存檔再改名，中途失敗不會留下半份資料庫
        let staging = staging_path(path);
        if let Err(e) = fs::copy(seed, &staging).and_then(|_| fs::rename(&staging, path)) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }
        tracing::info!("📁 Copied seed database {} to {}", seed.display(), path.display());
        Ok(())
    }
}

impl RegistryLoader for FileRegistryLoader {
    fn load(&self) -> Result<Registry> {
        let path = &self.location.path;

        if !path.exists() {
            tracing::debug!("Database {} missing, bootstrapping", path.display());
            self.bootstrap()?;
        }

        let content = fs::read_to_string(path)?;
        Registry::from_json_str(&content).map_err(|source| SvdbError::ParseError {
            path: path.clone(),
            source,
        })
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("svdb"));
    name.push(".tmp");
    path.with_file_name(name)
}
