use std::fs;
use std::path::{Path, PathBuf};
use directories::{BaseDirs, ProjectDirs};
use log::debug;
use crate::error::ConfigError;
use crate::model::EntryMapping;

/// Locations of everything mounch reads or writes.
#[derive(Debug, Clone)]
pub struct Paths {
    pub config_file: PathBuf,
    pub cache_file: PathBuf,
    pub icon_dir: PathBuf,
}

impl Paths {
    pub fn discover() -> Self {
        let proj_dirs = ProjectDirs::from("", "", "mounch");
        let (config_file, cache_file) = if let Some(dirs) = &proj_dirs {
            (dirs.config_dir().join("mounch.toml"), dirs.cache_dir().join("cache"))
        } else {
            (PathBuf::from("mounch.toml"), PathBuf::from("mounch.cache"))
        };

        let icon_dir = if let Some(base) = BaseDirs::new() {
            base.data_dir().join("icons")
        } else {
            PathBuf::from("icons")
        };

        Self { config_file, cache_file, icon_dir }
    }
}

/// Expands a leading `~` against the user's home directory.
pub fn expand_home(raw: &str) -> PathBuf {
    let home = BaseDirs::new().map(|b| b.home_dir().to_path_buf());
    match (raw, home) {
        ("~", Some(home)) => home,
        (s, Some(home)) if s.starts_with("~/") => home.join(&s[2..]),
        (s, _) => PathBuf::from(s),
    }
}

pub fn parse_entries(content: &str, path: &Path) -> Result<EntryMapping, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_entries(path: &Path) -> Result<EntryMapping, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::Missing(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_entries(&content, path)?;
    debug!("Loaded {} entries from {:?}", entries.len(), path);
    Ok(entries)
}
