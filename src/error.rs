use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I could not find config file: {} (entries are TOML tables; convert an old mounch.yaml to this file)", .0.display())]
    Missing(PathBuf),
    #[error("failed to read config file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid config file {}: {source}", .path.display())]
    Parse { path: PathBuf, source: toml::de::Error },
}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("usage cache {}: {source}", .path.display())]
    Cache { path: PathBuf, source: io::Error },
    #[error("menu {program} failed: {source}")]
    Menu { program: String, source: io::Error },
    #[error("Cannot find executable \"{0}\"")]
    BinaryNotFound(String),
    #[error("failed to execute {program}: {source}")]
    Exec { program: String, source: nix::Error },
}
