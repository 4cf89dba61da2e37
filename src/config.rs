//! Runtime configuration resolved from flags and environment.
//!
//! Precedence: `--store`/`--data-dir` flags, then `TASKBOARD_HOME`, then
//! `$HOME/.taskboard`.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const HOME_ENV: &str = "TASKBOARD_HOME";
pub const LOG_ENV: &str = "TASKBOARD_LOG";
pub const STORE_FILE: &str = "storage.json";
pub const LOG_FILE: &str = "taskboard.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub store_path: PathBuf,
    pub log_path: PathBuf,
}

impl Config {
    /// Resolve configuration from the process environment.
    pub fn resolve(store: Option<&Path>, data_dir: Option<&Path>) -> Result<Self> {
        Self::resolve_with(store, data_dir, |key| std::env::var(key).ok())
    }

    /// Resolve configuration with an explicit environment lookup.
    pub fn resolve_with<F>(store: Option<&Path>, data_dir: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => match env(HOME_ENV).filter(|v| !v.trim().is_empty()) {
                Some(dir) => PathBuf::from(dir),
                None => {
                    let home = env("HOME").ok_or_else(|| {
                        Error::Config(format!("neither {} nor HOME is set; pass --data-dir", HOME_ENV))
                    })?;
                    PathBuf::from(home).join(".taskboard")
                }
            },
        };
        let store_path = store
            .map(Path::to_path_buf)
            .unwrap_or_else(|| data_dir.join(STORE_FILE));
        let log_path = data_dir.join(LOG_FILE);
        Ok(Config { data_dir, store_path, log_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
    }

    #[test]
    fn test_defaults_to_home_dir() {
        let cfg = Config::resolve_with(None, None, env_of(&[("HOME", "/home/ann")])).unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/home/ann/.taskboard"));
        assert_eq!(cfg.store_path, PathBuf::from("/home/ann/.taskboard/storage.json"));
        assert_eq!(cfg.log_path, PathBuf::from("/home/ann/.taskboard/taskboard.log"));
    }

    #[test]
    fn test_env_overrides_home() {
        let env = env_of(&[("HOME", "/home/ann"), (HOME_ENV, "/srv/tasks")]);
        let cfg = Config::resolve_with(None, None, env).unwrap();
        assert_eq!(cfg.store_path, PathBuf::from("/srv/tasks/storage.json"));
    }

    #[test]
    fn test_flags_override_env() {
        let env = env_of(&[(HOME_ENV, "/srv/tasks")]);
        let cfg = Config::resolve_with(
            Some(Path::new("/tmp/custom.json")),
            Some(Path::new("/tmp/board")),
            env,
        )
        .unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/board"));
        assert_eq!(cfg.store_path, PathBuf::from("/tmp/custom.json"));
    }

    #[test]
    fn test_missing_home_is_config_error() {
        let result = Config::resolve_with(None, None, env_of(&[]));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
