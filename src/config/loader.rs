use std::fs;
use std::path::{Path, PathBuf};

use super::core::TestgapConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".testgap.toml";
const MAX_TRAVERSAL_DEPTH: usize = 10;

pub fn parse_config(path: &Path, contents: &str) -> Result<TestgapConfig> {
    let config = toml::from_str::<TestgapConfig>(contents)
        .map_err(|e| Error::config(path, e.to_string()))?;
    if config.marker.trim().is_empty() {
        return Err(Error::config(path, "marker must not be empty"));
    }
    Ok(config)
}

/// Loads an explicitly requested file. Any failure is an error.
pub fn load_from_path(path: &Path) -> Result<TestgapConfig> {
    let contents = fs::read_to_string(path).map_err(|e| Error::load_failure(path, e))?;
    let config = parse_config(path, &contents)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// A discovered file that is missing is skipped quietly; one that is
/// unreadable or invalid is skipped with a warning.
fn try_load_discovered(path: &Path) -> Option<TestgapConfig> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to read config file {}: {}", path.display(), e);
            }
            return None;
        }
    };

    match parse_config(path, &contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Searches `start` and its ancestors for `.testgap.toml`.
pub fn discover_config(start: PathBuf) -> TestgapConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_discovered(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            TestgapConfig::default()
        })
}

pub fn load_config() -> TestgapConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            log::warn!("Failed to get current directory: {}. Using default config.", e);
            TestgapConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_ancestors_limit() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c"), PathBuf::from("/a/b")]);
    }

    #[test]
    fn test_discover_from_parent_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "marker = \"Gap\"\n").unwrap();
        let nested = dir.path().join("lib/deep");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(discover_config(nested).marker, "Gap");
    }

    #[test]
    fn test_invalid_discovered_config_falls_back() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "reverse = \"yes\"\n").unwrap();
        assert_eq!(discover_config(dir.path().to_path_buf()), TestgapConfig::default());
    }

    #[test]
    fn test_explicit_config_errors_are_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "marker = \"\"\n").unwrap();
        assert!(matches!(load_from_path(&path), Err(Error::Config { .. })));
        assert!(matches!(
            load_from_path(&dir.path().join("absent.toml")),
            Err(Error::LoadFailure { .. })
        ));
    }
}
