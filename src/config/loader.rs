use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::LedgerConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".brickledger.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// A configuration together with the file it came from, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedConfig {
    pub config: LedgerConfig,
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    /// Directory that relative paths in the config are resolved against.
    pub fn base_dir(&self) -> Option<&Path> {
        self.source.as_deref().and_then(Path::parent)
    }
}

pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse config from a TOML string
pub fn parse_config(contents: &str) -> std::result::Result<LedgerConfig, String> {
    toml::from_str::<LedgerConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
}

/// Try loading a discovered config file; missing or broken files yield `None`.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<LedgerConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Only log actual errors, not "file not found"
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` and its ancestors, nearest first, at most `max_depth` entries.
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

/// Search `start` and its ancestors for `.brickledger.toml`.
pub fn discover_config(start: &Path) -> LoadedConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| {
            try_load_config_from_path(&path).map(|config| LoadedConfig {
                config,
                source: Some(path),
            })
        })
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            LoadedConfig::default()
        })
}

/// Load the config an invocation should use. An explicit path must exist and
/// parse; otherwise the current directory and its ancestors are searched.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let contents = read_config_file(path).map_err(|e| {
            Error::config(format!("cannot read config file {}: {}", path.display(), e))
        })?;
        let config = parse_config(&contents).map_err(Error::config)?;
        log::debug!("Loaded config from {}", path.display());
        return Ok(LoadedConfig {
            config,
            source: Some(path.to_path_buf()),
        });
    }

    match std::env::current_dir() {
        Ok(current) => Ok(discover_config(&current)),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            Ok(LoadedConfig::default())
        }
    }
}

/// Resolve a configured path against the config file's directory.
pub fn resolve_path(base: Option<&Path>, path: &Path) -> PathBuf {
    match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_ancestors_limit() {
        let dirs: Vec<PathBuf> = directory_ancestors(PathBuf::from("/a/b/c/d"), 3).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/a/b/c/d"),
                PathBuf::from("/a/b/c"),
                PathBuf::from("/a/b")
            ]
        );
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[input]\nfolder = \"sets\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let loaded = discover_config(&nested);
        assert_eq!(loaded.config.input.folder, Some(PathBuf::from("sets")));
        assert_eq!(loaded.base_dir(), Some(dir.path()));
    }

    #[test]
    fn test_broken_discovered_config_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[input\n").unwrap();

        let loaded = discover_config(dir.path());
        assert_ne!(loaded.source, Some(dir.path().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_explicit_config_errors_are_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(load_config(Some(&missing)), Err(Error::Config(_))));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "report = 3").unwrap();
        assert!(matches!(load_config(Some(&broken)), Err(Error::Config(_))));
    }

    #[test]
    fn test_resolve_path() {
        let base = Path::new("/home/me/lego");
        assert_eq!(
            resolve_path(Some(base), Path::new("sets")),
            PathBuf::from("/home/me/lego/sets")
        );
        assert_eq!(
            resolve_path(Some(base), Path::new("/abs")),
            PathBuf::from("/abs")
        );
        assert_eq!(resolve_path(None, Path::new("sets")), PathBuf::from("sets"));
    }
}
