//! Local project store: one JSON document at a fixed location.
//!
//! A missing, empty, or corrupt store is a normal startup condition
//! and yields the default seed project. Save failures are logged and
//! never break the editing session. Nothing locks the file: when two
//! sessions write the same store, the last writer wins.

use std::fs;
use std::path::{Path, PathBuf};

use super::record::FileRecord;
use super::seed;

const STORE_DIR: &str = ".webpen";
const STORE_FILE: &str = "playground.json";
const LOG_SUBDIR: &str = "logs";

pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn at_default_location() -> Option<Self> {
        cache_dir().map(|dir| Self::new(dir.join(STORE_DIR).join(STORE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, records: &[FileRecord]) {
        let json = match serde_json::to_string_pretty(records) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(%error, "failed to serialize project, skipping save");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if let Err(error) = fs::create_dir_all(parent) {
                tracing::warn!(%error, dir = %parent.display(), "cannot create store directory");
                return;
            }
        }

        if let Err(error) = fs::write(&self.path, json) {
            tracing::warn!(%error, path = %self.path.display(), "failed to write project store");
        }
    }

    pub fn load(&self) -> Vec<FileRecord> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(_) => return seed::default_project(),
        };

        match serde_json::from_str::<Vec<FileRecord>>(&data) {
            Ok(records) if !records.is_empty() => records,
            Ok(_) => seed::default_project(),
            Err(error) => {
                tracing::warn!(%error, path = %self.path.display(), "store is corrupt, using seed");
                seed::default_project()
            }
        }
    }
}

pub(crate) fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = cache_dir()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "cannot determine cache directory",
            )
        })?
        .join(STORE_DIR)
        .join(LOG_SUBDIR);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(target_os = "macos")]
fn cache_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join("Library/Caches"))
}

#[cfg(target_os = "linux")]
fn cache_dir() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        return Some(PathBuf::from(xdg));
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".cache"))
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn cache_dir() -> Option<PathBuf> {
    std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::record::{records_from_tree, tree_from_records};

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProjectStore::new(dir.path().join("playground.json"));

        let mut tree = tree_from_records(&seed::default_project()).unwrap();
        let folder = tree.create_folder("assets", None).unwrap();
        let extra = tree.create_file("notes.md", Some(folder)).unwrap();
        tree.update(extra, "# notes");

        let records = records_from_tree(&mut tree);
        store.save(&records);
        assert_eq!(store.load(), records);
    }

    #[test]
    fn test_missing_store_yields_seed() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProjectStore::new(dir.path().join("nope.json"));
        assert_eq!(store.load(), seed::default_project());
    }

    #[test]
    fn test_corrupt_store_yields_seed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("playground.json");
        fs::write(&path, "{ definitely not an array").unwrap();
        let store = ProjectStore::new(path);
        assert_eq!(store.load(), seed::default_project());
    }

    #[test]
    fn test_empty_store_yields_seed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("playground.json");
        fs::write(&path, "[]").unwrap();
        let store = ProjectStore::new(path);
        assert_eq!(store.load(), seed::default_project());
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProjectStore::new(dir.path().join("playground.json"));

        let mut tree = tree_from_records(&seed::default_project()).unwrap();
        store.save(&records_from_tree(&mut tree));

        let extra = tree.create_file("extra.js", None).unwrap();
        tree.update(extra, "// more");
        let updated = records_from_tree(&mut tree);
        store.save(&updated);
        assert_eq!(store.load(), updated);
    }
}
