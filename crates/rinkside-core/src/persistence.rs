// JSON save files: one document per franchise.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::tracker::FranchiseTracker;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on save file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid save file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Write the franchise to `path`.
///
/// The document is written to a sibling temp file and renamed into place, so
/// an interrupted or failed save leaves any existing file intact. Parent
/// directories are created as needed.
pub fn save(tracker: &FranchiseTracker, path: &Path) -> Result<(), PersistenceError> {
    let io_err = |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let json = tracker.to_json().map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let tmp = temp_path(path);
    let write_result = (|| -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();
    if let Err(e) = write_result {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(e));
    }

    info!(
        "Saved franchise (season {}, {} archived) to {}",
        tracker.current_season(),
        tracker.season_history().len(),
        path.display()
    );
    Ok(())
}

/// Read a franchise from `path` and rebuild its derived team references.
/// Unknown fields are ignored.
pub fn load(path: &Path) -> Result<FranchiseTracker, PersistenceError> {
    let text = fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tracker = FranchiseTracker::from_json(&text).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "Loaded franchise {} (season {}) from {}",
        tracker.nhl_team_name(),
        tracker.current_season(),
        path.display()
    );
    Ok(tracker)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "franchise.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Contract, ContractStatus, Player, Position};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rinkside_persistence_{name}"));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = scratch_dir("round_trip");
        let path = dir.join("saves/franchise.json");

        let mut tracker = FranchiseTracker::new_franchise("Falcons", "Falcons AHL", "GM", 2025);
        tracker.add_player_to_nhl(
            Player::new("Evan", "Bouchard", Position::RightDefense, 86, 25)
                .with_contract(Contract::new(10.5, 4, 2025, ContractStatus::Ufa)),
        );
        tracker.advance_season();

        save(&tracker, &path).unwrap();
        assert!(path.exists());
        assert!(!temp_path(&path).exists());

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, tracker);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn save_overwrites_existing_file() {
        let dir = scratch_dir("overwrite");
        let path = dir.join("franchise.json");
        let mut tracker = FranchiseTracker::new_franchise("Falcons", "Falcons AHL", "GM", 2025);
        save(&tracker, &path).unwrap();
        tracker.advance_season();
        save(&tracker, &path).unwrap();

        assert_eq!(load(&path).unwrap().current_season(), 2026);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = scratch_dir("missing");
        let err = load(&dir.join("nope.json")).unwrap_err();
        assert!(matches!(err, PersistenceError::Io { .. }));
    }

    #[test]
    fn load_garbage_is_json_error() {
        let dir = scratch_dir("garbage");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, PersistenceError::Json { .. }));
        assert!(err.to_string().contains("bad.json"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn temp_path_is_a_sibling() {
        let tmp = temp_path(Path::new("/data/franchise.json"));
        assert_eq!(tmp, PathBuf::from("/data/franchise.json.tmp"));
    }
}
