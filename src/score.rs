use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = "quote-snake";
const LEADERBOARD_FILE_NAME: &str = "leaderboard.json";

/// Number of entries the board keeps.
pub const LEADERBOARD_CAPACITY: usize = 10;

/// One finished run worth remembering.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    pub difficulty: String,
}

/// Descending top list of finished runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    /// Returns entries best-first.
    #[must_use]
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Returns the best run, if any.
    #[must_use]
    pub fn best(&self) -> Option<&ScoreEntry> {
        self.entries.first()
    }

    /// Inserts a run, keeping the list sorted by score and capped at
    /// [`LEADERBOARD_CAPACITY`].
    pub fn record(&mut self, name: impl Into<String>, score: u32, difficulty: &str) {
        self.entries.push(ScoreEntry {
            name: name.into(),
            score,
            difficulty: difficulty.to_string(),
        });
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(LEADERBOARD_CAPACITY);
    }
}

/// Returns the platform-correct leaderboard file path.
#[must_use]
pub fn leaderboard_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LEADERBOARD_FILE_NAME);
    base
}

/// Loads the leaderboard from disk.
///
/// Returns an empty board when the file does not yet exist (first run).
/// Returns `Err` when the file exists but cannot be read or parsed, so the
/// caller can surface a warning before entering raw terminal mode.
pub fn load_leaderboard() -> io::Result<Leaderboard> {
    load_from_path(&leaderboard_path())
}

/// Saves the leaderboard to disk, creating parent directories when needed.
pub fn save_leaderboard(board: &Leaderboard) -> io::Result<()> {
    save_to_path(&leaderboard_path(), board)
}

fn load_from_path(path: &Path) -> io::Result<Leaderboard> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Leaderboard::default()),
        Err(e) => return Err(e),
    };

    serde_json::from_str(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn save_to_path(path: &Path, board: &Leaderboard) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(board)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{load_from_path, save_to_path, Leaderboard, LEADERBOARD_CAPACITY};

    #[test]
    fn record_keeps_entries_sorted_and_capped() {
        let mut board = Leaderboard::default();
        for score in [12, 40, 3, 27, 40, 8, 19, 1, 33, 25, 7, 16] {
            board.record("Player", score, "Medium");
        }

        assert_eq!(board.entries().len(), LEADERBOARD_CAPACITY);
        assert!(board
            .entries()
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
        assert_eq!(board.best().map(|entry| entry.score), Some(40));
    }

    #[test]
    fn leaderboard_round_trip() {
        let path = unique_test_path("round_trip");
        let mut board = Leaderboard::default();
        board.record("Alex", 42, "Medium");
        board.record("Jordan", 36, "Hard");

        save_to_path(&path, &board).expect("save should succeed");
        let loaded = load_from_path(&path).expect("load should succeed");

        assert_eq!(loaded.entries(), board.entries());
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_file_returns_empty_board() {
        let path = unique_test_path("missing");
        // Deliberately do not create the file.
        let loaded = load_from_path(&path).expect("missing file should return an empty board");
        assert!(loaded.entries().is_empty());
    }

    #[test]
    fn malformed_file_returns_error() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        assert!(
            load_from_path(&path).is_err(),
            "malformed file should return Err"
        );

        cleanup_test_path(&path);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("quote-snake-score-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
