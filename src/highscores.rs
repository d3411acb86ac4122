use crate::consts;
use serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The high-score table: at most [`consts::MAX_HIGH_SCORES`] entries,
/// ordered by score descending.  Among equal scores, older entries rank
/// higher.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HighScores(Vec<ScoreEntry>);

impl HighScores {
    /// Return the default high-scores file path, if the local data
    /// directory can be determined.
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("wyrmhole").join("scores.json"))
    }

    /// Read high scores from a file on disk.  A missing file yields the
    /// seeded default table.
    pub(crate) fn load(path: &Path) -> Result<HighScores, LoadError> {
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(HighScores::default())
            }
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }

    /// Write the table to a file on disk, creating parent directories as
    /// needed.
    pub(crate) fn save(&self, path: &Path) -> Result<(), SaveError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(self).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }

    /// Whether `score` would make it onto the table.
    pub(crate) fn qualifies(&self, score: u32) -> bool {
        self.0.len() < consts::MAX_HIGH_SCORES || self.0.last().is_some_and(|e| score > e.score)
    }

    /// Insert an entry at its ordered position, dropping anything pushed
    /// past the table size.  Returns the entry's one-based rank.
    pub(crate) fn record(&mut self, entry: ScoreEntry) -> usize {
        let idx = self
            .0
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.0.len());
        self.0.insert(idx, entry);
        self.0.truncate(consts::MAX_HIGH_SCORES);
        idx + 1
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, ScoreEntry> {
        self.0.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for HighScores {
    fn default() -> HighScores {
        HighScores(vec![
            ScoreEntry {
                score: 100,
                name: String::from("Player1"),
                date: String::from("2023-01-01"),
            },
            ScoreEntry {
                score: 80,
                name: String::from("Player2"),
                date: String::from("2023-01-02"),
            },
            ScoreEntry {
                score: 60,
                name: String::from("Player3"),
                date: String::from("2023-01-03"),
            },
        ])
    }
}

impl Serialize for HighScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

// Hand-edited files may be out of order or overlong; normalize on the
// way in so the ordering invariant holds everywhere else.
impl<'de> Deserialize<'de> for HighScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut entries = Vec::<ScoreEntry>::deserialize(deserializer)?;
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(consts::MAX_HIGH_SCORES);
        Ok(HighScores(entries))
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct ScoreEntry {
    pub(crate) score: u32,
    pub(crate) name: String,
    pub(crate) date: String,
}

impl ScoreEntry {
    /// An entry dated today (local time).
    pub(crate) fn today(score: u32, name: &str) -> ScoreEntry {
        ScoreEntry {
            score,
            name: name.to_owned(),
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Error)]
#[error("Failed to save high scores to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    pub(crate) fn no_path() -> Self {
        SaveError(SaveErrorSource::NoPath)
    }

    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high scores")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high scores to disk")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high scores from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    pub(crate) fn no_path() -> Self {
        LoadError(LoadErrorSource::NoPath)
    }

    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read high scores file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high scores")]
    Deserialize(#[source] serde_json::Error),
}
