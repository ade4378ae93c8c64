//! Score persistence: one append-only JSON-lines file per difficulty.
//!
//! Each line is a `ScoreRecord`. Reading sorts by descending score and
//! assigns ranks starting at 1.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use skyraid_core::enums::Difficulty;

#[derive(Debug, Error)]
pub enum ScoreboardError {
    #[error("failed to access score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed score record at {path}:{line}: {source}")]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize score record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player: String,
    pub score: u32,
    /// UNIX seconds.
    pub recorded_at: u64,
}

impl ScoreRecord {
    /// A record stamped with the current wall-clock time.
    pub fn now(player: impl Into<String>, score: u32) -> Self {
        let recorded_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            player: player.into(),
            score,
            recorded_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedScore {
    pub rank: u32,
    #[serde(flatten)]
    pub record: ScoreRecord,
}

/// Score files under one directory.
#[derive(Debug, Clone)]
pub struct Scoreboard {
    dir: PathBuf,
}

impl Scoreboard {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, difficulty: Difficulty) -> PathBuf {
        self.dir.join(format!("scores_{}.jsonl", difficulty.label()))
    }

    /// Append a record to the difficulty's file, creating it if needed.
    pub fn insert(
        &self,
        difficulty: Difficulty,
        record: &ScoreRecord,
    ) -> Result<(), ScoreboardError> {
        let path = self.path_for(difficulty);
        let line = serde_json::to_string(record)?;

        fs::create_dir_all(&self.dir).map_err(|source| ScoreboardError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| io_error(&path, source))?;
        writeln!(file, "{line}").map_err(|source| io_error(&path, source))?;

        tracing::debug!(
            path = %path.display(),
            player = %record.player,
            score = record.score,
            "score recorded"
        );
        Ok(())
    }

    /// All records for a difficulty, best first. A missing file is empty.
    pub fn load(&self, difficulty: Difficulty) -> Result<Vec<RankedScore>, ScoreboardError> {
        let mut records = self.read_records(difficulty)?;
        // Stable sort keeps earlier entries ahead on ties.
        records.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(records
            .into_iter()
            .enumerate()
            .map(|(i, record)| RankedScore {
                rank: i as u32 + 1,
                record,
            })
            .collect())
    }

    pub fn top(&self, difficulty: Difficulty, n: usize) -> Result<Vec<RankedScore>, ScoreboardError> {
        let mut ranked = self.load(difficulty)?;
        ranked.truncate(n);
        Ok(ranked)
    }

    /// Remove every record for `player`. Returns how many were removed.
    pub fn delete_player(
        &self,
        difficulty: Difficulty,
        player: &str,
    ) -> Result<usize, ScoreboardError> {
        let records = self.read_records(difficulty)?;
        let before = records.len();
        let kept: Vec<ScoreRecord> = records
            .into_iter()
            .filter(|record| record.player != player)
            .collect();
        let removed = before - kept.len();
        if removed == 0 {
            return Ok(0);
        }

        let mut contents = String::new();
        for record in &kept {
            contents.push_str(&serde_json::to_string(record)?);
            contents.push('\n');
        }
        let path = self.path_for(difficulty);
        fs::write(&path, contents).map_err(|source| io_error(&path, source))?;
        Ok(removed)
    }

    /// Records in file order.
    fn read_records(&self, difficulty: Difficulty) -> Result<Vec<ScoreRecord>, ScoreboardError> {
        let path = self.path_for(difficulty);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(io_error(&path, source)),
        };

        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|source| ScoreboardError::Parse {
                    path: path.clone(),
                    line: i + 1,
                    source,
                })
            })
            .collect()
    }
}

fn io_error(path: &Path, source: io::Error) -> ScoreboardError {
    ScoreboardError::Io {
        path: path.to_path_buf(),
        source,
    }
}
