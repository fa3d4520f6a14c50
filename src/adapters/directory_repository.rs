//! Directory-backed game log repository.
//!
//! Each game is written to its own `GameLog_<unix-seconds>.log` file.

use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use tracing::{debug, warn};

use crate::{Result, error::Error, history::GameRecord, ports::GameLogRepository};

const PREFIX: &str = "GameLog_";
const EXTENSION: &str = ".log";
/// Games saved within the same second get `_1`, `_2`, ... suffixes
const MAX_SUFFIX: u32 = 10_000;

/// Game logs stored as one text file per game in a directory.
///
/// # Examples
///
/// ```no_run
/// use menace_bot::adapters::DirectoryGameLogRepository;
/// use menace_bot::ports::GameLogRepository;
///
/// let repo = DirectoryGameLogRepository::new("GameLog");
/// let history = repo.load_all()?;
/// println!("{} games on record", history.len());
/// # Ok::<(), menace_bot::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryGameLogRepository {
    dir: PathBuf,
}

impl DirectoryGameLogRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn create_log_file(&self, stamp: u64) -> Result<(PathBuf, fs::File)> {
        for attempt in 0..MAX_SUFFIX {
            let name = if attempt == 0 {
                format!("{PREFIX}{stamp}{EXTENSION}")
            } else {
                format!("{PREFIX}{stamp}_{attempt}{EXTENSION}")
            };
            let path = self.dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
                Err(source) => {
                    return Err(Error::Io {
                        operation: format!("create game log {path:?}"),
                        source,
                    });
                }
            }
        }
        Err(Error::Io {
            operation: format!("find a free game log name for {stamp} in {:?}", self.dir),
            source: ErrorKind::AlreadyExists.into(),
        })
    }

    fn log_files(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.dir).map_err(|source| Error::Io {
            operation: format!("list game logs in {:?}", self.dir),
            source,
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && sort_key(path).is_some())
            .collect();
        files.sort_by_key(|path| sort_key(path));
        Ok(files)
    }
}

/// `(seconds, suffix)` parsed from a log file name
fn sort_key(path: &Path) -> Option<(u64, u32)> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_prefix(PREFIX)?.strip_suffix(EXTENSION)?;
    match stem.split_once('_') {
        Some((secs, suffix)) => Some((secs.parse().ok()?, suffix.parse().ok()?)),
        None => Some((stem.parse().ok()?, 0)),
    }
}

impl GameLogRepository for DirectoryGameLogRepository {
    fn save(&self, record: &GameRecord) -> Result<String> {
        fs::create_dir_all(&self.dir).map_err(|source| Error::Io {
            operation: format!("create log directory {:?}", self.dir),
            source,
        })?;

        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        let (path, mut file) = self.create_log_file(stamp)?;
        file.write_all(record.to_log_string().as_bytes())
            .map_err(|source| Error::Io {
                operation: format!("write game log {path:?}"),
                source,
            })?;

        debug!(path = %path.display(), moves = record.moves.len(), "saved game log");
        Ok(path.display().to_string())
    }

    fn load_all(&self) -> Result<Vec<GameRecord>> {
        if !self.dir.is_dir() {
            warn!(dir = %self.dir.display(), "game log directory not found, starting without history");
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for path in self.log_files()? {
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(err) => {
                    warn!(path = %path.display(), %err, "skipping unreadable game log");
                    continue;
                }
            };
            let record = match GameRecord::parse_log(&text) {
                Ok(record) => record,
                Err(err) => {
                    warn!(path = %path.display(), %err, "skipping malformed game log");
                    continue;
                }
            };
            if record.moves.is_empty() {
                warn!(path = %path.display(), "skipping game log with no moves");
                continue;
            }
            records.push(record);
        }

        debug!(dir = %self.dir.display(), count = records.len(), "loaded game logs");
        Ok(records)
    }
}
