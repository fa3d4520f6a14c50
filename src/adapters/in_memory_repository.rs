//! In-memory game log repository for testing.
//!
//! This adapter provides a pure in-memory implementation of GameLogRepository,
//! enabling fast tests without any file system I/O.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{Result, history::GameRecord, ports::GameLogRepository};

/// In-memory repository for testing.
///
/// # Examples
///
/// ```
/// use menace_bot::adapters::InMemoryGameLogRepository;
/// use menace_bot::history::GameRecord;
/// use menace_bot::ports::GameLogRepository;
/// use menace_bot::{GameOutcome, Player};
///
/// let repo = InMemoryGameLogRepository::new();
/// let record = GameRecord::new(Player::X, Player::O, Vec::new(), GameOutcome::Draw);
/// repo.save(&record)?;
/// assert_eq!(repo.load_all()?, vec![record]);
/// # Ok::<(), menace_bot::Error>(())
/// ```
///
/// # Thread Safety
///
/// All clones share the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryGameLogRepository {
    storage: Arc<Mutex<Vec<GameRecord>>>,
}

impl InMemoryGameLogRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-filled with records.
    pub fn with_records(records: Vec<GameRecord>) -> Self {
        Self {
            storage: Arc::new(Mutex::new(records)),
        }
    }

    /// Get the number of games currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Clear all stored games.
    pub fn clear(&self) {
        self.storage().clear();
    }

    fn storage(&self) -> MutexGuard<'_, Vec<GameRecord>> {
        // A panic while holding the lock cannot leave a Vec half-written
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl GameLogRepository for InMemoryGameLogRepository {
    fn save(&self, record: &GameRecord) -> Result<String> {
        let mut storage = self.storage();
        storage.push(record.clone());
        Ok(format!("memory:{}", storage.len() - 1))
    }

    fn load_all(&self) -> Result<Vec<GameRecord>> {
        Ok(self.storage().clone())
    }
}
