//! Repository port for game log persistence.
//!
//! This module defines the trait boundary between the domain and infrastructure
//! layers for storing finished games and reading them back.

use crate::{Result, history::GameRecord};

/// Port for persisting and loading recorded games.
///
/// # Examples
///
/// ```
/// use menace_bot::adapters::InMemoryGameLogRepository;
/// use menace_bot::ports::GameLogRepository;
/// use menace_bot::MenaceAgent;
///
/// fn warm_start<R: GameLogRepository>(repo: &R, agent: &mut MenaceAgent) -> menace_bot::Result<usize> {
///     let records = repo.load_all()?;
///     Ok(agent.learn_from_records(&records))
/// }
///
/// let mut agent = MenaceAgent::new(Some(1));
/// assert_eq!(warm_start(&InMemoryGameLogRepository::new(), &mut agent)?, 0);
/// # Ok::<(), menace_bot::Error>(())
/// ```
pub trait GameLogRepository {
    /// Store one finished game and return an identifier for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save(&self, record: &GameRecord) -> Result<String>;

    /// Load every stored game, oldest first.
    ///
    /// Implementations skip individual records they cannot read rather than
    /// failing the whole load.
    ///
    /// # Errors
    ///
    /// Returns an error if the store itself cannot be listed.
    fn load_all(&self) -> Result<Vec<GameRecord>>;
}
