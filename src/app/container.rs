//! Dependency injection container for the MENACE application.
//!
//! The container owns infrastructure dependencies and provides factory
//! methods for creating agents and recording their games.

use std::{path::PathBuf, sync::Arc};

use tracing::info;

use super::config::AgentConfig;
use crate::{
    Result, adapters::DirectoryGameLogRepository, history::GameRecord, menace::MenaceAgent,
    ports::GameLogRepository,
};

/// Default directory for game logs, relative to the working directory
pub const DEFAULT_LOG_DIR: &str = "GameLog";

/// Application with dependency injection.
///
/// # Examples
///
/// ```
/// use menace_bot::app::{App, AgentConfig};
/// use menace_bot::adapters::InMemoryGameLogRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryGameLogRepository::new())
///     .build();
///
/// let agent = app.load_agent(AgentConfig::default().with_seed(42))?;
/// assert!(agent.trail().is_empty());
/// # Ok::<(), menace_bot::Error>(())
/// ```
pub struct App {
    /// Repository for finished games
    log_repository: Arc<dyn GameLogRepository + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create an app storing game logs in `log_dir`.
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_repository: Arc::new(DirectoryGameLogRepository::new(log_dir)),
            default_seed: None,
        }
    }

    /// Create a builder for constructing app with custom dependencies.
    ///
    /// Primarily used for testing with in-memory dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Get the game log repository.
    pub fn log_repository(&self) -> Arc<dyn GameLogRepository + Send + Sync> {
        Arc::clone(&self.log_repository)
    }

    /// Create a fresh agent with the given configuration.
    pub fn create_agent(&self, config: AgentConfig) -> MenaceAgent {
        // Apply seed from config or use container default
        let seed = config.seed.or(self.default_seed);
        let mut builder = MenaceAgent::builder().config(config);
        if let Some(seed) = seed {
            builder = builder.seed(seed);
        }

        builder.build()
    }

    /// Create an agent and replay every recorded game into it.
    ///
    /// # Errors
    /// Returns an error if the repository cannot be listed.
    pub fn load_agent(&self, config: AgentConfig) -> Result<MenaceAgent> {
        let mut agent = self.create_agent(config);
        let records = self.log_repository.load_all()?;
        let applied = agent.learn_from_records(&records);
        info!(
            records = records.len(),
            applied, "replayed game history into agent"
        );
        Ok(agent)
    }

    /// Persist a finished game.
    pub fn record_game(&self, record: &GameRecord) -> Result<String> {
        self.log_repository.save(record)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_DIR)
    }
}

/// Builder for constructing app with custom dependencies.
///
/// # Examples
///
/// ```
/// use menace_bot::app::AppBuilder;
/// use menace_bot::adapters::InMemoryGameLogRepository;
///
/// let app = AppBuilder::new()
///     .with_repository(InMemoryGameLogRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct AppBuilder {
    log_repository: Option<Arc<dyn GameLogRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    /// Create a new app builder.
    pub fn new() -> Self {
        Self {
            log_repository: None,
            default_seed: None,
        }
    }

    /// Set a custom game log repository.
    pub fn with_repository<R: GameLogRepository + Send + Sync + 'static>(
        mut self,
        repo: R,
    ) -> Self {
        self.log_repository = Some(Arc::new(repo));
        self
    }

    /// Set a default random seed for all agents created by this container.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app with the configured dependencies.
    ///
    /// If no repository was specified, logs go to [`DEFAULT_LOG_DIR`].
    pub fn build(self) -> App {
        App {
            log_repository: self
                .log_repository
                .unwrap_or_else(|| Arc::new(DirectoryGameLogRepository::new(DEFAULT_LOG_DIR))),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
