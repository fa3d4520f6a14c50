//! Application layer with dependency injection container.
//!
//! The container owns the game log repository and creates agents from an
//! [`AgentConfig`], optionally warmed up from every recorded game.
//!
//! # Usage
//!
//! ## Production
//!
//! ```no_run
//! use menace_bot::app::{App, AgentConfig};
//!
//! let app = App::new("GameLog");
//! let agent = app.load_agent(AgentConfig::default().with_seed(42))?;
//! # Ok::<(), menace_bot::Error>(())
//! ```
//!
//! ## Testing
//!
//! ```
//! use menace_bot::app::App;
//! use menace_bot::adapters::InMemoryGameLogRepository;
//!
//! let app = App::for_testing()
//!     .with_repository(InMemoryGameLogRepository::new())
//!     .with_default_seed(42)
//!     .build();
//! ```

pub mod config;
pub mod container;

pub use config::AgentConfig;
pub use container::{App, AppBuilder};
