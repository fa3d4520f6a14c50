//! Adapters implementing domain ports.
//!
//! This module contains infrastructure implementations of the traits defined
//! in the ports module. Following hexagonal architecture, adapters depend on
//! domain ports, not the other way around.

pub mod directory_repository;
pub mod in_memory_repository;

pub use directory_repository::DirectoryGameLogRepository;
pub use in_memory_repository::InMemoryGameLogRepository;
