//! Infrastructure layer with external service adapters.

/// In-memory entity snapshot.
pub mod cache;
/// Application configuration.
pub mod config;
/// Discord API client.
pub mod discord;

pub use cache::SnapshotCache;
pub use config::{AppConfig, CliArgs, Command, ConfigError, LogLevel, StorageManager};
pub use discord::DiscordRestClient;
