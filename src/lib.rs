//! Guildgate - cache-first entity resolution and permission checks for
//! Discord bots.
//!
//! References to guilds, members, channels, roles, bans and emojis resolve
//! through a local snapshot with REST fallback; on top of that sit effective
//! permission computation and moderation hierarchy checks.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing resolution and services.
pub mod application;
/// Domain layer containing entities, errors, ports and pure services.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

#[cfg(test)]
mod testing;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "guildgate";
