//! Domain layer with core entities, errors, ports and pure services.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;
/// Pure domain services.
pub mod services;
/// Source strategies and client modes.
pub mod strategy;

pub use entities::{Channel, Guild, Member, Permissions, Role, User};
pub use errors::{EntityKind, ResolveError, ResolveResult};
pub use ports::{CachePort, RemotePort};
pub use strategy::{ClientMode, Strategy};
