//! Application layer: entity resolution and the services using it.

/// Cache-first entity resolution.
pub mod resolver;
/// Permission and moderation services.
pub mod services;

pub use resolver::{ChannelFilter, Required, Resolution, Resolver};
pub use services::{ModerationService, PermissionService, Ranked};
