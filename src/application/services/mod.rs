//! Services built on top of entity resolution.

mod moderation_service;
mod permission_service;

pub use moderation_service::{ModerationService, Ranked};
pub use permission_service::PermissionService;
