//! Pure domain services.

mod hierarchy;
mod permission_calculator;

pub use hierarchy::RoleHierarchy;
pub use permission_calculator::PermissionCalculator;
