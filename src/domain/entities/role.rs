use std::cmp::{Ordering, Reverse};

use serde::{Deserialize, Serialize};

use super::{GuildId, Identify, Permissions, Snowflake, UserId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(#[serde(with = "crate::domain::serde_utils::string_to_u64")] pub u64);

impl RoleId {
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl Snowflake for RoleId {
    fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RoleId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<&str> for RoleId {
    fn from(value: &str) -> Self {
        Self(value.parse().unwrap_or(0))
    }
}

/// Integration markers attached to managed roles.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleTags {
    /// Bot this role belongs to.
    #[serde(default)]
    pub bot_id: Option<UserId>,
    /// Whether this is the guild's automatic booster role.
    #[serde(default)]
    pub premium_subscriber: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub guild_id: GuildId,
    pub name: String,
    #[serde(default)]
    pub color: u32,
    #[serde(default)]
    pub hoist: bool,
    #[serde(default)]
    pub position: i32,
    pub permissions: Permissions,
    #[serde(default)]
    pub managed: bool,
    #[serde(default)]
    pub mentionable: bool,
    #[serde(default)]
    pub tags: RoleTags,
}

impl Role {
    #[must_use]
    pub fn new(
        id: impl Into<RoleId>,
        guild_id: impl Into<GuildId>,
        name: impl Into<String>,
        position: i32,
        permissions: Permissions,
    ) -> Self {
        Self {
            id: id.into(),
            guild_id: guild_id.into(),
            name: name.into(),
            color: 0,
            hoist: false,
            position,
            permissions,
            managed: false,
            mentionable: false,
            tags: RoleTags::default(),
        }
    }

    /// Marks the role as the guild's automatic booster role.
    #[must_use]
    pub const fn as_premium_subscriber(mut self) -> Self {
        self.managed = true;
        self.tags.premium_subscriber = true;
        self
    }

    #[must_use]
    pub const fn id(&self) -> RoleId {
        self.id
    }

    #[must_use]
    pub const fn position(&self) -> i32 {
        self.position
    }

    /// Returns whether this is the guild's default (`@everyone`) role.
    #[must_use]
    pub const fn is_everyone(&self) -> bool {
        self.id.0 == self.guild_id.0
    }

    #[must_use]
    pub const fn is_premium_subscriber(&self) -> bool {
        self.tags.premium_subscriber
    }

    /// Orders roles by seniority: higher position first, then the older
    /// (lower) id when positions tie.
    #[must_use]
    pub fn cmp_hierarchy(&self, other: &Self) -> Ordering {
        (self.position, Reverse(self.id)).cmp(&(other.position, Reverse(other.id)))
    }
}

impl Identify for Role {
    type Id = RoleId;

    fn identify(&self) -> RoleId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everyone_role_detection() {
        let everyone = Role::new(10_u64, 10_u64, "@everyone", 0, Permissions::empty());
        let other = Role::new(11_u64, 10_u64, "mods", 1, Permissions::empty());

        assert!(everyone.is_everyone());
        assert!(!other.is_everyone());
    }

    #[test]
    fn test_hierarchy_prefers_position() {
        let low = Role::new(1_u64, 10_u64, "low", 1, Permissions::empty());
        let high = Role::new(2_u64, 10_u64, "high", 5, Permissions::empty());

        assert_eq!(high.cmp_hierarchy(&low), Ordering::Greater);
    }

    #[test]
    fn test_hierarchy_tie_prefers_lower_id() {
        let older = Role::new(3_u64, 10_u64, "older", 2, Permissions::empty());
        let newer = Role::new(4_u64, 10_u64, "newer", 2, Permissions::empty());

        assert_eq!(older.cmp_hierarchy(&newer), Ordering::Greater);
        assert_eq!(newer.cmp_hierarchy(&older), Ordering::Less);
    }

    #[test]
    fn test_premium_subscriber_marker() {
        let role = Role::new(5_u64, 10_u64, "Server Booster", 3, Permissions::empty())
            .as_premium_subscriber();

        assert!(role.is_premium_subscriber());
        assert!(role.managed);
    }
}
