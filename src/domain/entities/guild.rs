//! Discord guild entity.

use serde::{Deserialize, Serialize};

use super::{Identify, RoleId, Snowflake, UserId};

/// Unique identifier for a Discord guild (server).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuildId(#[serde(with = "crate::domain::serde_utils::string_to_u64")] pub u64);

impl GuildId {
    /// Returns the underlying u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the id of the guild's default (`@everyone`) role.
    ///
    /// The default role always shares its id with the guild.
    #[must_use]
    pub const fn everyone_role(self) -> RoleId {
        RoleId(self.0)
    }
}

impl Snowflake for GuildId {
    fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for GuildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for GuildId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<&str> for GuildId {
    fn from(value: &str) -> Self {
        Self(value.parse().unwrap_or(0))
    }
}

/// Discord guild (server) information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Guild {
    id: GuildId,
    name: String,
    icon: Option<String>,
    owner_id: UserId,
    #[serde(default)]
    premium_subscription_count: u32,
}

impl Guild {
    /// Creates a new guild with the given ID, name and owner.
    #[must_use]
    pub fn new(id: impl Into<GuildId>, name: impl Into<String>, owner_id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: None,
            owner_id: owner_id.into(),
            premium_subscription_count: 0,
        }
    }

    /// Sets the guild icon hash.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the number of boosts the guild has.
    #[must_use]
    pub const fn with_premium_subscriptions(mut self, count: u32) -> Self {
        self.premium_subscription_count = count;
        self
    }

    /// Returns the guild ID.
    #[must_use]
    pub const fn id(&self) -> GuildId {
        self.id
    }

    /// Returns the guild name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the guild icon hash.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Returns the ID of the user owning the guild.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns whether the given user owns this guild.
    #[must_use]
    pub fn is_owner(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    /// Returns the id of the default (`@everyone`) role.
    #[must_use]
    pub const fn everyone_role_id(&self) -> RoleId {
        self.id.everyone_role()
    }

    /// Returns the number of boosts the guild has.
    #[must_use]
    pub const fn premium_subscription_count(&self) -> u32 {
        self.premium_subscription_count
    }
}

impl Identify for Guild {
    type Id = GuildId;

    fn identify(&self) -> GuildId {
        self.id
    }
}
