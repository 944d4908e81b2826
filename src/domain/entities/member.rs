use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GuildId, Identify, RoleId, User, UserId};

/// A user's membership in one guild.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub guild_id: GuildId,
    pub user: User,
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<RoleId>,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub premium_since: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pending: bool,
    #[serde(default)]
    pub communication_disabled_until: Option<DateTime<Utc>>,
}

impl Member {
    #[must_use]
    pub fn new(guild_id: impl Into<GuildId>, user: User) -> Self {
        Self {
            guild_id: guild_id.into(),
            user,
            nick: None,
            roles: Vec::new(),
            joined_at: None,
            premium_since: None,
            pending: false,
            communication_disabled_until: None,
        }
    }

    #[must_use]
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = RoleId>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_premium_since(mut self, since: DateTime<Utc>) -> Self {
        self.premium_since = Some(since);
        self
    }

    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user.id()
    }

    #[must_use]
    pub const fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    /// Assigned roles, not including the implicit `@everyone` role.
    #[must_use]
    pub fn roles(&self) -> &[RoleId] {
        &self.roles
    }

    #[must_use]
    pub fn has_role(&self, role_id: RoleId) -> bool {
        role_id == self.guild_id.everyone_role() || self.roles.contains(&role_id)
    }

    /// Returns whether the member is boosting the guild.
    #[must_use]
    pub const fn is_boosting(&self) -> bool {
        self.premium_since.is_some()
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        self.nick
            .clone()
            .unwrap_or_else(|| self.user.display_name())
    }
}

impl Identify for Member {
    type Id = UserId;

    fn identify(&self) -> UserId {
        self.user_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> Member {
        Member::new(1_u64, User::new(2_u64, "someone", "0", None, false))
    }

    #[test]
    fn test_everyone_role_is_implicit() {
        let member = member().with_roles([RoleId(5)]);

        assert!(member.has_role(RoleId(1)));
        assert!(member.has_role(RoleId(5)));
        assert!(!member.has_role(RoleId(6)));
        assert_eq!(member.roles(), &[RoleId(5)]);
    }

    #[test]
    fn test_boosting_marker() {
        assert!(!member().is_boosting());
        assert!(member().with_premium_since(Utc::now()).is_boosting());
    }

    #[test]
    fn test_display_name_prefers_nick() {
        let mut member = member();
        assert_eq!(member.display_name(), "someone");

        member.nick = Some("nick".to_string());
        assert_eq!(member.display_name(), "nick");
    }
}
