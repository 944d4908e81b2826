use crate::domain::entities::{Member, Role};

/// Role ordering rules used for moderation checks.
pub struct RoleHierarchy;

impl RoleHierarchy {
    /// Picks the senior role among `roles`.
    pub fn top_role<'a>(roles: impl IntoIterator<Item = &'a Role>) -> Option<&'a Role> {
        roles.into_iter().max_by(|a, b| a.cmp_hierarchy(b))
    }

    /// Picks the member's senior role from the guild's roles.
    ///
    /// The default role counts as held by every member, so this only yields
    /// `None` when `guild_roles` lacks both it and the member's roles.
    pub fn member_top_role<'a>(member: &Member, guild_roles: &'a [Role]) -> Option<&'a Role> {
        Self::top_role(guild_roles.iter().filter(|role| member.has_role(role.id)))
    }

    /// Returns whether `first` sits strictly above `second`.
    #[must_use]
    pub const fn is_above(first: &Role, second: &Role) -> bool {
        first.position > second.position
    }
}
