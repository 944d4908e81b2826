use crate::domain::entities::{Member, Permissible, PermissionOverwrite, Permissions, Role};

pub struct PermissionCalculator;

impl PermissionCalculator {
    /// Guild-level permissions: the default role unioned with every
    /// assigned role, or every flag for an administrator.
    pub fn guild_permissions(everyone: &Role, member_roles: &[Role]) -> Permissions {
        let permissions = member_roles
            .iter()
            .fold(everyone.permissions, |acc, role| acc | role.permissions);

        if permissions.is_administrator() {
            Permissions::all()
        } else {
            permissions
        }
    }

    /// Channel-level permissions on top of [`Self::guild_permissions`].
    ///
    /// `channel` must already be the channel owning the overwrites (a
    /// thread's parent, not the thread). Administrators skip overwrites.
    pub fn channel_permissions(
        guild_permissions: Permissions,
        everyone: &Role,
        member: &Member,
        member_roles: &[Role],
        channel: &impl Permissible,
    ) -> Permissions {
        if guild_permissions.is_administrator() {
            return Permissions::all();
        }

        Self::apply_overwrites(guild_permissions, everyone, member, member_roles, channel)
    }

    /// Default role and assigned roles as one accumulated pair, then the
    /// member's own overwrite.
    fn apply_overwrites(
        mut permissions: Permissions,
        everyone: &Role,
        member: &Member,
        member_roles: &[Role],
        channel: &impl Permissible,
    ) -> Permissions {
        let mut role_overwrite = channel.role_overwrite(everyone.id).copied().unwrap_or_else(|| {
            PermissionOverwrite::role(everyone.id, Permissions::empty(), Permissions::empty())
        });

        // Deny and allow from different roles are unioned before applying
        // so one role's deny never masks another role's allow.
        for role in member_roles.iter().filter(|r| r.id != everyone.id) {
            if let Some(overwrite) = channel.role_overwrite(role.id) {
                role_overwrite.deny |= overwrite.deny;
                role_overwrite.allow |= overwrite.allow;
            }
        }

        permissions = permissions.apply(role_overwrite.deny, role_overwrite.allow);

        if let Some(overwrite) = channel.member_overwrite(member.user_id()) {
            permissions = permissions.apply(overwrite.deny, overwrite.allow);
        }

        permissions
    }
}
