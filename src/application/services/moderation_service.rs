//! Role hierarchy checks for moderation actions.

use futures_util::future::try_join;
use tracing::debug;

use super::PermissionService;
use crate::application::resolver::{Required, Resolution};
use crate::domain::entities::{EntityRef, Guild, Member, Permissions, Role, RoleId, UserId};
use crate::domain::errors::{ResolveError, ResolveResult};
use crate::domain::services::RoleHierarchy;

/// Something with a place in the role hierarchy: a role itself, or a
/// member ranked by their top role.
#[derive(Debug, Clone, Copy)]
pub enum Ranked<'a> {
    Member(EntityRef<'a, Member>),
    Role(EntityRef<'a, Role>),
}

impl Ranked<'_> {
    #[must_use]
    pub fn member(user_id: impl Into<UserId>) -> Self {
        Self::Member(EntityRef::Id(user_id.into()))
    }

    #[must_use]
    pub fn role(role_id: impl Into<RoleId>) -> Self {
        Self::Role(EntityRef::Id(role_id.into()))
    }

    async fn rank(self, resolution: &Resolution<'_>, guild: EntityRef<'_, Guild>) -> ResolveResult<Role> {
        match self {
            Self::Member(member) => {
                let member = resolution.member_in(guild, member).await.required()?;
                resolution.top_role(guild, &member).await.required()
            }
            Self::Role(role) => resolution.role(guild, role).await.required(),
        }
    }
}

impl<'a> From<&'a Member> for Ranked<'a> {
    fn from(member: &'a Member) -> Self {
        Self::Member(member.into())
    }
}

impl<'a> From<&'a Role> for Ranked<'a> {
    fn from(role: &'a Role) -> Self {
        Self::Role(role.into())
    }
}

impl<'a> From<EntityRef<'a, Member>> for Ranked<'a> {
    fn from(member: EntityRef<'a, Member>) -> Self {
        Self::Member(member)
    }
}

impl<'a> From<EntityRef<'a, Role>> for Ranked<'a> {
    fn from(role: EntityRef<'a, Role>) -> Self {
        Self::Role(role)
    }
}

/// Decides whether one member may discipline another.
///
/// Every check resolves with mandatory lookups, so a guild, member or role
/// that cannot be found surfaces as its not-found error.
#[derive(Debug, Clone)]
pub struct ModerationService {
    permissions: PermissionService,
}

impl ModerationService {
    #[must_use]
    pub const fn new(permissions: PermissionService) -> Self {
        Self { permissions }
    }

    #[must_use]
    pub const fn permissions(&self) -> &PermissionService {
        &self.permissions
    }

    /// Returns whether `first` ranks strictly above `second`.
    ///
    /// # Errors
    /// Returns a not-found error when either side cannot be resolved.
    pub async fn is_above(
        &self,
        guild: impl Into<EntityRef<'_, Guild>>,
        first: impl Into<Ranked<'_>>,
        second: impl Into<Ranked<'_>>,
    ) -> ResolveResult<bool> {
        let resolution = self.permissions.resolution()?;
        let guild = guild.into();

        let (first, second) = try_join(
            first.into().rank(&resolution, guild),
            second.into().rank(&resolution, guild),
        )
        .await?;

        Ok(RoleHierarchy::is_above(&first, &second))
    }

    /// # Errors
    /// Returns resolution failures of the guild, either member or their roles.
    pub async fn can_kick(
        &self,
        guild: impl Into<EntityRef<'_, Guild>>,
        moderator: impl Into<EntityRef<'_, Member>>,
        target: impl Into<EntityRef<'_, Member>>,
    ) -> ResolveResult<bool> {
        self.can_remove(guild.into(), moderator.into(), target.into(), Permissions::KICK_MEMBERS)
            .await
    }

    /// # Errors
    /// Returns resolution failures of the guild, either member or their roles.
    pub async fn can_ban(
        &self,
        guild: impl Into<EntityRef<'_, Guild>>,
        moderator: impl Into<EntityRef<'_, Member>>,
        target: impl Into<EntityRef<'_, Member>>,
    ) -> ResolveResult<bool> {
        self.can_remove(guild.into(), moderator.into(), target.into(), Permissions::BAN_MEMBERS)
            .await
    }

    /// # Errors
    /// Returns resolution failures of the guild, either member or their roles.
    pub async fn can_timeout(
        &self,
        guild: impl Into<EntityRef<'_, Guild>>,
        moderator: impl Into<EntityRef<'_, Member>>,
        target: impl Into<EntityRef<'_, Member>>,
    ) -> ResolveResult<bool> {
        self.can_moderate(guild, moderator, target, Permissions::MODERATE_MEMBERS)
            .await
    }

    /// Timeout-style check with a caller-chosen capability.
    ///
    /// The target must be neither the owner nor an administrator; the
    /// moderator needs `required`, administrator or ownership, and must rank
    /// above the target.
    ///
    /// # Errors
    /// Returns resolution failures of the guild, either member or their roles.
    pub async fn can_moderate(
        &self,
        guild: impl Into<EntityRef<'_, Guild>>,
        moderator: impl Into<EntityRef<'_, Member>>,
        target: impl Into<EntityRef<'_, Member>>,
        required: Permissions,
    ) -> ResolveResult<bool> {
        let (guild, moderator, target) = (guild.into(), moderator.into(), target.into());
        let resolution = self.permissions.resolution()?;
        let guild_entity = resolution.guild(guild).await.required()?;

        let (moderator_perms, target_perms) = try_join(
            self.permissions.guild_permissions(guild, moderator),
            self.permissions.guild_permissions(guild, target),
        )
        .await?;

        if guild_entity.is_owner(target.id()) || target_perms.is_administrator() {
            return Ok(false);
        }

        let authorized = moderator_perms.contains(required)
            || moderator_perms.is_administrator()
            || guild_entity.is_owner(moderator.id());
        if !authorized {
            debug!(moderator = %moderator.id(), ?required, "missing capability");
            return Ok(false);
        }

        self.is_above(guild, moderator, target).await
    }

    async fn can_remove(
        &self,
        guild: EntityRef<'_, Guild>,
        moderator: EntityRef<'_, Member>,
        target: EntityRef<'_, Member>,
        required: Permissions,
    ) -> ResolveResult<bool> {
        let resolution = self.permissions.resolution()?;
        let guild_entity = resolution.guild(guild).await.required()?;
        let moderator_id = moderator.normalize().ok_or(ResolveError::MemberNotFound)?;

        if target.normalize() == Some(moderator_id) {
            return Ok(false);
        }
        if guild_entity.is_owner(moderator_id) {
            return Ok(true);
        }

        let moderator_perms = self.permissions.guild_permissions(guild, moderator).await?;
        if !(moderator_perms.is_administrator() || moderator_perms.contains(required)) {
            debug!(moderator = %moderator_id, ?required, "missing capability");
            return Ok(false);
        }
        if guild_entity.is_owner(target.id()) {
            return Ok(false);
        }

        self.is_above(guild, moderator, target).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use test_case::test_case;

    use super::*;
    use crate::application::resolver::Resolver;
    use crate::domain::errors::RemoteError;
    use crate::domain::ports::mocks::MockRemotePort;
    use crate::testing;

    fn service() -> ModerationService {
        service_with(MockRemotePort::new())
    }

    fn service_with(remote: MockRemotePort) -> ModerationService {
        let resolver = Resolver::new(testing::populated_cache(), Arc::new(remote));
        ModerationService::new(PermissionService::new(resolver))
    }

    #[test_case(5, 2, true ; "admin above mod")]
    #[test_case(2, 3, true ; "mod above helper")]
    #[test_case(2, 6, false ; "equal positions")]
    #[test_case(3, 2, false ; "helper below mod")]
    #[test_case(1, 4, false ; "owner without roles")]
    #[tokio::test]
    async fn test_is_above_members(first: u64, second: u64, expected: bool) {
        let result = service()
            .is_above(100, Ranked::member(first), Ranked::member(second))
            .await;

        assert_eq!(result, Ok(expected));
    }

    #[tokio::test]
    async fn test_is_above_mixes_roles_and_members() {
        let service = service();
        let helper_role = testing::role(11, 100, 3, Permissions::empty());

        assert_eq!(service.is_above(100, Ranked::role(12), Ranked::member(2)).await, Ok(true));
        assert_eq!(service.is_above(100, &helper_role, Ranked::member(2)).await, Ok(false));
        assert_eq!(service.is_above(100, Ranked::member(3), Ranked::role(13)).await, Ok(true));
    }

    #[tokio::test]
    async fn test_is_above_missing_role() {
        let mut remote = MockRemotePort::new();
        remote.expect_fetch_roles().returning(|_| Err(RemoteError::NotFound));

        let result = service_with(remote)
            .is_above(100, Ranked::role(999), Ranked::member(2))
            .await;

        assert_eq!(result, Err(ResolveError::RoleNotFound));
    }

    #[tokio::test]
    async fn test_is_above_missing_member() {
        let mut remote = MockRemotePort::new();
        remote
            .expect_fetch_member()
            .returning(|_, _| Err(RemoteError::NotFound));

        let result = service_with(remote)
            .is_above(100, Ranked::member(999), Ranked::member(2))
            .await;

        assert_eq!(result, Err(ResolveError::MemberNotFound));
    }

    #[test_case(1, 4, true ; "owner without kick flag")]
    #[test_case(2, 4, true ; "mod above plain member")]
    #[test_case(6, 4, true ; "kick-only mod")]
    #[test_case(2, 2, false ; "self target")]
    #[test_case(4, 3, false ; "no capability")]
    #[test_case(2, 1, false ; "target is owner")]
    #[test_case(2, 6, false ; "same position")]
    #[test_case(5, 2, true ; "administrator")]
    #[tokio::test]
    async fn test_can_kick(moderator: u64, target: u64, expected: bool) {
        assert_eq!(service().can_kick(100, moderator, target).await, Ok(expected));
    }

    #[test_case(1, 4, true ; "owner")]
    #[test_case(2, 2, false ; "self target")]
    #[test_case(2, 3, true ; "mod above helper")]
    #[test_case(6, 4, false ; "kick-only mod cannot ban")]
    #[test_case(5, 1, false ; "admin cannot ban owner")]
    #[tokio::test]
    async fn test_can_ban(moderator: u64, target: u64, expected: bool) {
        assert_eq!(service().can_ban(100, moderator, target).await, Ok(expected));
    }

    #[test_case(3, 4, true ; "helper above plain member")]
    #[test_case(2, 3, true ; "mod above helper")]
    #[test_case(3, 5, false ; "target is admin")]
    #[test_case(2, 1, false ; "target is owner")]
    #[test_case(4, 3, false ; "no capability")]
    #[test_case(3, 2, false ; "helper below mod")]
    #[test_case(1, 4, false ; "owner still needs rank")]
    #[test_case(5, 2, true ; "administrator")]
    #[tokio::test]
    async fn test_can_timeout(moderator: u64, target: u64, expected: bool) {
        assert_eq!(service().can_timeout(100, moderator, target).await, Ok(expected));
    }

    #[tokio::test]
    async fn test_can_moderate_with_custom_flag() {
        let service = service();

        let manage = service
            .can_moderate(100, 2, 4, Permissions::MANAGE_NICKNAMES)
            .await;
        let kick = service.can_moderate(100, 2, 4, Permissions::KICK_MEMBERS).await;

        assert_eq!(manage, Ok(false));
        assert_eq!(kick, Ok(true));
    }

    #[tokio::test]
    async fn test_live_members_are_accepted() {
        let service = service();
        let moderator = testing::member(100, 2, &[10, 13]);
        let target = testing::member(100, 4, &[]);

        assert_eq!(service.can_kick(100, &moderator, &target).await, Ok(true));
    }

    #[tokio::test]
    async fn test_unknown_guild_is_mandatory() {
        let mut remote = MockRemotePort::new();
        remote.expect_fetch_guild().returning(|_| Err(RemoteError::NotFound));

        let result = service_with(remote).can_ban(555, 2, 4).await;

        assert_eq!(result, Err(ResolveError::GuildNotFound));
    }
}
