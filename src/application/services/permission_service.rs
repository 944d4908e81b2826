//! Effective permission lookup over resolved entities.

use tracing::trace;

use crate::application::resolver::{ChannelFilter, Required, Resolution, Resolver};
use crate::domain::entities::{Channel, EntityRef, Guild, GuildChannel, Member, Permissions, Role};
use crate::domain::errors::{ResolveError, ResolveResult};
use crate::domain::services::PermissionCalculator;
use crate::domain::strategy::Strategy;

/// Computes a member's permissions, resolving everything it needs with
/// mandatory lookups.
#[derive(Debug, Clone)]
pub struct PermissionService {
    resolver: Resolver,
    strategy: Strategy,
}

impl PermissionService {
    /// Uses the best strategy the resolver's client supports.
    #[must_use]
    pub fn new(resolver: Resolver) -> Self {
        let strategy = resolver.preferred_strategy();
        Self { resolver, strategy }
    }

    /// # Errors
    /// Returns [`ResolveError::InvalidClientMode`] if the client cannot serve
    /// `strategy`.
    pub fn with_strategy(resolver: Resolver, strategy: Strategy) -> ResolveResult<Self> {
        resolver.with_strategy(strategy)?;
        Ok(Self { resolver, strategy })
    }

    #[must_use]
    pub const fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Resolution view bound to this service's strategy.
    ///
    /// # Errors
    /// Returns [`ResolveError::InvalidClientMode`] if the client cannot serve
    /// the strategy.
    pub fn resolution(&self) -> ResolveResult<Resolution<'_>> {
        self.resolver.with_strategy(self.strategy)
    }

    /// Guild-wide permissions of a member.
    ///
    /// # Errors
    /// Returns a not-found error when the member or the guild's roles cannot
    /// be resolved, and transport failures as-is.
    pub async fn guild_permissions(
        &self,
        guild: impl Into<EntityRef<'_, Guild>>,
        member: impl Into<EntityRef<'_, Member>>,
    ) -> ResolveResult<Permissions> {
        self.compute(guild.into(), member.into(), None).await
    }

    /// Permissions of a member in a channel, after overwrites. A thread uses
    /// its parent channel's overwrites.
    ///
    /// # Errors
    /// Returns a not-found error when the member, the guild's roles or the
    /// channel owning the overwrites cannot be resolved. Private channels
    /// have no guild permissions and report [`ResolveError::ChannelNotFound`].
    pub async fn channel_permissions(
        &self,
        guild: impl Into<EntityRef<'_, Guild>>,
        member: impl Into<EntityRef<'_, Member>>,
        channel: impl Into<EntityRef<'_, Channel>>,
    ) -> ResolveResult<Permissions> {
        self.compute(guild.into(), member.into(), Some(channel.into()))
            .await
    }

    async fn compute(
        &self,
        guild: EntityRef<'_, Guild>,
        member: EntityRef<'_, Member>,
        channel: Option<EntityRef<'_, Channel>>,
    ) -> ResolveResult<Permissions> {
        let resolution = self.resolution()?;

        let member = resolution.member_in(guild, member).await.required()?;
        let roles = resolution.roles(member.guild_id()).await.required()?;

        let everyone_id = member.guild_id().everyone_role();
        let everyone = roles
            .iter()
            .find(|role| role.id == everyone_id)
            .ok_or(ResolveError::RoleNotFound)?;
        let member_roles: Vec<Role> = roles
            .iter()
            .filter(|role| role.id != everyone_id && member.roles().contains(&role.id))
            .cloned()
            .collect();

        let permissions = PermissionCalculator::guild_permissions(everyone, &member_roles);

        let Some(channel) = channel else {
            return Ok(permissions);
        };
        if permissions.is_administrator() {
            trace!(user_id = %member.user_id(), "administrator, skipping channel lookup");
            return Ok(permissions);
        }

        let channel = overwrite_owner(&resolution, channel).await?;

        Ok(PermissionCalculator::channel_permissions(
            permissions,
            everyone,
            &member,
            &member_roles,
            &channel,
        ))
    }
}

/// Resolves the guild channel whose overwrites apply to `channel`.
async fn overwrite_owner(
    resolution: &Resolution<'_>,
    channel: EntityRef<'_, Channel>,
) -> ResolveResult<GuildChannel> {
    let parent = match resolution.channel(channel).await.required()? {
        Channel::Guild(channel) => return Ok(channel),
        Channel::Thread(thread) => thread.parent_id,
        Channel::Private(_) => return Err(ResolveError::ChannelNotFound),
    };

    match resolution
        .channel_of(parent, ChannelFilter::Permissible)
        .await
        .required()?
    {
        Channel::Guild(channel) => Ok(channel),
        Channel::Thread(_) | Channel::Private(_) => Err(ResolveError::ChannelNotFound),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::entities::{
        ChannelKind, PermissionOverwrite, PrivateChannel, RoleId, UserId,
    };
    use crate::domain::errors::{RemoteError, TransportError};
    use crate::domain::ports::mocks::MockRemotePort;
    use crate::infrastructure::cache::SnapshotCache;
    use crate::testing;

    fn service(cache: Arc<SnapshotCache>) -> PermissionService {
        service_with(cache, MockRemotePort::new())
    }

    fn service_with(cache: Arc<SnapshotCache>, remote: MockRemotePort) -> PermissionService {
        PermissionService::new(Resolver::new(cache, Arc::new(remote)))
    }

    fn absent_remote() -> MockRemotePort {
        let mut remote = MockRemotePort::new();
        remote
            .expect_fetch_channel()
            .returning(|_| Err(RemoteError::NotFound));
        remote
            .expect_fetch_member()
            .returning(|_, _| Err(RemoteError::NotFound));
        remote
    }

    /// Channel 300: `@everyone` may send, role 10 may not, member 3 may not
    /// view. Thread 301 sits under it.
    fn cache_with_overwrites() -> Arc<SnapshotCache> {
        let cache = testing::populated_cache();
        let channel = GuildChannel::new(300_u64, 100_u64, "rules", ChannelKind::Text)
            .with_overwrite(PermissionOverwrite::role(
                RoleId(100),
                Permissions::SEND_MESSAGES,
                Permissions::empty(),
            ))
            .with_overwrite(PermissionOverwrite::role(
                RoleId(10),
                Permissions::empty(),
                Permissions::SEND_MESSAGES,
            ))
            .with_overwrite(PermissionOverwrite::member(
                UserId(3),
                Permissions::empty(),
                Permissions::VIEW_CHANNEL,
            ));
        cache.insert_channel(channel.into());
        cache.insert_channel(testing::thread(301, 100, 300));
        cache
    }

    #[tokio::test]
    async fn test_guild_permissions_union_roles() {
        let service = service(testing::populated_cache());

        let permissions = service.guild_permissions(100, 2).await.unwrap();

        assert_eq!(
            permissions,
            Permissions::VIEW_CHANNEL
                | Permissions::SEND_MESSAGES
                | Permissions::KICK_MEMBERS
                | Permissions::BAN_MEMBERS
                | Permissions::MODERATE_MEMBERS
        );
    }

    #[tokio::test]
    async fn test_administrator_gets_everything() {
        let service = service(cache_with_overwrites());

        let guild_wide = service.guild_permissions(100, 5).await.unwrap();
        let in_channel = service.channel_permissions(100, 5, 300).await.unwrap();

        assert_eq!(guild_wide, Permissions::all());
        assert_eq!(in_channel, Permissions::all());
    }

    #[tokio::test]
    async fn test_administrator_skips_channel_lookup() {
        let service = service(testing::populated_cache());

        let permissions = service.channel_permissions(100, 5, 999).await.unwrap();

        assert_eq!(permissions, Permissions::all());
    }

    #[tokio::test]
    async fn test_channel_without_overwrites_keeps_base() {
        let service = service(testing::populated_cache());

        let permissions = service.channel_permissions(100, 4, 200).await.unwrap();

        assert_eq!(permissions, Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES);
    }

    #[tokio::test]
    async fn test_default_role_allow_beats_role_deny() {
        let service = service(cache_with_overwrites());

        let permissions = service.channel_permissions(100, 2, 300).await.unwrap();

        assert!(permissions.contains(Permissions::SEND_MESSAGES));
    }

    #[tokio::test]
    async fn test_member_overwrite_applies_last() {
        let service = service(cache_with_overwrites());

        let permissions = service.channel_permissions(100, 3, 300).await.unwrap();

        assert!(!permissions.contains(Permissions::VIEW_CHANNEL));
        assert!(permissions.contains(Permissions::MODERATE_MEMBERS));
    }

    #[tokio::test]
    async fn test_thread_uses_parent_overwrites() {
        let service = service(cache_with_overwrites());

        let parent = service.channel_permissions(100, 3, 300).await.unwrap();
        let thread = service.channel_permissions(100, 3, 301).await.unwrap();

        assert_eq!(thread, parent);
    }

    #[tokio::test]
    async fn test_orphan_thread_reports_missing_channel() {
        let cache = testing::populated_cache();
        cache.insert_channel(testing::thread(302, 100, 999));
        let service = service_with(cache, absent_remote());

        let result = service.channel_permissions(100, 2, 302).await;

        assert_eq!(result, Err(ResolveError::ChannelNotFound));
    }

    #[tokio::test]
    async fn test_private_channel_has_no_guild_permissions() {
        let cache = testing::populated_cache();
        cache.insert_channel(PrivateChannel::direct(400_u64, 2_u64).into());
        let service = service(cache);

        let result = service.channel_permissions(100, 2, 400).await;

        assert_eq!(result, Err(ResolveError::ChannelNotFound));
    }

    #[tokio::test]
    async fn test_missing_member_is_mandatory() {
        let service = service_with(testing::populated_cache(), absent_remote());

        let result = service.guild_permissions(100, 999).await;

        assert_eq!(result, Err(ResolveError::MemberNotFound));
    }

    #[tokio::test]
    async fn test_missing_default_role_is_role_not_found() {
        let cache = testing::populated_cache();
        cache.remove_role(RoleId(100));
        let service = service(cache);

        let result = service.guild_permissions(100, 2).await;

        assert_eq!(result, Err(ResolveError::RoleNotFound));
    }

    #[tokio::test]
    async fn test_rest_only_client_fetches_remotely() {
        let mut remote = MockRemotePort::new();
        remote
            .expect_fetch_member()
            .times(1)
            .returning(|guild_id, user_id| {
                Ok(testing::member(guild_id.as_u64(), user_id.as_u64(), &[1]))
            });
        remote.expect_fetch_roles().times(1).returning(|guild_id| {
            let guild_id = guild_id.as_u64();
            Ok(vec![
                testing::role(guild_id, guild_id, 0, Permissions::VIEW_CHANNEL),
                testing::role(1, guild_id, 1, Permissions::SEND_MESSAGES),
            ])
        });
        let service = PermissionService::new(Resolver::rest_only(Arc::new(remote)));

        let permissions = service.guild_permissions(50, 7).await.unwrap();

        assert_eq!(service.strategy(), Strategy::RemoteOnly);
        assert_eq!(permissions, Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES);
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let mut remote = MockRemotePort::new();
        remote
            .expect_fetch_member()
            .returning(|_, _| Err(TransportError::RateLimited { retry_after_ms: 5 }.into()));
        let service = PermissionService::new(Resolver::rest_only(Arc::new(remote)));

        let result = service.guild_permissions(50, 7).await;

        assert_eq!(
            result,
            Err(ResolveError::Transport(TransportError::RateLimited {
                retry_after_ms: 5
            }))
        );
    }

    #[test]
    fn test_cache_strategy_on_rest_client_is_rejected() {
        let resolver = Resolver::rest_only(Arc::new(MockRemotePort::new()));

        let result = PermissionService::with_strategy(resolver, Strategy::Either);

        assert!(matches!(
            result,
            Err(ResolveError::InvalidClientMode {
                strategy: Strategy::Either
            })
        ));
    }
}
