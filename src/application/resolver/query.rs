//! Per-kind lookup descriptors.
//!
//! Each query knows how to probe the snapshot and how to fetch remotely;
//! the source strategy and absence handling live in one place, the
//! resolution engine.

use async_trait::async_trait;

use super::required::Resolvable;
use crate::domain::entities::{
    Ban, Channel, ChannelId, CustomEmoji, EmojiId, Guild, GuildId, Member, Role, RoleId, User,
    UserId,
};
use crate::domain::errors::RemoteError;
use crate::domain::ports::{CachePort, RemotePort};

#[async_trait]
pub(crate) trait EntityQuery: Send + Sync {
    type Output: Resolvable + Send;

    fn cached(&self, cache: &dyn CachePort) -> Option<Self::Output>;

    async fn fetch(&self, remote: &dyn RemotePort) -> Result<Self::Output, RemoteError>;

    /// Values that count as "nothing found" even though a source answered.
    fn is_absent(_output: &Self::Output) -> bool {
        false
    }
}

pub(crate) struct GuildQuery(pub GuildId);

#[async_trait]
impl EntityQuery for GuildQuery {
    type Output = Guild;

    fn cached(&self, cache: &dyn CachePort) -> Option<Guild> {
        cache.guild(self.0)
    }

    async fn fetch(&self, remote: &dyn RemotePort) -> Result<Guild, RemoteError> {
        remote.fetch_guild(self.0).await
    }
}

pub(crate) struct UserQuery(pub UserId);

#[async_trait]
impl EntityQuery for UserQuery {
    type Output = User;

    fn cached(&self, cache: &dyn CachePort) -> Option<User> {
        cache.user(self.0)
    }

    async fn fetch(&self, remote: &dyn RemotePort) -> Result<User, RemoteError> {
        remote.fetch_user(self.0).await
    }
}

pub(crate) struct MemberQuery {
    pub guild_id: GuildId,
    pub user_id: UserId,
}

#[async_trait]
impl EntityQuery for MemberQuery {
    type Output = Member;

    fn cached(&self, cache: &dyn CachePort) -> Option<Member> {
        cache.member(self.guild_id, self.user_id)
    }

    async fn fetch(&self, remote: &dyn RemotePort) -> Result<Member, RemoteError> {
        remote.fetch_member(self.guild_id, self.user_id).await
    }
}

pub(crate) struct MembersQuery(pub GuildId);

#[async_trait]
impl EntityQuery for MembersQuery {
    type Output = Vec<Member>;

    fn cached(&self, cache: &dyn CachePort) -> Option<Vec<Member>> {
        Some(cache.members(self.0))
    }

    async fn fetch(&self, remote: &dyn RemotePort) -> Result<Vec<Member>, RemoteError> {
        remote.fetch_members(self.0).await
    }

    fn is_absent(output: &Vec<Member>) -> bool {
        output.is_empty()
    }
}

pub(crate) struct ChannelQuery(pub ChannelId);

#[async_trait]
impl EntityQuery for ChannelQuery {
    type Output = Channel;

    fn cached(&self, cache: &dyn CachePort) -> Option<Channel> {
        cache.channel(self.0)
    }

    async fn fetch(&self, remote: &dyn RemotePort) -> Result<Channel, RemoteError> {
        remote.fetch_channel(self.0).await
    }
}

pub(crate) struct ChannelsQuery(pub GuildId);

#[async_trait]
impl EntityQuery for ChannelsQuery {
    type Output = Vec<Channel>;

    fn cached(&self, cache: &dyn CachePort) -> Option<Vec<Channel>> {
        Some(cache.channels(self.0))
    }

    async fn fetch(&self, remote: &dyn RemotePort) -> Result<Vec<Channel>, RemoteError> {
        remote.fetch_guild_channels(self.0).await
    }

    fn is_absent(output: &Vec<Channel>) -> bool {
        output.is_empty()
    }
}

/// Single role; remotely served from the guild's role list since there is
/// no single-role endpoint.
pub(crate) struct RoleQuery {
    pub guild_id: GuildId,
    pub role_id: RoleId,
}

#[async_trait]
impl EntityQuery for RoleQuery {
    type Output = Role;

    fn cached(&self, cache: &dyn CachePort) -> Option<Role> {
        cache
            .role(self.role_id)
            .filter(|role| role.guild_id == self.guild_id)
    }

    async fn fetch(&self, remote: &dyn RemotePort) -> Result<Role, RemoteError> {
        remote
            .fetch_roles(self.guild_id)
            .await?
            .into_iter()
            .find(|role| role.id == self.role_id)
            .ok_or(RemoteError::NotFound)
    }
}

pub(crate) struct RolesQuery(pub GuildId);

#[async_trait]
impl EntityQuery for RolesQuery {
    type Output = Vec<Role>;

    fn cached(&self, cache: &dyn CachePort) -> Option<Vec<Role>> {
        Some(cache.roles(self.0))
    }

    async fn fetch(&self, remote: &dyn RemotePort) -> Result<Vec<Role>, RemoteError> {
        remote.fetch_roles(self.0).await
    }

    fn is_absent(output: &Vec<Role>) -> bool {
        output.is_empty()
    }
}

/// Custom emoji; only fetchable when the owning guild is known.
pub(crate) struct EmojiQuery {
    pub guild_id: Option<GuildId>,
    pub emoji_id: EmojiId,
}

#[async_trait]
impl EntityQuery for EmojiQuery {
    type Output = CustomEmoji;

    fn cached(&self, cache: &dyn CachePort) -> Option<CustomEmoji> {
        cache.emoji(self.emoji_id)
    }

    async fn fetch(&self, remote: &dyn RemotePort) -> Result<CustomEmoji, RemoteError> {
        match self.guild_id {
            Some(guild_id) => remote.fetch_emoji(guild_id, self.emoji_id).await,
            None => Err(RemoteError::NotFound),
        }
    }
}

/// Bans are never cached.
pub(crate) struct BanQuery {
    pub guild_id: GuildId,
    pub user_id: UserId,
}

#[async_trait]
impl EntityQuery for BanQuery {
    type Output = Ban;

    fn cached(&self, _cache: &dyn CachePort) -> Option<Ban> {
        None
    }

    async fn fetch(&self, remote: &dyn RemotePort) -> Result<Ban, RemoteError> {
        remote.fetch_ban(self.guild_id, self.user_id).await
    }
}
