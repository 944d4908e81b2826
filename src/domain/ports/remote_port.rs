//! Remote API port definition.

use async_trait::async_trait;

use crate::domain::entities::{
    Ban, Channel, ChannelId, CustomEmoji, EmojiId, Guild, GuildId, Member, Role, User, UserId,
};
use crate::domain::errors::RemoteError;

/// Port for fetching entities from the platform API.
///
/// Implementations report a confirmed absence as [`RemoteError::NotFound`]
/// and every other failure as [`RemoteError::Transport`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemotePort: Send + Sync {
    /// Fetches a guild.
    async fn fetch_guild(&self, guild_id: GuildId) -> Result<Guild, RemoteError>;

    /// Fetches a user.
    async fn fetch_user(&self, user_id: UserId) -> Result<User, RemoteError>;

    /// Fetches a member of a guild.
    async fn fetch_member(&self, guild_id: GuildId, user_id: UserId)
    -> Result<Member, RemoteError>;

    /// Fetches all members of a guild.
    async fn fetch_members(&self, guild_id: GuildId) -> Result<Vec<Member>, RemoteError>;

    /// Fetches any channel.
    async fn fetch_channel(&self, channel_id: ChannelId) -> Result<Channel, RemoteError>;

    /// Fetches all channels of a guild.
    async fn fetch_guild_channels(&self, guild_id: GuildId) -> Result<Vec<Channel>, RemoteError>;

    /// Fetches all roles of a guild.
    async fn fetch_roles(&self, guild_id: GuildId) -> Result<Vec<Role>, RemoteError>;

    /// Fetches a custom emoji owned by a guild.
    async fn fetch_emoji(
        &self,
        guild_id: GuildId,
        emoji_id: EmojiId,
    ) -> Result<CustomEmoji, RemoteError>;

    /// Fetches the ban of a user in a guild.
    async fn fetch_ban(&self, guild_id: GuildId, user_id: UserId) -> Result<Ban, RemoteError>;
}
