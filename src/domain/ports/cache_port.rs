//! Local snapshot port definition.

use crate::domain::entities::{
    Channel, ChannelId, CustomEmoji, EmojiId, Guild, GuildId, Member, Role, RoleId, User, UserId,
};

/// Read-only view of the snapshot kept by a gateway session.
///
/// Lookups are synchronous and never fail; a missing entry is `None` or an
/// empty collection.
pub trait CachePort: Send + Sync {
    /// Looks up a guild.
    fn guild(&self, guild_id: GuildId) -> Option<Guild>;

    /// Looks up a user.
    fn user(&self, user_id: UserId) -> Option<User>;

    /// Looks up a member of a guild.
    fn member(&self, guild_id: GuildId, user_id: UserId) -> Option<Member>;

    /// Lists the cached members of a guild.
    fn members(&self, guild_id: GuildId) -> Vec<Member>;

    /// Looks up a guild channel or thread.
    fn channel(&self, channel_id: ChannelId) -> Option<Channel>;

    /// Lists the cached channels and threads of a guild.
    fn channels(&self, guild_id: GuildId) -> Vec<Channel>;

    /// Looks up a role by id.
    fn role(&self, role_id: RoleId) -> Option<Role>;

    /// Lists the cached roles of a guild.
    fn roles(&self, guild_id: GuildId) -> Vec<Role>;

    /// Looks up a custom emoji.
    fn emoji(&self, emoji_id: EmojiId) -> Option<CustomEmoji>;
}
