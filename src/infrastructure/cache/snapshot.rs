use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::entities::{
    Channel, ChannelId, CustomEmoji, EmojiId, Guild, GuildId, Member, Role, RoleId, User, UserId,
};
use crate::domain::ports::CachePort;

/// In-memory snapshot of gateway state.
///
/// Writes belong to the gateway session that owns the snapshot; the
/// resolution layer only reads through [`CachePort`]. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct SnapshotCache {
    inner: Arc<RwLock<SnapshotInner>>,
}

#[derive(Debug, Default)]
struct SnapshotInner {
    guilds: HashMap<GuildId, Guild>,
    users: HashMap<UserId, User>,
    members: HashMap<GuildId, HashMap<UserId, Member>>,
    channels: HashMap<ChannelId, Channel>,
    roles: HashMap<RoleId, Role>,
    emojis: HashMap<EmojiId, CustomEmoji>,
}

impl SnapshotCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_guild(&self, guild: Guild) {
        self.inner.write().guilds.insert(guild.id(), guild);
    }

    pub fn insert_user(&self, user: User) {
        self.inner.write().users.insert(user.id(), user);
    }

    /// Stores a member and its user.
    pub fn insert_member(&self, member: Member) {
        let mut inner = self.inner.write();
        inner.users.insert(member.user_id(), member.user.clone());
        inner
            .members
            .entry(member.guild_id())
            .or_default()
            .insert(member.user_id(), member);
    }

    pub fn insert_channel(&self, channel: Channel) {
        self.inner.write().channels.insert(channel.id(), channel);
    }

    pub fn insert_role(&self, role: Role) {
        self.inner.write().roles.insert(role.id, role);
    }

    pub fn insert_emoji(&self, emoji: CustomEmoji) {
        self.inner.write().emojis.insert(emoji.id, emoji);
    }

    /// Drops a guild together with its members, channels and roles.
    pub fn remove_guild(&self, guild_id: GuildId) {
        let mut inner = self.inner.write();
        inner.guilds.remove(&guild_id);
        inner.members.remove(&guild_id);
        inner
            .channels
            .retain(|_, channel| channel.guild_id() != Some(guild_id));
        inner.roles.retain(|_, role| role.guild_id != guild_id);
        inner
            .emojis
            .retain(|_, emoji| emoji.guild_id != Some(guild_id));
    }

    pub fn remove_member(&self, guild_id: GuildId, user_id: UserId) {
        if let Some(members) = self.inner.write().members.get_mut(&guild_id) {
            members.remove(&user_id);
        }
    }

    pub fn remove_channel(&self, channel_id: ChannelId) {
        self.inner.write().channels.remove(&channel_id);
    }

    pub fn remove_role(&self, role_id: RoleId) {
        self.inner.write().roles.remove(&role_id);
    }

    pub fn clear(&self) {
        *self.inner.write() = SnapshotInner::default();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        let inner = self.inner.read();
        inner.guilds.is_empty() && inner.users.is_empty() && inner.channels.is_empty()
    }
}

impl CachePort for SnapshotCache {
    fn guild(&self, guild_id: GuildId) -> Option<Guild> {
        self.inner.read().guilds.get(&guild_id).cloned()
    }

    fn user(&self, user_id: UserId) -> Option<User> {
        self.inner.read().users.get(&user_id).cloned()
    }

    fn member(&self, guild_id: GuildId, user_id: UserId) -> Option<Member> {
        self.inner
            .read()
            .members
            .get(&guild_id)
            .and_then(|members| members.get(&user_id))
            .cloned()
    }

    fn members(&self, guild_id: GuildId) -> Vec<Member> {
        let mut members: Vec<Member> = self
            .inner
            .read()
            .members
            .get(&guild_id)
            .map(|members| members.values().cloned().collect())
            .unwrap_or_default();
        members.sort_by_key(Member::user_id);
        members
    }

    fn channel(&self, channel_id: ChannelId) -> Option<Channel> {
        self.inner.read().channels.get(&channel_id).cloned()
    }

    fn channels(&self, guild_id: GuildId) -> Vec<Channel> {
        let mut channels: Vec<Channel> = self
            .inner
            .read()
            .channels
            .values()
            .filter(|channel| channel.guild_id() == Some(guild_id))
            .cloned()
            .collect();
        channels.sort_by_key(Channel::id);
        channels
    }

    fn role(&self, role_id: RoleId) -> Option<Role> {
        self.inner.read().roles.get(&role_id).cloned()
    }

    fn roles(&self, guild_id: GuildId) -> Vec<Role> {
        let mut roles: Vec<Role> = self
            .inner
            .read()
            .roles
            .values()
            .filter(|role| role.guild_id == guild_id)
            .cloned()
            .collect();
        roles.sort_by(|a, b| a.position.cmp(&b.position).then(a.id.cmp(&b.id)));
        roles
    }

    fn emoji(&self, emoji_id: EmojiId) -> Option<CustomEmoji> {
        self.inner.read().emojis.get(&emoji_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn test_member_insert_also_caches_user() {
        let cache = SnapshotCache::new();
        cache.insert_member(testing::member(1, 2, &[]));

        assert!(cache.member(GuildId(1), UserId(2)).is_some());
        assert!(cache.user(UserId(2)).is_some());
        assert!(cache.member(GuildId(9), UserId(2)).is_none());
    }

    #[test]
    fn test_collections_are_scoped_by_guild() {
        let cache = SnapshotCache::new();
        cache.insert_channel(testing::text_channel(10, 1));
        cache.insert_channel(testing::text_channel(11, 2));
        cache.insert_role(testing::role(1, 1, 0, crate::domain::Permissions::empty()));
        cache.insert_role(testing::role(2, 2, 0, crate::domain::Permissions::empty()));

        assert_eq!(cache.channels(GuildId(1)).len(), 1);
        assert_eq!(cache.roles(GuildId(2)).len(), 1);
        assert!(cache.members(GuildId(1)).is_empty());
    }

    #[test]
    fn test_remove_guild_drops_children() {
        let cache = testing::populated_cache();

        cache.remove_guild(GuildId(100));

        assert!(cache.guild(GuildId(100)).is_none());
        assert!(cache.roles(GuildId(100)).is_empty());
        assert!(cache.channels(GuildId(100)).is_empty());
        assert!(cache.members(GuildId(100)).is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        use std::thread;

        let cache = SnapshotCache::new();
        let writer = cache.clone();

        let handle = thread::spawn(move || {
            writer.insert_user(testing::user(3));
        });

        handle.join().unwrap();
        assert!(cache.user(UserId(3)).is_some());
    }
}
