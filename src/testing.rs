//! Test fixtures shared across modules.

use std::sync::Arc;

use crate::domain::entities::{
    Channel, ChannelKind, Guild, GuildChannel, Member, Permissions, Role, RoleId, ThreadChannel, User,
};
use crate::infrastructure::cache::SnapshotCache;

pub fn user(id: u64) -> User {
    User::new(id, format!("user{id}"), "0", None, false)
}

pub fn guild(id: u64, owner: u64) -> Guild {
    Guild::new(id, format!("guild{id}"), owner)
}

pub fn role(id: u64, guild_id: u64, position: i32, permissions: Permissions) -> Role {
    Role::new(id, guild_id, format!("role{id}"), position, permissions)
}

pub fn member(guild_id: u64, user_id: u64, roles: &[u64]) -> Member {
    Member::new(guild_id, user(user_id)).with_roles(roles.iter().copied().map(RoleId))
}

pub fn text_channel(id: u64, guild_id: u64) -> Channel {
    GuildChannel::new(id, guild_id, format!("text{id}"), ChannelKind::Text).into()
}

pub fn voice_channel(id: u64, guild_id: u64) -> Channel {
    GuildChannel::new(id, guild_id, format!("voice{id}"), ChannelKind::Voice).into()
}

pub fn thread(id: u64, guild_id: u64, parent_id: u64) -> Channel {
    ThreadChannel::new(id, guild_id, parent_id, format!("thread{id}")).into()
}

/// Guild 100 owned by user 1.
///
/// Roles: `@everyone` (pos 0, view+send), 10 "mod" (pos 5, kick+ban+timeout),
/// 11 "helper" (pos 3, timeout), 12 "admin" (pos 8, administrator),
/// 13 "booster" (pos 1, booster marker), 14 "kicker" (pos 5, kick).
/// Members: 1 owner (no roles), 2 mod, 3 helper, 4 plain, 5 admin,
/// 6 second mod (same position as 2).
pub fn populated_cache() -> Arc<SnapshotCache> {
    let cache = SnapshotCache::new();

    cache.insert_guild(guild(100, 1));
    cache.insert_role(role(
        100,
        100,
        0,
        Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES,
    ));
    cache.insert_role(role(
        10,
        100,
        5,
        Permissions::KICK_MEMBERS | Permissions::BAN_MEMBERS | Permissions::MODERATE_MEMBERS,
    ));
    cache.insert_role(role(11, 100, 3, Permissions::MODERATE_MEMBERS));
    cache.insert_role(role(12, 100, 8, Permissions::ADMINISTRATOR));
    cache.insert_role(role(13, 100, 1, Permissions::empty()).as_premium_subscriber());
    cache.insert_role(role(14, 100, 5, Permissions::KICK_MEMBERS));

    cache.insert_member(member(100, 1, &[]));
    cache.insert_member(member(100, 2, &[10, 13]).with_premium_since(chrono::Utc::now()));
    cache.insert_member(member(100, 3, &[11]));
    cache.insert_member(member(100, 4, &[]));
    cache.insert_member(member(100, 5, &[12]));
    cache.insert_member(member(100, 6, &[14]));

    cache.insert_channel(text_channel(200, 100));
    cache.insert_channel(voice_channel(201, 100));
    cache.insert_channel(thread(202, 100, 200));

    Arc::new(cache)
}
