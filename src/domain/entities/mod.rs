//! Domain entity definitions.

mod ban;
mod channel;
mod emoji;
mod guild;
mod member;
mod permissions;
mod reference;
mod role;
mod token;
mod user;

pub use ban::Ban;
pub use channel::{
    Channel, ChannelId, ChannelKind, GuildChannel, OverwriteType, Permissible, PermissionOverwrite,
    PrivateChannel, ThreadChannel,
};
pub use emoji::{CustomEmoji, Emoji, EmojiId, EmojiRef, is_unicode_emoji};
pub use guild::{Guild, GuildId};
pub use member::Member;
pub use permissions::Permissions;
pub use reference::{EntityRef, Identify, Snowflake};
pub use role::{Role, RoleId, RoleTags};
pub use token::BotToken;
pub use user::{User, UserId};
