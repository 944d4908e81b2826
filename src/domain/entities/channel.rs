//! Discord channel entity.
//!
//! Channels are a closed set of variants. Guild channels carry permission
//! overwrites, threads borrow theirs from the parent channel, private
//! channels have none.

use serde::{Deserialize, Serialize};

use super::{GuildId, Identify, Permissions, RoleId, Snowflake, UserId};

/// Unique identifier for a Discord channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(#[serde(with = "crate::domain::serde_utils::string_to_u64")] pub u64);

impl ChannelId {
    /// Returns the underlying u64 value.
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl Snowflake for ChannelId {
    fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ChannelId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<&str> for ChannelId {
    fn from(value: &str) -> Self {
        Self(value.parse().unwrap_or(0))
    }
}

/// Discord channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ChannelKind {
    /// Text channel.
    #[default]
    Text = 0,
    /// Direct message channel.
    Dm = 1,
    /// Voice channel.
    Voice = 2,
    /// Group direct message channel.
    GroupDm = 3,
    /// Category channel.
    Category = 4,
    /// Announcement channel.
    Announcement = 5,
    /// Announcement thread channel.
    AnnouncementThread = 10,
    /// Public thread channel.
    PublicThread = 11,
    /// Private thread channel.
    PrivateThread = 12,
    /// Stage voice channel.
    StageVoice = 13,
    /// Directory channel.
    Directory = 14,
    /// Forum channel.
    Forum = 15,
    /// Media channel.
    Media = 16,
}

impl ChannelKind {
    /// Returns true if this channel type supports text messages.
    #[must_use]
    pub fn is_text_based(self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::Dm
                | Self::GroupDm
                | Self::Announcement
                | Self::AnnouncementThread
                | Self::PublicThread
                | Self::PrivateThread
                | Self::Voice
                | Self::StageVoice
        )
    }

    /// Returns true if this is a category channel.
    #[must_use]
    pub fn is_category(self) -> bool {
        matches!(self, Self::Category)
    }

    /// Returns true if this is a voice channel.
    #[must_use]
    pub fn is_voice(self) -> bool {
        matches!(self, Self::Voice | Self::StageVoice)
    }

    /// Returns true if this is a thread.
    #[must_use]
    pub fn is_thread(self) -> bool {
        matches!(
            self,
            Self::AnnouncementThread | Self::PublicThread | Self::PrivateThread
        )
    }

    /// Returns true if this channel hosts forum-style posts.
    #[must_use]
    pub fn is_forum(self) -> bool {
        matches!(self, Self::Forum | Self::Media)
    }

    /// Returns true if this is a direct or group direct message channel.
    #[must_use]
    pub fn is_private(self) -> bool {
        matches!(self, Self::Dm | Self::GroupDm)
    }
}

impl From<u8> for ChannelKind {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Dm,
            2 => Self::Voice,
            3 => Self::GroupDm,
            4 => Self::Category,
            5 => Self::Announcement,
            10 => Self::AnnouncementThread,
            11 => Self::PublicThread,
            12 => Self::PrivateThread,
            13 => Self::StageVoice,
            14 => Self::Directory,
            15 => Self::Forum,
            16 => Self::Media,
            _ => Self::Text,
        }
    }
}

/// Target of a permission overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OverwriteType {
    Role = 0,
    Member = 1,
}

/// Channel-level deny/allow pair for one role or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionOverwrite {
    #[serde(with = "crate::domain::serde_utils::string_to_u64")]
    pub id: u64,
    pub kind: OverwriteType,
    pub allow: Permissions,
    pub deny: Permissions,
}

impl PermissionOverwrite {
    #[must_use]
    pub fn role(role_id: RoleId, allow: Permissions, deny: Permissions) -> Self {
        Self {
            id: role_id.as_u64(),
            kind: OverwriteType::Role,
            allow,
            deny,
        }
    }

    #[must_use]
    pub fn member(user_id: UserId, allow: Permissions, deny: Permissions) -> Self {
        Self {
            id: user_id.as_u64(),
            kind: OverwriteType::Member,
            allow,
            deny,
        }
    }

    #[must_use]
    pub fn targets_role(&self, role_id: RoleId) -> bool {
        self.kind == OverwriteType::Role && self.id == role_id.as_u64()
    }

    #[must_use]
    pub fn targets_member(&self, user_id: UserId) -> bool {
        self.kind == OverwriteType::Member && self.id == user_id.as_u64()
    }
}

/// Channels that carry their own permission overwrites.
pub trait Permissible {
    /// All overwrites set on the channel.
    fn overwrites(&self) -> &[PermissionOverwrite];

    /// Overwrite for a role, if one is set.
    fn role_overwrite(&self, role_id: RoleId) -> Option<&PermissionOverwrite> {
        self.overwrites().iter().find(|o| o.targets_role(role_id))
    }

    /// Overwrite for a single member, if one is set.
    fn member_overwrite(&self, user_id: UserId) -> Option<&PermissionOverwrite> {
        self.overwrites().iter().find(|o| o.targets_member(user_id))
    }
}

/// Non-thread channel inside a guild.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuildChannel {
    pub id: ChannelId,
    pub guild_id: GuildId,
    pub name: String,
    pub kind: ChannelKind,
    #[serde(default)]
    pub parent_id: Option<ChannelId>,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub overwrites: Vec<PermissionOverwrite>,
}

impl GuildChannel {
    #[must_use]
    pub fn new(
        id: impl Into<ChannelId>,
        guild_id: impl Into<GuildId>,
        name: impl Into<String>,
        kind: ChannelKind,
    ) -> Self {
        Self {
            id: id.into(),
            guild_id: guild_id.into(),
            name: name.into(),
            kind,
            parent_id: None,
            position: 0,
            topic: None,
            overwrites: Vec::new(),
        }
    }

    /// Sets the parent category ID for this channel.
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<ChannelId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Adds a permission overwrite.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: PermissionOverwrite) -> Self {
        self.overwrites.push(overwrite);
        self
    }
}

impl Permissible for GuildChannel {
    fn overwrites(&self) -> &[PermissionOverwrite] {
        &self.overwrites
    }
}

/// Thread inside a guild; permissions come from `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThreadChannel {
    pub id: ChannelId,
    pub guild_id: GuildId,
    pub name: String,
    pub kind: ChannelKind,
    pub parent_id: ChannelId,
    #[serde(default)]
    pub owner_id: Option<UserId>,
    #[serde(default)]
    pub archived: bool,
}

impl ThreadChannel {
    #[must_use]
    pub fn new(
        id: impl Into<ChannelId>,
        guild_id: impl Into<GuildId>,
        parent_id: impl Into<ChannelId>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            guild_id: guild_id.into(),
            name: name.into(),
            kind: ChannelKind::PublicThread,
            parent_id: parent_id.into(),
            owner_id: None,
            archived: false,
        }
    }

    #[must_use]
    pub const fn private(mut self) -> Self {
        self.kind = ChannelKind::PrivateThread;
        self
    }
}

/// Direct or group message channel outside any guild.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrivateChannel {
    pub id: ChannelId,
    pub kind: ChannelKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub recipients: Vec<UserId>,
}

impl PrivateChannel {
    /// One-to-one direct message channel.
    #[must_use]
    pub fn direct(id: impl Into<ChannelId>, recipient: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            kind: ChannelKind::Dm,
            name: None,
            recipients: vec![recipient.into()],
        }
    }
}

/// Any Discord channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Channel {
    Guild(GuildChannel),
    Thread(ThreadChannel),
    Private(PrivateChannel),
}

impl Channel {
    /// Returns the channel ID.
    #[must_use]
    pub fn id(&self) -> ChannelId {
        match self {
            Self::Guild(c) => c.id,
            Self::Thread(c) => c.id,
            Self::Private(c) => c.id,
        }
    }

    /// Returns the channel type.
    #[must_use]
    pub fn kind(&self) -> ChannelKind {
        match self {
            Self::Guild(c) => c.kind,
            Self::Thread(c) => c.kind,
            Self::Private(c) => c.kind,
        }
    }

    /// Returns the guild ID, if this is a guild channel.
    #[must_use]
    pub fn guild_id(&self) -> Option<GuildId> {
        match self {
            Self::Guild(c) => Some(c.guild_id),
            Self::Thread(c) => Some(c.guild_id),
            Self::Private(_) => None,
        }
    }

    /// Returns the channel name, if it has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Guild(c) => Some(&c.name),
            Self::Thread(c) => Some(&c.name),
            Self::Private(c) => c.name.as_deref(),
        }
    }

    /// Returns the channel that owns the permission overwrites for this one.
    ///
    /// Threads defer to their parent; private channels have no owner.
    #[must_use]
    pub fn overwrite_source(&self) -> Option<ChannelId> {
        match self {
            Self::Guild(c) => Some(c.id),
            Self::Thread(c) => Some(c.parent_id),
            Self::Private(_) => None,
        }
    }

    #[must_use]
    pub fn as_permissible(&self) -> Option<&GuildChannel> {
        match self {
            Self::Guild(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_thread(&self) -> Option<&ThreadChannel> {
        match self {
            Self::Thread(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_textable(&self) -> bool {
        self.kind().is_text_based()
    }
}

impl Identify for Channel {
    type Id = ChannelId;

    fn identify(&self) -> ChannelId {
        self.id()
    }
}

impl From<GuildChannel> for Channel {
    fn from(channel: GuildChannel) -> Self {
        Self::Guild(channel)
    }
}

impl From<ThreadChannel> for Channel {
    fn from(channel: ThreadChannel) -> Self {
        Self::Thread(channel)
    }
}

impl From<PrivateChannel> for Channel {
    fn from(channel: PrivateChannel) -> Self {
        Self::Private(channel)
    }
}
