//! Discord REST wire formats and their conversion into entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::domain::entities::{
    Ban, Channel, ChannelKind, CustomEmoji, Guild, GuildChannel, GuildId, Member,
    OverwriteType, PermissionOverwrite, Permissions, PrivateChannel, Role, RoleId, RoleTags,
    ThreadChannel, User, UserId,
};
use crate::domain::errors::TransportError;
use crate::domain::serde_utils::{string_to_u64, vec_string_to_u64};

/// Discord API error response structure.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error message from Discord.
    pub message: String,
    #[serde(default)]
    pub code: u32,
}

/// Body of a 429 response.
#[derive(Debug, Deserialize)]
pub struct RateLimitResponse {
    /// Seconds until the bucket resets.
    pub retry_after: f64,
}

#[derive(Debug, Deserialize)]
pub struct GuildResponse {
    #[serde(with = "string_to_u64")]
    pub id: u64,
    pub name: String,
    pub icon: Option<String>,
    #[serde(with = "string_to_u64")]
    pub owner_id: u64,
    #[serde(default)]
    pub premium_subscription_count: Option<u32>,
}

impl From<GuildResponse> for Guild {
    fn from(dto: GuildResponse) -> Self {
        let guild = Self::new(dto.id, dto.name, dto.owner_id)
            .with_premium_subscriptions(dto.premium_subscription_count.unwrap_or_default());

        match dto.icon {
            Some(icon) => guild.with_icon(icon),
            None => guild,
        }
    }
}

/// Discord API user response structure.
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    #[serde(with = "string_to_u64")]
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub discriminator: String,
    #[serde(default)]
    pub global_name: Option<String>,
    pub avatar: Option<String>,
    #[serde(default)]
    pub bot: bool,
    #[serde(default)]
    pub system: bool,
}

impl From<UserResponse> for User {
    fn from(dto: UserResponse) -> Self {
        let user = Self::new(dto.id, dto.username, dto.discriminator, dto.avatar, dto.bot)
            .with_system(dto.system);

        match dto.global_name {
            Some(name) => user.with_global_name(name),
            None => user,
        }
    }
}

/// Guild member as returned by the member endpoints; the guild is implied
/// by the route.
#[derive(Debug, Deserialize)]
pub struct MemberResponse {
    pub user: UserResponse,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default, with = "vec_string_to_u64")]
    pub roles: Vec<u64>,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub premium_since: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pending: bool,
    #[serde(default)]
    pub communication_disabled_until: Option<DateTime<Utc>>,
}

impl MemberResponse {
    pub fn into_member(self, guild_id: GuildId) -> Member {
        let mut member =
            Member::new(guild_id, self.user.into()).with_roles(self.roles.into_iter().map(RoleId));

        member.nick = self.nick;
        member.joined_at = self.joined_at;
        member.premium_since = self.premium_since;
        member.pending = self.pending;
        member.communication_disabled_until = self.communication_disabled_until;
        member
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RoleTagsResponse {
    #[serde(default, with = "string_to_u64::option")]
    pub bot_id: Option<u64>,
    /// Sent as `null` when set and omitted otherwise.
    #[serde(default, deserialize_with = "present")]
    pub premium_subscriber: bool,
}

#[derive(Debug, Deserialize)]
pub struct RoleResponse {
    #[serde(with = "string_to_u64")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub color: u32,
    #[serde(default)]
    pub hoist: bool,
    pub position: i32,
    pub permissions: String,
    #[serde(default)]
    pub managed: bool,
    #[serde(default)]
    pub mentionable: bool,
    #[serde(default)]
    pub tags: Option<RoleTagsResponse>,
}

impl RoleResponse {
    /// # Errors
    /// Returns a decode error if the permission bitset is malformed.
    pub fn into_role(self, guild_id: GuildId) -> Result<Role, TransportError> {
        let permissions = parse_permissions(&self.permissions)?;
        let tags = self.tags.unwrap_or_default();

        let mut role = Role::new(self.id, guild_id, self.name, self.position, permissions);
        role.color = self.color;
        role.hoist = self.hoist;
        role.managed = self.managed;
        role.mentionable = self.mentionable;
        role.tags = RoleTags {
            bot_id: tags.bot_id.map(UserId),
            premium_subscriber: tags.premium_subscriber,
        };
        Ok(role)
    }
}

#[derive(Debug, Deserialize)]
pub struct OverwriteResponse {
    #[serde(with = "string_to_u64")]
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: u8,
    pub allow: String,
    pub deny: String,
}

impl TryFrom<OverwriteResponse> for PermissionOverwrite {
    type Error = TransportError;

    fn try_from(dto: OverwriteResponse) -> Result<Self, Self::Error> {
        let kind = match dto.kind {
            0 => OverwriteType::Role,
            1 => OverwriteType::Member,
            other => {
                return Err(TransportError::decode(format!("unknown overwrite type {other}")));
            }
        };

        Ok(Self {
            id: dto.id,
            kind,
            allow: parse_permissions(&dto.allow)?,
            deny: parse_permissions(&dto.deny)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ThreadMetadataResponse {
    #[serde(default)]
    pub archived: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChannelResponse {
    #[serde(with = "string_to_u64")]
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default, with = "string_to_u64::option")]
    pub guild_id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<i32>,
    #[serde(default, with = "string_to_u64::option")]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub permission_overwrites: Vec<OverwriteResponse>,
    #[serde(default, with = "string_to_u64::option")]
    pub owner_id: Option<u64>,
    #[serde(default)]
    pub thread_metadata: Option<ThreadMetadataResponse>,
    #[serde(default)]
    pub recipients: Vec<UserResponse>,
}

impl ChannelResponse {
    /// Builds the channel variant matching the wire type.
    ///
    /// `guild_hint` fills in the guild for routes that omit it.
    ///
    /// # Errors
    /// Returns a decode error for guild channels without a guild, threads
    /// without a parent, or malformed overwrites.
    pub fn into_channel(self, guild_hint: Option<GuildId>) -> Result<Channel, TransportError> {
        let kind = ChannelKind::from(self.kind);

        if kind.is_private() {
            return Ok(PrivateChannel {
                id: self.id.into(),
                kind,
                name: self.name,
                recipients: self.recipients.into_iter().map(|u| UserId(u.id)).collect(),
            }
            .into());
        }

        let guild_id = self
            .guild_id
            .map(GuildId)
            .or(guild_hint)
            .ok_or_else(|| TransportError::decode(format!("channel {} has no guild", self.id)))?;
        let name = self.name.unwrap_or_default();

        if kind.is_thread() {
            let parent_id = self
                .parent_id
                .ok_or_else(|| TransportError::decode(format!("thread {} has no parent", self.id)))?;

            let mut thread = ThreadChannel::new(self.id, guild_id, parent_id, name);
            thread.kind = kind;
            thread.owner_id = self.owner_id.map(UserId);
            thread.archived = self.thread_metadata.unwrap_or_default().archived;
            return Ok(thread.into());
        }

        let mut channel = GuildChannel::new(self.id, guild_id, name, kind);
        channel.parent_id = self.parent_id.map(Into::into);
        channel.position = self.position.unwrap_or_default();
        channel.topic = self.topic;
        channel.overwrites = self
            .permission_overwrites
            .into_iter()
            .map(PermissionOverwrite::try_from)
            .collect::<Result<_, _>>()?;
        Ok(channel.into())
    }
}

#[derive(Debug, Deserialize)]
pub struct EmojiResponse {
    #[serde(default, with = "string_to_u64::option")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub animated: bool,
    #[serde(default = "default_true")]
    pub available: bool,
}

impl EmojiResponse {
    /// # Errors
    /// Returns a decode error when the payload is not a custom emoji.
    pub fn into_custom(self, guild_id: GuildId) -> Result<CustomEmoji, TransportError> {
        let id = self
            .id
            .ok_or_else(|| TransportError::decode("emoji payload has no id"))?;

        let mut emoji = CustomEmoji::new(id, self.name.unwrap_or_default(), self.animated)
            .with_guild(guild_id);
        emoji.available = self.available;
        Ok(emoji)
    }
}

#[derive(Debug, Deserialize)]
pub struct BanResponse {
    #[serde(default)]
    pub reason: Option<String>,
    pub user: UserResponse,
}

impl BanResponse {
    pub fn into_ban(self, guild_id: GuildId) -> Ban {
        Ban {
            guild_id,
            user: self.user.into(),
            reason: self.reason,
        }
    }
}

fn parse_permissions(value: &str) -> Result<Permissions, TransportError> {
    Permissions::from_wire(value)
        .ok_or_else(|| TransportError::decode(format!("invalid permission bitset {value:?}")))
}

fn present<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    serde::de::IgnoredAny::deserialize(deserializer)?;
    Ok(true)
}

const fn default_true() -> bool {
    true
}
