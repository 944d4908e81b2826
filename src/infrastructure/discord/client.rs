//! Discord REST API client.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::try_join;
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{
    BanResponse, ChannelResponse, EmojiResponse, ErrorResponse, GuildResponse, MemberResponse,
    RateLimitResponse, RoleResponse, UserResponse,
};
use crate::domain::entities::{
    Ban, BotToken, Channel, ChannelId, CustomEmoji, EmojiId, Guild, GuildId, Member, Role, User,
    UserId,
};
use crate::domain::errors::{RemoteError, TransportError};
use crate::domain::ports::RemotePort;

pub const DISCORD_API_BASE: &str = "https://discord.com/api/v10";
const USER_AGENT: &str = concat!(
    "DiscordBot (https://github.com/guildgate/guildgate, ",
    env!("CARGO_PKG_VERSION"),
    ")"
);
const MEMBER_PAGE_SIZE: usize = 1000;
const DEFAULT_RETRY_AFTER_MS: u64 = 5000;

/// Bot-authenticated client for the Discord REST API.
pub struct DiscordRestClient {
    client: Client,
    base_url: String,
    token: BotToken,
}

impl DiscordRestClient {
    /// Creates new client with default base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(token: BotToken) -> Result<Self, TransportError> {
        Self::with_base_url(token, DISCORD_API_BASE, Duration::from_secs(30))
    }

    /// Creates client with custom base URL and request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(
        token: BotToken,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let url = format!("{}{path}", self.base_url);

        debug!(%path, "GET");

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, self.token.authorization())
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, %path, "Failed to reach Discord API");
                if e.is_timeout() {
                    TransportError::network("request timed out")
                } else if e.is_connect() {
                    TransportError::network("failed to connect to Discord")
                } else {
                    TransportError::network(e.to_string())
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = classify_error(status, &body);
            if !error.is_not_found() {
                warn!(%status, %path, error = %error, "Discord API request failed");
            }
            return Err(error);
        }

        response.json::<T>().await.map_err(|e| {
            warn!(error = %e, %path, "Failed to parse response");
            TransportError::decode(e.to_string()).into()
        })
    }
}

/// Maps a failed response onto the remote error taxonomy. Only 404 counts
/// as a confirmed absence.
pub(crate) fn classify_error(status: StatusCode, body: &str) -> RemoteError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|error| error.message)
        .unwrap_or_else(|_| format!("HTTP {status}"));

    let error = match status {
        StatusCode::NOT_FOUND => return RemoteError::NotFound,
        StatusCode::UNAUTHORIZED => TransportError::Unauthorized,
        StatusCode::FORBIDDEN => TransportError::forbidden(message),
        StatusCode::TOO_MANY_REQUESTS => TransportError::RateLimited {
            retry_after_ms: retry_after_ms(body),
        },
        StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => {
            TransportError::network("Discord API is temporarily unavailable")
        }
        _ => TransportError::unexpected(format!("{status} - {message}")),
    };

    error.into()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn retry_after_ms(body: &str) -> u64 {
    serde_json::from_str::<RateLimitResponse>(body)
        .map(|limit| (limit.retry_after * 1000.0).ceil() as u64)
        .unwrap_or(DEFAULT_RETRY_AFTER_MS)
}

#[derive(Deserialize)]
struct ActiveThreadsResponse {
    threads: Vec<ChannelResponse>,
}

#[async_trait]
impl RemotePort for DiscordRestClient {
    async fn fetch_guild(&self, guild_id: GuildId) -> Result<Guild, RemoteError> {
        let guild: GuildResponse = self.get(&format!("/guilds/{guild_id}")).await?;
        Ok(guild.into())
    }

    async fn fetch_user(&self, user_id: UserId) -> Result<User, RemoteError> {
        let user: UserResponse = self.get(&format!("/users/{user_id}")).await?;
        Ok(user.into())
    }

    async fn fetch_member(&self, guild_id: GuildId, user_id: UserId) -> Result<Member, RemoteError> {
        let member: MemberResponse = self
            .get(&format!("/guilds/{guild_id}/members/{user_id}"))
            .await?;
        Ok(member.into_member(guild_id))
    }

    async fn fetch_members(&self, guild_id: GuildId) -> Result<Vec<Member>, RemoteError> {
        let mut members = Vec::new();
        let mut after = 0_u64;

        loop {
            let page: Vec<MemberResponse> = self
                .get(&format!(
                    "/guilds/{guild_id}/members?limit={MEMBER_PAGE_SIZE}&after={after}"
                ))
                .await?;
            let page_len = page.len();

            if let Some(last) = page.last() {
                after = last.user.id;
            }
            members.extend(page.into_iter().map(|m| m.into_member(guild_id)));

            if page_len < MEMBER_PAGE_SIZE {
                break;
            }
        }

        debug!(%guild_id, count = members.len(), "Fetched guild members");
        Ok(members)
    }

    async fn fetch_channel(&self, channel_id: ChannelId) -> Result<Channel, RemoteError> {
        let channel: ChannelResponse = self.get(&format!("/channels/{channel_id}")).await?;
        Ok(channel.into_channel(None)?)
    }

    async fn fetch_guild_channels(&self, guild_id: GuildId) -> Result<Vec<Channel>, RemoteError> {
        let channels_path = format!("/guilds/{guild_id}/channels");
        let threads_path = format!("/guilds/{guild_id}/threads/active");

        let (channels, active) = try_join(
            self.get::<Vec<ChannelResponse>>(&channels_path),
            self.get::<ActiveThreadsResponse>(&threads_path),
        )
        .await?;

        channels
            .into_iter()
            .chain(active.threads)
            .map(|channel| channel.into_channel(Some(guild_id)).map_err(RemoteError::from))
            .collect()
    }

    async fn fetch_roles(&self, guild_id: GuildId) -> Result<Vec<Role>, RemoteError> {
        let roles: Vec<RoleResponse> = self.get(&format!("/guilds/{guild_id}/roles")).await?;

        roles
            .into_iter()
            .map(|role| role.into_role(guild_id).map_err(RemoteError::from))
            .collect()
    }

    async fn fetch_emoji(
        &self,
        guild_id: GuildId,
        emoji_id: EmojiId,
    ) -> Result<CustomEmoji, RemoteError> {
        let emoji: EmojiResponse = self
            .get(&format!("/guilds/{guild_id}/emojis/{emoji_id}"))
            .await?;
        Ok(emoji.into_custom(guild_id)?)
    }

    async fn fetch_ban(&self, guild_id: GuildId, user_id: UserId) -> Result<Ban, RemoteError> {
        let ban: BanResponse = self
            .get(&format!("/guilds/{guild_id}/bans/{user_id}"))
            .await?;
        Ok(ban.into_ban(guild_id))
    }
}

impl std::fmt::Debug for DiscordRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordRestClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}
