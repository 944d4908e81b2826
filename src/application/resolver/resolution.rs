//! Strategy-bound view of a resolver.

use tracing::{debug, trace};

use super::filter::ChannelFilter;
use super::query::{
    ChannelQuery, ChannelsQuery, EmojiQuery, EntityQuery, GuildQuery, MemberQuery, MembersQuery,
    RoleQuery, RolesQuery, UserQuery,
};
use super::required::Resolvable;
use crate::domain::entities::{
    Channel, Emoji, EmojiId, EmojiRef, EntityRef, Guild, GuildId, Member, Role, User,
};
use crate::domain::errors::{RemoteError, ResolveResult};
use crate::domain::ports::{CachePort, RemotePort};
use crate::domain::services::RoleHierarchy;
use crate::domain::strategy::Strategy;

/// Resolves entity references under one source strategy.
///
/// Every method returns `Ok(None)` when the entity is confirmed absent; chain
/// [`Required::required`](super::Required::required) for the mandatory form.
/// Transport failures are always returned as errors.
#[derive(Clone, Copy)]
pub struct Resolution<'r> {
    strategy: Strategy,
    cache: Option<&'r dyn CachePort>,
    remote: &'r dyn RemotePort,
}

impl<'r> Resolution<'r> {
    /// `cache` must be present whenever `strategy` reads the cache.
    pub(crate) fn new(
        strategy: Strategy,
        cache: Option<&'r dyn CachePort>,
        remote: &'r dyn RemotePort,
    ) -> Self {
        Self {
            strategy,
            cache: cache.filter(|_| strategy.reads_cache()),
            remote,
        }
    }

    /// Returns the strategy this view resolves with.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Runs one cache probe and at most one remote call.
    pub(crate) async fn run<Q: EntityQuery>(&self, query: Q) -> ResolveResult<Option<Q::Output>> {
        let kind = <Q::Output as Resolvable>::KIND;

        if let Some(cache) = self.cache {
            if let Some(hit) = query.cached(cache).filter(|value| !Q::is_absent(value)) {
                trace!(%kind, "cache hit");
                return Ok(Some(hit));
            }

            if !self.strategy.reads_remote() {
                trace!(%kind, "cache miss, remote disabled");
                return Ok(None);
            }

            debug!(%kind, strategy = %self.strategy, "cache miss, fetching remotely");
        }

        match query.fetch(self.remote).await {
            Ok(value) if Q::is_absent(&value) => {
                debug!(%kind, "remote returned an empty set");
                Ok(None)
            }
            Ok(value) => Ok(Some(value)),
            Err(RemoteError::NotFound) => {
                debug!(%kind, "confirmed absent");
                Ok(None)
            }
            Err(RemoteError::Transport(error)) => Err(error.into()),
        }
    }

    /// Resolves a guild.
    ///
    /// # Errors
    /// Returns transport failures from the remote API.
    pub async fn guild(&self, guild: impl Into<EntityRef<'_, Guild>>) -> ResolveResult<Option<Guild>> {
        let Some(guild_id) = guild.into().normalize() else {
            return Ok(None);
        };

        self.run(GuildQuery(guild_id)).await
    }

    /// Resolves a user.
    ///
    /// # Errors
    /// Returns transport failures from the remote API.
    pub async fn user(&self, user: impl Into<EntityRef<'_, User>>) -> ResolveResult<Option<User>> {
        let Some(user_id) = user.into().normalize() else {
            return Ok(None);
        };

        self.run(UserQuery(user_id)).await
    }

    /// Resolves a guild member.
    ///
    /// # Errors
    /// Returns transport failures from the remote API.
    pub async fn member(
        &self,
        guild: impl Into<EntityRef<'_, Guild>>,
        member: impl Into<EntityRef<'_, Member>>,
    ) -> ResolveResult<Option<Member>> {
        let (Some(guild_id), Some(user_id)) = (guild.into().normalize(), member.into().normalize())
        else {
            return Ok(None);
        };

        self.run(MemberQuery { guild_id, user_id }).await
    }

    /// Resolves all members of a guild. An empty set is absent.
    ///
    /// # Errors
    /// Returns transport failures from the remote API.
    pub async fn members(
        &self,
        guild: impl Into<EntityRef<'_, Guild>>,
    ) -> ResolveResult<Option<Vec<Member>>> {
        let Some(guild_id) = guild.into().normalize() else {
            return Ok(None);
        };

        self.run(MembersQuery(guild_id)).await
    }

    /// Resolves the members boosting a guild, derived from its member set.
    ///
    /// # Errors
    /// Returns transport failures from the remote API.
    pub async fn boosters(
        &self,
        guild: impl Into<EntityRef<'_, Guild>>,
    ) -> ResolveResult<Option<Vec<Member>>> {
        let members = self.members(guild).await?.unwrap_or_default();
        let boosters: Vec<Member> = members.into_iter().filter(Member::is_boosting).collect();

        Ok((!boosters.is_empty()).then_some(boosters))
    }

    /// Resolves any channel or thread.
    ///
    /// # Errors
    /// Returns transport failures from the remote API.
    pub async fn channel(
        &self,
        channel: impl Into<EntityRef<'_, Channel>>,
    ) -> ResolveResult<Option<Channel>> {
        self.channel_of(channel, ChannelFilter::All).await
    }

    /// Resolves a channel, treating one that fails `filter` as absent.
    ///
    /// # Errors
    /// Returns transport failures from the remote API.
    pub async fn channel_of(
        &self,
        channel: impl Into<EntityRef<'_, Channel>>,
        filter: ChannelFilter,
    ) -> ResolveResult<Option<Channel>> {
        let Some(channel_id) = channel.into().normalize() else {
            return Ok(None);
        };

        let channel = self.run(ChannelQuery(channel_id)).await?;

        Ok(channel.filter(|channel| filter.matches(channel)))
    }

    /// Resolves a guild's channels narrowed by `filter`. An empty result is
    /// absent.
    ///
    /// # Errors
    /// Returns transport failures from the remote API.
    pub async fn channels(
        &self,
        guild: impl Into<EntityRef<'_, Guild>>,
        filter: ChannelFilter,
    ) -> ResolveResult<Option<Vec<Channel>>> {
        let Some(guild_id) = guild.into().normalize() else {
            return Ok(None);
        };

        let channels = self
            .run(ChannelsQuery(guild_id))
            .await?
            .map(|channels| filter.apply(channels))
            .filter(|channels| !channels.is_empty());

        Ok(channels)
    }

    /// Resolves one role of a guild.
    ///
    /// # Errors
    /// Returns transport failures from the remote API.
    pub async fn role(
        &self,
        guild: impl Into<EntityRef<'_, Guild>>,
        role: impl Into<EntityRef<'_, Role>>,
    ) -> ResolveResult<Option<Role>> {
        let (Some(guild_id), Some(role_id)) = (guild.into().normalize(), role.into().normalize())
        else {
            return Ok(None);
        };

        self.run(RoleQuery { guild_id, role_id }).await
    }

    /// Resolves every role of a guild, default role included.
    ///
    /// # Errors
    /// Returns transport failures from the remote API.
    pub async fn roles(
        &self,
        guild: impl Into<EntityRef<'_, Guild>>,
    ) -> ResolveResult<Option<Vec<Role>>> {
        let Some(guild_id) = guild.into().normalize() else {
            return Ok(None);
        };

        self.run(RolesQuery(guild_id)).await
    }

    /// Resolves the roles assigned to a member, without the default role.
    ///
    /// A live member is used as-is; an id is resolved first.
    ///
    /// # Errors
    /// Returns transport failures from the remote API.
    pub async fn member_roles(
        &self,
        guild: impl Into<EntityRef<'_, Guild>>,
        member: impl Into<EntityRef<'_, Member>>,
    ) -> ResolveResult<Option<Vec<Role>>> {
        let guild = guild.into();
        let Some(member) = self.member_in(guild, member.into()).await? else {
            return Ok(None);
        };
        let Some(roles) = self.roles(guild).await? else {
            return Ok(None);
        };

        Ok(Some(
            roles
                .into_iter()
                .filter(|role| member.roles().contains(&role.id))
                .collect(),
        ))
    }

    /// Resolves the senior role held by a member.
    ///
    /// The default role is a candidate, so a member with no assigned roles
    /// still has a top role.
    ///
    /// # Errors
    /// Returns transport failures from the remote API.
    pub async fn top_role(
        &self,
        guild: impl Into<EntityRef<'_, Guild>>,
        member: impl Into<EntityRef<'_, Member>>,
    ) -> ResolveResult<Option<Role>> {
        let guild = guild.into();
        let Some(member) = self.member_in(guild, member.into()).await? else {
            return Ok(None);
        };
        let Some(roles) = self.roles(guild).await? else {
            return Ok(None);
        };

        Ok(RoleHierarchy::member_top_role(&member, &roles).cloned())
    }

    /// Resolves the guild's automatic booster role.
    ///
    /// # Errors
    /// Returns transport failures from the remote API.
    pub async fn booster_role(
        &self,
        guild: impl Into<EntityRef<'_, Guild>>,
    ) -> ResolveResult<Option<Role>> {
        let roles = self.roles(guild).await?.unwrap_or_default();

        Ok(roles.into_iter().find(Role::is_premium_subscriber))
    }

    /// Resolves an emoji reference.
    ///
    /// Text is parsed without any lookup. A numeric id that is an emoji code
    /// point is a standard emoji; otherwise it names a custom emoji, fetched
    /// remotely only when `guild` is known.
    ///
    /// # Errors
    /// Returns transport failures from the remote API.
    pub async fn emoji<'e>(
        &self,
        emoji: impl Into<EmojiRef<'e>>,
        guild: Option<GuildId>,
    ) -> ResolveResult<Option<Emoji>> {
        let emoji_id = match emoji.into() {
            EmojiRef::Object(emoji) => return Ok(Some(emoji.clone())),
            EmojiRef::Text(text) => return Ok(Emoji::parse(text)),
            EmojiRef::Id(0) => return Ok(None),
            EmojiRef::Id(id) => match Emoji::from_code_point(id) {
                Some(emoji) => return Ok(Some(emoji)),
                None => EmojiId(id),
            },
        };

        let guild_id = guild.filter(|id| id.as_u64() != 0);
        let emoji = self.run(EmojiQuery { guild_id, emoji_id }).await?;

        Ok(emoji.map(Emoji::Custom))
    }

    /// Uses a live member as-is, otherwise resolves it.
    pub(crate) async fn member_in(
        &self,
        guild: EntityRef<'_, Guild>,
        member: EntityRef<'_, Member>,
    ) -> ResolveResult<Option<Member>> {
        match member.object() {
            Some(member) => Ok(Some(member.clone())),
            None => self.member(guild, member).await,
        }
    }
}

impl std::fmt::Debug for Resolution<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolution")
            .field("strategy", &self.strategy)
            .field("has_cache", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}
