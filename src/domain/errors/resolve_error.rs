//! Resolution error types.

use thiserror::Error;

use super::TransportError;
use crate::domain::strategy::Strategy;

/// Kind of entity a resolution targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Guild,
    Ban,
    Member,
    User,
    Channel,
    Role,
    Emoji,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Guild => write!(f, "guild"),
            Self::Ban => write!(f, "ban"),
            Self::Member => write!(f, "member"),
            Self::User => write!(f, "user"),
            Self::Channel => write!(f, "channel"),
            Self::Role => write!(f, "role"),
            Self::Emoji => write!(f, "emoji"),
        }
    }
}

/// Result alias for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Resolution error variants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ResolveError {
    #[error("guild is required but could not be found in the cache or fetched")]
    GuildNotFound,

    #[error("ban is required but could not be fetched")]
    BanNotFound,

    #[error("member is required but could not be found in the cache or fetched")]
    MemberNotFound,

    #[error("user is required but could not be found in the cache or fetched")]
    UserNotFound,

    #[error("channel is required but could not be found in the cache or fetched")]
    ChannelNotFound,

    #[error("role is required but could not be found in the cache or fetched")]
    RoleNotFound,

    #[error("emoji is required but could not be found in the cache or fetched")]
    EmojiNotFound,

    #[error("{strategy} resolution needs a local cache, but the client is remote-only")]
    InvalidClientMode { strategy: Strategy },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ResolveError {
    /// Creates the not-found error for an entity kind.
    #[must_use]
    pub const fn not_found(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Guild => Self::GuildNotFound,
            EntityKind::Ban => Self::BanNotFound,
            EntityKind::Member => Self::MemberNotFound,
            EntityKind::User => Self::UserNotFound,
            EntityKind::Channel => Self::ChannelNotFound,
            EntityKind::Role => Self::RoleNotFound,
            EntityKind::Emoji => Self::EmojiNotFound,
        }
    }

    /// Returns the missing entity kind for not-found errors.
    #[must_use]
    pub const fn kind(&self) -> Option<EntityKind> {
        match self {
            Self::GuildNotFound => Some(EntityKind::Guild),
            Self::BanNotFound => Some(EntityKind::Ban),
            Self::MemberNotFound => Some(EntityKind::Member),
            Self::UserNotFound => Some(EntityKind::User),
            Self::ChannelNotFound => Some(EntityKind::Channel),
            Self::RoleNotFound => Some(EntityKind::Role),
            Self::EmojiNotFound => Some(EntityKind::Emoji),
            Self::InvalidClientMode { .. } | Self::Transport(_) => None,
        }
    }

    /// Returns whether the error reports a missing entity.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.kind().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(EntityKind::Guild ; "guild")]
    #[test_case(EntityKind::Ban ; "ban")]
    #[test_case(EntityKind::Member ; "member")]
    #[test_case(EntityKind::User ; "user")]
    #[test_case(EntityKind::Channel ; "channel")]
    #[test_case(EntityKind::Role ; "role")]
    #[test_case(EntityKind::Emoji ; "emoji")]
    fn test_not_found_kind_round_trips(kind: EntityKind) {
        let error = ResolveError::not_found(kind);

        assert_eq!(error.kind(), Some(kind));
        assert!(error.is_not_found());
    }

    #[test]
    fn test_transport_is_not_a_not_found() {
        let error = ResolveError::from(TransportError::Unauthorized);

        assert!(!error.is_not_found());
        assert_eq!(error.kind(), None);
    }

    #[test]
    fn test_invalid_client_mode_message() {
        let error = ResolveError::InvalidClientMode {
            strategy: Strategy::CacheOnly,
        };

        assert_eq!(
            error.to_string(),
            "cache-only resolution needs a local cache, but the client is remote-only"
        );
    }
}
