//! Guild ban entity.

use serde::{Deserialize, Serialize};

use super::{GuildId, User, UserId};

/// A ban pairing a guild with a user. Only ever fetched remotely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ban {
    pub guild_id: GuildId,
    pub user: User,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Ban {
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user.id()
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}
