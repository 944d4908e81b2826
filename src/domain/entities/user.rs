//! Discord user entity.

use serde::{Deserialize, Serialize};

use super::{Identify, Snowflake};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(#[serde(with = "crate::domain::serde_utils::string_to_u64")] pub u64);

impl UserId {
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl Snowflake for UserId {
    fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.parse().unwrap_or(0))
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value.parse().unwrap_or(0))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    discriminator: String,
    global_name: Option<String>,
    avatar: Option<String>,
    bot: bool,
    #[serde(default)]
    system: bool,
}

impl User {
    #[must_use]
    pub fn new(
        id: impl Into<UserId>,
        username: impl Into<String>,
        discriminator: impl Into<String>,
        avatar: Option<String>,
        bot: bool,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            discriminator: discriminator.into(),
            global_name: None,
            avatar,
            bot,
            system: false,
        }
    }

    #[must_use]
    pub fn with_global_name(mut self, global_name: impl Into<String>) -> Self {
        self.global_name = Some(global_name.into());
        self
    }

    #[must_use]
    pub const fn with_system(mut self, system: bool) -> Self {
        self.system = system;
        self
    }

    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    #[must_use]
    pub fn global_name(&self) -> Option<&str> {
        self.global_name.as_deref()
    }

    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    #[must_use]
    pub const fn is_bot(&self) -> bool {
        self.bot
    }

    #[must_use]
    pub const fn is_system(&self) -> bool {
        self.system
    }

    /// Returns the global name when set, else the (legacy-aware) username.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(global_name) = &self.global_name {
            return global_name.clone();
        }

        if self.discriminator == "0" {
            self.username.clone()
        } else {
            format!("{}#{}", self.username, self.discriminator)
        }
    }
}

impl Identify for User {
    type Id = UserId;

    fn identify(&self) -> UserId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_global_name() {
        let user = User::new(1_u64, "name", "0", None, false).with_global_name("Global");
        assert_eq!(user.display_name(), "Global");
    }

    #[test]
    fn test_display_name_legacy_discriminator() {
        let user = User::new(1_u64, "legacy", "1234", None, false);
        assert_eq!(user.display_name(), "legacy#1234");

        let pomelo = User::new(2_u64, "pomelo", "0", None, false);
        assert_eq!(pomelo.display_name(), "pomelo");
    }

    #[test]
    fn test_user_id_from_string() {
        assert_eq!(UserId::from("80351110224678912"), UserId(80_351_110_224_678_912));
        assert_eq!(UserId::from(String::from("oops")), UserId(0));
    }
}
