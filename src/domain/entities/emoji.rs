//! Discord emoji entities.
//!
//! Standard emojis are identified by their characters and need no lookup.
//! Custom emojis belong to a guild and are identified by a snowflake.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{GuildId, Snowflake};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmojiId(#[serde(with = "crate::domain::serde_utils::string_to_u64")] pub u64);

impl EmojiId {
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl Snowflake for EmojiId {
    fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EmojiId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EmojiId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Guild-owned emoji.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomEmoji {
    pub id: EmojiId,
    pub name: String,
    #[serde(default)]
    pub animated: bool,
    /// Unknown when the emoji was parsed from a mention.
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl CustomEmoji {
    #[must_use]
    pub fn new(id: impl Into<EmojiId>, name: impl Into<String>, animated: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            animated,
            guild_id: None,
            available: true,
        }
    }

    #[must_use]
    pub fn with_guild(mut self, guild_id: impl Into<GuildId>) -> Self {
        self.guild_id = Some(guild_id.into());
        self
    }
}

/// Standard or custom emoji.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Emoji {
    Unicode(String),
    Custom(CustomEmoji),
}

impl Emoji {
    /// Parses a standard emoji or a custom emoji mention (`<:name:id>`,
    /// `<a:name:id>`). Plain text yields `None`.
    ///
    /// # Panics
    ///
    /// Panics if the internal regex is invalid.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();

        if is_unicode_emoji(value) {
            return Some(Self::Unicode(value.to_string()));
        }

        static MENTION: OnceLock<Regex> = OnceLock::new();
        let re = MENTION.get_or_init(|| {
            Regex::new(r"^<(a)?:(\w{2,32}):(\d{1,20})>$").expect("Invalid regex")
        });

        let captures = re.captures(value)?;
        let id = captures[3].parse::<u64>().ok()?;

        Some(Self::Custom(CustomEmoji::new(
            id,
            &captures[2],
            captures.get(1).is_some(),
        )))
    }

    /// Returns the standard emoji for a single code point, if it is one.
    #[must_use]
    pub fn from_code_point(value: u64) -> Option<Self> {
        let c = u32::try_from(value).ok().and_then(char::from_u32)?;
        let mut buf = [0_u8; 4];
        let text = c.encode_utf8(&mut buf);

        is_unicode_emoji(text).then(|| Self::Unicode(text.to_string()))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Unicode(value) => value,
            Self::Custom(emoji) => &emoji.name,
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<EmojiId> {
        match self {
            Self::Unicode(_) => None,
            Self::Custom(emoji) => Some(emoji.id),
        }
    }

    /// Returns the text that renders this emoji in a message.
    #[must_use]
    pub fn mention(&self) -> String {
        match self {
            Self::Unicode(value) => value.clone(),
            Self::Custom(emoji) => format!(
                "<{}:{}:{}>",
                if emoji.animated { "a" } else { "" },
                emoji.name,
                emoji.id
            ),
        }
    }
}

/// Returns whether `value` is made up solely of emoji code points.
///
/// # Panics
///
/// Panics if the internal regex is invalid.
#[must_use]
pub fn is_unicode_emoji(value: &str) -> bool {
    static SEQUENCE: OnceLock<Regex> = OnceLock::new();
    static PICTOGRAPH: OnceLock<Regex> = OnceLock::new();

    let sequence = SEQUENCE.get_or_init(|| {
        Regex::new(r"^[\p{Emoji}\p{Emoji_Component}\u{200D}\u{FE0F}\u{20E3}]+$")
            .expect("Invalid regex")
    });
    let pictograph = PICTOGRAPH.get_or_init(|| {
        Regex::new(r"[\p{Extended_Pictographic}\p{Regional_Indicator}\u{20E3}]")
            .expect("Invalid regex")
    });

    sequence.is_match(value) && pictograph.is_match(value)
}

/// Reference to an emoji in any of the forms callers hold one.
#[derive(Debug, Clone, Copy)]
pub enum EmojiRef<'a> {
    Object(&'a Emoji),
    Text(&'a str),
    Id(u64),
}

impl<'a> From<&'a Emoji> for EmojiRef<'a> {
    fn from(emoji: &'a Emoji) -> Self {
        Self::Object(emoji)
    }
}

impl<'a> From<&'a str> for EmojiRef<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl From<u64> for EmojiRef<'_> {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<EmojiId> for EmojiRef<'_> {
    fn from(id: EmojiId) -> Self {
        Self::Id(id.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("😀" ; "simple")]
    #[test_case("👍🏽" ; "skin_tone")]
    #[test_case("👨‍👩‍👧" ; "zwj_sequence")]
    #[test_case("🇫🇷" ; "flag")]
    #[test_case("1️⃣" ; "keycap")]
    fn test_unicode_emoji_detected(value: &str) {
        assert!(is_unicode_emoji(value));
        assert_eq!(Emoji::parse(value), Some(Emoji::Unicode(value.to_string())));
    }

    #[test_case("hello" ; "word")]
    #[test_case("123" ; "digits")]
    #[test_case("" ; "empty")]
    #[test_case("😀 hi" ; "mixed")]
    fn test_text_is_not_emoji(value: &str) {
        assert!(!is_unicode_emoji(value));
        assert_eq!(Emoji::parse(value), None);
    }

    #[test]
    fn test_parse_custom_mention() {
        let emoji = Emoji::parse("<:blob:123456789012345678>").unwrap();

        assert_eq!(emoji.id(), Some(EmojiId(123_456_789_012_345_678)));
        assert_eq!(emoji.name(), "blob");
        assert_eq!(emoji.mention(), "<:blob:123456789012345678>");
    }

    #[test]
    fn test_parse_animated_mention() {
        let Some(Emoji::Custom(emoji)) = Emoji::parse("<a:dance:42>") else {
            panic!("expected custom emoji");
        };

        assert!(emoji.animated);
        assert_eq!(emoji.guild_id, None);
    }

    #[test]
    fn test_from_code_point() {
        assert_eq!(
            Emoji::from_code_point(0x1F600),
            Some(Emoji::Unicode("😀".to_string()))
        );
        assert_eq!(Emoji::from_code_point(u64::from(b'a')), None);
        assert_eq!(Emoji::from_code_point(123_456_789_012_345_678), None);
    }
}
