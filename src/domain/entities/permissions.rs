//! Discord permission bitset.

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Capability flags granted by roles and channel overwrites.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Permissions: u64 {
        const CREATE_INSTANT_INVITE = 1 << 0;
        const KICK_MEMBERS = 1 << 1;
        const BAN_MEMBERS = 1 << 2;
        const ADMINISTRATOR = 1 << 3;
        const MANAGE_CHANNELS = 1 << 4;
        const MANAGE_GUILD = 1 << 5;
        const ADD_REACTIONS = 1 << 6;
        const VIEW_AUDIT_LOG = 1 << 7;
        const PRIORITY_SPEAKER = 1 << 8;
        const STREAM = 1 << 9;
        const VIEW_CHANNEL = 1 << 10;
        const SEND_MESSAGES = 1 << 11;
        const SEND_TTS_MESSAGES = 1 << 12;
        const MANAGE_MESSAGES = 1 << 13;
        const EMBED_LINKS = 1 << 14;
        const ATTACH_FILES = 1 << 15;
        const READ_MESSAGE_HISTORY = 1 << 16;
        const MENTION_EVERYONE = 1 << 17;
        const USE_EXTERNAL_EMOJIS = 1 << 18;
        const VIEW_GUILD_INSIGHTS = 1 << 19;
        const CONNECT = 1 << 20;
        const SPEAK = 1 << 21;
        const MUTE_MEMBERS = 1 << 22;
        const DEAFEN_MEMBERS = 1 << 23;
        const MOVE_MEMBERS = 1 << 24;
        const USE_VAD = 1 << 25;
        const CHANGE_NICKNAME = 1 << 26;
        const MANAGE_NICKNAMES = 1 << 27;
        const MANAGE_ROLES = 1 << 28;
        const MANAGE_WEBHOOKS = 1 << 29;
        const MANAGE_GUILD_EXPRESSIONS = 1 << 30;
        const USE_APPLICATION_COMMANDS = 1 << 31;
        const REQUEST_TO_SPEAK = 1 << 32;
        const MANAGE_EVENTS = 1 << 33;
        const MANAGE_THREADS = 1 << 34;
        const CREATE_PUBLIC_THREADS = 1 << 35;
        const CREATE_PRIVATE_THREADS = 1 << 36;
        const USE_EXTERNAL_STICKERS = 1 << 37;
        const SEND_MESSAGES_IN_THREADS = 1 << 38;
        const USE_EMBEDDED_ACTIVITIES = 1 << 39;
        const MODERATE_MEMBERS = 1 << 40;
        const VIEW_CREATOR_MONETIZATION_ANALYTICS = 1 << 41;
        const USE_SOUNDBOARD = 1 << 42;
        const CREATE_GUILD_EXPRESSIONS = 1 << 43;
        const CREATE_EVENTS = 1 << 44;
        const USE_EXTERNAL_SOUNDS = 1 << 45;
        const SEND_VOICE_MESSAGES = 1 << 46;
        const SEND_POLLS = 1 << 49;
        const USE_EXTERNAL_APPS = 1 << 50;
    }
}

impl Permissions {
    /// Parses the decimal string form used on the wire.
    ///
    /// Unknown bits are dropped; an unparseable string yields `None`.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        value.parse::<u64>().ok().map(Self::from_bits_truncate)
    }

    /// Returns the decimal string form used on the wire.
    #[must_use]
    pub fn to_wire(self) -> String {
        self.bits().to_string()
    }

    #[must_use]
    pub const fn is_administrator(self) -> bool {
        self.contains(Self::ADMINISTRATOR)
    }

    /// Removes `deny` then adds `allow`, so allow wins for flags in both.
    #[must_use]
    pub fn apply(self, deny: Self, allow: Self) -> Self {
        (self & !deny) | allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_parsing() {
        let perms = Permissions::from_wire("3072").unwrap();
        assert_eq!(perms, Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES);
        assert_eq!(perms.to_wire(), "3072");
    }

    #[test]
    fn test_wire_parsing_rejects_garbage() {
        assert!(Permissions::from_wire("abc").is_none());
    }

    #[test]
    fn test_apply_allow_wins_over_deny() {
        let base = Permissions::VIEW_CHANNEL;
        let result = base.apply(Permissions::SEND_MESSAGES, Permissions::SEND_MESSAGES);

        assert_eq!(result, Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES);
    }

    #[test]
    fn test_administrator_flag() {
        assert!(Permissions::all().is_administrator());
        assert!(!Permissions::KICK_MEMBERS.is_administrator());
    }
}
