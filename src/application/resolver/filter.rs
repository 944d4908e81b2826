use crate::domain::entities::{Channel, ChannelKind};

/// Client-side narrowing applied to resolved channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelFilter {
    #[default]
    All,
    /// Exactly this channel type.
    Kind(ChannelKind),
    /// Channels that accept messages.
    Textable,
    /// Voice and stage channels.
    Voice,
    /// Public, private and announcement threads.
    Thread,
    /// Forum and media channels.
    Forum,
    Category,
    /// Guild channels carrying their own permission overwrites.
    Permissible,
}

impl ChannelFilter {
    #[must_use]
    pub fn matches(self, channel: &Channel) -> bool {
        let kind = channel.kind();

        match self {
            Self::All => true,
            Self::Kind(expected) => kind == expected,
            Self::Textable => channel.is_textable(),
            Self::Voice => kind.is_voice(),
            Self::Thread => matches!(channel, Channel::Thread(_)),
            Self::Forum => kind.is_forum(),
            Self::Category => kind.is_category(),
            Self::Permissible => matches!(channel, Channel::Guild(_)),
        }
    }

    /// Keeps the matching channels of a resolved set.
    #[must_use]
    pub fn apply(self, channels: Vec<Channel>) -> Vec<Channel> {
        channels
            .into_iter()
            .filter(|channel| self.matches(channel))
            .collect()
    }
}

impl From<ChannelKind> for ChannelFilter {
    fn from(kind: ChannelKind) -> Self {
        Self::Kind(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use test_case::test_case;

    #[test_case(ChannelFilter::All, true, true, true ; "all")]
    #[test_case(ChannelFilter::Textable, true, true, true ; "textable")]
    #[test_case(ChannelFilter::Voice, false, true, false ; "voice")]
    #[test_case(ChannelFilter::Thread, false, false, true ; "thread")]
    #[test_case(ChannelFilter::Permissible, true, true, false ; "permissible")]
    #[test_case(ChannelFilter::Kind(ChannelKind::Text), true, false, false ; "exact_kind")]
    fn test_filter_matches(filter: ChannelFilter, text: bool, voice: bool, thread: bool) {
        assert_eq!(filter.matches(&testing::text_channel(1, 9)), text);
        assert_eq!(filter.matches(&testing::voice_channel(2, 9)), voice);
        assert_eq!(filter.matches(&testing::thread(3, 9, 1)), thread);
    }

    #[test]
    fn test_apply_keeps_order() {
        let channels = vec![
            testing::text_channel(1, 9),
            testing::voice_channel(2, 9),
            testing::text_channel(3, 9),
        ];

        let kept = ChannelFilter::Kind(ChannelKind::Text).apply(channels);

        assert_eq!(kept.iter().map(|c| c.id().as_u64()).collect::<Vec<_>>(), vec![1, 3]);
    }
}
