//! Bot token value object.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Discord bot token with format validation and masking. Wiped from memory
/// on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct BotToken {
    value: String,
}

impl BotToken {
    const MIN_TOKEN_LENGTH: usize = 50;
    const SCHEME: &'static str = "Bot ";

    /// Creates new token with format validation. A leading `Bot ` scheme is
    /// accepted and stripped.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let mut raw = value.into();
        let trimmed = raw.trim();
        let value = trimmed.strip_prefix(Self::SCHEME).unwrap_or(trimmed).to_string();
        raw.zeroize();

        if value.len() < Self::MIN_TOKEN_LENGTH || value.split('.').count() != 3 {
            return None;
        }

        Some(Self { value })
    }

    /// Creates token without validation.
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("{}{}", Self::SCHEME, self.value)
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        if self.value.len() <= 10 {
            return "*".repeat(self.value.len());
        }

        let visible_prefix = &self.value[..4];
        let visible_suffix = &self.value[self.value.len() - 4..];
        format!("{visible_prefix}...{visible_suffix}")
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotToken")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}
