//! Source strategies and client capabilities.

use serde::{Deserialize, Serialize};

/// Where a resolution may look for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Local snapshot only.
    CacheOnly,
    /// Remote API only.
    RemoteOnly,
    /// Local snapshot first, remote API on a miss.
    #[default]
    Either,
}

impl Strategy {
    /// Returns whether the strategy probes the local cache.
    #[must_use]
    pub const fn reads_cache(self) -> bool {
        matches!(self, Self::CacheOnly | Self::Either)
    }

    /// Returns whether the strategy may call the remote API.
    #[must_use]
    pub const fn reads_remote(self) -> bool {
        matches!(self, Self::RemoteOnly | Self::Either)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CacheOnly => write!(f, "cache-only"),
            Self::RemoteOnly => write!(f, "remote-only"),
            Self::Either => write!(f, "either"),
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cache" | "cache-only" => Ok(Self::CacheOnly),
            "remote" | "rest" | "remote-only" => Ok(Self::RemoteOnly),
            "either" => Ok(Self::Either),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

/// Which accessors a client handle exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientMode {
    /// Gateway-backed client with a local cache and the remote API.
    #[default]
    Gateway,
    /// Remote API only; no local cache exists.
    RestOnly,
}

impl ClientMode {
    #[must_use]
    pub const fn has_cache(self) -> bool {
        matches!(self, Self::Gateway)
    }

    /// Returns whether this mode can serve `strategy`.
    #[must_use]
    pub const fn supports(self, strategy: Strategy) -> bool {
        self.has_cache() || !strategy.reads_cache()
    }
}
