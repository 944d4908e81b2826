//! Cache-first entity resolution.
//!
//! A [`Resolver`] wraps the client's accessors. Picking a [`Strategy`]
//! yields a [`Resolution`] whose methods return `Ok(None)` on a confirmed
//! absence; `.required()` turns that into a typed not-found error.

mod filter;
mod query;
mod required;
mod resolution;

use std::sync::Arc;

use tracing::debug;

pub use filter::ChannelFilter;
pub use required::{Required, Resolvable};
pub use resolution::Resolution;

pub use crate::domain::strategy::{ClientMode, Strategy};

use query::BanQuery;

use crate::domain::entities::{Ban, EntityRef, Guild, User};
use crate::domain::errors::{ResolveError, ResolveResult};
use crate::domain::ports::{CachePort, RemotePort};

/// Client handle used for resolution.
#[derive(Clone)]
pub struct Resolver {
    cache: Option<Arc<dyn CachePort>>,
    remote: Arc<dyn RemotePort>,
}

impl Resolver {
    /// Creates a resolver for a gateway client with a local cache.
    #[must_use]
    pub fn new(cache: Arc<dyn CachePort>, remote: Arc<dyn RemotePort>) -> Self {
        Self {
            cache: Some(cache),
            remote,
        }
    }

    /// Creates a resolver for a client without a local cache.
    #[must_use]
    pub fn rest_only(remote: Arc<dyn RemotePort>) -> Self {
        Self {
            cache: None,
            remote,
        }
    }

    /// Returns which accessors this client exposes.
    #[must_use]
    pub fn mode(&self) -> ClientMode {
        if self.cache.is_some() {
            ClientMode::Gateway
        } else {
            ClientMode::RestOnly
        }
    }

    /// Best strategy the client supports: cache first when it has one.
    #[must_use]
    pub fn preferred_strategy(&self) -> Strategy {
        if self.mode().has_cache() {
            Strategy::Either
        } else {
            Strategy::RemoteOnly
        }
    }

    /// Binds a strategy.
    ///
    /// # Errors
    /// Returns [`ResolveError::InvalidClientMode`] when the strategy reads a
    /// cache this client does not have.
    pub fn with_strategy(&self, strategy: Strategy) -> ResolveResult<Resolution<'_>> {
        if !self.mode().supports(strategy) {
            debug!(%strategy, "strategy needs a cache, client is remote-only");
            return Err(ResolveError::InvalidClientMode { strategy });
        }

        Ok(Resolution::new(
            strategy,
            self.cache.as_deref(),
            self.remote.as_ref(),
        ))
    }

    /// Cache-only resolution.
    ///
    /// # Errors
    /// Returns [`ResolveError::InvalidClientMode`] for a remote-only client.
    pub fn cached(&self) -> ResolveResult<Resolution<'_>> {
        self.with_strategy(Strategy::CacheOnly)
    }

    /// Remote-only resolution; available in every client mode.
    #[must_use]
    pub fn rest(&self) -> Resolution<'_> {
        Resolution::new(Strategy::RemoteOnly, None, self.remote.as_ref())
    }

    /// Cache-first resolution with remote fallback.
    ///
    /// # Errors
    /// Returns [`ResolveError::InvalidClientMode`] for a remote-only client.
    pub fn either(&self) -> ResolveResult<Resolution<'_>> {
        self.with_strategy(Strategy::Either)
    }

    /// Fetches a ban. Bans are never cached, so this always goes remote.
    ///
    /// # Errors
    /// Returns transport failures from the remote API.
    pub async fn ban(
        &self,
        guild: impl Into<EntityRef<'_, Guild>>,
        user: impl Into<EntityRef<'_, User>>,
    ) -> ResolveResult<Option<Ban>> {
        let (Some(guild_id), Some(user_id)) = (guild.into().normalize(), user.into().normalize())
        else {
            return Ok(None);
        };

        self.rest().run(BanQuery { guild_id, user_id }).await
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("mode", &self.mode())
            .finish_non_exhaustive()
    }
}
