//! Domain error types.

mod resolve_error;
mod transport_error;

pub use resolve_error::{EntityKind, ResolveError, ResolveResult};
pub use transport_error::{RemoteError, TransportError};
