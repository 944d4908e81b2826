//! Ports to the external collaborators.

mod cache_port;
mod remote_port;

pub use cache_port::CachePort;
pub use remote_port::RemotePort;

#[cfg(test)]
pub mod mocks {
    pub use super::remote_port::MockRemotePort;
}
