//! Discord REST API adapter.

mod client;
mod dto;

pub use client::{DISCORD_API_BASE, DiscordRestClient};
