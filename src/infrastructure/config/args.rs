use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "guildgate",
    version,
    about = "Resolve Discord entities and check member permissions over the REST API",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Discord REST API root.
    #[arg(long, value_name = "URL", global = true)]
    pub api_base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS", global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Bot token.
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Effective permissions of a member, optionally in a channel.
    Permissions {
        guild: u64,
        member: u64,
        /// Channel or thread to apply overwrites from.
        #[arg(long)]
        channel: Option<u64>,
    },
    /// Senior role held by a member.
    TopRole { guild: u64, member: u64 },
    /// Whether `moderator` may kick `target`.
    CanKick {
        guild: u64,
        moderator: u64,
        target: u64,
    },
    /// Whether `moderator` may ban `target`.
    CanBan {
        guild: u64,
        moderator: u64,
        target: u64,
    },
    /// Whether `moderator` may time out `target`.
    CanTimeout {
        guild: u64,
        moderator: u64,
        target: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissions_with_channel() {
        let args = CliArgs::parse_from(["guildgate", "permissions", "100", "7", "--channel", "200"]);

        assert_eq!(
            args.command,
            Command::Permissions {
                guild: 100,
                member: 7,
                channel: Some(200)
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from(["guildgate", "can-ban", "1", "2", "3", "--log-level", "debug"]);

        assert_eq!(args.log_level, Some(LogLevel::Debug));
        assert!(matches!(args.command, Command::CanBan { target: 3, .. }));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        assert!(CliArgs::try_parse_from(["guildgate", "--timeout", "0", "top-role", "1", "2"]).is_err());
    }

    #[test]
    fn test_rejects_non_numeric_ids() {
        assert!(CliArgs::try_parse_from(["guildgate", "top-role", "abc", "1"]).is_err());
    }
}
