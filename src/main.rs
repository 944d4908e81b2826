use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use guildgate::application::{ModerationService, PermissionService, Required, Resolver};
use guildgate::domain::entities::{BotToken, ChannelId, GuildId, UserId};
use guildgate::infrastructure::{AppConfig, CliArgs, Command, DiscordRestClient, StorageManager};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = match &args.config {
        Some(path) => StorageManager::with_dir(path.parent().map(Into::into).unwrap_or_default()),
        None => StorageManager::new()?,
    };

    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    config.validate()?;
    Ok(config)
}

fn create_services(args: &mut CliArgs, config: &AppConfig) -> Result<ModerationService> {
    let raw = args
        .token
        .take()
        .ok_or_else(|| eyre!("no bot token, pass --token or set DISCORD_TOKEN"))?;
    let token = BotToken::new(raw).ok_or_else(|| eyre!("bot token is malformed"))?;

    debug!(token = %token, base_url = %config.api_base_url, "Creating REST client");

    let client = DiscordRestClient::with_base_url(token, &config.api_base_url, config.request_timeout())?;
    let resolver = Resolver::rest_only(Arc::new(client));

    Ok(ModerationService::new(PermissionService::new(resolver)))
}

async fn run(command: Command, moderation: &ModerationService) -> Result<()> {
    let permissions = moderation.permissions();

    match command {
        Command::Permissions {
            guild,
            member,
            channel,
        } => {
            let (guild, member) = (GuildId(guild), UserId(member));
            let computed = match channel {
                Some(channel) => {
                    permissions
                        .channel_permissions(guild, member, ChannelId(channel))
                        .await?
                }
                None => permissions.guild_permissions(guild, member).await?,
            };

            println!("{} ({computed:?})", computed.to_wire());
        }
        Command::TopRole { guild, member } => {
            let resolution = permissions.resolution()?;
            let guild = GuildId(guild);
            let member = resolution.member(guild, UserId(member)).await.required()?;
            let role = resolution.top_role(guild, &member).await.required()?;

            println!("{} {} (position {})", role.id, role.name, role.position);
        }
        Command::CanKick {
            guild,
            moderator,
            target,
        } => {
            let allowed = moderation
                .can_kick(GuildId(guild), UserId(moderator), UserId(target))
                .await?;
            println!("{allowed}");
        }
        Command::CanBan {
            guild,
            moderator,
            target,
        } => {
            let allowed = moderation
                .can_ban(GuildId(guild), UserId(moderator), UserId(target))
                .await?;
            println!("{allowed}");
        }
        Command::CanTimeout {
            guild,
            moderator,
            target,
        } => {
            let allowed = moderation
                .can_timeout(GuildId(guild), UserId(moderator), UserId(target))
                .await?;
            println!("{allowed}");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let mut args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = guildgate::VERSION, "Starting {}", guildgate::NAME);

    let moderation = create_services(&mut args, &config)?;

    run(args.command, &moderation).await
}
