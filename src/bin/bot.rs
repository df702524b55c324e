use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::Interaction;
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use jubilee::commands::handlers::respond;
use jubilee::commands::{
    register_global_commands, register_guild_commands, BirthdayHandler, CommandContext,
    CommandRegistry, RosterHandler, UtilityHandler,
};
use jubilee::core::Config;
use jubilee::features::birthdays::{BirthdayNotifier, BirthdayScheduler, ChannelNotifier};
use jubilee::features::get_bot_version;
use jubilee::features::roster::{JsonFileBackend, MemoryBackend, RosterBackend, RosterStore};

struct Handler {
    registry: CommandRegistry,
    context: Arc<CommandContext>,
    guild_id: Option<GuildId>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected (v{})", ready.user.name, get_bot_version());

        let result = match self.guild_id {
            Some(guild_id) => register_guild_commands(&ctx, guild_id).await,
            None => register_global_commands(&ctx).await,
        };
        if let Err(e) = result {
            error!("Failed to register slash commands: {e}");
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::ApplicationCommand(command) = interaction {
            let name = command.data.name.clone();
            let caller = command.user.name.clone();

            let Some(handler) = self.registry.get(&name) else {
                warn!("No handler registered for /{name}");
                return;
            };

            // Static allow-list gate for roster mutations, in front of the store
            if self.registry.is_admin_only(&name) && !self.context.config.is_admin(&caller) {
                info!("Denied /{name} for non-admin {caller}");
                if let Err(e) =
                    respond(&ctx, &command, "❌ Only roster admins can do that.").await
                {
                    error!("Failed to send denial reply: {e}");
                }
                return;
            }

            if let Err(e) = handler.handle(self.context.clone(), &ctx, &command).await {
                error!("Command /{name} from {caller} failed: {e}");
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting birthday bot v{}...", get_bot_version());

    let backend: Arc<dyn RosterBackend> = match &config.roster_path {
        Some(path) => {
            info!("Mirroring roster to {path}");
            Arc::new(JsonFileBackend::new(path))
        }
        None => {
            warn!("ROSTER_PATH not set - the roster will not survive restarts");
            Arc::new(MemoryBackend)
        }
    };
    let store = RosterStore::load(backend).await;

    let mut registry = CommandRegistry::new();
    registry.register(Arc::new(UtilityHandler));
    registry.register(Arc::new(BirthdayHandler));
    registry.register(Arc::new(RosterHandler));

    if config.admin_handles.is_empty() {
        warn!("ADMIN_HANDLES is empty - /add and /remove will be denied for everyone");
    }

    // Parse guild ID if provided for development mode
    let guild_id = config
        .discord_guild_id
        .as_ref()
        .and_then(|id| id.parse::<u64>().ok())
        .map(GuildId);

    let context = Arc::new(CommandContext::new(store.clone(), config.clone()));
    let handler = Handler {
        registry,
        context,
        guild_id,
    };

    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");

    // Start the daily birthday scheduler
    let scheduler = Arc::new(BirthdayScheduler::new(
        store,
        config.timezone,
        config.announce_time,
        config.birthday_image.clone(),
    ));
    let notifier: Arc<dyn BirthdayNotifier> = Arc::new(ChannelNotifier::new(
        client.cache_and_http.http.clone(),
        config.birthday_channel_id,
    ));
    tokio::spawn(async move {
        scheduler.run(notifier).await;
    });

    client
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("Client error: {e}"))?;
    Ok(())
}
