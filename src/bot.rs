use log::{error, info, warn};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use teloxide::utils::command::BotCommands;

use crate::config::GateConfig;
use crate::handlers::{CallbackHandler, CommandHandler};
use crate::membership::{audit_bot_permissions, MembershipSource};
use crate::verification::Gatekeeper;

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    #[command(description = "get started with the verification process")]
    Start,
    #[command(description = "check your channel membership status")]
    Verify,
    #[command(description = "show the help message")]
    Help,
}

pub struct TelegramBot {
    bot: Arc<Bot>,
    config: Arc<GateConfig>,
}

#[derive(Clone)]
pub struct BotContext {
    pub bot: Arc<Bot>,
    pub gatekeeper: Gatekeeper,
}

impl TelegramBot {
    pub fn new(bot_token: &str, config: GateConfig) -> Self {
        Self {
            bot: Arc::new(Bot::new(bot_token)),
            config: Arc::new(config),
        }
    }

    /// logs who we are and warns about channels where members cannot be read
    async fn check_setup(&self) {
        let me = match self.bot.get_me().await {
            Ok(me) => me,
            Err(e) => {
                error!("Failed to fetch bot info: {}", e);
                return;
            }
        };
        info!(
            "Bot initialized: @{} ({})",
            me.username(),
            me.user.first_name
        );

        // updates queued while the bot was down would replay stale /verify presses
        if let Err(e) = self.bot.delete_webhook().drop_pending_updates(true).await {
            warn!("Failed to drop pending updates: {}", e);
        }

        let issues = audit_bot_permissions(self.bot.as_ref(), me.user.id, &self.config.channels).await;
        if !issues.is_empty() {
            warn!("Bot configuration issues: {}", issues.join(", "));
        }
    }

    pub async fn run(&self) {
        info!("Starting Telegram bot...");

        self.check_setup().await;

        let source: Arc<dyn MembershipSource> = self.bot.clone();
        let ctx = BotContext {
            bot: self.bot.clone(),
            gatekeeper: Gatekeeper::new(self.config.clone(), source),
        };

        let handler = dptree::entry()
            .branch(Update::filter_callback_query().endpoint({
                let ctx = ctx.clone();
                move |query: CallbackQuery| {
                    let ctx = ctx.clone();
                    async move { CallbackHandler::handle_callback_query(ctx, query).await }
                }
            }))
            .branch(
                Update::filter_message()
                    .branch(dptree::entry().filter_command::<Command>().endpoint({
                        let ctx = ctx.clone();
                        move |msg: Message, cmd: Command| {
                            let ctx = ctx.clone();
                            async move { CommandHandler::handle_command(ctx, msg, cmd).await }
                        }
                    }))
                    .branch(
                        dptree::filter(|msg: Message| {
                            msg.text().map_or(false, |text| text.starts_with('/'))
                        })
                        .endpoint({
                            let ctx = ctx.clone();
                            move |msg: Message| {
                                let ctx = ctx.clone();
                                async move { CommandHandler::handle_unknown_command(ctx, msg).await }
                            }
                        }),
                    ),
            );

        info!("All handlers have been set up successfully");

        Dispatcher::builder(self.bot.clone(), handler)
            .error_handler(
                teloxide::error_handlers::LoggingErrorHandler::with_custom_text(
                    "An error from the update listener",
                ),
            )
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}
