use log::{info, warn};
use teloxide::prelude::*;

use crate::bot::{BotContext, Command};
use crate::handlers::RenderSender;
use crate::verification::GateEvent;

pub struct CommandHandler;

impl CommandHandler {
    pub async fn handle_command(ctx: BotContext, msg: Message, cmd: Command) -> ResponseResult<()> {
        let event = match cmd {
            Command::Start => GateEvent::Start,
            Command::Verify => GateEvent::VerifyRequest,
            Command::Help => GateEvent::Help,
        };

        Self::dispatch(ctx, msg, event).await
    }

    pub async fn handle_unknown_command(ctx: BotContext, msg: Message) -> ResponseResult<()> {
        info!(
            "Unknown command {:?} in chat {}",
            msg.text().unwrap_or_default(),
            msg.chat.id
        );
        Self::dispatch(ctx, msg, GateEvent::UnknownCommand).await
    }

    async fn dispatch(ctx: BotContext, msg: Message, event: GateEvent) -> ResponseResult<()> {
        let Some(user) = msg.from.as_ref() else {
            warn!("Ignoring {:?} without a sender in chat {}", event, msg.chat.id);
            return Ok(());
        };

        let render = ctx.gatekeeper.handle(event, user.id).await;
        RenderSender::deliver(&ctx.bot, msg.chat.id, None, &render).await;

        Ok(())
    }
}
