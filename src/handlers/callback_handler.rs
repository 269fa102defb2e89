use log::{error, info};
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChatId, MaybeInaccessibleMessage, MessageId};

use crate::bot::BotContext;
use crate::handlers::RenderSender;
use crate::keyboard::CallbackAction;
use crate::verification::GateEvent;

pub struct CallbackHandler;

impl CallbackHandler {
    fn get_chat_and_message_id(message: &MaybeInaccessibleMessage) -> (ChatId, MessageId) {
        match message {
            MaybeInaccessibleMessage::Regular(msg) => (msg.chat.id, msg.id),
            MaybeInaccessibleMessage::Inaccessible(msg) => (msg.chat.id, msg.message_id),
        }
    }

    pub async fn handle_callback_query(
        ctx: BotContext,
        query: CallbackQuery,
    ) -> ResponseResult<()> {
        let action = query.data.as_deref().and_then(CallbackAction::from_data);

        let Some(action) = action else {
            info!(
                "Ignoring unknown callback data {:?} from user {}",
                query.data, query.from.id.0
            );
            Self::answer(&ctx, &query, None).await;
            return Ok(());
        };

        // buttons on inline-mode messages carry no chat, fall back to the user's private chat
        let (chat_id, message_id) = match &query.message {
            Some(message) => {
                let (chat_id, message_id) = Self::get_chat_and_message_id(message);
                (chat_id, Some(message_id))
            }
            None => (ChatId::from(query.from.id), None),
        };

        match GateEvent::from_callback(action) {
            GateEvent::ForceOverride => {
                let render = ctx.gatekeeper.on_force_override_callback(query.from.id);
                Self::answer(&ctx, &query, render.callback_notice.as_deref()).await;
                RenderSender::deliver(&ctx.bot, chat_id, message_id, &render).await;
            }
            event => {
                Self::answer(&ctx, &query, None).await;
                if message_id.is_some() {
                    RenderSender::deliver(
                        &ctx.bot,
                        chat_id,
                        message_id,
                        &ctx.gatekeeper.verification_in_progress(),
                    )
                    .await;
                }

                let render = ctx.gatekeeper.handle(event, query.from.id).await;
                RenderSender::deliver(&ctx.bot, chat_id, message_id, &render).await;
            }
        }

        Ok(())
    }

    async fn answer(ctx: &BotContext, query: &CallbackQuery, notice: Option<&str>) {
        let request = ctx.bot.answer_callback_query(&query.id);
        let result = match notice {
            Some(text) => request.text(text).await,
            None => request.await,
        };

        if let Err(e) = result {
            error!("Failed to answer callback query {}: {}", query.id, e);
        }
    }
}
