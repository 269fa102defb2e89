use log::{error, info};
use teloxide::prelude::*;
use teloxide::types::{ChatId, LinkPreviewOptions, MessageId, ParseMode};
use teloxide::{ApiError, RequestError};

use crate::verification::{Delivery, RenderInstruction};

/// puts render instructions on screen; failures are logged and dropped
pub struct RenderSender;

impl RenderSender {
    fn link_preview_disabled() -> LinkPreviewOptions {
        LinkPreviewOptions {
            is_disabled: true,
            url: None,
            prefer_small_media: false,
            prefer_large_media: false,
            show_above_text: false,
        }
    }

    /// telegram rejects edits that would leave the message as it is
    pub fn is_unchanged_edit(err: &RequestError) -> bool {
        matches!(err, RequestError::Api(ApiError::MessageNotModified))
    }

    /// edits `message_id` when the instruction asks for it and a message is known,
    /// otherwise sends a new message to `chat_id`
    pub async fn deliver(
        bot: &Bot,
        chat_id: ChatId,
        message_id: Option<MessageId>,
        render: &RenderInstruction,
    ) {
        let result = match (render.delivery, message_id) {
            (Delivery::Edit, Some(message_id)) => {
                Self::edit(bot, chat_id, message_id, render).await
            }
            _ => Self::send(bot, chat_id, render).await,
        };

        if let Err(e) = result {
            error!("Failed to deliver message to chat {}: {}", chat_id, e);
        }
    }

    async fn send(bot: &Bot, chat_id: ChatId, render: &RenderInstruction) -> ResponseResult<()> {
        let mut request = bot
            .send_message(chat_id, render.text.clone())
            .parse_mode(ParseMode::Html);
        if !render.keyboard.is_empty() {
            request = request.reply_markup(render.keyboard.to_markup());
        }
        if render.disable_link_preview {
            request = request.link_preview_options(Self::link_preview_disabled());
        }
        request.await?;
        Ok(())
    }

    async fn edit(
        bot: &Bot,
        chat_id: ChatId,
        message_id: MessageId,
        render: &RenderInstruction,
    ) -> ResponseResult<()> {
        let mut request = bot
            .edit_message_text(chat_id, message_id, render.text.clone())
            .parse_mode(ParseMode::Html);
        if !render.keyboard.is_empty() {
            request = request.reply_markup(render.keyboard.to_markup());
        }
        if render.disable_link_preview {
            request = request.link_preview_options(Self::link_preview_disabled());
        }

        match request.await {
            Ok(_) => Ok(()),
            // pressing "check again" with unchanged membership re-renders the same text
            Err(e) if Self::is_unchanged_edit(&e) => {
                info!("Message {} in chat {} already up to date", message_id.0, chat_id);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
