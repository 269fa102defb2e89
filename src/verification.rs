use log::info;
use std::sync::Arc;
use teloxide::types::UserId;

use crate::config::{Channel, GateConfig};
use crate::keyboard::{Button, CallbackAction, Keyboard};
use crate::membership::{classify, MembershipResult, MembershipSource};
use crate::utils::MessageFormatter;

/// what the user sees after a verification pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationState {
    /// every required channel joined, the reward is revealed
    Complete,
    NoneJoined,
    Partial {
        joined: usize,
        total: usize,
        remaining: Vec<Channel>,
    },
    /// membership could not be checked at all, the manual override is offered
    Error,
}

impl VerificationState {
    pub fn select(result: &MembershipResult) -> Self {
        if result.is_complete() {
            VerificationState::Complete
        } else if result.all_unverified() {
            VerificationState::Error
        } else if result.joined.is_empty() {
            VerificationState::NoneJoined
        } else {
            VerificationState::Partial {
                joined: result.joined.len(),
                total: result.total(),
                remaining: result.not_joined.clone(),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateEvent {
    Start,
    Help,
    /// `/verify` command
    VerifyRequest,
    /// "check again" / "verify membership" button
    CheckAgain,
    /// "I've joined all channels" button
    ForceOverride,
    UnknownCommand,
}

impl GateEvent {
    pub fn from_callback(action: CallbackAction) -> Self {
        match action {
            CallbackAction::Verify => GateEvent::CheckAgain,
            CallbackAction::ForceVerify => GateEvent::ForceOverride,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// reply with a new message
    Send,
    /// replace the message the pressed button belongs to
    Edit,
}

/// text and keyboard to put on screen, always HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderInstruction {
    pub text: String,
    pub keyboard: Keyboard,
    pub delivery: Delivery,
    pub disable_link_preview: bool,
    /// toast shown when answering the callback query
    pub callback_notice: Option<String>,
    /// set when the text comes from a verification pass
    pub state: Option<VerificationState>,
}

impl RenderInstruction {
    fn new(text: String, keyboard: Keyboard, delivery: Delivery) -> Self {
        Self {
            text,
            keyboard,
            delivery,
            disable_link_preview: true,
            callback_notice: None,
            state: None,
        }
    }
}

/// membership check plus reply selection, shared by all handlers
#[derive(Clone)]
pub struct Gatekeeper {
    config: Arc<GateConfig>,
    source: Arc<dyn MembershipSource>,
}

impl Gatekeeper {
    pub fn new(config: Arc<GateConfig>, source: Arc<dyn MembershipSource>) -> Self {
        Self { config, source }
    }

    pub async fn handle(&self, event: GateEvent, user_id: UserId) -> RenderInstruction {
        match event {
            GateEvent::Start => self.on_start(user_id),
            GateEvent::Help => self.on_help(),
            GateEvent::VerifyRequest => self.on_verify_request(user_id).await,
            GateEvent::CheckAgain => self.on_check_again_callback(user_id).await,
            GateEvent::ForceOverride => self.on_force_override_callback(user_id),
            GateEvent::UnknownCommand => self.on_unknown_command(),
        }
    }

    pub fn on_start(&self, user_id: UserId) -> RenderInstruction {
        info!("User {} started the bot", user_id.0);

        let messages = &self.config.messages;
        let channel_list = MessageFormatter::format_channel_list(&self.config.channels, true);
        let keyboard = Keyboard::new().single(Button::callback(
            messages.buttons.verify.clone(),
            CallbackAction::Verify,
        ));

        RenderInstruction::new(messages.welcome(&channel_list), keyboard, Delivery::Send)
    }

    pub fn on_help(&self) -> RenderInstruction {
        let mut render = RenderInstruction::new(
            self.config.messages.help.clone(),
            Keyboard::new(),
            Delivery::Send,
        );
        render.disable_link_preview = false;
        render
    }

    pub fn on_unknown_command(&self) -> RenderInstruction {
        let mut render = RenderInstruction::new(
            self.config.messages.unknown_command.clone(),
            Keyboard::new(),
            Delivery::Send,
        );
        render.disable_link_preview = false;
        render
    }

    pub async fn on_verify_request(&self, user_id: UserId) -> RenderInstruction {
        self.verify(user_id, Delivery::Send).await
    }

    pub async fn on_check_again_callback(&self, user_id: UserId) -> RenderInstruction {
        self.verify(user_id, Delivery::Edit).await
    }

    /// skips the membership check entirely; the user's word is taken as is
    pub fn on_force_override_callback(&self, user_id: UserId) -> RenderInstruction {
        info!(
            "User {} manually verified - granting access to exclusive channel",
            user_id.0
        );

        let mut render = self.render(&VerificationState::Complete, Delivery::Edit);
        render.callback_notice = Some(self.config.messages.force_verify_toast.clone());
        render
    }

    /// interim text shown while a callback-triggered check is running
    pub fn verification_in_progress(&self) -> RenderInstruction {
        RenderInstruction::new(
            self.config.messages.verification_start.clone(),
            Keyboard::new(),
            Delivery::Edit,
        )
    }

    pub async fn check_membership(&self, user_id: UserId) -> MembershipResult {
        info!("Verifying membership for user {}", user_id.0);
        classify(self.source.as_ref(), user_id, &self.config.channels).await
    }

    async fn verify(&self, user_id: UserId, delivery: Delivery) -> RenderInstruction {
        let result = self.check_membership(user_id).await;
        let state = VerificationState::select(&result);

        match &state {
            VerificationState::Complete => {
                info!("User {} successfully verified all channels", user_id.0)
            }
            VerificationState::Error => info!(
                "Membership of user {} could not be checked in any channel",
                user_id.0
            ),
            _ => info!(
                "User {} joined {}/{} required channels",
                user_id.0,
                result.joined.len(),
                result.total()
            ),
        }

        self.render(&state, delivery)
    }

    /// one renderer per state
    pub fn render(&self, state: &VerificationState, delivery: Delivery) -> RenderInstruction {
        let messages = &self.config.messages;
        let buttons = &messages.buttons;

        let (text, keyboard, disable_link_preview) = match state {
            VerificationState::Complete => {
                let reward_link = MessageFormatter::format_reward_link(&self.config.reward);
                let keyboard = Keyboard::new().single(Button::url(
                    buttons.join_reward.clone(),
                    self.config.reward.url.clone(),
                ));
                (messages.verification_complete(&reward_link), keyboard, true)
            }
            VerificationState::NoneJoined => {
                let channel_list =
                    MessageFormatter::format_channel_list(&self.config.channels, true);
                let keyboard = self
                    .join_buttons(&self.config.channels)
                    .single(Button::callback(
                        buttons.verify_again.clone(),
                        CallbackAction::Verify,
                    ));
                (messages.no_membership(&channel_list), keyboard, true)
            }
            VerificationState::Partial {
                joined,
                total,
                remaining,
            } => {
                let remaining_list = MessageFormatter::format_channel_list(remaining, true);
                let keyboard = self.join_buttons(remaining).single(Button::callback(
                    buttons.verify_again.clone(),
                    CallbackAction::Verify,
                ));
                (
                    messages.partial_verification(*joined, *total, &remaining_list),
                    keyboard,
                    true,
                )
            }
            VerificationState::Error => {
                let keyboard = self
                    .join_buttons(&self.config.channels)
                    .single(Button::callback(
                        buttons.force_verify.clone(),
                        CallbackAction::ForceVerify,
                    ))
                    .single(Button::callback(
                        buttons.retry_auto_verify.clone(),
                        CallbackAction::Verify,
                    ));
                (messages.verification_error.clone(), keyboard, false)
            }
        };

        let mut render = RenderInstruction::new(text, keyboard, delivery);
        render.disable_link_preview = disable_link_preview;
        render.state = Some(state.clone());
        render
    }

    fn join_buttons(&self, channels: &[Channel]) -> Keyboard {
        channels.iter().fold(Keyboard::new(), |keyboard, channel| {
            keyboard.single(Button::url(
                self.config.messages.join_channel_label(&channel.name),
                channel.join_url.clone(),
            ))
        })
    }
}
