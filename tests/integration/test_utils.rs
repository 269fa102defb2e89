use std::sync::Arc;
use teloxide::types::{ChatMemberStatus, UserId};
use tg_gatekeeper::config::{Channel, ExclusiveReward, GateConfig};
use tg_gatekeeper::keyboard::{Button, CallbackAction};
use tg_gatekeeper::localization::Messages;
use tg_gatekeeper::verification::{Gatekeeper, RenderInstruction};

use super::mock_bot::MockMembershipSource;

pub const TEST_USER: UserId = UserId(4242);

pub fn channel(letter: &str) -> Channel {
    Channel::new(
        &format!("Channel {}", letter.to_uppercase()),
        &format!("@channel_{}", letter),
        &format!("https://t.me/channel_{}", letter),
    )
}

/// config requiring channels A, B and C
pub fn three_channel_config() -> GateConfig {
    config_with_channels(&["a", "b", "c"])
}

pub fn config_with_channels(letters: &[&str]) -> GateConfig {
    GateConfig {
        channels: letters.iter().map(|letter| channel(letter)).collect(),
        reward: ExclusiveReward {
            name: "Secret Club".to_string(),
            url: "https://t.me/+secretclub".to_string(),
        },
        messages: Messages::default(),
    }
}

/// mock source where the user is a plain member of the given channels
pub fn source_with_members(identifiers: &[&str]) -> MockMembershipSource {
    identifiers
        .iter()
        .fold(MockMembershipSource::new(), |source, identifier| {
            source.with_status(identifier, ChatMemberStatus::Member)
        })
}

pub fn gatekeeper(config: GateConfig, source: &MockMembershipSource) -> Gatekeeper {
    Gatekeeper::new(Arc::new(config), Arc::new(source.clone()))
}

/// utility functions for render assertions
pub struct RenderAssertions;

impl RenderAssertions {
    pub fn url_button_labels(render: &RenderInstruction) -> Vec<String> {
        render
            .keyboard
            .url_buttons()
            .map(|button| button.label().to_string())
            .collect()
    }

    pub fn callback_actions(render: &RenderInstruction) -> Vec<CallbackAction> {
        render
            .keyboard
            .buttons()
            .filter_map(|button| match button {
                Button::Callback { action, .. } => Some(*action),
                Button::Url { .. } => None,
            })
            .collect()
    }

    pub fn assert_one_button_per_row(render: &RenderInstruction) {
        for row in &render.keyboard.rows {
            assert_eq!(row.len(), 1, "Expected one button per row, got {:?}", row);
        }
    }
}
