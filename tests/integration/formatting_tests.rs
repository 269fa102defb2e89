use teloxide::{ApiError, RequestError};
use tg_gatekeeper::config::{Channel, ExclusiveReward, GateConfig};
use tg_gatekeeper::handlers::RenderSender;
use tg_gatekeeper::keyboard::{Button, CallbackAction, Keyboard};
use tg_gatekeeper::utils::MessageFormatter;

use super::test_utils::channel;

#[test]
fn test_channel_list_links_each_channel_on_its_own_line() {
    let channels = vec![channel("a"), channel("b")];

    let linked = MessageFormatter::format_channel_list(&channels, true);
    let plain = MessageFormatter::format_channel_list(&channels, false);

    assert_eq!(
        linked,
        "🔥 <a href=\"https://t.me/channel_a\">Channel A</a> ⚡\n\
         🔥 <a href=\"https://t.me/channel_b\">Channel B</a> ⚡"
    );
    assert_eq!(plain, "🔥 Channel A ⚡\n🔥 Channel B ⚡");
    assert_eq!(MessageFormatter::format_channel_list(&[], true), "");
}

#[test]
fn test_names_are_escaped_for_html() {
    let channels = vec![Channel::new(
        "Tips & <Tricks>",
        "@tips_tricks",
        "https://t.me/tips_tricks",
    )];

    let list = MessageFormatter::format_channel_list(&channels, true);

    assert!(list.contains("Tips &amp; &lt;Tricks&gt;"));

    let reward = ExclusiveReward {
        name: "VIP \"Room\"".to_string(),
        url: "https://t.me/+a\"b".to_string(),
    };
    let link = MessageFormatter::format_reward_link(&reward);
    assert!(link.starts_with("<a href=\"https://t.me/+a&quot;b\">"));
}

#[test]
fn test_callback_data_is_matched_exactly() {
    assert_eq!(CallbackAction::from_data("verify"), Some(CallbackAction::Verify));
    assert_eq!(
        CallbackAction::from_data("force_verify"),
        Some(CallbackAction::ForceVerify)
    );
    assert_eq!(CallbackAction::from_data("verify_now"), None);
    assert_eq!(CallbackAction::from_data(""), None);
    assert_eq!(
        CallbackAction::from_data(CallbackAction::ForceVerify.as_data()),
        Some(CallbackAction::ForceVerify)
    );
}

#[test]
fn test_keyboard_converts_to_inline_markup() {
    let keyboard = Keyboard::new()
        .single(Button::url("Join", "https://t.me/channel_a"))
        .single(Button::url("Broken", "not a url"))
        .single(Button::callback("Check", CallbackAction::Verify));

    let markup = keyboard.to_markup();

    // the row with the unparsable url is dropped
    assert_eq!(markup.inline_keyboard.len(), 2);
    assert_eq!(markup.inline_keyboard[0][0].text, "Join");
    assert_eq!(markup.inline_keyboard[1][0].text, "Check");
    assert!(Keyboard::new().is_empty());
}

#[test]
fn test_only_not_modified_edits_are_ignored() {
    assert!(RenderSender::is_unchanged_edit(&RequestError::Api(
        ApiError::MessageNotModified
    )));
    assert!(!RenderSender::is_unchanged_edit(&RequestError::Api(
        ApiError::MessageToEditNotFound
    )));
    assert!(!RenderSender::is_unchanged_edit(&RequestError::Api(
        ApiError::Unknown("Bad Request: message is not modified elsewhere".to_string())
    )));
}

#[test]
fn test_every_configured_join_url_becomes_a_button() {
    let config = GateConfig::from_json(
        r#"{"channels": [
            {"name": "Rust", "identifier": "@rustlang", "join_url": "https://t.me/rustlang"},
            {"name": "Tokio", "identifier": "@tokio_rs", "join_url": "https://t.me/tokio_rs?start=1"}
        ]}"#,
    )
    .expect("Failed to parse config");

    let keyboard = config.channels.iter().fold(Keyboard::new(), |keyboard, channel| {
        keyboard.single(Button::url(channel.name.clone(), channel.join_url.clone()))
    });

    assert_eq!(keyboard.to_markup().inline_keyboard.len(), config.channels.len());
}
