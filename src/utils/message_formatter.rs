use html_escape;

use crate::config::{Channel, ExclusiveReward};

pub struct MessageFormatter;

impl MessageFormatter {
    pub fn escape_html(text: &str) -> String {
        html_escape::encode_text(text).to_string()
    }

    fn escape_attribute(text: &str) -> String {
        html_escape::encode_double_quoted_attribute(text).to_string()
    }

    pub fn html_link(label: &str, url: &str) -> String {
        format!(
            "<a href=\"{}\">{}</a>",
            Self::escape_attribute(url),
            Self::escape_html(label)
        )
    }

    /// one channel per line, linked to its join url when `with_links` is set
    pub fn format_channel_list(channels: &[Channel], with_links: bool) -> String {
        channels
            .iter()
            .map(|channel| {
                let label = if with_links {
                    Self::html_link(&channel.name, &channel.join_url)
                } else {
                    Self::escape_html(&channel.name)
                };
                format!("🔥 {} ⚡", label)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_reward_link(reward: &ExclusiveReward) -> String {
        Self::html_link(&reward.name, &reward.url)
    }
}
