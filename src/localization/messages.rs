use serde::{Deserialize, Serialize};

/// reply templates, all rendered with HTML parse mode
///
/// placeholders: `{channels}` (formatted channel list), `{reward}` (reward link),
/// `{joined}` / `{total}` (progress counters)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub welcome: String,
    pub help: String,
    pub unknown_command: String,
    pub verification_start: String,
    pub verification_complete: String,
    pub no_membership: String,
    pub partial_verification: String,
    pub verification_error: String,
    pub force_verify_toast: String,
    pub buttons: ButtonLabels,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonLabels {
    pub verify: String,
    pub verify_again: String,
    /// prefix for the per-channel join buttons, followed by the channel name
    pub join_channel: String,
    pub join_reward: String,
    pub force_verify: String,
    pub retry_auto_verify: String,
}

// =============================================================================
// Defaults
// =============================================================================

impl Default for Messages {
    fn default() -> Self {
        Self {
            welcome: "🎯 ═══════════════════════════════\n\
                🔥 Join channels to receive access links WhatsApp &amp; Telegram OTP groups - fast and verified! 🚀\n\
                ═══════════════════════════════ 🎯\n\n\
                🌟 Join These Channels For Exclusive Access:\n\n\
                {channels}\n\n\
                💥 Ready to unlock premium content? Click 🔍 Verify Membership below!"
                .to_string(),
            help: "🤖 <b>Bot Commands:</b>\n\n\
                • /start - Get started with verification process\n\
                • /verify - Check your channel membership status\n\
                • /help - Show this help message\n\n\
                📝 <b>How to Get Access:</b>\n\
                1. Use /start to see required channels\n\
                2. Join all required channels\n\
                3. Click 🔍 Verify Membership\n\
                4. Get your exclusive access link!\n\n\
                ⚡ Need help? Just use these commands!"
                .to_string(),
            unknown_command: "❓ Unknown command. Use /help to see available commands."
                .to_string(),
            verification_start: "🔍 Checking your membership status...".to_string(),
            verification_complete: "🎊 ═══════════════════════════════\n      \
                ✅ VERIFICATION SUCCESS ✅\n\
                ═══════════════════════════════ 🎊\n\n\
                🔓 ACCESS GRANTED! 🔓\n\n\
                💎 Your Exclusive Channel Link:\n\
                {reward}\n\n\
                🌟 Welcome to Our Premium Community! 🌟"
                .to_string(),
            no_membership: "🚫 ACCESS DENIED 🚫\n\n\
                🔥 Join All Channels First:\n\n\
                {channels}\n\n\
                ⚡ Then click 'Verify Again' for premium access!"
                .to_string(),
            partial_verification: "📊 PROGRESS: {joined}/{total} Channels Joined ✨\n\n\
                🔥 Remaining Channels to Join:\n\
                {channels}\n\n\
                ⚡ Almost there! Join the remaining channels to unlock premium access!"
                .to_string(),
            verification_error: "⚠️ Cannot check membership automatically due to channel privacy settings.\n\n\
                <b>IMPORTANT: Follow these steps to get your exclusive link:</b>\n\n\
                1. Join ALL required channels using the blue \"Join\" buttons below\n\
                2. After joining all channels, click the GREEN button:\n   \
                \"✅ I've Joined All Channels - Get Access Now!\"\n\
                3. You will immediately receive the exclusive channel link\n\n\
                <b>Already joined all channels?</b>\n\
                Click the GREEN button below to get instant access!"
                .to_string(),
            force_verify_toast: "🎉 SUCCESS! Here's your exclusive channel link!".to_string(),
            buttons: ButtonLabels::default(),
        }
    }
}

impl Default for ButtonLabels {
    fn default() -> Self {
        Self {
            verify: "🔍 Verify Membership".to_string(),
            verify_again: "🔍 Verify Again".to_string(),
            join_channel: "📱 Join".to_string(),
            join_reward: "🚀 Join Now Whatsapp/Telegram OTP Grup".to_string(),
            force_verify: "✅ I've Joined All Channels - Get Access Now!".to_string(),
            retry_auto_verify: "🔄 Try Auto-Verify Again".to_string(),
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

impl Messages {
    pub fn welcome(&self, channel_list: &str) -> String {
        self.welcome.replace("{channels}", channel_list)
    }

    pub fn verification_complete(&self, reward_link: &str) -> String {
        self.verification_complete.replace("{reward}", reward_link)
    }

    pub fn no_membership(&self, channel_list: &str) -> String {
        self.no_membership.replace("{channels}", channel_list)
    }

    pub fn partial_verification(&self, joined: usize, total: usize, remaining: &str) -> String {
        self.partial_verification
            .replace("{joined}", &joined.to_string())
            .replace("{total}", &total.to_string())
            .replace("{channels}", remaining)
    }

    pub fn join_channel_label(&self, channel_name: &str) -> String {
        format!("{} {}", self.buttons.join_channel, channel_name)
    }
}
