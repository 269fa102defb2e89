use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use teloxide::types::{ChatMemberStatus, UserId};
use tg_gatekeeper::membership::{MembershipError, MembershipSource};

/// scripted membership lookups that record every query
#[derive(Debug, Clone, Default)]
pub struct MockMembershipSource {
    /// answers keyed by channel identifier; unknown channels answer `Left`
    responses: Arc<Mutex<HashMap<String, Result<ChatMemberStatus, MembershipError>>>>,
    /// (channel, user) pairs in query order
    pub queries: Arc<Mutex<Vec<(String, UserId)>>>,
}

impl MockMembershipSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(self, channel: &str, status: ChatMemberStatus) -> Self {
        self.set_status(channel, status);
        self
    }

    pub fn with_error(self, channel: &str, error: MembershipError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(channel.to_string(), Err(error));
        self
    }

    /// changes an answer after the source has been handed out
    pub fn set_status(&self, channel: &str, status: ChatMemberStatus) {
        self.responses
            .lock()
            .unwrap()
            .insert(channel.to_string(), Ok(status));
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn queried_channels(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .map(|(channel, _)| channel.clone())
            .collect()
    }
}

#[async_trait]
impl MembershipSource for MockMembershipSource {
    async fn member_status(
        &self,
        channel: &str,
        user_id: UserId,
    ) -> Result<ChatMemberStatus, MembershipError> {
        self.queries
            .lock()
            .unwrap()
            .push((channel.to_string(), user_id));

        self.responses
            .lock()
            .unwrap()
            .get(channel)
            .cloned()
            .unwrap_or(Ok(ChatMemberStatus::Left))
    }
}
