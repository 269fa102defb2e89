use async_trait::async_trait;
use log::{error, info, warn};
use std::error::Error;
use std::fmt;
use teloxide::prelude::*;
use teloxide::types::{ChatMemberStatus, UserId};
use teloxide::{ApiError, RequestError};

use crate::config::Channel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// the channel hides its member list from the bot
    MemberListInaccessible,
    UserNotFound,
    BadRequest(String),
    Network(String),
    Other(String),
}

impl MembershipError {
    /// sorts a raw api error text into a kind, the api only reports these as strings
    pub fn from_message(message: &str) -> Self {
        let lowered = message.to_lowercase();
        if lowered.contains("member list is inaccessible") {
            MembershipError::MemberListInaccessible
        } else if lowered.contains("user not found") {
            MembershipError::UserNotFound
        } else if lowered.contains("bad request") {
            MembershipError::BadRequest(message.to_string())
        } else {
            MembershipError::Other(message.to_string())
        }
    }
}

impl fmt::Display for MembershipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipError::MemberListInaccessible => write!(f, "member list is inaccessible"),
            MembershipError::UserNotFound => write!(f, "user not found"),
            MembershipError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            MembershipError::Network(msg) => write!(f, "network error: {}", msg),
            MembershipError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for MembershipError {}

impl From<RequestError> for MembershipError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Network(e) => MembershipError::Network(e.to_string()),
            RequestError::Api(ApiError::UserNotFound) => MembershipError::UserNotFound,
            // "member list is inaccessible" has no dedicated variant
            RequestError::Api(ApiError::Unknown(message)) => MembershipError::from_message(&message),
            other => MembershipError::from_message(&other.to_string()),
        }
    }
}

/// where membership statuses come from; the live implementation is the bot itself
#[async_trait]
pub trait MembershipSource: Send + Sync {
    async fn member_status(
        &self,
        channel: &str,
        user_id: UserId,
    ) -> Result<ChatMemberStatus, MembershipError>;
}

#[async_trait]
impl MembershipSource for Bot {
    async fn member_status(
        &self,
        channel: &str,
        user_id: UserId,
    ) -> Result<ChatMemberStatus, MembershipError> {
        let member = self.get_chat_member(channel.to_string(), user_id).await?;
        Ok(member.status())
    }
}

/// outcome of one verification pass, in the configured channel order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipResult {
    pub joined: Vec<Channel>,
    pub not_joined: Vec<Channel>,
    /// how many of `not_joined` are there because the lookup failed
    pub unverified: usize,
}

impl MembershipResult {
    pub fn total(&self) -> usize {
        self.joined.len() + self.not_joined.len()
    }

    pub fn is_complete(&self) -> bool {
        self.not_joined.is_empty()
    }

    /// every lookup failed, so nothing is known about the user
    pub fn all_unverified(&self) -> bool {
        self.total() > 0 && self.unverified == self.total()
    }
}

pub fn is_active_member(status: ChatMemberStatus) -> bool {
    matches!(
        status,
        ChatMemberStatus::Member | ChatMemberStatus::Administrator | ChatMemberStatus::Owner
    )
}

/// checks the user against every channel once; a failed lookup counts as not joined
pub async fn classify<S>(source: &S, user_id: UserId, channels: &[Channel]) -> MembershipResult
where
    S: MembershipSource + ?Sized,
{
    let mut result = MembershipResult::default();

    for channel in channels {
        match source.member_status(&channel.identifier, user_id).await {
            Ok(status) if is_active_member(status) => {
                info!(
                    "User {} is member of {} (status: {:?})",
                    user_id.0, channel.identifier, status
                );
                result.joined.push(channel.clone());
            }
            Ok(status) => {
                info!(
                    "User {} is not member of {} (status: {:?})",
                    user_id.0, channel.identifier, status
                );
                result.not_joined.push(channel.clone());
            }
            Err(e) => {
                match &e {
                    MembershipError::MemberListInaccessible => warn!(
                        "Cannot verify membership for {} due to privacy settings",
                        channel.identifier
                    ),
                    MembershipError::BadRequest(msg) => {
                        warn!("Bad request while checking {}: {}", channel.identifier, msg)
                    }
                    MembershipError::UserNotFound => {
                        info!("User {} not found in {}", user_id.0, channel.identifier)
                    }
                    _ => error!(
                        "Error checking membership for {}: {}",
                        channel.identifier, e
                    ),
                }
                result.unverified += 1;
                result.not_joined.push(channel.clone());
            }
        }
    }

    result
}

/// returns one issue per channel where the bot lacks admin rights to read members
pub async fn audit_bot_permissions<S>(source: &S, bot_id: UserId, channels: &[Channel]) -> Vec<String>
where
    S: MembershipSource + ?Sized,
{
    let mut issues = Vec::new();

    for channel in channels {
        match source.member_status(&channel.identifier, bot_id).await {
            Ok(ChatMemberStatus::Administrator | ChatMemberStatus::Owner) => {
                info!("Bot has admin rights in {}", channel.identifier);
            }
            Ok(status) => {
                warn!("Bot lacks admin rights in {}", channel.identifier);
                issues.push(format!(
                    "bot is not an administrator in {} (status: {:?})",
                    channel.identifier, status
                ));
            }
            Err(e) => {
                error!(
                    "Error checking bot admin status in {}: {}",
                    channel.identifier, e
                );
                issues.push(format!(
                    "cannot check bot status in {}: {}",
                    channel.identifier, e
                ));
            }
        }
    }

    issues
}
