//! Abstraction used to reach Discord channels.

use std::sync::Arc;

use async_trait::async_trait;
use poise::serenity_prelude::{self as serenity, ChannelId, CreateMessage};

#[async_trait]
/// A way to send a notification card to a channel.
pub trait MessageSender: Send + Sync {
    /// Whether the channel can still be resolved by the bot.
    async fn has_channel(&self, channel_id: ChannelId) -> bool;

    async fn send_message(&self, channel_id: ChannelId, msg: CreateMessage)
    -> serenity::Result<()>;
}

#[async_trait]
impl MessageSender for Arc<serenity::Http> {
    async fn has_channel(&self, channel_id: ChannelId) -> bool {
        self.get_channel(channel_id).await.is_ok()
    }

    async fn send_message(
        &self,
        channel_id: ChannelId,
        msg: CreateMessage,
    ) -> serenity::Result<()> {
        channel_id.send_message(self, msg).await.map(|_| ())
    }
}
