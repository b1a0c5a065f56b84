use poise::serenity_prelude::{self as serenity, ChannelId};
use thiserror::Error;
use tracing::{debug, instrument};

use super::cards::render;
use super::{MessageSender, Notification};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("channel {0} is not reachable")]
    ChannelNotFound(u64),
    #[error("failed to send to channel {channel}: {source}")]
    SendFailure {
        channel: u64,
        #[source]
        source: Box<serenity::Error>,
    },
}

/// Sends rendered notifications through a [`MessageSender`].
#[derive(Debug, Clone)]
pub struct Notifier<M> {
    sender: M,
}

impl<M: MessageSender> Notifier<M> {
    pub fn new(sender: M) -> Self {
        Self { sender }
    }

    /// Render and send one notification. Failures are returned to the caller
    /// and never retried here.
    #[instrument(skip_all, fields(channel = notification.channel()))]
    pub async fn dispatch(&self, notification: &Notification) -> Result<(), DispatchError> {
        let channel = notification.channel();
        let channel_id = ChannelId::new(channel);

        if !self.sender.has_channel(channel_id).await {
            return Err(DispatchError::ChannelNotFound(channel));
        }

        self.sender
            .send_message(channel_id, render(notification))
            .await
            .map_err(|err| DispatchError::SendFailure {
                channel,
                source: Box::new(err),
            })?;

        debug!("📨 notification sent");
        Ok(())
    }
}
