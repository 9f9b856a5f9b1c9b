//! Queue of messages from background tasks to the UI context.
//!
//! Background tasks never touch UI state. They post a [`ScreenMessage`] through a
//! [`UiSender`], and the UI context applies the messages when it drains its [`UiReceiver`].

use std::sync::Arc;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::Messenger;

/// Message posted to the UI context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMessage {
    /// The reveal delay has elapsed.
    RevealElapsed,
}

/// Creates a connected sender/receiver pair.
pub fn ui_queue() -> (UiSender, UiReceiver) {
    let (sender, receiver) = unbounded_channel();
    (
        UiSender {
            sender,
            messenger: None,
        },
        UiReceiver { receiver },
    )
}

/// Sending half of the UI queue. Can be cloned and moved to other threads.
#[derive(Clone)]
pub struct UiSender {
    sender: UnboundedSender<ScreenMessage>,
    messenger: Option<Arc<dyn Messenger>>,
}

impl std::fmt::Debug for UiSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiSender")
            .field("closed", &self.sender.is_closed())
            .field("has_messenger", &self.messenger.is_some())
            .finish()
    }
}

impl UiSender {
    /// Sets the messenger used to wake the UI up after a message is posted.
    pub fn with_messenger(self, messenger: Arc<dyn Messenger>) -> Self {
        Self {
            messenger: Some(messenger),
            ..self
        }
    }

    /// Posts the message. Returns `false` if the UI side is gone and the message was dropped.
    pub fn post(&self, message: ScreenMessage) -> bool {
        if self.sender.send(message).is_err() {
            log::debug!("UI queue is closed, dropping {message:?}");
            return false;
        }

        if let Some(messenger) = &self.messenger {
            messenger.request_redraw();
        }

        true
    }
}

/// Receiving half of the UI queue, owned by the UI context.
#[derive(Debug)]
pub struct UiReceiver {
    receiver: UnboundedReceiver<ScreenMessage>,
}

impl UiReceiver {
    /// Takes all queued messages without waiting.
    pub fn drain(&mut self) -> Vec<ScreenMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = self.receiver.try_recv() {
            messages.push(message);
        }

        messages
    }

    /// Stops accepting new messages. Messages already queued can still be drained.
    pub fn close(&mut self) {
        self.receiver.close();
    }
}
