//! User-facing notifications raised by cart operations.

use std::fmt::{Display, Formatter, Result as FmtResult};

use mockall::automock;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, warn};

/// One-shot message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// Requested quantity exceeds the stock level.
    OutOfStock,

    /// Adding a product failed.
    AddFailed,

    /// Removing a product failed, including when it was not in the cart.
    RemoveFailed,

    /// Changing a product quantity failed.
    UpdateFailed,
}

impl Notification {
    /// Text shown to the user.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::OutOfStock => "Requested quantity is out of stock",
            Self::AddFailed => "Failed to add product",
            Self::RemoveFailed => "Failed to remove product",
            Self::UpdateFailed => "Failed to update product quantity",
        }
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.message())
    }
}

/// Presentation layer for notifications.
#[automock]
pub trait Notifier: Send + Sync {
    /// Show `notification` to the user.
    fn notify(&self, notification: Notification);
}

/// Notifier that only emits a log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        warn!(?notification, "{notification}");
    }
}

/// Notifier forwarding into a channel drained by a UI layer.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end of its channel.
    #[must_use]
    pub fn new() -> (Self, UnboundedReceiver<Notification>) {
        let (sender, receiver) = unbounded_channel();

        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if self.sender.send(notification).is_err() {
            debug!(?notification, "notification dropped, no receiver");
        }
    }
}
