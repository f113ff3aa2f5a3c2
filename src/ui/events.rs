//! Picker notifications
//!
//! Broadcast-style observation of a picker session for hosts that prefer
//! publish/subscribe over delegate wiring. Three named signals exist:
//!
//! - `selected-assets-did-change` - carries the full ordered selection
//! - `did-select-asset` - carries the asset that was selected
//! - `did-deselect-asset` - carries the asset that was deselected
//!
//! Subscribers receive events through unbounded channels and may drain them
//! from any thread; publishing never blocks.

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::trace;

use crate::library::{Asset, AssetRef};

/// Name of the aggregate selection signal
pub const SELECTED_ASSETS_DID_CHANGE: &str = "selected-assets-did-change";

/// Name of the per-asset selection signal
pub const DID_SELECT_ASSET: &str = "did-select-asset";

/// Name of the per-asset deselection signal
pub const DID_DESELECT_ASSET: &str = "did-deselect-asset";

/// A notification published by a picker session
#[derive(Debug, Clone)]
pub enum Notification {
    /// The selection changed; carries the full ordered selection
    SelectedAssetsDidChange(Vec<AssetRef>),
    /// An asset was selected
    DidSelectAsset(AssetRef),
    /// An asset was deselected
    DidDeselectAsset(AssetRef),
}

impl Notification {
    /// Stable name of this signal
    pub fn name(&self) -> &'static str {
        match self {
            Notification::SelectedAssetsDidChange(_) => SELECTED_ASSETS_DID_CHANGE,
            Notification::DidSelectAsset(_) => DID_SELECT_ASSET,
            Notification::DidDeselectAsset(_) => DID_DESELECT_ASSET,
        }
    }

    /// The asset carried by a per-asset signal
    pub fn asset(&self) -> Option<&AssetRef> {
        match self {
            Notification::DidSelectAsset(asset) | Notification::DidDeselectAsset(asset) => {
                Some(asset)
            }
            Notification::SelectedAssetsDidChange(_) => None,
        }
    }

    /// The ordered selection carried by the aggregate signal
    pub fn selection(&self) -> Option<&[AssetRef]> {
        match self {
            Notification::SelectedAssetsDidChange(assets) => Some(assets),
            _ => None,
        }
    }
}

/// Fan-out publisher for picker notifications
#[derive(Debug, Default)]
pub struct NotificationBus {
    subscribers: Vec<Sender<Notification>>,
}

impl NotificationBus {
    /// Create a bus with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber
    pub fn subscribe(&mut self) -> Subscription {
        let (sender, receiver) = unbounded();
        self.subscribers.push(sender);
        Subscription { receiver }
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver `notification` to every subscriber, dropping disconnected ones
    pub fn publish(&mut self, notification: Notification) {
        if self.subscribers.is_empty() {
            return;
        }
        trace!(
            "Publishing {} to {} subscribers",
            notification.name(),
            self.subscribers.len()
        );
        self.subscribers
            .retain(|subscriber| subscriber.send(notification.clone()).is_ok());
    }
}

/// Receiving end of a bus subscription
#[derive(Debug, Clone)]
pub struct Subscription {
    receiver: Receiver<Notification>,
}

impl Subscription {
    /// Try to receive the next notification without blocking
    pub fn try_recv(&self) -> Option<Notification> {
        match self.receiver.try_recv() {
            Ok(notification) => Some(notification),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drain every pending notification
    pub fn drain(&self) -> Vec<Notification> {
        self.receiver.try_iter().collect()
    }

    /// Borrow the underlying channel, e.g. for `select!`
    pub fn receiver(&self) -> &Receiver<Notification> {
        &self.receiver
    }
}

/// Render a notification as `name id` or `name [id,id]` for logs and traces
pub fn describe(notification: &Notification) -> String {
    match notification {
        Notification::SelectedAssetsDidChange(assets) => {
            let ids: Vec<String> = assets.iter().map(|a| a.id().to_string()).collect();
            format!("{} [{}]", notification.name(), ids.join(","))
        }
        Notification::DidSelectAsset(asset) | Notification::DidDeselectAsset(asset) => {
            format!("{} {}", notification.name(), asset.id())
        }
    }
}
