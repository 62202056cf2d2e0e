//! Selection state for the Home screen

use crate::types::{LocalityName, RegionCode, Selection};
use tokio::sync::mpsc;
use tracing::debug;

/// Receives every distinct region the user picks. Drop to unsubscribe.
pub type RegionSubscription = mpsc::UnboundedReceiver<RegionCode>;

/// The user's state/city choice plus region-change subscribers
#[derive(Default)]
pub struct SelectionState {
    current: Selection,
    subscribers: Vec<mpsc::UnboundedSender<RegionCode>>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&self) -> &RegionCode {
        &self.current.region
    }

    pub fn locality(&self) -> &LocalityName {
        &self.current.locality
    }

    pub fn snapshot(&self) -> Selection {
        self.current.clone()
    }

    pub fn subscribe_region(&mut self) -> RegionSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Returns true when the region actually changed (and subscribers were notified)
    pub fn set_region(&mut self, region: RegionCode) -> bool {
        if self.current.region == region {
            return false;
        }
        debug!(uf = %region, "Region selected");
        self.current.region = region;
        let region = &self.current.region;
        self.subscribers.retain(|tx| tx.send(region.clone()).is_ok());
        true
    }

    pub fn set_locality(&mut self, locality: LocalityName) {
        debug!(city = %locality, "City selected");
        self.current.locality = locality;
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
