//! Screen routing

use crate::types::{LocalityName, RegionCode};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Destinations reachable from a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    /// Collection points for the chosen state/city
    Points { uf: RegionCode, city: LocalityName },
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Points { .. } => "Points",
        }
    }
}

/// Handed to each screen when it is created.
pub trait Navigator: Send {
    fn navigate(&mut self, route: Route);
}

/// Posts routes to the app, which switches screens on its next frame.
#[derive(Clone)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Route>,
}

impl ChannelNavigator {
    pub fn new(tx: mpsc::UnboundedSender<Route>) -> Self {
        Self { tx }
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&mut self, route: Route) {
        debug!(route = route.name(), "Navigation requested");
        if self.tx.send(route).is_err() {
            warn!("Navigation requested after the app stopped listening");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_navigator_delivers_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut nav = ChannelNavigator::new(tx);
        nav.navigate(Route::Points {
            uf: RegionCode::new("SP"),
            city: LocalityName::new("Santos"),
        });
        nav.navigate(Route::Home);

        assert_eq!(
            rx.try_recv().unwrap(),
            Route::Points {
                uf: RegionCode::new("SP"),
                city: LocalityName::new("Santos"),
            }
        );
        assert_eq!(rx.try_recv().unwrap(), Route::Home);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_navigate_after_receiver_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut nav = ChannelNavigator::new(tx);
        nav.navigate(Route::Home);
    }
}
