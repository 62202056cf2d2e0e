//! Background catalog loaders for the Home screen

use super::selection::RegionSubscription;
use crate::catalog::CatalogSource;
use crate::types::{CatalogEvent, RegionCode};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Asks the UI to run another frame (wraps `egui::Context::request_repaint`).
pub type Repaint = Arc<dyn Fn() + Send + Sync>;

/// What every loader task needs to report back to the UI thread.
#[derive(Clone)]
pub(crate) struct LoaderLink {
    pub events: mpsc::UnboundedSender<CatalogEvent>,
    pub repaint: Repaint,
    pub shutdown: CancellationToken,
}

impl LoaderLink {
    fn post(&self, event: CatalogEvent) {
        if self.events.send(event).is_ok() {
            (self.repaint)();
        }
    }
}

/// Fetch the state list once and post the result.
pub(crate) fn spawn_region_load(runtime: &Handle, source: &Arc<dyn CatalogSource>, link: LoaderLink) {
    let fetch = source.regions();
    runtime.spawn(async move {
        tokio::select! {
            _ = link.shutdown.cancelled() => debug!("State load cancelled"),
            result = fetch => link.post(CatalogEvent::Regions(result)),
        }
    });
}

/// Reload the city list each time the selected state changes, or when `retry`
/// is notified. Only the newest request is kept alive; older ones are aborted.
pub(crate) fn spawn_locality_loader(
    runtime: &Handle,
    source: Arc<dyn CatalogSource>,
    mut regions: RegionSubscription,
    retry: Arc<Notify>,
    link: LoaderLink,
) {
    runtime.spawn(async move {
        let mut current = RegionCode::unset();
        let mut in_flight: Option<JoinHandle<()>> = None;

        loop {
            tokio::select! {
                _ = link.shutdown.cancelled() => break,
                next = regions.recv() => match next {
                    Some(region) => current = region,
                    None => break,
                },
                _ = retry.notified() => debug!(uf = %current, "Retrying city load"),
            }

            if current.is_unset() {
                debug!("No state selected, skipping city load");
                continue;
            }

            if let Some(previous) = in_flight.take() {
                previous.abort();
            }

            let fetch = source.localities(&current);
            let region = current.clone();
            let link = link.clone();
            in_flight = Some(tokio::spawn(async move {
                let result = fetch.await;
                link.post(CatalogEvent::Localities { region, result });
            }));
        }

        if let Some(task) = in_flight {
            task.abort();
        }
        debug!("City loader stopped");
    });
}
