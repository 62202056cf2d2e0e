//! Home screen: pick a state and city, then continue to the collection points

use super::loaders::{spawn_locality_loader, spawn_region_load, LoaderLink, Repaint};
use super::selection::SelectionState;
use crate::catalog::CatalogSource;
use crate::navigation::{Navigator, Route};
use crate::types::*;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, Notify};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub struct HomeScreen {
    selection: SelectionState,
    regions: Catalog<RegionCode>,
    localities: LocalityCatalog,
    source: Arc<dyn CatalogSource>,
    navigator: Box<dyn Navigator>,
    runtime: Handle,
    link: LoaderLink,
    events: mpsc::UnboundedReceiver<CatalogEvent>,
    retry_localities: Arc<Notify>,
}

impl HomeScreen {
    /// Create the screen and start loading the state list.
    pub fn mount(
        runtime: Handle,
        source: Arc<dyn CatalogSource>,
        navigator: Box<dyn Navigator>,
        repaint: Repaint,
    ) -> Self {
        let (events_tx, events) = mpsc::unbounded_channel();
        let link = LoaderLink {
            events: events_tx,
            repaint,
            shutdown: CancellationToken::new(),
        };

        let mut selection = SelectionState::new();
        let retry_localities = Arc::new(Notify::new());
        spawn_locality_loader(
            &runtime,
            source.clone(),
            selection.subscribe_region(),
            retry_localities.clone(),
            link.clone(),
        );
        spawn_region_load(&runtime, &source, link.clone());
        info!("Home screen mounted");

        Self {
            selection,
            regions: Catalog::Loading,
            localities: LocalityCatalog::default(),
            source,
            navigator,
            runtime,
            link,
            events,
            retry_localities,
        }
    }

    pub fn regions(&self) -> &Catalog<RegionCode> {
        &self.regions
    }

    pub fn localities(&self) -> &LocalityCatalog {
        &self.localities
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Whether the city list on screen belongs to the selected state
    pub fn localities_current(&self) -> bool {
        self.localities.region.as_ref() == Some(self.selection.region())
    }

    pub fn select_region(&mut self, region: RegionCode) {
        if !self.selection.set_region(region) {
            return;
        }
        let region = self.selection.region();
        if !region.is_unset() {
            self.localities = LocalityCatalog::loading(region.clone());
        }
    }

    pub fn select_locality(&mut self, locality: LocalityName) {
        self.selection.set_locality(locality);
    }

    pub fn retry_regions(&mut self) {
        if self.regions.is_loading() {
            return;
        }
        info!("Retrying state load");
        self.regions = Catalog::Loading;
        spawn_region_load(&self.runtime, &self.source, self.link.clone());
    }

    pub fn retry_localities(&mut self) {
        let region = self.selection.region();
        if region.is_unset() {
            return;
        }
        self.localities = LocalityCatalog::loading(region.clone());
        self.retry_localities.notify_one();
    }

    /// Apply every result that has arrived since the last frame.
    pub fn process_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    pub fn apply(&mut self, event: CatalogEvent) {
        if self.link.shutdown.is_cancelled() {
            return;
        }
        match event {
            CatalogEvent::Regions(result) => {
                if let Err(e) = &result {
                    warn!(error = %e, "State list unavailable");
                }
                self.regions = Catalog::from_result(result);
            }
            CatalogEvent::Localities { region, result } => {
                if &region != self.selection.region() {
                    debug!(
                        uf = %region,
                        selected = %self.selection.region(),
                        "Discarding city list for a state no longer selected"
                    );
                    return;
                }
                if let Err(e) = &result {
                    warn!(uf = %region, error = %e, "City list unavailable");
                }
                self.localities = LocalityCatalog {
                    region: Some(region),
                    catalog: Catalog::from_result(result),
                };
            }
        }
    }

    /// Continue to the collection points with the current selection, whatever it is.
    pub fn submit(&mut self) {
        let Selection { region, locality } = self.selection.snapshot();
        info!(uf = %region, city = %locality, "Submitting location");
        self.navigator.navigate(Route::Points {
            uf: region,
            city: locality,
        });
    }

    /// Stop loaders and ignore any result still in flight.
    pub fn unmount(&self) {
        if !self.link.shutdown.is_cancelled() {
            debug!("Home screen unmounted");
            self.link.shutdown.cancel();
        }
    }

    #[cfg(test)]
    pub(crate) async fn next_event(&mut self) -> Option<CatalogEvent> {
        self.events.recv().await
    }
}

impl Drop for HomeScreen {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use futures::future::{BoxFuture, FutureExt};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::runtime::Runtime;
    use tokio::sync::oneshot;

    #[derive(Default)]
    struct FakeSource {
        fail_regions: AtomicBool,
        cities: HashMap<&'static str, Vec<&'static str>>,
        gates: Mutex<HashMap<&'static str, oneshot::Receiver<()>>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn brazil() -> Self {
            let mut cities = HashMap::new();
            cities.insert("SP", vec!["Campinas", "Santos"]);
            cities.insert("RJ", vec!["Niterói", "Rio de Janeiro"]);
            Self {
                cities,
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        /// Hold the city response for `uf` until the returned sender fires
        fn gate(&self, uf: &'static str) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(uf, rx);
            tx
        }
    }

    impl CatalogSource for FakeSource {
        fn regions(&self) -> BoxFuture<'static, Result<Vec<RegionCode>, FetchError>> {
            self.calls.lock().unwrap().push("estados".into());
            let fail = self.fail_regions.load(Ordering::SeqCst);
            async move {
                if fail {
                    Err(FetchError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE))
                } else {
                    Ok(vec![RegionCode::new("SP"), RegionCode::new("RJ")])
                }
            }
            .boxed()
        }

        fn localities(
            &self,
            region: &RegionCode,
        ) -> BoxFuture<'static, Result<Vec<LocalityName>, FetchError>> {
            self.calls.lock().unwrap().push(region.to_string());
            let cities = self.cities.get(region.as_str()).cloned();
            let gate = self.gates.lock().unwrap().remove(region.as_str());
            async move {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                cities
                    .map(|names| names.into_iter().map(LocalityName::new).collect())
                    .ok_or(FetchError::Status(reqwest::StatusCode::NOT_FOUND))
            }
            .boxed()
        }
    }

    struct RecordingNavigator(Arc<Mutex<Vec<Route>>>);

    impl Navigator for RecordingNavigator {
        fn navigate(&mut self, route: Route) {
            self.0.lock().unwrap().push(route);
        }
    }

    fn mount(rt: &Runtime, source: &Arc<FakeSource>) -> (HomeScreen, Arc<Mutex<Vec<Route>>>) {
        let routes = Arc::new(Mutex::new(Vec::new()));
        let screen = HomeScreen::mount(
            rt.handle().clone(),
            source.clone(),
            Box::new(RecordingNavigator(routes.clone())),
            Arc::new(|| {}),
        );
        (screen, routes)
    }

    /// Wait for the next loader result and apply it
    fn pump(rt: &Runtime, screen: &mut HomeScreen) {
        let event = rt.block_on(screen.next_event()).expect("event channel closed");
        screen.apply(event);
    }

    fn names(catalog: &LocalityCatalog) -> Vec<&str> {
        catalog.catalog.items().iter().map(|c| c.as_str()).collect()
    }

    /// Poll `cond` until it holds; background tasks settle on their own schedule
    fn wait_until(mut cond: impl FnMut() -> bool) {
        for _ in 0..500 {
            if cond() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("condition not reached within 5s");
    }

    #[test]
    fn test_states_loaded_in_response_order() {
        let rt = Runtime::new().unwrap();
        let source = Arc::new(FakeSource::brazil());
        let (mut screen, _) = mount(&rt, &source);
        assert!(screen.regions().is_loading());

        pump(&rt, &mut screen);
        assert_eq!(
            screen.regions(),
            &Catalog::Ready(vec![RegionCode::new("SP"), RegionCode::new("RJ")])
        );
        assert_eq!(source.calls(), vec!["estados"]);
    }

    #[test]
    fn test_state_failure_is_surfaced_and_retry_recovers() {
        let rt = Runtime::new().unwrap();
        let source = Arc::new(FakeSource::brazil());
        source.fail_regions.store(true, Ordering::SeqCst);
        let (mut screen, _) = mount(&rt, &source);

        pump(&rt, &mut screen);
        assert_eq!(screen.regions().error(), Some("Serviço indisponível (HTTP 503)"));
        assert!(screen.regions().items().is_empty());

        source.fail_regions.store(false, Ordering::SeqCst);
        screen.retry_regions();
        assert!(screen.regions().is_loading());
        pump(&rt, &mut screen);
        assert_eq!(screen.regions().items().len(), 2);
        assert_eq!(source.calls(), vec!["estados", "estados"]);
    }

    #[test]
    fn test_cities_loaded_for_selected_state() {
        let rt = Runtime::new().unwrap();
        let source = Arc::new(FakeSource::brazil());
        let (mut screen, _) = mount(&rt, &source);
        pump(&rt, &mut screen);

        screen.select_region(RegionCode::new("SP"));
        assert!(screen.localities().catalog.is_loading());
        pump(&rt, &mut screen);

        assert_eq!(screen.localities().region, Some(RegionCode::new("SP")));
        assert_eq!(names(screen.localities()), vec!["Campinas", "Santos"]);
        assert!(screen.localities_current());
    }

    #[test]
    fn test_repeated_state_does_not_refetch() {
        let rt = Runtime::new().unwrap();
        let source = Arc::new(FakeSource::brazil());
        let (mut screen, _) = mount(&rt, &source);
        pump(&rt, &mut screen);

        screen.select_region(RegionCode::new("SP"));
        pump(&rt, &mut screen);
        screen.select_region(RegionCode::new("SP"));
        assert_eq!(names(screen.localities()), vec!["Campinas", "Santos"]);

        screen.select_region(RegionCode::new("RJ"));
        pump(&rt, &mut screen);
        assert_eq!(source.calls(), vec!["estados", "SP", "RJ"]);
    }

    #[test]
    fn test_unset_state_skips_city_fetch() {
        let rt = Runtime::new().unwrap();
        let source = Arc::new(FakeSource::brazil());
        let (mut screen, _) = mount(&rt, &source);
        pump(&rt, &mut screen);

        screen.select_region(RegionCode::new("SP"));
        pump(&rt, &mut screen);
        let before = screen.localities().clone();

        screen.select_region(RegionCode::unset());
        assert_eq!(screen.localities(), &before);
        assert!(!screen.localities_current());

        screen.select_region(RegionCode::new("RJ"));
        pump(&rt, &mut screen);
        assert_eq!(source.calls(), vec!["estados", "SP", "RJ"]);
        assert_eq!(names(screen.localities()), vec!["Niterói", "Rio de Janeiro"]);
    }

    #[test]
    fn test_city_selection_does_not_refetch() {
        let rt = Runtime::new().unwrap();
        let source = Arc::new(FakeSource::brazil());
        let (mut screen, _) = mount(&rt, &source);
        pump(&rt, &mut screen);

        screen.select_region(RegionCode::new("SP"));
        pump(&rt, &mut screen);
        screen.select_locality(LocalityName::new("Santos"));
        screen.select_locality(LocalityName::new("Campinas"));

        screen.select_region(RegionCode::new("RJ"));
        pump(&rt, &mut screen);
        assert_eq!(source.calls(), vec!["estados", "SP", "RJ"]);
        assert_eq!(screen.selection().locality().as_str(), "Campinas");
    }

    #[test]
    fn test_state_change_hides_previous_cities() {
        let rt = Runtime::new().unwrap();
        let source = Arc::new(FakeSource::brazil());
        let (mut screen, _) = mount(&rt, &source);
        pump(&rt, &mut screen);

        screen.select_region(RegionCode::new("SP"));
        pump(&rt, &mut screen);

        screen.select_region(RegionCode::new("RJ"));
        assert_eq!(screen.localities(), &LocalityCatalog::loading(RegionCode::new("RJ")));
        assert!(screen.localities().catalog.items().is_empty());
    }

    #[test]
    fn test_late_response_for_previous_state_is_discarded() {
        let rt = Runtime::new().unwrap();
        let source = Arc::new(FakeSource::brazil());
        let release_sp = source.gate("SP");
        let (mut screen, _) = mount(&rt, &source);
        pump(&rt, &mut screen);

        screen.select_region(RegionCode::new("SP"));
        screen.select_region(RegionCode::new("RJ"));
        while !(screen.localities_current() && !screen.localities().catalog.is_loading()) {
            pump(&rt, &mut screen);
        }
        let _ = release_sp.send(());
        assert_eq!(names(screen.localities()), vec!["Niterói", "Rio de Janeiro"]);

        // A response that was already in flight for SP must not overwrite RJ
        screen.apply(CatalogEvent::Localities {
            region: RegionCode::new("SP"),
            result: Ok(vec![LocalityName::new("Campinas")]),
        });
        assert_eq!(screen.localities().region, Some(RegionCode::new("RJ")));
        assert_eq!(names(screen.localities()), vec!["Niterói", "Rio de Janeiro"]);
    }

    #[test]
    fn test_superseded_city_read_is_aborted() {
        let rt = Runtime::new().unwrap();
        let source = Arc::new(FakeSource::brazil());
        let release_sp = source.gate("SP");
        let (mut screen, _) = mount(&rt, &source);
        pump(&rt, &mut screen);

        screen.select_region(RegionCode::new("SP"));
        screen.select_region(RegionCode::new("RJ"));
        while !(screen.localities_current() && !screen.localities().catalog.is_loading()) {
            pump(&rt, &mut screen);
        }

        // The SP read was dropped without ever being released
        wait_until(|| release_sp.is_closed());
        assert_eq!(source.calls(), vec!["estados", "SP", "RJ"]);
        assert_eq!(names(screen.localities()), vec!["Niterói", "Rio de Janeiro"]);
    }

    #[test]
    fn test_unmount_stops_city_loader() {
        let rt = Runtime::new().unwrap();
        let source = Arc::new(FakeSource::brazil());
        let release_sp = source.gate("SP");
        let (mut screen, _) = mount(&rt, &source);
        pump(&rt, &mut screen);

        screen.select_region(RegionCode::new("SP"));
        wait_until(|| source.calls().contains(&"SP".to_string()));

        screen.unmount();
        wait_until(|| release_sp.is_closed());

        // Once the loader is gone its subscription is pruned on the next change
        let mut n = 0;
        wait_until(|| {
            n += 1;
            screen.select_region(RegionCode::new(format!("X{n}")));
            screen.selection().subscriber_count() == 0
        });
        assert_eq!(source.calls(), vec!["estados", "SP"]);
    }

    #[test]
    fn test_city_failure_and_retry() {
        let rt = Runtime::new().unwrap();
        let source = Arc::new(FakeSource::brazil());
        let (mut screen, _) = mount(&rt, &source);
        pump(&rt, &mut screen);

        screen.select_region(RegionCode::new("AC"));
        pump(&rt, &mut screen);
        assert_eq!(
            screen.localities().catalog.error(),
            Some("Serviço indisponível (HTTP 404)")
        );

        screen.retry_localities();
        assert!(screen.localities().catalog.is_loading());
        pump(&rt, &mut screen);
        assert!(screen.localities().catalog.error().is_some());
        assert_eq!(source.calls(), vec!["estados", "AC", "AC"]);
    }

    #[test]
    fn test_retry_without_state_does_nothing() {
        let rt = Runtime::new().unwrap();
        let source = Arc::new(FakeSource::brazil());
        let (mut screen, _) = mount(&rt, &source);
        pump(&rt, &mut screen);

        screen.retry_localities();
        assert_eq!(screen.localities(), &LocalityCatalog::default());
    }

    #[test]
    fn test_submit_forwards_selection() {
        let rt = Runtime::new().unwrap();
        let source = Arc::new(FakeSource::brazil());
        let (mut screen, routes) = mount(&rt, &source);
        pump(&rt, &mut screen);

        screen.select_region(RegionCode::new("SP"));
        screen.select_locality(LocalityName::new("Santos"));
        screen.submit();

        assert_eq!(
            routes.lock().unwrap().as_slice(),
            &[Route::Points {
                uf: RegionCode::new("SP"),
                city: LocalityName::new("Santos"),
            }]
        );
    }

    #[test]
    fn test_submit_forwards_unset_values() {
        let rt = Runtime::new().unwrap();
        let source = Arc::new(FakeSource::brazil());
        let (mut screen, routes) = mount(&rt, &source);

        screen.submit();
        let routes = routes.lock().unwrap();
        assert_eq!(
            routes.as_slice(),
            &[Route::Points {
                uf: RegionCode::unset(),
                city: LocalityName::unset(),
            }]
        );
    }

    #[test]
    fn test_unmounted_screen_ignores_results() {
        let rt = Runtime::new().unwrap();
        let source = Arc::new(FakeSource::brazil());
        let (mut screen, _) = mount(&rt, &source);

        screen.unmount();
        screen.apply(CatalogEvent::Regions(Ok(vec![RegionCode::new("SP")])));
        screen.process_events();
        assert!(screen.regions().is_loading());
    }
}
