//! App module - contains the main application state and screen routing

mod home;
mod loaders;
mod points;
mod selection;
mod views;

use crate::catalog::{CatalogSource, IbgeCatalog};
use crate::navigation::{ChannelNavigator, Route};
use crate::settings::Settings;
use crate::theme;
use eframe::egui;
use home::HomeScreen;
use loaders::Repaint;
use points::PointsScreen;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

// ============================================================================
// APP STATE
// ============================================================================

pub enum Screen {
    Home(HomeScreen),
    Points(PointsScreen),
}

pub struct App {
    pub(crate) screen: Screen,
    pub(crate) source: Arc<dyn CatalogSource>,
    pub(crate) routes_tx: mpsc::UnboundedSender<Route>,
    pub(crate) routes_rx: mpsc::UnboundedReceiver<Route>,
    pub(crate) repaint: Repaint,
    pub(crate) runtime: tokio::runtime::Runtime,
    // Settings
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        cc.egui_ctx.set_theme(egui::Theme::Light);
        theme::apply_visuals(&cc.egui_ctx);

        let runtime = tokio::runtime::Runtime::new()?;
        let source: Arc<dyn CatalogSource> = Arc::new(IbgeCatalog::new(
            settings.api_base_url.clone(),
            settings.request_timeout(),
        )?);
        info!(base_url = %settings.api_base_url, "Catalog service configured");

        let ctx = cc.egui_ctx.clone();
        let repaint: Repaint = Arc::new(move || ctx.request_repaint());
        let (routes_tx, routes_rx) = mpsc::unbounded_channel();

        let home = HomeScreen::mount(
            runtime.handle().clone(),
            source.clone(),
            Box::new(ChannelNavigator::new(routes_tx.clone())),
            repaint.clone(),
        );

        Ok(Self {
            screen: Screen::Home(home),
            source,
            routes_tx,
            routes_rx,
            repaint,
            runtime,
            settings,
            data_dir,
            window_pos: None,
            window_size: None,
        })
    }

    fn navigator(&self) -> Box<ChannelNavigator> {
        Box::new(ChannelNavigator::new(self.routes_tx.clone()))
    }

    /// Switch to `route`. The previous screen is dropped, which unmounts it.
    pub fn navigate_to(&mut self, route: Route) {
        info!(route = route.name(), "Switching screen");
        self.screen = match route {
            Route::Home => Screen::Home(HomeScreen::mount(
                self.runtime.handle().clone(),
                self.source.clone(),
                self.navigator(),
                self.repaint.clone(),
            )),
            Route::Points { uf, city } => Screen::Points(PointsScreen::new(uf, city, self.navigator())),
        };
    }

    /// Apply pending navigation and catalog results. Called once per frame.
    pub fn pump(&mut self) {
        while let Ok(route) = self.routes_rx.try_recv() {
            self.navigate_to(route);
        }
        if let Screen::Home(home) = &mut self.screen {
            home.process_events();
        }
    }

    pub fn save_settings(&mut self) {
        self.settings.window_x = self.window_pos.map(|p| p.x);
        self.settings.window_y = self.window_pos.map(|p| p.y);
        self.settings.window_w = self.window_size.map(|s| s.x);
        self.settings.window_h = self.window_size.map(|s| s.y);
        self.settings.save(&self.data_dir);
    }
}
