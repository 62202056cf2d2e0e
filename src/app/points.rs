//! Collection points destination

use crate::navigation::{Navigator, Route};
use crate::types::{LocalityName, RegionCode};

/// Receives the location chosen on the Home screen.
/// Listing the points themselves is handled by the points service, not here.
pub struct PointsScreen {
    pub uf: RegionCode,
    pub city: LocalityName,
    navigator: Box<dyn Navigator>,
}

impl PointsScreen {
    pub fn new(uf: RegionCode, city: LocalityName, navigator: Box<dyn Navigator>) -> Self {
        Self { uf, city, navigator }
    }

    pub fn back(&mut self) {
        self.navigator.navigate(Route::Home);
    }
}
