//! Renderer Boundary
//!
//! The map renderer is an external collaborator: it receives an overlay
//! snapshot and a tile-source descriptor and draws them. This module holds
//! the boundary trait, the two selectable tile presets, and a console
//! renderer used by the binary.

mod console;

pub use console::ConsoleRenderer;

use crate::overlay::OverlayModel;

/// Initial map viewport (latitude, longitude)
pub const DEFAULT_CENTER: (f64, f64) = (35.9078, 127.7669);
pub const DEFAULT_ZOOM: u8 = 7;

/// A tile provider the renderer draws the base map from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSource {
    pub name: &'static str,
    pub url_template: &'static str,
    pub attribution: &'static str,
}

/// OpenStreetMap Humanitarian layer (default)
pub const OSM_HUMANITARIAN: TileSource = TileSource {
    name: "OpenStreetMap Humanitarian (CC0)",
    url_template: "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png",
    attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors, Tiles style by <a href=\"https://www.hotosm.org/\" target=\"_blank\">Humanitarian OpenStreetMap Team</a> hosted by <a href=\"https://openstreetmap.fr/\" target=\"_blank\">OpenStreetMap France</a>",
};

/// USGS imagery layer
pub const USGS_IMAGERY: TileSource = TileSource {
    name: "USGS USImagery (U.S. Public Domain)",
    url_template: "https://basemap.nationalmap.gov/arcgis/rest/services/USGSImageryOnly/MapServer/tile/{z}/{y}/{x}",
    attribution: "Tiles courtesy of the <a href=\"https://usgs.gov/\">U.S. Geological Survey</a>",
};

/// Operator-toggleable choice between the two presets.
#[derive(Debug, Clone, Copy)]
pub struct TileSelector {
    current: TileSource,
}

impl TileSelector {
    pub fn new() -> Self {
        Self {
            current: OSM_HUMANITARIAN,
        }
    }

    pub fn current(&self) -> &TileSource {
        &self.current
    }

    /// Switch to the other preset and return it.
    pub fn toggle(&mut self) -> &TileSource {
        self.current = if self.current == USGS_IMAGERY {
            OSM_HUMANITARIAN
        } else {
            USGS_IMAGERY
        };
        &self.current
    }
}

impl Default for TileSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Boundary the map renderer implements: draw one overlay snapshot over
/// one tile source. Rendering is a local draw call, not a suspension
/// point.
pub trait Renderer {
    fn render(&mut self, overlay: &OverlayModel, tiles: &TileSource);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_alternates_between_presets() {
        let mut selector = TileSelector::new();
        assert_eq!(selector.current(), &OSM_HUMANITARIAN);

        assert_eq!(selector.toggle(), &USGS_IMAGERY);
        assert_eq!(selector.toggle(), &OSM_HUMANITARIAN);
    }

    #[test]
    fn test_presets_are_distinct() {
        assert_ne!(OSM_HUMANITARIAN, USGS_IMAGERY);
        assert!(OSM_HUMANITARIAN.url_template.contains("{z}"));
        assert!(USGS_IMAGERY.url_template.contains("{z}"));
    }
}
