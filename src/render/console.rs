//! Console renderer: prints what a map would draw.

use crate::overlay::{OverlayFeature, OverlayModel};

use super::{Renderer, TileSource, DEFAULT_CENTER, DEFAULT_ZOOM};

#[derive(Debug, Default)]
pub struct ConsoleRenderer;

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for ConsoleRenderer {
    fn render(&mut self, overlay: &OverlayModel, tiles: &TileSource) {
        println!(
            "map: {} | center {:.4},{:.4} zoom {}",
            tiles.name, DEFAULT_CENTER.0, DEFAULT_CENTER.1, DEFAULT_ZOOM
        );

        if overlay.is_empty() {
            println!("  (overlay empty)");
            return;
        }

        for feature in &overlay.features {
            match feature {
                OverlayFeature::Vessel(vessel) => {
                    let mode = vessel
                        .encounter_mode_display()
                        .map(|label| format!(" | Encounter Mode: {label}"))
                        .unwrap_or_default();
                    println!(
                        "  vessel {} @ {:.5},{:.5} heading {:.1}°{}",
                        vessel.id, vessel.lat, vessel.lon, vessel.cog, mode
                    );
                }
                OverlayFeature::Region(region) => {
                    let kind = region
                        .geometry
                        .get("type")
                        .and_then(|t| t.as_str())
                        .unwrap_or("Geometry");
                    println!("  region ({kind})");
                }
            }
        }

        if overlay.vo.is_some() {
            println!("  VO regions (TS) drawn in red");
        }
        if overlay.v.is_some() {
            println!("  V region (OS) drawn in blue");
        }
    }
}
