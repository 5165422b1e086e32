//! Overlay feature extraction from engine GeoJSON.
//!
//! The engine emits ordinary GeoJSON feature collections. Point geometries
//! become rotated vessel markers; everything else is carried through as a
//! raw region for the renderer to draw.

use serde::Deserialize;
use serde_json::Value;

/// One vessel observation, rendered as a marker rotated by its course.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionFeature {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    /// Course over ground in degrees; 0 when the property is absent
    pub cog: f64,
    /// Raw encounter-mode label as received (snake-case)
    pub encounter_mode: Option<String>,
}

impl PositionFeature {
    /// Display form of the encounter mode ("HEAD_ON" becomes "Head On").
    pub fn encounter_mode_display(&self) -> Option<String> {
        self.encounter_mode.as_deref().map(encounter_mode_label)
    }
}

/// An arbitrary geometry with no behavior beyond being drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFeature {
    pub geometry: Value,
    pub style: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayFeature {
    Vessel(PositionFeature),
    Region(RegionFeature),
}

#[derive(Debug, Deserialize)]
struct RawCollection {
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: Value,
    #[serde(default)]
    geometry: Value,
}

/// Parse an engine feature collection into overlay features. A body that is
/// not a feature collection yields no features rather than an error; the
/// caller's failure policy covers genuinely broken responses.
pub fn parse_feature_collection(raw: &Value) -> Vec<OverlayFeature> {
    let collection: RawCollection = match serde_json::from_value(raw.clone()) {
        Ok(collection) => collection,
        Err(_) => return Vec::new(),
    };
    collection
        .features
        .into_iter()
        .filter_map(to_overlay_feature)
        .collect()
}

fn to_overlay_feature(feature: RawFeature) -> Option<OverlayFeature> {
    let geometry = feature.geometry;
    let properties = feature.properties;
    if geometry.is_null() {
        return None;
    }

    if geometry.get("type").and_then(Value::as_str) == Some("Point") {
        let coordinates = geometry.get("coordinates")?;
        // GeoJSON order: [lon, lat]
        let lon = coordinates.get(0)?.as_f64()?;
        let lat = coordinates.get(1)?.as_f64()?;

        // the id arrives under either key depending on the dataset
        let id = properties
            .get("SHIP_ID")
            .or_else(|| properties.get("ship_id"))
            .and_then(id_string)
            .unwrap_or_default();
        let cog = properties.get("COG").and_then(Value::as_f64).unwrap_or(0.0);
        let encounter_mode = properties
            .get("MODE")
            .and_then(Value::as_str)
            .map(str::to_string);

        Some(OverlayFeature::Vessel(PositionFeature {
            id,
            lat,
            lon,
            cog,
            encounter_mode,
        }))
    } else {
        let style = properties
            .get("style")
            .and_then(Value::as_str)
            .map(str::to_string);
        Some(OverlayFeature::Region(RegionFeature { geometry, style }))
    }
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Title-case a snake-case encounter mode for display.
pub fn encounter_mode_label(mode: &str) -> String {
    mode.to_lowercase()
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection(features: Value) -> Value {
        json!({"type": "FeatureCollection", "features": features})
    }

    #[test]
    fn test_point_becomes_vessel_marker() {
        let raw = collection(json!([{
            "type": "Feature",
            "properties": {"SHIP_ID": "A1", "COG": 87.5, "MODE": "HEAD_ON"},
            "geometry": {"type": "Point", "coordinates": [129.1, 35.2]}
        }]));

        let features = parse_feature_collection(&raw);
        assert_eq!(features.len(), 1);
        match &features[0] {
            OverlayFeature::Vessel(vessel) => {
                assert_eq!(vessel.id, "A1");
                assert_eq!(vessel.lon, 129.1);
                assert_eq!(vessel.lat, 35.2);
                assert_eq!(vessel.cog, 87.5);
                assert_eq!(vessel.encounter_mode.as_deref(), Some("HEAD_ON"));
                assert_eq!(vessel.encounter_mode_display().as_deref(), Some("Head On"));
            }
            other => panic!("expected vessel, got {:?}", other),
        }
    }

    #[test]
    fn test_lowercase_id_key_and_missing_cog() {
        let raw = collection(json!([{
            "type": "Feature",
            "properties": {"ship_id": 40123},
            "geometry": {"type": "Point", "coordinates": [126.0, 34.0]}
        }]));

        match &parse_feature_collection(&raw)[0] {
            OverlayFeature::Vessel(vessel) => {
                assert_eq!(vessel.id, "40123");
                assert_eq!(vessel.cog, 0.0);
                assert!(vessel.encounter_mode.is_none());
            }
            other => panic!("expected vessel, got {:?}", other),
        }
    }

    #[test]
    fn test_polygon_kept_as_region() {
        let raw = collection(json!([{
            "type": "Feature",
            "properties": {},
            "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0]]]}
        }]));

        let features = parse_feature_collection(&raw);
        assert!(matches!(features[0], OverlayFeature::Region(_)));
    }

    #[test]
    fn test_non_collection_yields_nothing() {
        assert!(parse_feature_collection(&json!("nope")).is_empty());
        assert!(parse_feature_collection(&json!({"type": "FeatureCollection"})).is_empty());
    }

    #[test]
    fn test_encounter_mode_label() {
        assert_eq!(encounter_mode_label("HEAD_ON"), "Head On");
        assert_eq!(encounter_mode_label("give_way"), "Give Way");
        assert_eq!(encounter_mode_label("OVERTAKING"), "Overtaking");
    }
}
