//! Floor plan document (de)serialization and legacy migration.
//!
//! Persisted documents are plain JSON matching the [`FloorPlan`] shape.
//! There is no version field: the single legacy variant (a document with
//! root-level `elements`/`sensors` and no `floors` array) is handled by
//! [`migrate_document`] at the storage boundary.

use serde::Deserialize;
use uuid::Uuid;

use sensekit_core::constants::DEFAULT_FLOOR_NAME;

use crate::model::{Element, Floor, FloorPlan, PlacedSensor, ViewSettings};

/// Tolerant document shape covering both the current multi-floor layout
/// and the legacy single-floor-at-root layout.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    floors: Option<Vec<Floor>>,
    #[serde(default)]
    elements: Vec<Element>,
    #[serde(default)]
    sensors: Vec<PlacedSensor>,
    #[serde(default)]
    view_settings: Option<ViewSettings>,
}

/// Parses a persisted document, migrating the legacy shape if needed.
pub fn document_from_json(json: &str) -> Result<FloorPlan, serde_json::Error> {
    let raw: RawDocument = serde_json::from_str(json)?;
    Ok(migrate_document(raw))
}

/// Serializes a plan to the compact form used for change detection.
pub fn document_to_json(plan: &FloorPlan) -> Result<String, serde_json::Error> {
    serde_json::to_string(plan)
}

/// Serializes a plan for file storage.
pub fn document_to_json_pretty(plan: &FloorPlan) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(plan)
}

/// Lifts a raw document into the current shape. Legacy documents (no
/// floors, entities at the root) get exactly one synthesized floor named
/// "Ground Floor" holding those entities unchanged.
fn migrate_document(raw: RawDocument) -> FloorPlan {
    let floors = match raw.floors {
        Some(floors) if !floors.is_empty() => floors,
        _ => {
            tracing::debug!("migrating legacy single-floor document");
            vec![Floor {
                id: Uuid::new_v4(),
                name: DEFAULT_FLOOR_NAME.to_string(),
                elements: raw.elements,
                sensors: raw.sensors,
            }]
        }
    };

    FloorPlan {
        id: raw.id,
        name: raw.name.unwrap_or_else(|| "Untitled".to_string()),
        floors,
        view_settings: raw.view_settings.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementKind, ElementStyle};
    use sensekit_core::Point;

    #[test]
    fn current_shape_round_trips() {
        let mut plan = FloorPlan::new("Home");
        plan.floors[0].elements.push(Element::new(
            ElementKind::Rectangle,
            vec![Point::new(0.1, 0.1), Point::new(0.5, 0.5)],
            ElementStyle::default(),
        ));
        plan.floors[0]
            .sensors
            .push(PlacedSensor::new("box-1", Point::new(0.3, 0.3), Some("Hall".into())));

        let json = document_to_json(&plan).unwrap();
        let back = document_from_json(&json).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn legacy_document_gets_one_ground_floor() {
        let json = r##"{
            "name": "Old house",
            "elements": [
                {"id": "6f2c1d1e-0000-4000-8000-000000000001",
                 "type": "line",
                 "points": [{"x": 0.1, "y": 0.2}, {"x": 0.4, "y": 0.2}],
                 "style": {"strokeColor": "#000000", "strokeWidth": 1.5}}
            ],
            "sensors": [
                {"id": "6f2c1d1e-0000-4000-8000-000000000002",
                 "sensorBoxId": "box-9",
                 "position": {"x": 0.25, "y": 0.5}}
            ]
        }"##;

        let plan = document_from_json(json).unwrap();
        assert_eq!(plan.floors.len(), 1);
        assert_eq!(plan.floors[0].name, "Ground Floor");
        assert_eq!(plan.floors[0].elements.len(), 1);
        assert_eq!(plan.floors[0].sensors.len(), 1);
        assert_eq!(plan.floors[0].sensors[0].sensor_box_id, "box-9");
        assert!(plan.id.is_none());
    }

    #[test]
    fn empty_floors_array_also_migrates() {
        let plan = document_from_json(r#"{"name": "x", "floors": []}"#).unwrap();
        assert_eq!(plan.floors.len(), 1);
        assert_eq!(plan.floors[0].name, "Ground Floor");
    }
}
