//! Floor plan document model.
//!
//! All coordinates are normalized to `[0,1]` independent of viewport
//! size. Field names serialize in camelCase so persisted documents match
//! the dashboard's existing JSON shape.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sensekit_core::{Bounds, Point};

/// The top-level persisted document: a name plus one or more floors.
///
/// `id` stays `None` until the first successful save assigns one.
/// Invariant: `floors` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlan {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    pub floors: Vec<Floor>,
    #[serde(default)]
    pub view_settings: ViewSettings,
}

impl FloorPlan {
    /// Creates an empty plan with one default floor.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            floors: vec![Floor::new("Floor 1")],
            view_settings: ViewSettings::default(),
        }
    }

    pub fn floor(&self, id: Uuid) -> Option<&Floor> {
        self.floors.iter().find(|f| f.id == id)
    }

    pub fn floor_mut(&mut self, id: Uuid) -> Option<&mut Floor> {
        self.floors.iter_mut().find(|f| f.id == id)
    }
}

/// One drawable level containing elements and placed sensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub sensors: Vec<PlacedSensor>,
}

impl Floor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            elements: Vec::new(),
            sensors: Vec::new(),
        }
    }

    /// Bounding box over all element points and sensor positions.
    /// `None` when the floor has no geometry.
    pub fn bounds(&self) -> Option<Bounds> {
        let element_points = self.elements.iter().flat_map(|e| e.points.iter().copied());
        let sensor_points = self.sensors.iter().map(|s| s.position);
        Bounds::from_points(element_points.chain(sensor_points))
    }

    pub fn element(&self, id: Uuid) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: Uuid) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn sensor(&self, id: Uuid) -> Option<&PlacedSensor> {
        self.sensors.iter().find(|s| s.id == id)
    }

    pub fn sensor_mut(&mut self, id: Uuid) -> Option<&mut PlacedSensor> {
        self.sensors.iter_mut().find(|s| s.id == id)
    }
}

/// Kinds of drawable elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Freehand,
    Rectangle,
    Line,
    Polygon,
}

/// A drawn shape in normalized coordinates.
///
/// Point-count rules: freehand needs at least 1 point, line at least 2,
/// rectangle exactly 2 opposite corners, polygon at least 3 vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub points: Vec<Point>,
    #[serde(default)]
    pub style: ElementStyle,
}

impl Element {
    pub fn new(kind: ElementKind, points: Vec<Point>, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            points,
            style,
        }
    }

    /// Checks the per-kind point-count rules above.
    pub fn has_valid_points(&self) -> bool {
        match self.kind {
            ElementKind::Freehand => !self.points.is_empty(),
            ElementKind::Rectangle => self.points.len() == 2,
            ElementKind::Line => self.points.len() >= 2,
            ElementKind::Polygon => self.points.len() >= 3,
        }
    }
}

/// Stroke and fill settings for an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    pub stroke_color: String,
    pub stroke_width: f64,
    #[serde(default)]
    pub fill_color: Option<String>,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            stroke_color: "#333333".to_string(),
            stroke_width: 2.0,
            fill_color: None,
        }
    }
}

impl ElementStyle {
    /// Merges the set fields of a partial update into this style.
    pub fn apply(&mut self, update: &StyleUpdate) {
        if let Some(color) = &update.stroke_color {
            self.stroke_color = color.clone();
        }
        if let Some(width) = update.stroke_width {
            self.stroke_width = width;
        }
        if let Some(fill) = &update.fill_color {
            self.fill_color = Some(fill.clone());
        }
    }
}

/// Partial style change; unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleUpdate {
    pub stroke_color: Option<String>,
    pub stroke_width: Option<f64>,
    pub fill_color: Option<String>,
}

/// Partial element change applied by `update_element`; unset fields are
/// left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementUpdate {
    pub points: Option<Vec<Point>>,
    pub style: Option<StyleUpdate>,
}

/// A reference to an external sensor device positioned on a floor.
///
/// `sensor_box_id` points into the device/connection registry, which is
/// not owned here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedSensor {
    pub id: Uuid,
    pub sensor_box_id: String,
    pub position: Point,
    #[serde(default)]
    pub label: Option<String>,
}

impl PlacedSensor {
    pub fn new(sensor_box_id: impl Into<String>, position: Point, label: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sensor_box_id: sensor_box_id.into(),
            position,
            label,
        }
    }
}

/// Last zoom/pan of the editor canvas. Persisted for the editor only;
/// read-only consumers ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSettings {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}
