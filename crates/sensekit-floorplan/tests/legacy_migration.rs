//! Legacy single-floor documents through the on-disk store: migration
//! on load, re-persistence in the current shape, and directory listing.

use std::fs;

use sensekit_core::Point;
use sensekit_floorplan::{
    Element, ElementKind, ElementStyle, FileStore, FloorPlan, PlacedSensor, PlanStore,
    StorageError,
};
use uuid::Uuid;

const LEGACY_DOC: &str = r##"{
    "id": "PLAN_ID",
    "name": "Old cottage",
    "elements": [
        {"id": "6f2c1d1e-0000-4000-8000-000000000001",
         "type": "rectangle",
         "points": [{"x": 0.1, "y": 0.1}, {"x": 0.8, "y": 0.6}],
         "style": {"strokeColor": "#123456", "strokeWidth": 3.0}},
        {"id": "6f2c1d1e-0000-4000-8000-000000000002",
         "type": "freehand",
         "points": [{"x": 0.2, "y": 0.2}, {"x": 0.3, "y": 0.25}, {"x": 0.4, "y": 0.2}]}
    ],
    "sensors": [
        {"id": "6f2c1d1e-0000-4000-8000-000000000003",
         "sensorBoxId": "box-kitchen",
         "position": {"x": 0.5, "y": 0.4},
         "label": "Kitchen"}
    ]
}"##;

fn write_legacy_doc(dir: &std::path::Path) -> Uuid {
    let id = Uuid::new_v4();
    let json = LEGACY_DOC.replace("PLAN_ID", &id.to_string());
    fs::write(dir.join(format!("{id}.json")), json).unwrap();
    id
}

#[test]
fn legacy_document_loads_as_one_ground_floor() {
    let dir = tempfile::tempdir().unwrap();
    let id = write_legacy_doc(dir.path());

    let store = FileStore::new(dir.path()).unwrap();
    let plan = store.load(id).unwrap().unwrap();

    assert_eq!(plan.name, "Old cottage");
    assert_eq!(plan.floors.len(), 1);
    let floor = &plan.floors[0];
    assert_eq!(floor.name, "Ground Floor");
    assert_eq!(floor.elements.len(), 2);
    assert_eq!(floor.elements[0].style.stroke_color, "#123456");
    // Missing style falls back to the default.
    assert_eq!(floor.elements[1].style.stroke_width, 2.0);
    assert_eq!(floor.sensors[0].sensor_box_id, "box-kitchen");
    assert_eq!(floor.sensors[0].label.as_deref(), Some("Kitchen"));
    assert_eq!(floor.sensors[0].position, Point::new(0.5, 0.4));
}

#[test]
fn resaving_a_migrated_document_writes_the_current_shape() {
    let dir = tempfile::tempdir().unwrap();
    let id = write_legacy_doc(dir.path());

    let mut store = FileStore::new(dir.path()).unwrap();
    let plan = store.load(id).unwrap().unwrap();
    store.save(&plan).unwrap();

    let raw = fs::read_to_string(dir.path().join(format!("{id}.json"))).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value["floors"].is_array(), "migrated shape must persist floors");
    assert_eq!(value["floors"][0]["name"], "Ground Floor");
    assert!(value.get("elements").is_none(), "no root-level entities anymore");

    // Migration is idempotent across reloads.
    let again = store.load(id).unwrap().unwrap();
    assert_eq!(again, plan);
}

#[test]
fn file_store_round_trips_a_current_document() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path()).unwrap();

    let mut plan = FloorPlan::new("Home");
    plan.floors[0].elements.push(Element::new(
        ElementKind::Polygon,
        vec![
            Point::new(0.1, 0.1),
            Point::new(0.9, 0.1),
            Point::new(0.5, 0.8),
        ],
        ElementStyle::default(),
    ));
    plan.floors[0]
        .sensors
        .push(PlacedSensor::new("box-1", Point::new(0.5, 0.3), None));

    let saved = store.save(&plan).unwrap();
    let id = saved.id.unwrap();
    assert_eq!(store.load(id).unwrap().unwrap(), saved);

    store.delete(id).unwrap();
    assert!(store.load(id).unwrap().is_none());
    assert!(matches!(
        store.delete(id),
        Err(StorageError::NotFound { id: missing }) if missing == id
    ));
}

#[test]
fn list_all_skips_unreadable_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path()).unwrap();
    store.save(&FloorPlan::new("A")).unwrap();
    store.save(&FloorPlan::new("B")).unwrap();
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let mut names: Vec<_> = store
        .list_all()
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    names.sort();
    assert_eq!(names, ["A", "B"]);
}
