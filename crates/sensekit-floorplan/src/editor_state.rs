//! Floor plan edit store.
//!
//! `EditorState` holds the single authoritative in-memory [`FloorPlan`],
//! applies edit operations as atomic state transitions, maintains a
//! snapshot-based undo/redo history capped at
//! [`HISTORY_LIMIT`](sensekit_core::constants::HISTORY_LIMIT) entries,
//! and drives the debounced auto-save pipeline against the injected
//! [`PlanStore`].
//!
//! Edit operations never return errors: structurally impossible edits
//! (removing the last floor, unknown ids) are rejected with a `bool` or
//! `Option` result. Only [`save_floor_plan`](EditorState::save_floor_plan)
//! and [`load_floor_plan`](EditorState::load_floor_plan) can fail.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use sensekit_core::constants::HISTORY_LIMIT;
use sensekit_core::{EventBus, Point};

use crate::autosave::{AutoSave, AutoSaveStatus, Clock, SystemClock};
use crate::error::StorageError;
use crate::events::PlanEvent;
use crate::model::{
    Element, ElementStyle, ElementUpdate, Floor, FloorPlan, PlacedSensor, StyleUpdate,
    ViewSettings,
};
use crate::serialization;
use crate::storage::PlanStore;

/// Active drawing tool. UI metadata only, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Select,
    Freehand,
    Rectangle,
    Line,
    Polygon,
    Sensor,
}

/// Currently selected entity on the active floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Element(Uuid),
    Sensor(Uuid),
}

/// The floor plan edit store.
pub struct EditorState {
    plan: FloorPlan,
    active_floor: Uuid,
    tool: Tool,
    style: ElementStyle,
    selection: Option<Selection>,
    is_drawing: bool,
    current_element: Option<Element>,
    /// Deep snapshots of `plan.floors`; `history_index` points at the
    /// currently materialized snapshot, -1 when empty.
    history: Vec<Vec<Floor>>,
    history_index: isize,
    dirty: bool,
    last_saved: Option<DateTime<Utc>>,
    autosave: AutoSave,
    storage: Box<dyn PlanStore>,
    events: Arc<EventBus<PlanEvent>>,
    clock: Arc<dyn Clock>,
}

impl EditorState {
    /// Creates a store with a fresh empty plan, a system clock, and a
    /// private event bus.
    pub fn new(storage: Box<dyn PlanStore>) -> Self {
        Self::with_collaborators(storage, Arc::new(EventBus::new()), Arc::new(SystemClock))
    }

    /// Creates a store with injected collaborators. Tests pass a
    /// [`ManualClock`](crate::ManualClock) here to drive the debounce
    /// deterministically.
    pub fn with_collaborators(
        storage: Box<dyn PlanStore>,
        events: Arc<EventBus<PlanEvent>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let plan = FloorPlan::new("Untitled");
        let active_floor = plan.floors[0].id;
        Self {
            plan,
            active_floor,
            tool: Tool::default(),
            style: ElementStyle::default(),
            selection: None,
            is_drawing: false,
            current_element: None,
            history: Vec::new(),
            history_index: -1,
            dirty: false,
            last_saved: None,
            autosave: AutoSave::new(),
            storage,
            events,
            clock,
        }
    }

    // --- accessors -------------------------------------------------------

    pub fn plan(&self) -> &FloorPlan {
        &self.plan
    }

    pub fn active_floor_id(&self) -> Uuid {
        self.active_floor
    }

    pub fn active_floor(&self) -> &Floor {
        let idx = self.active_floor_index();
        &self.plan.floors[idx]
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn style(&self) -> &ElementStyle {
        &self.style
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    pub fn current_element(&self) -> Option<&Element> {
        self.current_element.as_ref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    pub fn autosave_status(&self) -> AutoSaveStatus {
        self.autosave.status
    }

    pub fn auto_save_enabled(&self) -> bool {
        self.autosave.enabled
    }

    pub fn can_undo(&self) -> bool {
        self.history_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.history_index >= 0 && (self.history_index as usize) < self.history.len() - 1
    }

    /// Number of retained history snapshots.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The bus this store publishes [`PlanEvent`]s on.
    pub fn events(&self) -> Arc<EventBus<PlanEvent>> {
        Arc::clone(&self.events)
    }

    // --- meta / non-history-tracked operations ---------------------------

    /// Renames the plan. Persisted, so the plan becomes dirty.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.plan.name = name.into();
        self.mark_dirty();
    }

    /// Switches the active floor. Returns false for unknown ids.
    pub fn set_active_floor(&mut self, floor_id: Uuid) -> bool {
        if self.plan.floor(floor_id).is_none() {
            return false;
        }
        if self.active_floor != floor_id {
            self.active_floor = floor_id;
            self.selection = None;
        }
        true
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Merges a partial update into the default draw style.
    pub fn set_style(&mut self, update: StyleUpdate) {
        self.style.apply(&update);
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    /// Stores the editor's last zoom/pan. Persisted with the document.
    pub fn set_view_settings(&mut self, view_settings: ViewSettings) {
        self.plan.view_settings = view_settings;
        self.mark_dirty();
    }

    /// Renames a floor. Low-risk metadata edit, not history-tracked.
    pub fn rename_floor(&mut self, floor_id: Uuid, name: impl Into<String>) -> bool {
        match self.plan.floor_mut(floor_id) {
            Some(floor) => {
                floor.name = name.into();
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    // --- floor operations (history-tracked) ------------------------------

    /// Appends a new floor and makes it active. Returns its id.
    pub fn add_floor(&mut self, name: Option<String>) -> Uuid {
        let before = self.plan.floors.clone();
        let name = name.unwrap_or_else(|| format!("Floor {}", self.plan.floors.len() + 1));
        let floor = Floor::new(name);
        let id = floor.id;
        self.plan.floors.push(floor);
        self.active_floor = id;
        self.commit_history(before);
        self.events.publish(PlanEvent::FloorAdded { id });
        id
    }

    /// Removes a floor. Rejected (returns false, publishes
    /// [`PlanEvent::FloorRemoveRejected`]) when it is the last floor;
    /// unknown ids also return false.
    pub fn remove_floor(&mut self, floor_id: Uuid) -> bool {
        if self.plan.floors.len() <= 1 {
            debug!(%floor_id, "refusing to remove the last floor");
            self.events
                .publish(PlanEvent::FloorRemoveRejected { id: floor_id });
            return false;
        }
        let Some(pos) = self.plan.floors.iter().position(|f| f.id == floor_id) else {
            return false;
        };

        let before = self.plan.floors.clone();
        self.plan.floors.remove(pos);
        if self.active_floor == floor_id {
            self.active_floor = self.plan.floors[0].id;
            self.selection = None;
        }
        self.commit_history(before);
        self.events.publish(PlanEvent::FloorRemoved { id: floor_id });
        true
    }

    // --- element operations ----------------------------------------------

    /// Appends an element to the active floor. Drafts violating the
    /// point-count rules are dropped. Returns the stored element's id.
    pub fn add_element(&mut self, element: Element) -> Option<Uuid> {
        if !element.has_valid_points() {
            warn!(kind = ?element.kind, points = element.points.len(), "dropping invalid element draft");
            return None;
        }
        let before = self.plan.floors.clone();
        let id = element.id;
        let idx = self.active_floor_index();
        self.plan.floors[idx].elements.push(element);
        self.commit_history(before);
        Some(id)
    }

    /// Merges updates into an element on the active floor. Continuous
    /// drag updates land here, so this is not history-tracked.
    pub fn update_element(&mut self, element_id: Uuid, update: ElementUpdate) -> bool {
        let idx = self.active_floor_index();
        let Some(element) = self.plan.floors[idx].element_mut(element_id) else {
            return false;
        };
        if let Some(points) = update.points {
            element.points = points;
        }
        if let Some(style) = update.style {
            element.style.apply(&style);
        }
        self.mark_dirty();
        true
    }

    /// Removes an element from the active floor, clearing the selection
    /// if it was selected.
    pub fn remove_element(&mut self, element_id: Uuid) -> bool {
        let idx = self.active_floor_index();
        let Some(pos) = self.plan.floors[idx]
            .elements
            .iter()
            .position(|e| e.id == element_id)
        else {
            return false;
        };

        let before = self.plan.floors.clone();
        self.plan.floors[idx].elements.remove(pos);
        if self.selection == Some(Selection::Element(element_id)) {
            self.selection = None;
        }
        self.commit_history(before);
        true
    }

    // --- sensor operations -------------------------------------------------

    /// Places a sensor on the active floor. Returns the placement id.
    pub fn place_sensor(
        &mut self,
        sensor_box_id: impl Into<String>,
        position: Point,
        label: Option<String>,
    ) -> Uuid {
        let before = self.plan.floors.clone();
        let sensor = PlacedSensor::new(sensor_box_id, position, label);
        let id = sensor.id;
        let idx = self.active_floor_index();
        self.plan.floors[idx].sensors.push(sensor);
        self.commit_history(before);
        id
    }

    /// Repositions a sensor. Continuous drag, not history-tracked.
    pub fn move_sensor(&mut self, sensor_id: Uuid, position: Point) -> bool {
        let idx = self.active_floor_index();
        let Some(sensor) = self.plan.floors[idx].sensor_mut(sensor_id) else {
            return false;
        };
        sensor.position = position;
        self.mark_dirty();
        true
    }

    /// Removes a sensor placement from the active floor.
    pub fn remove_sensor(&mut self, sensor_id: Uuid) -> bool {
        let idx = self.active_floor_index();
        let Some(pos) = self.plan.floors[idx]
            .sensors
            .iter()
            .position(|s| s.id == sensor_id)
        else {
            return false;
        };

        let before = self.plan.floors.clone();
        self.plan.floors[idx].sensors.remove(pos);
        if self.selection == Some(Selection::Sensor(sensor_id)) {
            self.selection = None;
        }
        self.commit_history(before);
        true
    }

    // --- drawing session ---------------------------------------------------

    /// Begins a drawing session with an element draft.
    pub fn start_drawing(&mut self, draft: Element) {
        self.is_drawing = true;
        self.current_element = Some(draft);
    }

    /// Replaces the in-progress draft while the pointer moves (appending
    /// freehand points, repositioning a rectangle's second corner).
    /// Ignored when no session is active.
    pub fn update_drawing(&mut self, draft: Element) {
        if self.is_drawing {
            self.current_element = Some(draft);
        }
    }

    /// Ends the session, committing the draft through
    /// [`add_element`](Self::add_element). This is the only path by which
    /// drafts become permanent elements.
    pub fn end_drawing(&mut self) -> Option<Uuid> {
        self.is_drawing = false;
        let draft = self.current_element.take()?;
        self.add_element(draft)
    }

    // --- history -----------------------------------------------------------

    /// Steps back one snapshot. No-op at the oldest retained snapshot.
    pub fn undo(&mut self) -> bool {
        if self.history_index <= 0 {
            return false;
        }
        self.history_index -= 1;
        self.plan.floors = self.history[self.history_index as usize].clone();
        self.after_history_restore();
        true
    }

    /// Steps forward one snapshot. No-op at the newest.
    pub fn redo(&mut self) -> bool {
        if self.history_index < 0 || self.history_index as usize >= self.history.len() - 1 {
            return false;
        }
        self.history_index += 1;
        self.plan.floors = self.history[self.history_index as usize].clone();
        self.after_history_restore();
        true
    }

    /// Commits a tracked mutation: drops any redo tail, pushes the
    /// pre-operation snapshot when it is not already the tip (it can
    /// differ after non-tracked edits like drags), pushes the new state,
    /// and evicts the oldest entries beyond the cap.
    fn commit_history(&mut self, before: Vec<Floor>) {
        self.history.truncate((self.history_index + 1).max(0) as usize);
        if self.history.last() != Some(&before) {
            self.history.push(before);
        }
        self.history.push(self.plan.floors.clone());
        while self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history_index = self.history.len() as isize - 1;
        self.mark_dirty();
    }

    /// A restored snapshot may no longer contain the active floor or the
    /// selected entity.
    fn after_history_restore(&mut self) {
        if self.plan.floor(self.active_floor).is_none() {
            self.active_floor = self.plan.floors[0].id;
        }
        let selection_alive = match self.selection {
            None => true,
            Some(Selection::Element(id)) => {
                self.plan.floors.iter().any(|f| f.element(id).is_some())
            }
            Some(Selection::Sensor(id)) => {
                self.plan.floors.iter().any(|f| f.sensor(id).is_some())
            }
        };
        if !selection_alive {
            self.selection = None;
        }
        self.mark_dirty();
    }

    // --- persistence ---------------------------------------------------------

    /// Explicit save: persists the whole document, adopts the id the
    /// store assigned, clears the dirty flag, and seeds the auto-save
    /// change detector. Errors propagate and leave the dirty flag set.
    pub fn save_floor_plan(&mut self) -> Result<&FloorPlan, StorageError> {
        let saved = self.storage.save(&self.plan)?;
        self.plan.id = saved.id;
        let payload = serialization::document_to_json(&self.plan)?;
        self.autosave.complete(payload);
        self.dirty = false;
        self.last_saved = Some(Utc::now());
        if let Some(id) = self.plan.id {
            self.events.publish(PlanEvent::PlanSaved {
                id,
                at: self.last_saved.unwrap_or_else(Utc::now),
            });
        }
        Ok(&self.plan)
    }

    /// Loads a document from storage, replacing the entire in-store
    /// state. Returns `Ok(false)` when the id is unknown. Legacy
    /// single-floor documents are migrated by the storage layer before
    /// they get here, so `floors` is never empty.
    pub fn load_floor_plan(&mut self, id: Uuid) -> Result<bool, StorageError> {
        let Some(plan) = self.storage.load(id)? else {
            return Ok(false);
        };

        self.active_floor = plan.floors[0].id;
        self.plan = plan;
        self.selection = None;
        self.is_drawing = false;
        self.current_element = None;
        self.history.clear();
        self.history_index = -1;
        self.dirty = false;
        self.autosave.reset();
        // Seed the change detector so an immediate no-op cycle skips.
        self.autosave.last_payload = serialization::document_to_json(&self.plan).ok();
        self.events.publish(PlanEvent::PlanLoaded { id });
        Ok(true)
    }

    /// Resets to a brand-new plan with one empty default floor and no id.
    pub fn new_floor_plan(&mut self) {
        self.plan = FloorPlan::new("Untitled");
        self.active_floor = self.plan.floors[0].id;
        self.selection = None;
        self.is_drawing = false;
        self.current_element = None;
        self.history.clear();
        self.history_index = -1;
        self.dirty = false;
        self.last_saved = None;
        self.autosave.reset();
    }

    // --- auto-save -----------------------------------------------------------

    /// Globally enables or disables auto-save. Disabling cancels any
    /// pending debounce immediately.
    pub fn set_auto_save_enabled(&mut self, enabled: bool) {
        self.autosave.enabled = enabled;
        if !enabled {
            self.autosave.cancel();
        }
    }

    /// Runs one auto-save cycle if the debounce deadline has elapsed.
    ///
    /// Called from the UI tick. Fire-and-forget: failures surface only
    /// through [`autosave_status`](Self::autosave_status) and the event
    /// bus, never as an error.
    pub fn poll_autosave(&mut self) {
        if !self.autosave.due(self.clock.now()) {
            return;
        }
        self.autosave.begin();
        self.events
            .publish(PlanEvent::AutoSaveStatus(AutoSaveStatus::Saving));

        let payload = match serialization::document_to_json(&self.plan) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "auto-save serialization failed");
                self.autosave.fail();
                self.publish_autosave_failure(err.to_string());
                return;
            }
        };

        if self.autosave.last_payload.as_deref() == Some(payload.as_str()) {
            debug!("auto-save skipped, document unchanged");
            self.finish_autosave(payload);
            return;
        }

        match self.storage.save(&self.plan) {
            Ok(saved) => {
                self.plan.id = saved.id;
                self.finish_autosave(payload);
                if let Some(id) = self.plan.id {
                    self.events.publish(PlanEvent::PlanSaved {
                        id,
                        at: self.last_saved.unwrap_or_else(Utc::now),
                    });
                }
            }
            Err(err) => {
                warn!(error = %err, "auto-save failed");
                self.autosave.fail();
                self.publish_autosave_failure(err.to_string());
            }
        }
    }

    fn finish_autosave(&mut self, payload: String) {
        self.autosave.complete(payload);
        self.dirty = false;
        self.last_saved = Some(Utc::now());
        self.events
            .publish(PlanEvent::AutoSaveStatus(AutoSaveStatus::Saved));
    }

    fn publish_autosave_failure(&self, message: String) {
        self.events
            .publish(PlanEvent::AutoSaveStatus(AutoSaveStatus::Error));
        self.events.publish(PlanEvent::AutoSaveFailed { message });
    }

    /// Marks unsaved changes and, for plans that already have an id,
    /// (re)arms the debounce. Never-saved plans only persist through an
    /// explicit [`save_floor_plan`](Self::save_floor_plan).
    fn mark_dirty(&mut self) {
        self.dirty = true;
        if self.autosave.enabled && self.plan.id.is_some() {
            let was_pending = self.autosave.status == AutoSaveStatus::Pending;
            self.autosave.schedule(self.clock.now());
            if !was_pending {
                self.events
                    .publish(PlanEvent::AutoSaveStatus(AutoSaveStatus::Pending));
            }
        }
    }

    fn active_floor_index(&self) -> usize {
        self.plan
            .floors
            .iter()
            .position(|f| f.id == self.active_floor)
            .unwrap_or(0)
    }
}
