use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    designer::{ids::IdSource, store::DesignerStore},
    element::{
        kind::ElementKind,
        registry::{self, PaletteEntry},
    },
    error::GestureAbort,
};

// ============================================================================
// Signal contract (what the drag toolkit hands us)
// ============================================================================

/// Data attached to the dragged item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DragPayload {
    pub is_from_palette: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
}

impl DragPayload {
    pub fn palette(kind: ElementKind) -> Self {
        Self {
            is_from_palette: true,
            kind: Some(kind.to_string()),
            element_id: None,
        }
    }

    pub fn existing(element_id: &str) -> Self {
        Self {
            is_from_palette: false,
            kind: None,
            element_id: Some(element_id.to_string()),
        }
    }
}

/// Data attached to the droppable region under the pointer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HoverTarget {
    #[serde(default)]
    pub is_drop_zone: bool,
    #[serde(default)]
    pub is_top_half: bool,
    #[serde(default)]
    pub is_bottom_half: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
}

impl HoverTarget {
    pub fn drop_zone() -> Self {
        Self {
            is_drop_zone: true,
            ..Self::default()
        }
    }

    pub fn top_half(element_id: &str) -> Self {
        Self {
            is_top_half: true,
            element_id: Some(element_id.to_string()),
            ..Self::default()
        }
    }

    pub fn bottom_half(element_id: &str) -> Self {
        Self {
            is_bottom_half: true,
            element_id: Some(element_id.to_string()),
            ..Self::default()
        }
    }
}

// ============================================================================
// Interpreted gesture
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum DragIntent {
    CreateFromPalette { kind: ElementKind },
    MoveExisting { element_id: String },
}

impl TryFrom<&DragPayload> for DragIntent {
    type Error = GestureAbort;

    fn try_from(payload: &DragPayload) -> Result<Self, Self::Error> {
        if payload.is_from_palette {
            let name = payload
                .kind
                .as_deref()
                .ok_or_else(|| GestureAbort::MalformedPayload("palette drag without a kind".into()))?;
            let kind = name.parse::<ElementKind>()?;
            Ok(DragIntent::CreateFromPalette { kind })
        } else {
            let element_id = payload
                .element_id
                .clone()
                .ok_or_else(|| GestureAbort::MalformedPayload("element drag without an element id".into()))?;
            Ok(DragIntent::MoveExisting { element_id })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "zone", content = "element_id", rename_all = "snake_case")]
pub enum DropTarget {
    WholeCanvas,
    TopHalf(String),
    BottomHalf(String),
}

impl TryFrom<&HoverTarget> for DropTarget {
    type Error = GestureAbort;

    fn try_from(target: &HoverTarget) -> Result<Self, Self::Error> {
        let flags = [target.is_drop_zone, target.is_top_half, target.is_bottom_half];
        if flags.iter().filter(|f| **f).count() != 1 {
            return Err(GestureAbort::MalformedTarget(
                "exactly one of drop zone, top half, bottom half must be set".into(),
            ));
        }

        if target.is_drop_zone {
            return Ok(DropTarget::WholeCanvas);
        }

        let element_id = target
            .element_id
            .clone()
            .ok_or_else(|| GestureAbort::MalformedTarget("element half without an element id".into()))?;

        if target.is_top_half {
            Ok(DropTarget::TopHalf(element_id))
        } else {
            Ok(DropTarget::BottomHalf(element_id))
        }
    }
}

/// What a resolved drop did to the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DropOutcome {
    Created { element_id: String, kind: ElementKind, index: usize },
    Moved { element_id: String, from: usize, to: usize },
    /// Resolved, but nothing to change (self-drop, element dropped on bare canvas).
    Unchanged,
}

/// What to draw under the pointer while a gesture is live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOverlay {
    Palette(PaletteEntry),
    Element { element_id: String },
}

// ============================================================================
// Interpreter
// ============================================================================

/// Turns one drag gesture at a time into store mutations.
pub struct DragInterpreter {
    active: Option<DragIntent>,
    ids: Box<dyn IdSource>,
}

impl DragInterpreter {
    pub fn new(ids: Box<dyn IdSource>) -> Self {
        Self { active: None, ids }
    }

    pub fn active(&self) -> Option<&DragIntent> {
        self.active.as_ref()
    }

    pub fn overlay(&self) -> Option<DragOverlay> {
        match self.active.as_ref()? {
            DragIntent::CreateFromPalette { kind } => Some(DragOverlay::Palette(registry::lookup(*kind).palette)),
            DragIntent::MoveExisting { element_id } => Some(DragOverlay::Element {
                element_id: element_id.clone(),
            }),
        }
    }

    /// Record the dragged item for overlay rendering. No list mutation.
    pub fn on_drag_start(&mut self, payload: &DragPayload) -> Result<(), GestureAbort> {
        let intent = DragIntent::try_from(payload)?;
        debug!(?intent, "drag started");
        self.active = Some(intent);
        Ok(())
    }

    pub fn on_drag_cancel(&mut self) {
        if self.active.take().is_some() {
            debug!("drag cancelled");
        }
    }

    /// Resolve a drop against the current list.
    ///
    /// Either the whole mutation applies or, on `Err`, the list is exactly as
    /// it was before the call.
    pub fn on_drag_end(
        &mut self,
        store: &mut DesignerStore,
        active: Option<&DragPayload>,
        over: Option<&HoverTarget>,
    ) -> Result<DropOutcome, GestureAbort> {
        self.active = None;

        let result = self.resolve(store, active, over);
        match &result {
            Ok(outcome) => debug!(?outcome, "drop resolved"),
            Err(abort) => warn!(%abort, "drop aborted"),
        }
        result
    }

    fn resolve(
        &mut self,
        store: &mut DesignerStore,
        active: Option<&DragPayload>,
        over: Option<&HoverTarget>,
    ) -> Result<DropOutcome, GestureAbort> {
        let active = active.ok_or(GestureAbort::MissingActive)?;
        let over = over.ok_or(GestureAbort::MissingOver)?;

        let intent = DragIntent::try_from(active)?;
        let target = DropTarget::try_from(over)?;

        match (intent, target) {
            (DragIntent::CreateFromPalette { kind }, DropTarget::WholeCanvas) => {
                let index = store.len();
                self.create(store, kind, index)
            }

            (DragIntent::CreateFromPalette { kind }, DropTarget::TopHalf(over_id)) => {
                let index = require_index(store, &over_id)?;
                self.create(store, kind, index)
            }

            // Bottom-half palette drops land one slot above the hovered element.
            (DragIntent::CreateFromPalette { kind }, DropTarget::BottomHalf(over_id)) => {
                let index = require_index(store, &over_id)?.saturating_sub(1);
                self.create(store, kind, index)
            }

            (DragIntent::MoveExisting { element_id }, DropTarget::TopHalf(over_id)) => {
                move_element(store, &element_id, &over_id, 0)
            }

            (DragIntent::MoveExisting { element_id }, DropTarget::BottomHalf(over_id)) => {
                move_element(store, &element_id, &over_id, 1)
            }

            (DragIntent::MoveExisting { element_id }, DropTarget::WholeCanvas) => {
                require_index(store, &element_id)?;
                Ok(DropOutcome::Unchanged)
            }
        }
    }

    fn create(&mut self, store: &mut DesignerStore, kind: ElementKind, index: usize) -> Result<DropOutcome, GestureAbort> {
        let element_id = self.fresh_id(store)?;
        let instance = registry::construct(kind, element_id.clone());
        if !store.add_element(index, instance) {
            return Err(GestureAbort::DuplicateId(element_id));
        }
        Ok(DropOutcome::Created { element_id, kind, index })
    }

    /// Next id from the source that the list does not already hold. A
    /// hydrated list may contain ids the source hands out again.
    fn fresh_id(&mut self, store: &DesignerStore) -> Result<String, GestureAbort> {
        let mut id = self.ids.next_id();
        for _ in 0..store.len() {
            if store.index_of(&id).is_none() {
                return Ok(id);
            }
            debug!(id, "skipping id already in the list");
            id = self.ids.next_id();
        }

        if store.index_of(&id).is_some() {
            return Err(GestureAbort::DuplicateId(id));
        }
        Ok(id)
    }
}

impl std::fmt::Debug for DragInterpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragInterpreter")
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

fn require_index(store: &DesignerStore, id: &str) -> Result<usize, GestureAbort> {
    store
        .index_of(id)
        .ok_or_else(|| GestureAbort::ElementNotFound(id.to_string()))
}

/// Remove the dragged element, then re-insert it relative to the hovered
/// element's index in the shortened list.
fn move_element(
    store: &mut DesignerStore,
    element_id: &str,
    over_id: &str,
    offset: usize,
) -> Result<DropOutcome, GestureAbort> {
    let from = require_index(store, element_id)?;
    require_index(store, over_id)?;

    if element_id == over_id {
        return Ok(DropOutcome::Unchanged);
    }

    let Some(moving) = store.remove_element(element_id) else {
        return Err(GestureAbort::ElementNotFound(element_id.to_string()));
    };
    let Some(over_index) = store.index_of(over_id) else {
        store.add_element(from, moving);
        return Err(GestureAbort::ElementNotFound(over_id.to_string()));
    };

    let to = over_index + offset;
    store.add_element(to, moving);
    Ok(DropOutcome::Moved {
        element_id: element_id.to_string(),
        from,
        to,
    })
}
