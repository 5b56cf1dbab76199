#![allow(dead_code)]

use form_designer::{
    designer::{drag::DragInterpreter, ids::SequentialIds, store::DesignerStore},
    element::{instance::ElementInstance, kind::ElementKind, registry},
};

/// Fresh instance with the kind's defaults under a fixed id.
pub fn element(id: &str, kind: ElementKind) -> ElementInstance {
    registry::construct(kind, id.to_string())
}

/// Store holding one TextField per id, in order.
pub fn text_fields(ids: &[&str]) -> DesignerStore {
    DesignerStore::with_elements(ids.iter().map(|id| element(id, ElementKind::TextField)).collect())
}

pub fn ids(store: &DesignerStore) -> Vec<String> {
    store.elements().iter().map(|el| el.id.clone()).collect()
}

/// Interpreter whose created elements are `new-1`, `new-2`, ...
pub fn interpreter() -> DragInterpreter {
    DragInterpreter::new(Box::new(SequentialIds::new("new")))
}
