use std::collections::HashSet;

use tracing::{debug, warn};

use crate::{
    designer::draft::PropertiesDraft,
    element::instance::ElementInstance,
    error::PropertyError,
};

/// What happened to an open properties draft when the selection moved.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftFlush {
    NothingPending,
    Committed,
    Discarded(Vec<PropertyError>),
}

/// Owns the ordered element list and the selection slot.
///
/// All writes go through the operations below so that ids stay unique and
/// positions stay dense. Every operation completes before returning.
#[derive(Debug, Default)]
pub struct DesignerStore {
    elements: Vec<ElementInstance>,
    selected: Option<String>,
    draft: Option<PropertiesDraft>,
}

impl DesignerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements(elements: Vec<ElementInstance>) -> Self {
        let mut store = Self::new();
        store.set_elements(elements);
        store
    }

    pub fn elements(&self) -> &[ElementInstance] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|el| el.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&ElementInstance> {
        self.elements.iter().find(|el| el.id == id)
    }

    // ------------------------------------------------------------------------
    // List mutations
    // ------------------------------------------------------------------------

    /// Insert `instance` at `index`, shifting later elements right.
    ///
    /// `index` past the end is a caller bug: it asserts in debug builds and
    /// clamps to an append in release builds. An instance whose id is already
    /// present is refused so the list never holds duplicates.
    pub fn add_element(&mut self, index: usize, instance: ElementInstance) -> bool {
        if self.index_of(&instance.id).is_some() {
            warn!(id = %instance.id, "refusing to add element with duplicate id");
            return false;
        }

        debug_assert!(
            index <= self.elements.len(),
            "add_element index {} out of range for list of {}",
            index,
            self.elements.len()
        );
        let index = if index > self.elements.len() {
            warn!(index, len = self.elements.len(), "clamping out-of-range insert");
            self.elements.len()
        } else {
            index
        };

        debug!(id = %instance.id, kind = %instance.kind, index, "element added");
        self.elements.insert(index, instance);
        true
    }

    /// Delete the element with `id`. Unknown ids are a no-op: removal can race
    /// with a re-render that already dropped the element.
    ///
    /// Selection is held by id, so removing the selected element simply makes
    /// `selected_element` come back empty until it is re-inserted (a move).
    pub fn remove_element(&mut self, id: &str) -> Option<ElementInstance> {
        let Some(index) = self.index_of(id) else {
            debug!(id, "remove of unknown element ignored");
            return None;
        };

        let removed = self.elements.remove(index);
        debug!(id, index, "element removed");
        Some(removed)
    }

    /// Replace the element with `id` in place. Unknown ids are a no-op so a
    /// late edit cannot resurrect a deleted element. The stored id always
    /// wins over whatever id `instance` carries.
    pub fn update_element(&mut self, id: &str, mut instance: ElementInstance) -> bool {
        let Some(index) = self.index_of(id) else {
            debug!(id, "update of unknown element ignored");
            return false;
        };

        if instance.id != id {
            warn!(id, incoming = %instance.id, "update carried a different id; keeping the stored one");
            instance.id = id.to_string();
        }

        self.elements[index] = instance;
        debug!(id, index, "element updated");
        true
    }

    /// Wholesale replace, used when hydrating from persisted content.
    /// Later duplicates of an id are dropped. Selection is cleared.
    pub fn set_elements(&mut self, elements: Vec<ElementInstance>) {
        let mut seen = HashSet::new();
        self.elements = elements
            .into_iter()
            .filter(|el| {
                let fresh = seen.insert(el.id.clone());
                if !fresh {
                    warn!(id = %el.id, "dropping duplicate element id on hydrate");
                }
                fresh
            })
            .collect();
        self.selected = None;
        self.draft = None;
        debug!(len = self.elements.len(), "elements replaced");
    }

    // ------------------------------------------------------------------------
    // Selection and properties editing
    // ------------------------------------------------------------------------

    pub fn selected_element(&self) -> Option<&ElementInstance> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    pub fn draft(&self) -> Option<&PropertiesDraft> {
        self.draft.as_ref()
    }

    /// Move the selection. A pending draft for the previous selection is
    /// committed first; a draft that fails its property rules is discarded.
    pub fn set_selected_element(&mut self, id: Option<&str>) -> DraftFlush {
        if id.is_some() && id == self.selected.as_deref() {
            return DraftFlush::NothingPending;
        }

        let flushed = self.flush_draft();

        self.selected = match id {
            Some(id) if self.index_of(id).is_some() => Some(id.to_string()),
            Some(id) => {
                warn!(id, "cannot select unknown element");
                None
            }
            None => None,
        };
        self.draft = self.selected_element().map(PropertiesDraft::begin);

        flushed
    }

    /// Stage raw editor input for the selected element.
    pub fn edit_property(&mut self, key: &str, raw: &str) -> Result<(), PropertyError> {
        match self.draft.as_mut() {
            Some(draft) => draft.set(key, raw),
            None => Err(PropertyError::new(key, "no element is selected")),
        }
    }

    /// Commit the draft into the list (the focus-loss trigger). Returns
    /// `Ok(false)` when there was nothing to commit.
    pub fn commit_properties(&mut self) -> Result<bool, Vec<PropertyError>> {
        let Some(draft) = self.draft.as_ref() else {
            return Ok(false);
        };
        if !draft.is_dirty() {
            return Ok(false);
        }

        let instance = draft.to_instance()?;
        let id = instance.id.clone();
        let applied = self.update_element(&id, instance);

        self.draft = self.get(&id).map(PropertiesDraft::begin);
        Ok(applied)
    }

    fn flush_draft(&mut self) -> DraftFlush {
        match self.commit_properties() {
            Ok(true) => DraftFlush::Committed,
            Ok(false) => DraftFlush::NothingPending,
            Err(errors) => {
                warn!(count = errors.len(), "discarding invalid properties draft");
                DraftFlush::Discarded(errors)
            }
        }
    }
}
