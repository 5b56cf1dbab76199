use tracing::{info, warn};

use crate::{
    content::{
        codec,
        form::{FormRecord, FormRepository},
    },
    designer::{
        drag::{DragInterpreter, DragOverlay, DragPayload, DropOutcome, HoverTarget},
        ids::IdSource,
        store::DesignerStore,
    },
    element::{registry, render::Widget},
    error::{BoundaryError, GestureAbort, SessionError},
    trace::{logger::TraceLogger, trace::GestureEvent},
};

/// One open builder page: the designer store for a form, the drag
/// interpreter feeding it, and the save/publish round-trips.
#[derive(Debug)]
pub struct BuilderSession {
    form_id: u64,
    name: String,
    published: bool,
    store: DesignerStore,
    interpreter: DragInterpreter,
    tracer: TraceLogger,
    saved_fingerprint: String,
    step: u64,
}

impl BuilderSession {
    /// Fetch a form and hydrate the designer from its content.
    pub fn open(repo: &dyn FormRepository, form_id: u64, ids: Box<dyn IdSource>) -> Result<Self, SessionError> {
        let record = repo.fetch_form(form_id)?;
        Self::from_record(&record, ids)
    }

    pub fn from_record(record: &FormRecord, ids: Box<dyn IdSource>) -> Result<Self, SessionError> {
        let elements = codec::decode(&record.content)?;
        let saved_fingerprint = codec::fingerprint(&elements)?;

        Ok(Self {
            form_id: record.id,
            name: record.name.clone(),
            published: record.published,
            store: DesignerStore::with_elements(elements),
            interpreter: DragInterpreter::new(ids),
            tracer: TraceLogger::disabled(),
            saved_fingerprint,
            step: 0,
        })
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn form_id(&self) -> u64 {
        self.form_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_published(&self) -> bool {
        self.published
    }

    pub fn store(&self) -> &DesignerStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DesignerStore {
        &mut self.store
    }

    // ------------------------------------------------------------------------
    // Drag gestures
    // ------------------------------------------------------------------------

    pub fn drag_start(&mut self, payload: &DragPayload) -> Result<(), GestureAbort> {
        self.interpreter.on_drag_start(payload)
    }

    pub fn drag_cancel(&mut self) {
        self.interpreter.on_drag_cancel();
    }

    pub fn drag_end(
        &mut self,
        active: Option<&DragPayload>,
        over: Option<&HoverTarget>,
    ) -> Result<DropOutcome, GestureAbort> {
        let event = GestureEvent::now(self.step, self.store.len()).with_signals(active, over);
        self.step += 1;

        let result = self.interpreter.on_drag_end(&mut self.store, active, over);
        self.tracer.log(&event.with_result(&result, self.store.len()));
        result
    }

    pub fn overlay(&self) -> Option<DragOverlay> {
        self.interpreter.overlay()
    }

    // ------------------------------------------------------------------------
    // Canvas and persistence
    // ------------------------------------------------------------------------

    /// Designer view of every element, top to bottom.
    pub fn canvas(&self) -> Vec<(String, Vec<Widget>)> {
        self.store
            .elements()
            .iter()
            .map(|el| (el.id.clone(), (registry::lookup(el.kind).views.designer)(el)))
            .collect()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        match codec::fingerprint(self.store.elements()) {
            Ok(current) => current != self.saved_fingerprint,
            Err(error) => {
                warn!(form_id = self.form_id, %error, "could not fingerprint designer content");
                true
            }
        }
    }

    /// Write the current list as the form's content. On failure the designer
    /// keeps every edit so the user can retry.
    pub fn save(&mut self, repo: &mut dyn FormRepository) -> Result<(), SessionError> {
        if self.published {
            return Err(BoundaryError::Published(self.form_id).into());
        }

        if let Err(errors) = self.store.commit_properties() {
            warn!(count = errors.len(), "saving without the invalid properties draft");
        }

        let content = codec::encode(self.store.elements())?;
        let fingerprint = codec::fingerprint(self.store.elements())?;

        if let Err(error) = repo.update_content(self.form_id, content) {
            warn!(form_id = self.form_id, %error, "save failed");
            return Err(error.into());
        }

        self.saved_fingerprint = fingerprint;
        info!(form_id = self.form_id, elements = self.store.len(), "form saved");
        Ok(())
    }

    /// Save, then lock the form for submissions. Published forms are no
    /// longer editable.
    pub fn publish(&mut self, repo: &mut dyn FormRepository) -> Result<(), SessionError> {
        self.save(repo)?;

        if let Err(error) = repo.publish(self.form_id) {
            warn!(form_id = self.form_id, %error, "publish failed");
            return Err(error.into());
        }

        self.published = true;
        info!(form_id = self.form_id, "form published");
        Ok(())
    }
}
