use crate::{
    element::{
        fields::{input, layout},
        instance::ElementInstance,
        kind::ElementKind,
        properties::PropertyRule,
        render::{FieldState, Widget},
    },
    error::RegistryError,
};

/// Palette button shown in the elements sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub label: &'static str,
    pub icon: &'static str,
}

/// Whether a kind sits under "Layout Elements" or "Form Elements".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteGroup {
    Layout,
    Form,
}

/// The fixed triple of views every kind provides.
#[derive(Clone, Copy)]
pub struct ViewSet {
    pub designer: fn(&ElementInstance) -> Vec<Widget>,
    pub form: fn(&ElementInstance, FieldState<'_>) -> Vec<Widget>,
    pub properties: fn(&ElementInstance) -> Vec<Widget>,
}

/// Everything a call site needs to know about one element kind.
#[derive(Clone, Copy)]
pub struct CapabilityBundle {
    pub kind: ElementKind,
    pub group: PaletteGroup,
    pub palette: PaletteEntry,

    /// Fresh instance with every attribute the views and `validate` read.
    pub construct: fn(String) -> ElementInstance,

    /// Accepts or rejects a candidate submission value.
    pub validate: fn(&ElementInstance, &str) -> bool,

    pub properties: &'static [PropertyRule],
    pub views: ViewSet,
}

impl CapabilityBundle {
    /// Kinds without a submittable value (headings, spacing) accept anything.
    pub fn is_submittable(&self) -> bool {
        self.group == PaletteGroup::Form
    }
}

impl std::fmt::Debug for CapabilityBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityBundle")
            .field("kind", &self.kind)
            .field("group", &self.group)
            .field("palette", &self.palette)
            .finish_non_exhaustive()
    }
}

/// Resolve the bundle for a kind. Total over [`ElementKind`].
pub fn lookup(kind: ElementKind) -> &'static CapabilityBundle {
    match kind {
        ElementKind::TitleField => &layout::TITLE,
        ElementKind::SubtitleField => &layout::SUBTITLE,
        ElementKind::ParagraphField => &layout::PARAGRAPH,
        ElementKind::SeparatorField => &layout::SEPARATOR,
        ElementKind::SpacerField => &layout::SPACER,
        ElementKind::TextField => &input::TEXT,
        ElementKind::NumberField => &input::NUMBER,
        ElementKind::TextAreaField => &input::TEXT_AREA,
        ElementKind::DateField => &input::DATE,
        ElementKind::CheckboxField => &input::CHECKBOX,
        ElementKind::SelectField => &input::SELECT,
    }
}

/// Resolve a kind by name, failing loudly on anything unregistered.
pub fn lookup_name(name: &str) -> Result<&'static CapabilityBundle, RegistryError> {
    name.parse::<ElementKind>().map(lookup)
}

/// Palette order: layout elements first, then form elements.
pub fn palette() -> impl Iterator<Item = &'static CapabilityBundle> {
    const ORDER: [ElementKind; 11] = [
        ElementKind::TitleField,
        ElementKind::SubtitleField,
        ElementKind::ParagraphField,
        ElementKind::SeparatorField,
        ElementKind::SpacerField,
        ElementKind::TextField,
        ElementKind::NumberField,
        ElementKind::TextAreaField,
        ElementKind::DateField,
        ElementKind::CheckboxField,
        ElementKind::SelectField,
    ];
    ORDER.into_iter().map(lookup)
}

/// Construct a fresh instance of `kind` under `id`.
pub fn construct(kind: ElementKind, id: String) -> ElementInstance {
    (lookup(kind).construct)(id)
}

/// Ask the instance's own kind whether `value` is acceptable.
pub fn validate(instance: &ElementInstance, value: &str) -> bool {
    (lookup(instance.kind).validate)(instance, value)
}
