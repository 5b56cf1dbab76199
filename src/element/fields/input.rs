//! Input kinds: everything that carries a submittable value and may be
//! marked required.

use crate::element::{
    instance::ElementInstance,
    kind::ElementKind,
    properties::PropertyRule,
    registry::{CapabilityBundle, PaletteEntry, PaletteGroup, ViewSet},
    render::{FieldState, Widget, captioned, property_editors},
};

const DEFAULT_HELPER: &str = "Helper text";
const DEFAULT_PLACEHOLDER: &str = "insert value here...";
const DEFAULT_ROWS: i64 = 5;

const LABEL: PropertyRule = PropertyRule::text("label", "Label", 2, 50);
const HELPER_TEXT: PropertyRule = PropertyRule::text("helperText", "Helper text", 0, 200);
const REQUIRED: PropertyRule = PropertyRule::flag("required", "Required");
const PLACEHOLDER: PropertyRule = PropertyRule::text("placeHolder", "Placeholder", 0, 50);

/// Required fields reject an empty value; optional ones accept anything.
fn non_empty_when_required(el: &ElementInstance, value: &str) -> bool {
    !el.is_required() || !value.is_empty()
}

fn captioned_base(id: String, kind: ElementKind, label: &str, helper: &str) -> ElementInstance {
    ElementInstance::new(id, kind)
        .with_attr("label", label)
        .with_attr("helperText", helper)
        .with_attr("required", false)
}

fn placeholder(el: &ElementInstance) -> String {
    el.text("placeHolder").unwrap_or_default().to_string()
}

fn owned_value(state: FieldState<'_>) -> String {
    state.value.unwrap_or_default().to_string()
}

// ----------------------------------------------------------------------------
// Text
// ----------------------------------------------------------------------------

const TEXT_PROPERTIES: &[PropertyRule] = &[LABEL, HELPER_TEXT, REQUIRED, PLACEHOLDER];

pub static TEXT: CapabilityBundle = CapabilityBundle {
    kind: ElementKind::TextField,
    group: PaletteGroup::Form,
    palette: PaletteEntry { label: "Text Field", icon: "text-fields" },
    construct: |id| {
        captioned_base(id, ElementKind::TextField, "Text Field", DEFAULT_HELPER)
            .with_attr("placeHolder", DEFAULT_PLACEHOLDER)
    },
    validate: non_empty_when_required,
    properties: TEXT_PROPERTIES,
    views: ViewSet {
        designer: |el| {
            let control = Widget::TextInput {
                placeholder: placeholder(el),
                value: String::new(),
                read_only: true,
                invalid: false,
            };
            captioned(el, false, control)
        },
        form: |el, state| {
            let control = Widget::TextInput {
                placeholder: placeholder(el),
                value: owned_value(state),
                read_only: false,
                invalid: state.invalid,
            };
            captioned(el, state.invalid, control)
        },
        properties: |el| property_editors(el, TEXT_PROPERTIES),
    },
};

// ----------------------------------------------------------------------------
// Number
// ----------------------------------------------------------------------------

const NUMBER_PROPERTIES: &[PropertyRule] = &[LABEL, HELPER_TEXT, REQUIRED, PLACEHOLDER];

pub static NUMBER: CapabilityBundle = CapabilityBundle {
    kind: ElementKind::NumberField,
    group: PaletteGroup::Form,
    palette: PaletteEntry { label: "Number Field", icon: "numbers" },
    construct: |id| {
        captioned_base(id, ElementKind::NumberField, "Number Field", DEFAULT_HELPER)
            .with_attr("placeHolder", "0")
    },
    validate: non_empty_when_required,
    properties: NUMBER_PROPERTIES,
    views: ViewSet {
        designer: |el| {
            let control = Widget::NumberInput {
                placeholder: placeholder(el),
                value: String::new(),
                read_only: true,
                invalid: false,
            };
            captioned(el, false, control)
        },
        form: |el, state| {
            let control = Widget::NumberInput {
                placeholder: placeholder(el),
                value: owned_value(state),
                read_only: false,
                invalid: state.invalid,
            };
            captioned(el, state.invalid, control)
        },
        properties: |el| property_editors(el, NUMBER_PROPERTIES),
    },
};

// ----------------------------------------------------------------------------
// Text area
// ----------------------------------------------------------------------------

const TEXT_AREA_PROPERTIES: &[PropertyRule] = &[
    LABEL,
    HELPER_TEXT,
    REQUIRED,
    PLACEHOLDER,
    PropertyRule::integer("rows", "Rows", 1, 10),
];

fn rows(el: &ElementInstance) -> u32 {
    el.integer("rows")
        .and_then(|r| u32::try_from(r).ok())
        .unwrap_or(DEFAULT_ROWS as u32)
}

pub static TEXT_AREA: CapabilityBundle = CapabilityBundle {
    kind: ElementKind::TextAreaField,
    group: PaletteGroup::Form,
    palette: PaletteEntry { label: "Text Area", icon: "text-align-justify" },
    construct: |id| {
        captioned_base(id, ElementKind::TextAreaField, "Text Area", DEFAULT_HELPER)
            .with_attr("placeHolder", DEFAULT_PLACEHOLDER)
            .with_attr("rows", DEFAULT_ROWS)
    },
    validate: non_empty_when_required,
    properties: TEXT_AREA_PROPERTIES,
    views: ViewSet {
        designer: |el| {
            let control = Widget::TextArea {
                placeholder: placeholder(el),
                value: String::new(),
                rows: rows(el),
                read_only: true,
                invalid: false,
            };
            captioned(el, false, control)
        },
        form: |el, state| {
            let control = Widget::TextArea {
                placeholder: placeholder(el),
                value: owned_value(state),
                rows: rows(el),
                read_only: false,
                invalid: state.invalid,
            };
            captioned(el, state.invalid, control)
        },
        properties: |el| property_editors(el, TEXT_AREA_PROPERTIES),
    },
};

// ----------------------------------------------------------------------------
// Date
// ----------------------------------------------------------------------------

const DATE_PROPERTIES: &[PropertyRule] = &[LABEL, HELPER_TEXT, REQUIRED];

pub static DATE: CapabilityBundle = CapabilityBundle {
    kind: ElementKind::DateField,
    group: PaletteGroup::Form,
    palette: PaletteEntry { label: "Date", icon: "date-range" },
    construct: |id| captioned_base(id, ElementKind::DateField, "Date Field", "Pick a date"),
    validate: non_empty_when_required,
    properties: DATE_PROPERTIES,
    views: ViewSet {
        designer: |el| {
            let control = Widget::DatePicker { value: None, read_only: true, invalid: false };
            captioned(el, false, control)
        },
        form: |el, state| {
            let control = Widget::DatePicker {
                value: state.value.filter(|v| !v.is_empty()).map(str::to_string),
                read_only: false,
                invalid: state.invalid,
            };
            captioned(el, state.invalid, control)
        },
        properties: |el| property_editors(el, DATE_PROPERTIES),
    },
};

// ----------------------------------------------------------------------------
// Checkbox
// ----------------------------------------------------------------------------

const CHECKBOX_PROPERTIES: &[PropertyRule] = &[LABEL, HELPER_TEXT, REQUIRED];

/// A required checkbox only passes when ticked; its value is `"true"`/`"false"`.
fn checked_when_required(el: &ElementInstance, value: &str) -> bool {
    !el.is_required() || value == "true"
}

pub static CHECKBOX: CapabilityBundle = CapabilityBundle {
    kind: ElementKind::CheckboxField,
    group: PaletteGroup::Form,
    palette: PaletteEntry { label: "Checkbox", icon: "checkbox" },
    construct: |id| captioned_base(id, ElementKind::CheckboxField, "Checkbox Field", DEFAULT_HELPER),
    validate: checked_when_required,
    properties: CHECKBOX_PROPERTIES,
    views: ViewSet {
        designer: |el| {
            let control = Widget::Checkbox { checked: false, read_only: true, invalid: false };
            captioned(el, false, control)
        },
        form: |el, state| {
            let control = Widget::Checkbox {
                checked: state.value == Some("true"),
                read_only: false,
                invalid: state.invalid,
            };
            captioned(el, state.invalid, control)
        },
        properties: |el| property_editors(el, CHECKBOX_PROPERTIES),
    },
};

// ----------------------------------------------------------------------------
// Select
// ----------------------------------------------------------------------------

const SELECT_PROPERTIES: &[PropertyRule] = &[
    LABEL,
    HELPER_TEXT,
    REQUIRED,
    PLACEHOLDER,
    PropertyRule::options("options", "Options"),
];

pub static SELECT: CapabilityBundle = CapabilityBundle {
    kind: ElementKind::SelectField,
    group: PaletteGroup::Form,
    palette: PaletteEntry { label: "Select Field", icon: "format-list" },
    construct: |id| {
        captioned_base(id, ElementKind::SelectField, "Select Field", DEFAULT_HELPER)
            .with_attr("placeHolder", "Value here...")
            .with_attr("options", serde_json::Value::Array(Vec::new()))
    },
    validate: non_empty_when_required,
    properties: SELECT_PROPERTIES,
    views: ViewSet {
        designer: |el| {
            let control = Widget::Select {
                placeholder: placeholder(el),
                options: el.strings("options"),
                value: None,
                read_only: true,
                invalid: false,
            };
            captioned(el, false, control)
        },
        form: |el, state| {
            let control = Widget::Select {
                placeholder: placeholder(el),
                options: el.strings("options"),
                value: state.value.filter(|v| !v.is_empty()).map(str::to_string),
                read_only: false,
                invalid: state.invalid,
            };
            captioned(el, state.invalid, control)
        },
        properties: |el| property_editors(el, SELECT_PROPERTIES),
    },
};
