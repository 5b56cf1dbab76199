use serde_json::Value;

use crate::element::{
    instance::ElementInstance,
    properties::{PropertyRule, PropertySpec},
};

/// Toolkit-neutral description of what a view draws. The widget toolkit that
/// turns these into real controls lives outside this crate.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    Label { text: String, required: bool, invalid: bool },
    HelperText { text: String, invalid: bool },
    TextInput { placeholder: String, value: String, read_only: bool, invalid: bool },
    NumberInput { placeholder: String, value: String, read_only: bool, invalid: bool },
    TextArea { placeholder: String, value: String, rows: u32, read_only: bool, invalid: bool },
    DatePicker { value: Option<String>, read_only: bool, invalid: bool },
    Checkbox { checked: bool, read_only: bool, invalid: bool },
    Select { placeholder: String, options: Vec<String>, value: Option<String>, read_only: bool, invalid: bool },
    Separator,
    Spacer { height: u32 },
    PropertyEditor { key: String, caption: String, value: String },
}

/// Which of the three views a widget list was produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Designer,
    Form,
    Properties,
}

/// Per-field state handed to the fillable view.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldState<'a> {
    pub value: Option<&'a str>,
    pub invalid: bool,
}

/// Render the properties-editor view from a kind's property rules.
pub fn property_editors(instance: &ElementInstance, rules: &[PropertyRule]) -> Vec<Widget> {
    rules
        .iter()
        .map(|rule| Widget::PropertyEditor {
            key: rule.key.to_string(),
            caption: rule.caption.to_string(),
            value: editor_text(rule, instance.attributes.get(rule.key)),
        })
        .collect()
}

fn editor_text(rule: &PropertyRule, value: Option<&Value>) -> String {
    match (rule.spec, value) {
        (_, None) => String::new(),
        (PropertySpec::Options, Some(Value::Array(items))) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("\n"),
        (_, Some(Value::String(s))) => s.clone(),
        (_, Some(other)) => other.to_string(),
    }
}

/// Label plus optional helper text, shared by every input kind.
pub(crate) fn captioned(instance: &ElementInstance, invalid: bool, control: Widget) -> Vec<Widget> {
    let mut widgets = vec![
        Widget::Label {
            text: instance.label().unwrap_or_default().to_string(),
            required: instance.is_required(),
            invalid,
        },
        control,
    ];

    if let Some(helper) = instance.text("helperText").filter(|h| !h.is_empty()) {
        widgets.push(Widget::HelperText {
            text: helper.to_string(),
            invalid,
        });
    }

    widgets
}
