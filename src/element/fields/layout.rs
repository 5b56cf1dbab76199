//! Layout kinds: headings, body text and spacing. None of them carries a
//! submittable value, so their validation accepts anything.

use crate::element::{
    instance::ElementInstance,
    kind::ElementKind,
    properties::PropertyRule,
    registry::{CapabilityBundle, PaletteEntry, PaletteGroup, ViewSet},
    render::{Widget, property_editors},
};

const DEFAULT_SPACER_HEIGHT: i64 = 20;

fn accept_any(_: &ElementInstance, _: &str) -> bool {
    true
}

fn design_caption(caption: &str) -> Widget {
    Widget::Label {
        text: caption.to_string(),
        required: false,
        invalid: false,
    }
}

// ----------------------------------------------------------------------------
// Title
// ----------------------------------------------------------------------------

const TITLE_PROPERTIES: &[PropertyRule] = &[PropertyRule::text("title", "Title", 3, 50)];

fn title_text(el: &ElementInstance) -> String {
    el.text("title").unwrap_or_default().to_string()
}

pub static TITLE: CapabilityBundle = CapabilityBundle {
    kind: ElementKind::TitleField,
    group: PaletteGroup::Layout,
    palette: PaletteEntry { label: "Title Field", icon: "title" },
    construct: |id| ElementInstance::new(id, ElementKind::TitleField).with_attr("title", "Title Field"),
    validate: accept_any,
    properties: TITLE_PROPERTIES,
    views: ViewSet {
        designer: |el| vec![design_caption("Title field"), Widget::Heading { level: 1, text: title_text(el) }],
        form: |el, _| vec![Widget::Heading { level: 1, text: title_text(el) }],
        properties: |el| property_editors(el, TITLE_PROPERTIES),
    },
};

// ----------------------------------------------------------------------------
// Subtitle
// ----------------------------------------------------------------------------

const SUBTITLE_PROPERTIES: &[PropertyRule] = &[PropertyRule::text("subtitle", "Subtitle", 3, 50)];

fn subtitle_text(el: &ElementInstance) -> String {
    el.text("subtitle").unwrap_or_default().to_string()
}

pub static SUBTITLE: CapabilityBundle = CapabilityBundle {
    kind: ElementKind::SubtitleField,
    group: PaletteGroup::Layout,
    palette: PaletteEntry { label: "Subtitle", icon: "subtitles" },
    construct: |id| ElementInstance::new(id, ElementKind::SubtitleField).with_attr("subtitle", "Subtitle Field"),
    validate: accept_any,
    properties: SUBTITLE_PROPERTIES,
    views: ViewSet {
        designer: |el| vec![design_caption("Subtitle field"), Widget::Heading { level: 2, text: subtitle_text(el) }],
        form: |el, _| vec![Widget::Heading { level: 2, text: subtitle_text(el) }],
        properties: |el| property_editors(el, SUBTITLE_PROPERTIES),
    },
};

// ----------------------------------------------------------------------------
// Paragraph
// ----------------------------------------------------------------------------

const PARAGRAPH_PROPERTIES: &[PropertyRule] = &[PropertyRule::text("text", "Text", 1, 500)];

fn paragraph_text(el: &ElementInstance) -> String {
    el.text("text").unwrap_or_default().to_string()
}

pub static PARAGRAPH: CapabilityBundle = CapabilityBundle {
    kind: ElementKind::ParagraphField,
    group: PaletteGroup::Layout,
    palette: PaletteEntry { label: "Paragraph", icon: "paragraph" },
    construct: |id| ElementInstance::new(id, ElementKind::ParagraphField).with_attr("text", "Paragraph Field"),
    validate: accept_any,
    properties: PARAGRAPH_PROPERTIES,
    views: ViewSet {
        designer: |el| vec![design_caption("Paragraph field"), Widget::Paragraph { text: paragraph_text(el) }],
        form: |el, _| vec![Widget::Paragraph { text: paragraph_text(el) }],
        properties: |el| property_editors(el, PARAGRAPH_PROPERTIES),
    },
};

// ----------------------------------------------------------------------------
// Separator
// ----------------------------------------------------------------------------

pub static SEPARATOR: CapabilityBundle = CapabilityBundle {
    kind: ElementKind::SeparatorField,
    group: PaletteGroup::Layout,
    palette: PaletteEntry { label: "Separator", icon: "separator-horizontal" },
    construct: |id| ElementInstance::new(id, ElementKind::SeparatorField),
    validate: accept_any,
    properties: &[],
    views: ViewSet {
        designer: |_| vec![design_caption("Separator field"), Widget::Separator],
        form: |_, _| vec![Widget::Separator],
        properties: |_| vec![Widget::Paragraph { text: "No properties for this element".to_string() }],
    },
};

// ----------------------------------------------------------------------------
// Spacer
// ----------------------------------------------------------------------------

const SPACER_PROPERTIES: &[PropertyRule] = &[PropertyRule::integer("height", "Height (px)", 5, 200)];

fn spacer_height(el: &ElementInstance) -> u32 {
    el.integer("height")
        .and_then(|h| u32::try_from(h).ok())
        .unwrap_or(DEFAULT_SPACER_HEIGHT as u32)
}

pub static SPACER: CapabilityBundle = CapabilityBundle {
    kind: ElementKind::SpacerField,
    group: PaletteGroup::Layout,
    palette: PaletteEntry { label: "Spacer", icon: "height" },
    construct: |id| ElementInstance::new(id, ElementKind::SpacerField).with_attr("height", DEFAULT_SPACER_HEIGHT),
    validate: accept_any,
    properties: SPACER_PROPERTIES,
    views: ViewSet {
        designer: |el| vec![design_caption(&format!("Spacer field: {}px", spacer_height(el)))],
        form: |el, _| vec![Widget::Spacer { height: spacer_height(el) }],
        properties: |el| property_editors(el, SPACER_PROPERTIES),
    },
};
