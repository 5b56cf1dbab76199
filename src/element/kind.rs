use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Identifies what a placed form field is.
///
/// Serialized by name (`"TextField"`, `"DateField"`, ...) in the content
/// artifact and in drag payloads. Parsing an unknown name is a
/// [`RegistryError::UnregisteredKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ElementKind {
    TextField,
    TitleField,
    SubtitleField,
    ParagraphField,
    SeparatorField,
    SpacerField,
    NumberField,
    TextAreaField,
    DateField,
    CheckboxField,
    SelectField,
}

impl ElementKind {
    pub const ALL: [ElementKind; 11] = [
        ElementKind::TextField,
        ElementKind::TitleField,
        ElementKind::SubtitleField,
        ElementKind::ParagraphField,
        ElementKind::SeparatorField,
        ElementKind::SpacerField,
        ElementKind::NumberField,
        ElementKind::TextAreaField,
        ElementKind::DateField,
        ElementKind::CheckboxField,
        ElementKind::SelectField,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::TextField => "TextField",
            ElementKind::TitleField => "TitleField",
            ElementKind::SubtitleField => "SubtitleField",
            ElementKind::ParagraphField => "ParagraphField",
            ElementKind::SeparatorField => "SeparatorField",
            ElementKind::SpacerField => "SpacerField",
            ElementKind::NumberField => "NumberField",
            ElementKind::TextAreaField => "TextAreaField",
            ElementKind::DateField => "DateField",
            ElementKind::CheckboxField => "CheckboxField",
            ElementKind::SelectField => "SelectField",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| RegistryError::UnregisteredKind(s.to_string()))
    }
}

impl TryFrom<String> for ElementKind {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        kind.as_str().to_string()
    }
}
