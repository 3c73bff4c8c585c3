use crate::starfield::DEFAULT_SPEED;
use serde::{Deserialize, Serialize};

/// Persisted user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "starfieldEnabled", default)]
    pub starfield_enabled: bool,
    #[serde(rename = "starfieldSpeed", default = "default_speed")]
    pub starfield_speed: f64,
    #[serde(default)]
    pub model: Model,
    #[serde(rename = "lastExportDir", default)]
    pub last_export_dir: Option<String>,
}

fn default_speed() -> f64 {
    DEFAULT_SPEED
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starfield_enabled: false,
            starfield_speed: DEFAULT_SPEED,
            model: Model::default(),
            last_export_dir: None,
        }
    }
}

/// Translation backend label shown in the model dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Model {
    #[default]
    Gemini,
    Qwen,
}

impl Model {
    pub const ALL: [Model; 2] = [Model::Gemini, Model::Qwen];

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Model::Gemini => write!(f, "Gemini"),
            Model::Qwen => write!(f, "Qwen"),
        }
    }
}

/// A single focusable UI element in the linear navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusItem {
    PrevChapter,
    NextChapter,
    ChapterBox,
    ModelBox,
    Export,
    TranslationTitle,
    OriginalText,
    TranslationText,
    MiniPrompt,
}

impl FocusItem {
    pub const ORDER: [FocusItem; 9] = [
        FocusItem::PrevChapter,
        FocusItem::NextChapter,
        FocusItem::ChapterBox,
        FocusItem::ModelBox,
        FocusItem::Export,
        FocusItem::TranslationTitle,
        FocusItem::OriginalText,
        FocusItem::TranslationText,
        FocusItem::MiniPrompt,
    ];

    pub fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Items that take typed characters.
    pub fn is_text_input(self) -> bool {
        matches!(
            self,
            FocusItem::ChapterBox
                | FocusItem::TranslationTitle
                | FocusItem::TranslationText
                | FocusItem::MiniPrompt
        )
    }

    /// Which panel does this focus item belong to?
    pub fn panel(self) -> FocusPanel {
        match self {
            FocusItem::PrevChapter
            | FocusItem::NextChapter
            | FocusItem::ChapterBox
            | FocusItem::ModelBox
            | FocusItem::Export => FocusPanel::Toolbar,
            FocusItem::TranslationTitle | FocusItem::OriginalText | FocusItem::TranslationText => {
                FocusPanel::Editors
            }
            FocusItem::MiniPrompt => FocusPanel::Prompt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPanel {
    Toolbar,
    Editors,
    Prompt,
}

/// Active modal dialog type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    /// Manual export path entry, for when no native dialog is available.
    ExportPath { value: String },
    Help,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_order_wraps_both_ways() {
        assert_eq!(FocusItem::MiniPrompt.next(), FocusItem::PrevChapter);
        assert_eq!(FocusItem::PrevChapter.prev(), FocusItem::MiniPrompt);
        assert_eq!(FocusItem::Export.next(), FocusItem::TranslationTitle);
    }

    #[test]
    fn model_cycles() {
        assert_eq!(Model::Gemini.next(), Model::Qwen);
        assert_eq!(Model::Qwen.next(), Model::Gemini);
        assert_eq!(Model::Gemini.prev(), Model::Qwen);
        assert_eq!(Model::Qwen.to_string(), "Qwen");
    }

    #[test]
    fn only_editable_fields_take_text() {
        assert!(FocusItem::TranslationText.is_text_input());
        assert!(FocusItem::ChapterBox.is_text_input());
        assert!(!FocusItem::OriginalText.is_text_input());
        assert!(!FocusItem::Export.is_text_input());
    }
}
