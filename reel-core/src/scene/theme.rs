//! Fixed style bundles selected by key. Pure data; nothing here is mutated.

use std::str::FromStr;

use crate::foundation::error::{ReelError, ReelResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Styling of the text-highlight scene.
pub struct HighlightTheme {
    /// Page background colour.
    pub background_color: &'static str,
    /// Body text colour.
    pub text_color: &'static str,
    /// CSS font stack.
    pub font_family: &'static str,
    /// Fill colour of the growing highlight.
    pub highlight_color: &'static str,
    /// Font weight of highlighted runs.
    pub highlight_font_weight: &'static str,
    /// Font size of highlighted runs in pixels.
    pub highlight_font_size: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Key of a [`HighlightTheme`].
pub enum HighlightThemeKey {
    /// Serif on white.
    #[default]
    Theme1,
    /// Sans on black.
    Theme2,
    /// Monospace on white.
    Theme3,
    /// Sans on black with red highlights.
    Theme4,
}

const THEME1: HighlightTheme = HighlightTheme {
    background_color: "white",
    text_color: "black",
    font_family: "\"Times New Roman\", Times, serif",
    highlight_color: "#ffeb3b",
    highlight_font_weight: "bold",
    highlight_font_size: 32,
};

const THEME2: HighlightTheme = HighlightTheme {
    background_color: "black",
    text_color: "white",
    font_family: "Arial, sans-serif",
    ..THEME1
};

const THEME3: HighlightTheme = HighlightTheme {
    font_family: "monospace",
    ..THEME1
};

const THEME4: HighlightTheme = HighlightTheme {
    font_family: "sans-serif",
    highlight_color: "red",
    ..THEME2
};

impl HighlightThemeKey {
    /// Every key, in declaration order.
    pub const ALL: [HighlightThemeKey; 4] = [Self::Theme1, Self::Theme2, Self::Theme3, Self::Theme4];

    /// Style bundle for this key.
    pub fn theme(self) -> &'static HighlightTheme {
        match self {
            Self::Theme1 => &THEME1,
            Self::Theme2 => &THEME2,
            Self::Theme3 => &THEME3,
            Self::Theme4 => &THEME4,
        }
    }

    /// Lowercase key name as used in scene files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Theme1 => "theme1",
            Self::Theme2 => "theme2",
            Self::Theme3 => "theme3",
            Self::Theme4 => "theme4",
        }
    }
}

impl FromStr for HighlightThemeKey {
    type Err = ReelError;

    fn from_str(s: &str) -> ReelResult<Self> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                ReelError::validation(format!(
                    "unknown highlight theme '{s}' (expected theme1..theme4)"
                ))
            })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Vertical rhythm of the list scene, as CSS lengths.
pub struct ListSpacing {
    /// Space under the title.
    pub title_bottom: &'static str,
    /// Space under the underline.
    pub underline_bottom: &'static str,
    /// Space between list items.
    pub list_item_gap: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Styling of the text-list scene.
pub struct ListTheme {
    /// Page background colour.
    pub background_color: &'static str,
    /// Title and item text colour.
    pub text_color: &'static str,
    /// Brush stroke colour.
    pub highlight_color: &'static str,
    /// CSS font stack.
    pub font_family: &'static str,
    /// Title font size (CSS length).
    pub title_font_size: &'static str,
    /// Item font size (CSS length).
    pub list_item_font_size: &'static str,
    /// Spacing constants.
    pub spacing: ListSpacing,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Key of a [`ListTheme`].
pub enum ListThemeKey {
    /// Light text on near-black.
    #[default]
    Dark,
    /// Black monospace on white.
    Light,
    /// White serif on navy with cyan strokes.
    Blue,
}

const LIST_SPACING: ListSpacing = ListSpacing {
    title_bottom: "2rem",
    underline_bottom: "3rem",
    list_item_gap: "1.5rem",
};

const DARK: ListTheme = ListTheme {
    background_color: "#1a1a1a",
    text_color: "#e5e7eb",
    highlight_color: "#ff4444",
    font_family: "Montserrat",
    title_font_size: "5rem",
    list_item_font_size: "3rem",
    spacing: LIST_SPACING,
};

const LIGHT: ListTheme = ListTheme {
    background_color: "#ffffff",
    text_color: "#000000",
    font_family: "monospace",
    ..DARK
};

const BLUE: ListTheme = ListTheme {
    background_color: "#0f1419",
    text_color: "#ffffff",
    highlight_color: "#00bfff",
    font_family: "Times New Roman, Times, serif",
    ..DARK
};

impl ListThemeKey {
    /// Every key, in declaration order.
    pub const ALL: [ListThemeKey; 3] = [Self::Dark, Self::Light, Self::Blue];

    /// Style bundle for this key.
    pub fn theme(self) -> &'static ListTheme {
        match self {
            Self::Dark => &DARK,
            Self::Light => &LIGHT,
            Self::Blue => &BLUE,
        }
    }

    /// Lowercase key name as used in scene files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Blue => "blue",
        }
    }
}

impl FromStr for ListThemeKey {
    type Err = ReelError;

    fn from_str(s: &str) -> ReelResult<Self> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                ReelError::validation(format!(
                    "unknown list theme '{s}' (expected dark|light|blue)"
                ))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/theme.rs"]
mod tests;
