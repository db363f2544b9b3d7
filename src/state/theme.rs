use egui::{Color32, Visuals};
use serde::{Deserialize, Serialize};

/// Orange used for the data line, buttons and highlights.
pub const ACCENT: Color32 = Color32::from_rgb(234, 88, 12);
/// Hovered point marker.
pub const HIGHLIGHT: Color32 = Color32::from_rgb(239, 68, 68);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(255, 80, 80);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn visuals(&self) -> Visuals {
        match self {
            Theme::Dark => Visuals::dark(),
            Theme::Light => Visuals::light(),
        }
    }

    /// The chart keeps a light background in both themes so exported
    /// images look the same.
    pub fn plot_bg(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(250, 250, 250),
            Theme::Light => Color32::WHITE,
        }
    }

    pub fn plot_text(&self) -> Color32 {
        Color32::from_rgb(31, 41, 55)
    }

    pub fn grid_color(&self) -> Color32 {
        Color32::from_rgb(229, 231, 235)
    }

    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Dark => "Light Mode",
            Theme::Light => "Dark Mode",
        }
    }
}
