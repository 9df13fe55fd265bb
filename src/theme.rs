//! Centralized theme and styling constants for the Maquette viewer
//!
//! This module provides a single source of truth for all colors and
//! dimensions used throughout the application.

use egui::{Color32, Context, Visuals};

/// Color palette for the viewer
pub struct Colors {
    // Chrome
    pub main_background: Color32,
    pub panel_background: Color32,
    pub panel_head: Color32,

    // Accents
    pub accent: Color32,
    pub accent_hover: Color32,

    // Sidebar
    pub category_open: Color32,
    pub entry_text: Color32,

    // Viewport overlays
    pub status_text: Color32,
    pub status_error: Color32,
}

impl Colors {
    /// Get the default color palette
    pub fn default() -> Self {
        Self {
            main_background: Color32::from_rgb(22, 27, 34),
            panel_background: Color32::from_rgb(28, 28, 28),
            panel_head: Color32::from_rgb(38, 38, 38),

            accent: Color32::from_rgb(100, 150, 255),
            accent_hover: Color32::from_rgb(120, 170, 255),

            category_open: Color32::from_rgb(166, 166, 166),
            entry_text: Color32::from_rgb(200, 200, 200),

            status_text: Color32::from_rgb(220, 220, 220),
            status_error: Color32::from_rgb(235, 100, 100),
        }
    }
}

/// Dimension constants for the viewer chrome
pub struct Dimensions {
    pub tool_button_height: f32,
    pub panel_inner_margin: f32,
    pub corner_radius: f32,
    pub status_offset: f32,
}

impl Dimensions {
    pub fn default() -> Self {
        Self {
            tool_button_height: 28.0,
            panel_inner_margin: 8.0,
            corner_radius: 4.0,
            status_offset: 12.0,
        }
    }
}

/// Apply the viewer's dark theme to an egui context
pub fn apply(ctx: &Context) {
    let colors = Colors::default();
    let mut visuals = Visuals::dark();
    visuals.panel_fill = colors.panel_background;
    visuals.window_fill = colors.panel_background;
    visuals.extreme_bg_color = colors.main_background;
    visuals.selection.bg_fill = colors.accent.linear_multiply(0.4);
    visuals.hyperlink_color = colors.accent;
    ctx.set_visuals(visuals);
}
