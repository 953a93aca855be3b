//! Shared color constants for the UI.

use egui::Color32;

/// Forest green for success messages and the active mark.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Red for errors and the inactive mark.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Header background for the directory table.
pub const HEADER_BG_COLOR: Color32 = Color32::from_rgb(245, 245, 245);
