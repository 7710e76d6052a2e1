//! UI Theme - Shared colors and styling constants
//!
//! Centralized color definitions for the sidebar chrome and the plan canvas.

use macroquad::prelude::Color;

// =============================================================================
// Base UI Colors
// =============================================================================

/// Dark background color
pub const BG_COLOR: Color = Color::new(0.11, 0.11, 0.13, 1.0);

/// Header/toolbar background
pub const HEADER_COLOR: Color = Color::new(0.15, 0.15, 0.18, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.8, 0.8, 0.85, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.4, 0.4, 0.45, 1.0);

/// Accent color (buttons, active tab, focused inputs)
pub const ACCENT_COLOR: Color = Color::new(0.29, 0.56, 0.89, 1.0);

/// Destructive-action buttons
pub const DANGER_COLOR: Color = Color::new(0.75, 0.25, 0.25, 1.0);

// =============================================================================
// Font Sizes
// =============================================================================

/// Header/title text size
pub const FONT_SIZE_HEADER: f32 = 16.0;

/// Standard content text size
pub const FONT_SIZE_CONTENT: f32 = 13.0;

/// Small/detail text size
pub const FONT_SIZE_SMALL: f32 = 11.0;

// =============================================================================
// Plan canvas colors
// =============================================================================

/// Area surrounding the plan canvas
pub const CANVAS_BACKDROP: Color = Color::new(0.08, 0.08, 0.10, 1.0);

/// Canvas background when no floor plan is set
pub const PLAN_BG: Color = Color::new(0.973, 0.976, 0.980, 1.0);

/// Prompt text on the empty canvas
pub const PLAN_PROMPT: Color = Color::new(0.678, 0.710, 0.741, 1.0);

/// Measurement grid lines (semi-transparent red)
pub const GRID_LINE: Color = Color::new(1.0, 0.0, 0.0, 0.3);

/// Furniture placeholder fill
pub const ITEM_FILL: Color = Color::new(0.392, 0.588, 0.784, 0.3);

/// Furniture placeholder border
pub const ITEM_BORDER: Color = Color::new(0.275, 0.471, 0.667, 0.8);

/// Furniture name label
pub const ITEM_LABEL: Color = Color::new(0.2, 0.255, 0.333, 1.0);

/// Selection highlight border
pub const SELECTION_COLOR: Color = Color::new(0.29, 0.565, 0.886, 1.0);
