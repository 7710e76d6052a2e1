//! Immediate-mode UI toolkit for the floor plan designer
//!
//! Sidebar chrome and form widgets:
//! - Rectangle-based layout helpers
//! - Buttons, checkbox, labels, text inputs
//! - Tab bar for the sidebar panels
//!
//! Immediate mode: no retained widget tree, everything is rebuilt each frame
//! on top of macroquad's draw calls.

mod input;
mod rect;
mod tabbar;
mod text_input;
pub mod theme;
mod widgets;

pub use input::*;
pub use rect::*;
pub use tabbar::*;
pub use text_input::*;
pub use widgets::*;
