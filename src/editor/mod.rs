//! Plan editor - state, view transform, canvas interaction and rendering

pub mod canvas;
mod state;
mod view;

pub use canvas::CanvasMode;
pub use state::PlanState;
pub use view::ViewTransform;
