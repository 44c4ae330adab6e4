pub mod manager;
pub mod transform;
pub mod viewport;

pub use manager::{CursorStyle, DisplayManager};
pub use transform::{CoordinateTransform, MirrorAxis, RotationQuadrant};
pub use viewport::{ScrollViewport, Viewport};
