use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use super::transform::{CoordinateTransform, MirrorAxis, RotationQuadrant};
use super::viewport::Viewport;
use crate::error::StateError;

/// Appearance of the crosshair cursor over the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CursorStyle {
    #[default]
    Small,
    /// Crosshair spanning the whole board view
    Big,
}

impl CursorStyle {
    pub fn all() -> [Self; 2] {
        [Self::Small, Self::Big]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Big => "big",
        }
    }
}

/// Manager for the board view transform and related display properties.
///
/// Rotation and mirror changes keep the board point under the viewport
/// center fixed on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DisplayManagerFields")]
pub struct DisplayManager {
    transform: CoordinateTransform,

    /// Brightness of layers other than the active one, 1.0 = not dimmed
    dim_factor: f64,

    cursor_style: CursorStyle,
}

impl DisplayManager {
    pub fn new(transform: CoordinateTransform) -> Self {
        Self {
            transform,
            dim_factor: 0.7,
            cursor_style: CursorStyle::Small,
        }
    }

    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    pub fn rotation(&self) -> RotationQuadrant {
        self.transform.rotation
    }

    pub fn mirror(&self) -> MirrorAxis {
        self.transform.mirror
    }

    pub fn dim_factor(&self) -> f64 {
        self.dim_factor
    }

    pub fn cursor_style(&self) -> CursorStyle {
        self.cursor_style
    }

    pub fn screen_to_board(&self, screen_point: Point2<f64>) -> Point2<f64> {
        self.transform.screen_to_board(screen_point)
    }

    pub fn board_to_screen(&self, board_point: Point2<f64>) -> Point2<f64> {
        self.transform.board_to_screen(board_point)
    }

    /// Set the board rotation. Returns false if it was already set.
    pub fn set_rotation(
        &mut self,
        rotation: RotationQuadrant,
        viewport: &mut dyn Viewport,
    ) -> bool {
        if self.transform.rotation == rotation {
            return false;
        }
        log::debug!(
            "Rotation changed from {}° to {}°",
            self.transform.rotation.degrees(),
            rotation.degrees()
        );
        self.change_basis(viewport, |transform| transform.rotation = rotation);
        true
    }

    /// Set the rotation from a raw quadrant index, e.g. from restored state
    pub fn set_rotation_index(&mut self, index: i32, viewport: &mut dyn Viewport) -> bool {
        self.set_rotation(RotationQuadrant::from_index(index), viewport)
    }

    /// Rotate by `steps` quarter turns relative to the current rotation
    pub fn rotate_by(&mut self, steps: i32, viewport: &mut dyn Viewport) -> bool {
        let rotation = self.transform.rotation.rotated_by(steps);
        self.set_rotation(rotation, viewport)
    }

    /// Select the mirror axis. Selecting one axis clears the other.
    /// Returns false if `axis` was already selected.
    pub fn set_mirror(&mut self, axis: MirrorAxis, viewport: &mut dyn Viewport) -> bool {
        if self.transform.mirror == axis {
            return false;
        }
        log::debug!(
            "Mirroring changed from {} to {}",
            self.transform.mirror.label(),
            axis.label()
        );
        self.change_basis(viewport, |transform| transform.mirror = axis);
        true
    }

    /// Set the dim factor of inactive layers, must be within [0, 1]
    pub fn set_dim_factor(&mut self, dim_factor: f64) -> bool {
        assert!(
            (0.0..=1.0).contains(&dim_factor),
            "dim factor {} outside [0, 1]",
            dim_factor
        );
        if self.dim_factor == dim_factor {
            return false;
        }
        self.dim_factor = dim_factor;
        true
    }

    pub fn set_cursor_style(&mut self, cursor_style: CursorStyle) -> bool {
        if self.cursor_style == cursor_style {
            return false;
        }
        self.cursor_style = cursor_style;
        true
    }

    /// Replace the transform's basis while keeping the displayed section of the board
    fn change_basis(
        &mut self,
        viewport: &mut dyn Viewport,
        apply: impl FnOnce(&mut CoordinateTransform),
    ) {
        let old_viewport_center = self.transform.screen_to_board(viewport.viewport_center());
        apply(&mut self.transform);
        viewport.set_viewport_center(self.transform.board_to_screen(old_viewport_center));
        viewport.request_repaint();
    }
}

/// Unchecked display state as read from persisted state
#[derive(Deserialize)]
struct DisplayManagerFields {
    transform: CoordinateTransform,
    dim_factor: f64,
    cursor_style: CursorStyle,
}

impl TryFrom<DisplayManagerFields> for DisplayManager {
    type Error = StateError;

    fn try_from(fields: DisplayManagerFields) -> Result<Self, Self::Error> {
        if !(0.0..=1.0).contains(&fields.dim_factor) {
            return Err(StateError::DimFactorOutOfRange(fields.dim_factor));
        }
        Ok(Self {
            transform: fields.transform,
            dim_factor: fields.dim_factor,
            cursor_style: fields.cursor_style,
        })
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new(CoordinateTransform::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::ScrollViewport;
    use approx::assert_relative_eq;
    use nalgebra::Vector2;

    struct RecordingViewport {
        center: Point2<f64>,
        recenters: usize,
        repaints: usize,
    }

    impl Default for RecordingViewport {
        fn default() -> Self {
            Self {
                center: Point2::origin(),
                recenters: 0,
                repaints: 0,
            }
        }
    }

    impl Viewport for RecordingViewport {
        fn viewport_center(&self) -> Point2<f64> {
            self.center
        }

        fn set_viewport_center(&mut self, center: Point2<f64>) {
            self.center = center;
            self.recenters += 1;
        }

        fn request_repaint(&mut self) {
            self.repaints += 1;
        }
    }

    #[test]
    fn test_rotation_keeps_viewport_center() {
        let mut display = DisplayManager::default();
        let mut viewport = ScrollViewport::new(Vector2::new(200.0, 100.0));
        let focus = Point2::new(10.0, 10.0);
        viewport.set_viewport_center(display.board_to_screen(focus));

        assert!(display.set_rotation(RotationQuadrant::Quarter, &mut viewport));
        assert_eq!(display.rotation().index(), 1);
        assert!(viewport.take_repaint_request());

        let centered = display.screen_to_board(viewport.viewport_center());
        assert_relative_eq!(centered.x, focus.x, epsilon = 1e-9);
        assert_relative_eq!(centered.y, focus.y, epsilon = 1e-9);
    }

    #[test]
    fn test_mirror_switch_recenters_once() {
        let mut display = DisplayManager::default();
        let mut viewport = RecordingViewport::default();
        display.set_mirror(MirrorAxis::Horizontal, &mut viewport);
        viewport.recenters = 0;

        assert!(display.set_mirror(MirrorAxis::Vertical, &mut viewport));
        assert_eq!(display.mirror(), MirrorAxis::Vertical);
        assert_eq!(viewport.recenters, 1);
    }

    #[test]
    fn test_repeated_mirror_is_noop() {
        let mut display = DisplayManager::default();
        let mut viewport = RecordingViewport {
            center: Point2::new(3.0, 4.0),
            ..Default::default()
        };
        assert!(display.set_mirror(MirrorAxis::Vertical, &mut viewport));
        let state = display.clone();
        let center = viewport.center;

        assert!(!display.set_mirror(MirrorAxis::Vertical, &mut viewport));
        assert_eq!(display, state);
        assert_eq!(viewport.center, center);
        assert_eq!(viewport.recenters, 1);
        assert_eq!(viewport.repaints, 1);
    }

    #[test]
    fn test_same_rotation_is_noop() {
        let mut display = DisplayManager::default();
        let mut viewport = RecordingViewport::default();
        assert!(!display.set_rotation(RotationQuadrant::None, &mut viewport));
        assert_eq!(viewport.recenters, 0);
        assert_eq!(viewport.repaints, 0);
    }

    #[test]
    fn test_invalid_rotation_index_resets_to_zero() {
        let mut display = DisplayManager::default();
        let mut viewport = RecordingViewport::default();
        display.set_rotation(RotationQuadrant::Half, &mut viewport);
        assert!(display.set_rotation_index(7, &mut viewport));
        assert_eq!(display.rotation(), RotationQuadrant::None);
    }

    #[test]
    fn test_four_quarter_turns_restore_orientation() {
        let mut display = DisplayManager::default();
        let mut viewport = ScrollViewport::new(Vector2::new(320.0, 240.0));
        viewport.set_viewport_center(Point2::new(35.0, -12.0));
        let before = display.clone();
        let center_before = viewport.viewport_center();

        for _ in 0..4 {
            display.rotate_by(1, &mut viewport);
        }
        assert_eq!(display, before);
        let center_after = viewport.viewport_center();
        assert_relative_eq!(center_after.x, center_before.x, epsilon = 1e-9);
        assert_relative_eq!(center_after.y, center_before.y, epsilon = 1e-9);
    }

    #[test]
    #[should_panic(expected = "outside [0, 1]")]
    fn test_dim_factor_out_of_range_panics() {
        DisplayManager::default().set_dim_factor(1.5);
    }

    #[test]
    fn test_deserialize_rejects_dim_factor_out_of_range() {
        let result = serde_json::from_str::<DisplayManager>(
            r#"{
                "transform": {
                    "board_center": [0.0, 0.0],
                    "screen_center": [0.0, 0.0],
                    "scale": 1.0,
                    "rotation": 0,
                    "mirror": "None"
                },
                "dim_factor": 7.5,
                "cursor_style": "Small"
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_zero_scale_transform() {
        let result = serde_json::from_str::<DisplayManager>(
            r#"{
                "transform": {
                    "board_center": [0.0, 0.0],
                    "screen_center": [0.0, 0.0],
                    "scale": 0.0,
                    "rotation": 0,
                    "mirror": "None"
                },
                "dim_factor": 0.5,
                "cursor_style": "Small"
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_serialized_state_restores() {
        let mut display = DisplayManager::default();
        let mut viewport = RecordingViewport::default();
        display.set_mirror(MirrorAxis::Horizontal, &mut viewport);
        display.set_dim_factor(0.25);
        let json = serde_json::to_string(&display).unwrap();
        let restored: DisplayManager = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, display);
    }
}
