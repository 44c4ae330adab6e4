use nalgebra::{Point2, Vector2};

/// The visible window onto the board drawing surface.
///
/// Implemented by whatever hosts the board canvas. The display manager only
/// needs to read and move the viewport center and ask for a redraw.
pub trait Viewport {
    /// Center of the visible window in screen coordinates
    fn viewport_center(&self) -> Point2<f64>;

    /// Scroll so that `center` is in the middle of the visible window
    fn set_viewport_center(&mut self, center: Point2<f64>);

    fn request_repaint(&mut self);
}

/// Scrolled window onto a drawing surface
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollViewport {
    /// Screen coordinate of the visible window's upper left corner
    pub scroll_offset: Vector2<f64>,
    pub visible_size: Vector2<f64>,
    repaint_requested: bool,
}

impl ScrollViewport {
    pub fn new(visible_size: Vector2<f64>) -> Self {
        Self {
            scroll_offset: Vector2::zeros(),
            visible_size,
            repaint_requested: false,
        }
    }

    /// Resize the visible window, keeping its center in place
    pub fn resize(&mut self, visible_size: Vector2<f64>) {
        let center = self.viewport_center();
        self.visible_size = visible_size;
        self.set_viewport_center(center);
    }

    pub fn pan(&mut self, delta: Vector2<f64>) {
        self.scroll_offset += delta;
    }

    /// Convert a screen coordinate to a position inside the visible window
    pub fn screen_to_window(&self, screen_point: Point2<f64>) -> Point2<f64> {
        screen_point - self.scroll_offset
    }

    pub fn window_to_screen(&self, window_point: Point2<f64>) -> Point2<f64> {
        window_point + self.scroll_offset
    }

    /// Returns whether a repaint was requested since the last call
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }
}

impl Viewport for ScrollViewport {
    fn viewport_center(&self) -> Point2<f64> {
        Point2::from(self.scroll_offset + self.visible_size / 2.0)
    }

    fn set_viewport_center(&mut self, center: Point2<f64>) {
        self.scroll_offset = center.coords - self.visible_size / 2.0;
    }

    fn request_repaint(&mut self) {
        self.repaint_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_round_trip() {
        let mut viewport = ScrollViewport::new(Vector2::new(200.0, 100.0));
        viewport.set_viewport_center(Point2::new(10.0, -10.0));
        assert_relative_eq!(viewport.scroll_offset.x, -90.0);
        assert_relative_eq!(viewport.scroll_offset.y, -60.0);
        let center = viewport.viewport_center();
        assert_relative_eq!(center.x, 10.0);
        assert_relative_eq!(center.y, -10.0);
    }

    #[test]
    fn test_resize_keeps_center() {
        let mut viewport = ScrollViewport::new(Vector2::new(200.0, 100.0));
        viewport.pan(Vector2::new(15.0, 5.0));
        let before = viewport.viewport_center();
        viewport.resize(Vector2::new(640.0, 480.0));
        let after = viewport.viewport_center();
        assert_relative_eq!(before.x, after.x);
        assert_relative_eq!(before.y, after.y);
    }

    #[test]
    fn test_repaint_request_is_taken_once() {
        let mut viewport = ScrollViewport::new(Vector2::new(10.0, 10.0));
        assert!(!viewport.take_repaint_request());
        viewport.request_repaint();
        assert!(viewport.take_repaint_request());
        assert!(!viewport.take_repaint_request());
    }
}
