use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::error::StateError;

/// Board rotation in steps of 90 degrees, counter-clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum RotationQuadrant {
    #[default]
    None,
    Quarter,
    Half,
    ThreeQuarter,
}

impl RotationQuadrant {
    pub fn all() -> [Self; 4] {
        [Self::None, Self::Quarter, Self::Half, Self::ThreeQuarter]
    }

    /// Quadrant from its index 0..=3. Anything else is stale or corrupted
    /// state and degrades to no rotation.
    pub fn from_index(index: i32) -> Self {
        match index {
            0 => Self::None,
            1 => Self::Quarter,
            2 => Self::Half,
            3 => Self::ThreeQuarter,
            other => {
                log::warn!("Unexpected 90 degree rotation {}, resetting to 0", other);
                Self::None
            }
        }
    }

    /// Quadrant from an angle in degrees. Only multiples of 90 are valid,
    /// negative angles wrap around (-90 is 270).
    pub fn from_degrees(degrees: f64) -> Self {
        let quarters = degrees / 90.0;
        if !quarters.is_finite() || (quarters - quarters.round()).abs() > 1e-9 {
            log::warn!("Rotation of {} degrees is not a multiple of 90, resetting to 0", degrees);
            return Self::None;
        }
        Self::from_index((quarters.round() as i64).rem_euclid(4) as i32)
    }

    pub fn index(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Quarter => 1,
            Self::Half => 2,
            Self::ThreeQuarter => 3,
        }
    }

    pub fn degrees(self) -> f64 {
        90.0 * self.index() as f64
    }

    /// Rotate by `steps` quarter turns; four steps are the identity
    pub fn rotated_by(self, steps: i32) -> Self {
        Self::from_index((self.index() + steps).rem_euclid(4))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Quarter => "90°",
            Self::Half => "180°",
            Self::ThreeQuarter => "-90°",
        }
    }
}

impl From<i32> for RotationQuadrant {
    fn from(index: i32) -> Self {
        Self::from_index(index)
    }
}

impl From<RotationQuadrant> for i32 {
    fn from(rotation: RotationQuadrant) -> Self {
        rotation.index()
    }
}

/// Board mirroring. At most one axis is mirrored at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MirrorAxis {
    #[default]
    None,
    /// Mirror at the vertical axis, left and right are swapped
    Vertical,
    /// Mirror at the horizontal axis, top and bottom are swapped
    Horizontal,
}

impl MirrorAxis {
    pub fn all() -> [Self; 3] {
        [Self::None, Self::Vertical, Self::Horizontal]
    }

    pub fn is_mirrored(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Vertical => "left/right",
            Self::Horizontal => "top/bottom",
        }
    }
}

/// Mapping between board coordinates and drawing surface (screen) coordinates.
///
/// Board space is y-up, screen space is y-down. The board is mirrored and
/// rotated around `board_center`, which lands on `screen_center`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoordinateTransformFields")]
pub struct CoordinateTransform {
    pub board_center: Point2<f64>,
    pub screen_center: Point2<f64>,
    /// Screen pixels per board unit
    pub scale: f64,
    pub rotation: RotationQuadrant,
    pub mirror: MirrorAxis,
}

impl CoordinateTransform {
    pub fn new(board_center: Point2<f64>, screen_center: Point2<f64>, scale: f64) -> Self {
        assert!(
            scale.is_finite() && scale > 0.0,
            "transform scale must be positive, got {}",
            scale
        );
        Self {
            board_center,
            screen_center,
            scale,
            rotation: RotationQuadrant::None,
            mirror: MirrorAxis::None,
        }
    }

    /// Board origin at screen origin, one pixel per board unit
    pub fn identity() -> Self {
        Self::new(Point2::origin(), Point2::origin(), 1.0)
    }

    /// Fit the design box into a drawing surface of `surface_size` pixels
    pub fn fit(board_min: Point2<f64>, board_max: Point2<f64>, surface_size: Vector2<f64>) -> Self {
        let extent = board_max - board_min;
        assert!(
            extent.x > 0.0 && extent.y > 0.0,
            "design box must have a positive extent, got {}x{}",
            extent.x,
            extent.y
        );
        let scale = (surface_size.x / extent.x).min(surface_size.y / extent.y);
        Self::new(
            nalgebra::center(&board_min, &board_max),
            Point2::from(surface_size / 2.0),
            scale,
        )
    }

    pub fn board_to_screen(&self, board_point: Point2<f64>) -> Point2<f64> {
        let offset = self.mirror_vector(board_point - self.board_center);
        let rotated = rotate_counter_clockwise(offset, self.rotation.index());
        self.screen_center + Vector2::new(rotated.x * self.scale, -rotated.y * self.scale)
    }

    pub fn screen_to_board(&self, screen_point: Point2<f64>) -> Point2<f64> {
        let offset = screen_point - self.screen_center;
        let unscaled = Vector2::new(offset.x / self.scale, -offset.y / self.scale);
        let unrotated = rotate_counter_clockwise(unscaled, -self.rotation.index());
        self.board_center + self.mirror_vector(unrotated)
    }

    fn mirror_vector(&self, vector: Vector2<f64>) -> Vector2<f64> {
        match self.mirror {
            MirrorAxis::None => vector,
            MirrorAxis::Vertical => Vector2::new(-vector.x, vector.y),
            MirrorAxis::Horizontal => Vector2::new(vector.x, -vector.y),
        }
    }
}

/// Unchecked transform as read from persisted state
#[derive(Deserialize)]
struct CoordinateTransformFields {
    board_center: Point2<f64>,
    screen_center: Point2<f64>,
    scale: f64,
    rotation: RotationQuadrant,
    mirror: MirrorAxis,
}

impl TryFrom<CoordinateTransformFields> for CoordinateTransform {
    type Error = StateError;

    fn try_from(fields: CoordinateTransformFields) -> Result<Self, Self::Error> {
        if !(fields.scale.is_finite() && fields.scale > 0.0) {
            return Err(StateError::InvalidScale(fields.scale));
        }
        let finite = |point: &Point2<f64>| point.iter().all(|value| value.is_finite());
        if !finite(&fields.board_center) || !finite(&fields.screen_center) {
            return Err(StateError::NonFiniteCenter);
        }
        Ok(Self {
            board_center: fields.board_center,
            screen_center: fields.screen_center,
            scale: fields.scale,
            rotation: fields.rotation,
            mirror: fields.mirror,
        })
    }
}

impl Default for CoordinateTransform {
    fn default() -> Self {
        Self::identity()
    }
}

// Quarter turns are exact axis swaps, no trigonometry involved.
fn rotate_counter_clockwise(vector: Vector2<f64>, quarter_turns: i32) -> Vector2<f64> {
    match quarter_turns.rem_euclid(4) {
        0 => vector,
        1 => Vector2::new(-vector.y, vector.x),
        2 => Vector2::new(-vector.x, -vector.y),
        _ => Vector2::new(vector.y, -vector.x),
    }
}
