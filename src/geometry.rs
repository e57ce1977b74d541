//! # Geometry Primitives
//!
//! Render bounds, sample points, pixel offsets and the absolute affine
//! transform used by vector export.

/// Width used when the render target cannot be measured
pub const DEFAULT_WIDTH: f64 = 400.0;

/// Height used when the render target cannot be measured
pub const DEFAULT_HEIGHT: f64 = 300.0;

/// Render target size in pixels
///
/// Always positive and finite; a dimension that cannot be measured is
/// replaced with [`DEFAULT_WIDTH`] or [`DEFAULT_HEIGHT`] on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    width: f64,
    height: f64,
}

impl Bounds {
    /// Create bounds, substituting the default for each dimension that is
    /// zero, negative or not a number
    pub fn new(width: f64, height: f64) -> Self {
        Self::measured(Some(width), Some(height))
    }

    /// Create bounds from possibly missing measurements
    pub fn measured(width: Option<f64>, height: Option<f64>) -> Self {
        Self {
            width: width.filter(|w| is_measurable(*w)).unwrap_or(DEFAULT_WIDTH),
            height: height.filter(|h| is_measurable(*h)).unwrap_or(DEFAULT_HEIGHT),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Center of the render target
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

fn is_measurable(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// A sample position in render-target pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A 2D pixel displacement
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector of the given length pointing along `angle` (radians)
    pub fn polar(angle: f64, length: f64) -> Self {
        Self {
            x: angle.cos() * length,
            y: angle.sin() * length,
        }
    }
}

impl std::ops::Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Add<Offset> for Point {
    type Output = Point;

    fn add(self, rhs: Offset) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Absolute `translate · scale · rotate` transform
///
/// Applied right to left: content is rotated about the local origin, then
/// scaled, then moved to `translate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub translate: Point,
    pub scale: f64,
    /// Rotation in degrees, clockwise in a y-down coordinate system
    pub rotation: f64,
}

impl AffineTransform {
    pub fn new(translate: Point, scale: f64, rotation: f64) -> Self {
        Self {
            translate,
            scale,
            rotation,
        }
    }

    /// Pure translation
    pub fn translation(translate: Point) -> Self {
        Self::new(translate, 1.0, 0.0)
    }

    /// Collapse into the SVG `matrix(a b c d e f)` coefficients
    pub fn matrix(&self) -> [f64; 6] {
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        [
            self.scale * cos,
            self.scale * sin,
            -self.scale * sin,
            self.scale * cos,
            self.translate.x,
            self.translate.y,
        ]
    }

    /// Map a point from local content space to document space
    pub fn apply(&self, point: Point) -> Point {
        let [a, b, c, d, e, f] = self.matrix();
        Point::new(a * point.x + c * point.y + e, b * point.x + d * point.y + f)
    }

    /// SVG `transform` attribute value; identity scale and rotation are
    /// left out
    pub fn to_svg(&self) -> String {
        let translate = format!("translate({}, {})", self.translate.x, self.translate.y);
        if self.scale == 1.0 && self.rotation == 0.0 {
            translate
        } else {
            format!("{} scale({}) rotate({})", translate, self.scale, self.rotation)
        }
    }
}
