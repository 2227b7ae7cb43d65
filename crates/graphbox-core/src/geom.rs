#![forbid(unsafe_code)]

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector2 = euclid::Vector2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector2 {
    euclid::vec2(x, y)
}

pub fn size(width: f64, height: f64) -> Size {
    euclid::size2(width, height)
}

/// Value-semantics helpers used by edge geometry.
///
/// Every method returns a new vector; the receiver is never modified.
pub trait VectorExt: Copy {
    /// Unit vector with the same direction. A zero (or non-finite length) vector is returned
    /// unchanged.
    fn normalized(self) -> Self;
    fn scaled(self, factor: f64) -> Self;
    fn scalar_product_1v(self, other: Self) -> f64;
    fn scalar_product_2c(self, x: f64, y: f64) -> f64;
}

impl VectorExt for Vector2 {
    fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            self / len
        } else {
            self
        }
    }

    fn scaled(self, factor: f64) -> Self {
        self * factor
    }

    fn scalar_product_1v(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    fn scalar_product_2c(self, x: f64, y: f64) -> f64 {
        self.x * x + self.y * y
    }
}
