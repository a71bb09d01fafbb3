use crate::utils::error::{Result, WorkbenchError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 2D vector with `f64` components.
///
/// Equality and hashing compare the canonical bit pattern of each component:
/// `-0.0` equals `0.0` and every NaN equals every other NaN, which keeps
/// `Eq` lawful so vectors can live in hash sets.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

fn canonical_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

impl Vector {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn unit_x() -> Self {
        Self::new(1.0, 0.0)
    }

    pub fn unit_y() -> Self {
        Self::new(0.0, 1.0)
    }

    pub fn from_tuple((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }

    pub fn as_tuple(self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn magnitude_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// A vector is "falsy" exactly when its magnitude is zero.
    pub fn is_zero(self) -> bool {
        self.magnitude() == 0.0
    }

    pub fn normalized(self) -> Result<Vector> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Err(WorkbenchError::ZeroVector {
                operation: "normalize".to_string(),
            });
        }
        Ok(Vector::new(self.x / magnitude, self.y / magnitude))
    }

    pub fn dot(self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    pub fn cross(self, other: Vector) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Angle from the positive x axis, in radians.
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn angle_with(self, other: Vector) -> Result<f64> {
        let magnitudes = self.magnitude() * other.magnitude();
        if magnitudes == 0.0 {
            return Err(WorkbenchError::ZeroVector {
                operation: "measure an angle".to_string(),
            });
        }
        // rounding can push the cosine just past ±1
        Ok((self.dot(other) / magnitudes).clamp(-1.0, 1.0).acos())
    }

    pub fn distance_to(self, other: Vector) -> f64 {
        (other - self).magnitude()
    }

    pub fn rotated(self, radians: f64) -> Vector {
        let (sin, cos) = radians.sin_cos();
        Vector::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn project_onto(self, other: Vector) -> Result<Vector> {
        let other_squared = other.magnitude_squared();
        if other_squared == 0.0 {
            return Err(WorkbenchError::ZeroVector {
                operation: "project onto".to_string(),
            });
        }
        Ok(other * (self.dot(other) / other_squared))
    }

    /// Rotated 90 degrees counter-clockwise.
    pub fn perpendicular(self) -> Vector {
        Vector::new(-self.y, self.x)
    }

    pub fn lerp(self, other: Vector, t: f64) -> Vector {
        self + (other - self) * t
    }

    pub fn approx_eq(self, other: Vector, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }

    pub fn checked_div(self, scalar: f64) -> Result<Vector> {
        if scalar == 0.0 {
            return Err(WorkbenchError::DivisionByZero {
                message: format!("{} / 0", self),
            });
        }
        Ok(self / scalar)
    }

    pub fn component_mul(self, other: Vector) -> Vector {
        Vector::new(self.x * other.x, self.y * other.y)
    }

    pub fn component_div(self, other: Vector) -> Result<Vector> {
        if other.x == 0.0 || other.y == 0.0 {
            return Err(WorkbenchError::DivisionByZero {
                message: format!("{} has a zero component", other),
            });
        }
        Ok(Vector::new(self.x / other.x, self.y / other.y))
    }

    pub fn min_components(self, other: Vector) -> Vector {
        Vector::new(self.x.min(other.x), self.y.min(other.y))
    }

    pub fn max_components(self, other: Vector) -> Vector {
        Vector::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Clamps both components into `[min, max]`. NaN bounds and `min > max`
    /// are errors.
    pub fn clamp(self, min: f64, max: f64) -> Result<Vector> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(WorkbenchError::InvalidBounds {
                operation: "clamp".to_string(),
                min,
                max,
            });
        }
        Ok(Vector::new(self.x.clamp(min, max), self.y.clamp(min, max)))
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        canonical_bits(self.x) == canonical_bits(other.x)
            && canonical_bits(self.y) == canonical_bits(other.y)
    }
}

impl Eq for Vector {}

impl Hash for Vector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        canonical_bits(self.x).hash(state);
        canonical_bits(self.y).hash(state);
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Vector {
    fn from(tuple: (f64, f64)) -> Self {
        Vector::from_tuple(tuple)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        *self = *self + rhs;
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Vector) {
        *self = *self - rhs;
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, scalar: f64) -> Vector {
        Vector::new(self.x * scalar, self.y * scalar)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, vector: Vector) -> Vector {
        vector * self
    }
}

impl MulAssign<f64> for Vector {
    fn mul_assign(&mut self, scalar: f64) {
        *self = *self * scalar;
    }
}

/// Follows float semantics: dividing by zero yields infinities or NaN.
/// Use [`Vector::checked_div`] to get an error instead.
impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, scalar: f64) -> Vector {
        Vector::new(self.x / scalar, self.y / scalar)
    }
}

impl Sum for Vector {
    fn sum<I: Iterator<Item = Vector>>(iter: I) -> Vector {
        iter.fold(Vector::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Vector> for Vector {
    fn sum<I: Iterator<Item = &'a Vector>>(iter: I) -> Vector {
        iter.copied().sum()
    }
}
