//! 3-component vectors and the `"x y z"` wire format.
//!
//! Positions and orientations travel through entity attributes as
//! space-separated strings. Parsing comes in a strict flavour (execution
//! errors on malformed input) and a lenient one with a fallback.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A malformed `"x y z"` triple.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid vector {0:?}")]
pub struct VecError(pub String);

/// A point or direction in scene space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    /// The up axis; floor surfaces face this way.
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Strictly parse an `"x y z"` string.
    pub fn from_str(s: &str) -> Result<Self, VecError> {
        let mut parts = s.split_whitespace();
        let mut next = || -> Result<f64, VecError> {
            parts
                .next()
                .and_then(|p| p.parse().ok())
                .ok_or_else(|| VecError(s.to_string()))
        };
        let v = Self::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(VecError(s.to_string()));
        }
        Ok(v)
    }

    /// Parse leniently, substituting the default on malformed input.
    #[must_use]
    pub fn parse_or(s: &str, default: Vec3) -> Self {
        Self::from_str(s).unwrap_or(default)
    }

    /// Componentwise minimum.
    #[must_use]
    pub fn min(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Componentwise maximum.
    #[must_use]
    pub fn max(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Componentwise floor division.
    #[must_use]
    pub fn floor_div(self, divisor: f64) -> Vec3 {
        Vec3::new(
            (self.x / divisor).floor(),
            (self.y / divisor).floor(),
            (self.z / divisor).floor(),
        )
    }

    /// Round to integer grid coordinates, for use as a map key.
    #[must_use]
    pub fn grid(self) -> [i32; 3] {
        [
            self.x.round() as i32,
            self.y.round() as i32,
            self.z.round() as i32,
        ]
    }

    /// Rotate by Euler angles in degrees: roll about X, then pitch about Y,
    /// then yaw about Z.
    #[must_use]
    pub fn rotated(self, pitch: f64, yaw: f64, roll: f64) -> Vec3 {
        let (sr, cr) = roll.to_radians().sin_cos();
        let (sp, cp) = pitch.to_radians().sin_cos();
        let (sy, cy) = yaw.to_radians().sin_cos();

        // Roll about X.
        let v = Vec3::new(self.x, cr * self.y - sr * self.z, sr * self.y + cr * self.z);
        // Pitch about Y.
        let v = Vec3::new(cp * v.x + sp * v.z, v.y, -sp * v.x + cp * v.z);
        // Yaw about Z.
        Vec3::new(cy * v.x - sy * v.y, sy * v.x + cy * v.y, v.z)
    }

    /// Rotate by a `"pitch yaw roll"` angle string, treating malformed
    /// angles as no rotation.
    #[must_use]
    pub fn rotated_by_str(self, angles: &str) -> Vec3 {
        let a = Vec3::parse_or(angles, Vec3::ZERO);
        self.rotated(a.x, a.y, a.z)
    }

    /// Roughly equal, tolerant of rotation round-off.
    #[must_use]
    pub fn approx_eq(self, other: Vec3) -> bool {
        (self.x - other.x).abs() < 1e-6
            && (self.y - other.y).abs() < 1e-6
            && (self.z - other.z).abs() < 1e-6
    }

    /// Format as the `"x y z"` wire string.
    #[must_use]
    pub fn join(self) -> String {
        format!("{} {} {}", fmt_num(self.x), fmt_num(self.y), fmt_num(self.z))
    }
}

fn fmt_num(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.join())
    }
}
