pub mod calibration;
pub mod increment;
pub mod rotation;
pub mod transform;

pub use calibration::{adjust, Calibration, CalibrationConfig};
pub use increment::IncrementEngine;
pub use rotation::{
    euler_to_matrix, euler_to_quat, matrix_to_euler, matrix_to_quat, quat_to_euler, quat_to_matrix,
};
pub use transform::{build_transform, decompose, pose_to_transform};

pub use nalgebra::{Matrix3, Matrix4};

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;

// --- Basic Types ---

/// Position or translation in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector3(x={}, y={}, z={})", self.x, self.y, self.z)
    }
}

/// Orientation as a quaternion in XYZW (scalar-last) order.
///
/// `q` and `-q` encode the same rotation. Every conversion in this crate that
/// produces a quaternion returns the representative with `w >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Quaternion { x, y, z, w }
    }

    pub fn identity() -> Self {
        Quaternion { x: 0.0, y: 0.0, z: 0.0, w: 1.0 }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Returns the sign representative with a non-negative scalar component.
    pub fn canonicalized(self) -> Self {
        if self.w < 0.0 {
            Quaternion { x: -self.x, y: -self.y, z: -self.z, w: -self.w }
        } else {
            self
        }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Quaternion::identity()
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quaternion(x={}, y={}, z={}, w={})", self.x, self.y, self.z, self.w)
    }
}

/// Euler angles in degrees, composed as R = Rz(yaw) * Ry(pitch) * Rx(roll).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl EulerAngles {
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        EulerAngles { roll, pitch, yaw }
    }
}

/// A tracked pose: position plus orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vector3,
    pub orientation: Quaternion,
}

impl Pose {
    pub fn new(position: Vector3, orientation: Quaternion) -> Self {
        Pose { position, orientation }
    }
}

/// Commanded actuator motion relative to its rest pose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseDelta {
    pub translation: Vector3,
    pub orientation: Quaternion,
}

// --- Standard Error Type ---

#[derive(Debug)]
pub enum PoseError {
    /// Degenerate input, e.g. a quaternion with near-zero norm
    InvalidInput(String),
    /// A transform that should always be invertible was not
    SingularMatrix(String),
    /// An increment was requested before any baseline was recorded
    Uninitialized(String),
}

impl fmt::Display for PoseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoseError::InvalidInput(s) => write!(f, "Invalid input: {}", s),
            PoseError::SingularMatrix(s) => write!(f, "Singular matrix: {}", s),
            PoseError::Uninitialized(s) => write!(f, "Uninitialized: {}", s),
        }
    }
}

impl StdError for PoseError {}
