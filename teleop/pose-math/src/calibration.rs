//! Fixed frame calibration between the tracking device and the actuator.
//!
//! A tracked controller reports poses in the runtime's own axis convention,
//! which in general does not match the actuator's base frame, and the
//! end-effector tool orientation needs its own fixed correction. Both are
//! supplied as configuration data so a different physical rig only needs a
//! different config, not a code change.

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

use crate::rotation::euler_to_matrix;
use crate::transform::build_transform;
use crate::{EulerAngles, PoseError, Vector3};

/// Rotation-only calibration halves expressed as Euler-angle triples in
/// degrees, suitable for loading from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Maps tracker axes onto actuator base axes.
    pub device_to_base: EulerAngles,
    /// Reconciles end-effector tool orientation with the base convention.
    pub tool_offset: EulerAngles,
}

impl Default for CalibrationConfig {
    /// The reference rig: an OpenXR grip frame driving a MuJoCo-convention
    /// actuator base.
    fn default() -> Self {
        CalibrationConfig {
            device_to_base: EulerAngles::new(90.0, 0.0, -90.0),
            tool_offset: EulerAngles::new(0.0, 90.0, 90.0),
        }
    }
}

/// The immutable calibration pair applied by [`adjust`].
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    pub device_to_base: Matrix4<f64>,
    pub tool_offset: Matrix4<f64>,
}

impl Calibration {
    pub fn new(device_to_base: Matrix4<f64>, tool_offset: Matrix4<f64>) -> Self {
        Calibration { device_to_base, tool_offset }
    }

    /// A calibration that leaves transforms untouched.
    pub fn identity() -> Self {
        Calibration::new(Matrix4::identity(), Matrix4::identity())
    }

    pub fn from_config(config: &CalibrationConfig) -> Self {
        let origin = Vector3::default();
        Calibration {
            device_to_base: build_transform(&origin, &euler_to_matrix(&config.device_to_base)),
            tool_offset: build_transform(&origin, &euler_to_matrix(&config.tool_offset)),
        }
    }

    /// The calibration that undoes this one, so that
    /// `adjust(adjust(t, c), c.inverse()?) == t`.
    ///
    /// Rotation-only calibrations always invert; a singular half means the
    /// calibration itself was malformed.
    pub fn inverse(&self) -> Result<Self, PoseError> {
        let device_to_base = self.device_to_base.try_inverse().ok_or_else(|| {
            PoseError::SingularMatrix("device-to-base calibration is not invertible".to_string())
        })?;
        let tool_offset = self.tool_offset.try_inverse().ok_or_else(|| {
            PoseError::SingularMatrix("tool-offset calibration is not invertible".to_string())
        })?;
        Ok(Calibration { device_to_base, tool_offset })
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Calibration::from_config(&CalibrationConfig::default())
    }
}

/// Remaps a transform into actuator conventions:
/// `device_to_base * transform * tool_offset`.
pub fn adjust(transform: &Matrix4<f64>, calibration: &Calibration) -> Matrix4<f64> {
    calibration.device_to_base * transform * calibration.tool_offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::euler_to_quat;
    use crate::transform::pose_to_transform;
    use crate::Pose;

    const EPS: f64 = 1e-9;

    fn assert_transform_close(a: &Matrix4<f64>, b: &Matrix4<f64>) {
        for i in 0..4 {
            for j in 0..4 {
                assert!(
                    (a[(i, j)] - b[(i, j)]).abs() < EPS,
                    "entry ({}, {}): {} != {}",
                    i,
                    j,
                    a[(i, j)],
                    b[(i, j)]
                );
            }
        }
    }

    #[test]
    fn default_device_to_base_is_the_expected_axis_remap() {
        let c = Calibration::default();
        // Columns of the reference remap: x -> -y, y -> z, z -> -x.
        #[rustfmt::skip]
        let expected = Matrix4::new(
            0.0,  0.0, -1.0, 0.0,
           -1.0,  0.0,  0.0, 0.0,
            0.0,  1.0,  0.0, 0.0,
            0.0,  0.0,  0.0, 1.0,
        );
        assert_transform_close(&c.device_to_base, &expected);
    }

    #[test]
    fn default_tool_offset_is_the_expected_tool_remap() {
        let c = Calibration::default();
        // The reference rig's end-effector correction, Rx(-90) * Rz(90).
        #[rustfmt::skip]
        let expected = Matrix4::new(
            0.0, -1.0,  0.0, 0.0,
            0.0,  0.0,  1.0, 0.0,
           -1.0,  0.0,  0.0, 0.0,
            0.0,  0.0,  0.0, 1.0,
        );
        assert_transform_close(&c.tool_offset, &expected);
    }

    #[test]
    fn identity_calibration_is_a_no_op() {
        let t = pose_to_transform(&Pose::new(
            Vector3::new(1.0, 2.0, 3.0),
            euler_to_quat(&EulerAngles::new(10.0, 20.0, 30.0)),
        ))
        .unwrap();
        assert_transform_close(&adjust(&t, &Calibration::identity()), &t);
    }

    #[test]
    fn adjust_then_inverse_restores_the_transform() {
        let c = Calibration::default();
        let inv = c.inverse().unwrap();
        let t = pose_to_transform(&Pose::new(
            Vector3::new(0.3, -0.7, 1.1),
            euler_to_quat(&EulerAngles::new(-35.0, 50.0, 125.0)),
        ))
        .unwrap();
        assert_transform_close(&adjust(&adjust(&t, &c), &inv), &t);
    }

    #[test]
    fn config_roundtrips_through_serde() {
        let config = CalibrationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: CalibrationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
