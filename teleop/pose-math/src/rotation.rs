//! Conversions among quaternion, Euler-angle, and rotation-matrix forms.
//!
//! Euler angles are degrees and compose as R = Rz(yaw) * Ry(pitch) * Rx(roll).
//! All conversions into quaternion form return the sign representative with a
//! non-negative scalar component.

use nalgebra::{Matrix3, Rotation3, UnitQuaternion};
use std::f64::consts::FRAC_PI_2;

use crate::{EulerAngles, PoseError, Quaternion};

/// Below this norm a quaternion no longer defines a rotation.
const MIN_QUAT_NORM: f64 = 1e-9;

/// Threshold on |sin(pitch)| past which the roll/yaw split is treated as
/// degenerate.
const GIMBAL_EPS: f64 = 1e-9;

fn unit_quat(q: &Quaternion) -> Result<UnitQuaternion<f64>, PoseError> {
    let norm = q.norm();
    if norm < MIN_QUAT_NORM {
        return Err(PoseError::InvalidInput(format!(
            "quaternion norm {} is too small to define a rotation",
            norm
        )));
    }
    Ok(UnitQuaternion::new_normalize(nalgebra::Quaternion::new(
        q.w, q.x, q.y, q.z,
    )))
}

fn canonical(uq: &UnitQuaternion<f64>) -> Quaternion {
    Quaternion::new(uq.coords.x, uq.coords.y, uq.coords.z, uq.coords.w).canonicalized()
}

/// Converts a quaternion to a 3x3 rotation matrix.
///
/// The quaternion is normalized first; a near-zero norm is rejected instead
/// of producing NaN entries.
pub fn quat_to_matrix(q: &Quaternion) -> Result<Matrix3<f64>, PoseError> {
    Ok(unit_quat(q)?.to_rotation_matrix().into_inner())
}

/// Converts a quaternion to Euler angles in degrees.
///
/// See [`matrix_to_euler`] for the gimbal-lock policy.
pub fn quat_to_euler(q: &Quaternion) -> Result<EulerAngles, PoseError> {
    Ok(matrix_to_euler(&quat_to_matrix(q)?))
}

/// Converts Euler angles in degrees to a unit quaternion (w >= 0).
pub fn euler_to_quat(e: &EulerAngles) -> Quaternion {
    let uq = UnitQuaternion::from_euler_angles(
        e.roll.to_radians(),
        e.pitch.to_radians(),
        e.yaw.to_radians(),
    );
    canonical(&uq)
}

/// Converts Euler angles in degrees to a 3x3 rotation matrix.
pub fn euler_to_matrix(e: &EulerAngles) -> Matrix3<f64> {
    Rotation3::from_euler_angles(e.roll.to_radians(), e.pitch.to_radians(), e.yaw.to_radians())
        .into_inner()
}

/// Decomposes a rotation matrix into Euler angles in degrees.
///
/// At gimbal lock (|sin(pitch)| ~ 1) roll and yaw are no longer separable:
/// this function fixes roll to exactly 0 and resolves yaw from the remaining
/// matrix entries. Other libraries pick other splits at the singularity, so
/// comparisons against them must allow for that.
pub fn matrix_to_euler(m: &Matrix3<f64>) -> EulerAngles {
    // For R = Rz(yaw) * Ry(pitch) * Rx(roll), m[(2,0)] = -sin(pitch).
    let sp = (-m[(2, 0)]).clamp(-1.0, 1.0);

    let (roll, pitch, yaw) = if sp.abs() < 1.0 - GIMBAL_EPS {
        (
            m[(2, 1)].atan2(m[(2, 2)]),
            sp.asin(),
            m[(1, 0)].atan2(m[(0, 0)]),
        )
    } else {
        // With roll pinned to zero, m[(0,1)] = -sin(yaw) and m[(1,1)] = cos(yaw)
        // regardless of the pitch sign.
        (0.0, FRAC_PI_2.copysign(sp), (-m[(0, 1)]).atan2(m[(1, 1)]))
    };

    EulerAngles::new(roll.to_degrees(), pitch.to_degrees(), yaw.to_degrees())
}

/// Converts a rotation matrix to a unit quaternion (w >= 0).
///
/// The matrix is assumed orthonormal with determinant +1.
pub fn matrix_to_quat(m: &Matrix3<f64>) -> Quaternion {
    let uq = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(*m));
    canonical(&uq)
}
