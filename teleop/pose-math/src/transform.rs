//! Assembly and decomposition of 4x4 homogeneous transforms.

use nalgebra::{Matrix3, Matrix4};

use crate::rotation::{matrix_to_quat, quat_to_matrix};
use crate::{Pose, PoseError, Quaternion, Vector3};

/// Builds a homogeneous transform from a position and a rotation matrix.
///
/// The bottom row is [0, 0, 0, 1] by construction and is never touched by
/// any other operation in this crate.
pub fn build_transform(position: &Vector3, rotation: &Matrix3<f64>) -> Matrix4<f64> {
    let mut t = Matrix4::identity();
    t.fixed_view_mut::<3, 3>(0, 0).copy_from(rotation);
    t[(0, 3)] = position.x;
    t[(1, 3)] = position.y;
    t[(2, 3)] = position.z;
    t
}

/// Splits a homogeneous transform into its translation and a canonical-sign
/// quaternion for the rotation block.
pub fn decompose(transform: &Matrix4<f64>) -> (Vector3, Quaternion) {
    let rotation: Matrix3<f64> = transform.fixed_view::<3, 3>(0, 0).into_owned();
    let position = Vector3::new(transform[(0, 3)], transform[(1, 3)], transform[(2, 3)]);
    (position, matrix_to_quat(&rotation))
}

/// Builds the homogeneous transform of a tracked pose.
pub fn pose_to_transform(pose: &Pose) -> Result<Matrix4<f64>, PoseError> {
    Ok(build_transform(
        &pose.position,
        &quat_to_matrix(&pose.orientation)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::euler_to_quat;
    use crate::EulerAngles;

    const EPS: f64 = 1e-9;

    #[test]
    fn build_places_blocks() {
        let rotation = Matrix3::identity();
        let t = build_transform(&Vector3::new(1.0, 2.0, 3.0), &rotation);
        assert_eq!(t[(0, 3)], 1.0);
        assert_eq!(t[(1, 3)], 2.0);
        assert_eq!(t[(2, 3)], 3.0);
        assert_eq!(t[(3, 0)], 0.0);
        assert_eq!(t[(3, 1)], 0.0);
        assert_eq!(t[(3, 2)], 0.0);
        assert_eq!(t[(3, 3)], 1.0);
    }

    #[test]
    fn build_then_decompose_roundtrip() {
        let position = Vector3::new(0.348, 0.857, -0.409);
        let orientation = euler_to_quat(&EulerAngles::new(25.0, -40.0, 110.0));
        let t = pose_to_transform(&Pose::new(position, orientation)).unwrap();
        let (p, q) = decompose(&t);

        assert!((p.x - position.x).abs() < EPS);
        assert!((p.y - position.y).abs() < EPS);
        assert!((p.z - position.z).abs() < EPS);

        let (q, o) = (q.canonicalized(), orientation.canonicalized());
        assert!((q.x - o.x).abs() < EPS);
        assert!((q.y - o.y).abs() < EPS);
        assert!((q.z - o.z).abs() < EPS);
        assert!((q.w - o.w).abs() < EPS);
    }

    #[test]
    fn pose_with_degenerate_quat_is_rejected() {
        let pose = Pose::new(Vector3::default(), Quaternion::new(0.0, 0.0, 0.0, 0.0));
        assert!(matches!(
            pose_to_transform(&pose),
            Err(PoseError::InvalidInput(_))
        ));
    }
}
