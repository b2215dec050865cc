//! Incremental pose computation against a recorded baseline.
//!
//! The engine re-anchors controller motion onto the actuator's rest pose:
//! with baseline B, zero pose Z, and current pose C it computes
//! Z * inverse(B) * C, the motion of the controller since the baseline was
//! recorded, expressed relative to the rest pose.

use nalgebra::Matrix4;

use crate::transform::{decompose, pose_to_transform};
use crate::{Pose, PoseDelta, PoseError};

/// Per-session incremental pose engine.
///
/// Holds one mutable baseline, replaced only by [`reset_baseline`], and the
/// zero (rest) transform fixed at construction. One engine per teleoperation
/// session; sharing an engine across threads needs external serialization.
///
/// [`reset_baseline`]: IncrementEngine::reset_baseline
#[derive(Debug, Clone)]
pub struct IncrementEngine {
    zero: Matrix4<f64>,
    baseline: Option<Matrix4<f64>>,
}

impl IncrementEngine {
    /// An engine whose zero pose is the identity.
    pub fn new() -> Self {
        IncrementEngine { zero: Matrix4::identity(), baseline: None }
    }

    /// An engine anchored on a non-trivial actuator rest pose.
    pub fn with_zero_pose(zero: &Pose) -> Result<Self, PoseError> {
        Ok(IncrementEngine {
            zero: pose_to_transform(zero)?,
            baseline: None,
        })
    }

    /// Records `pose` as the baseline for the current segment.
    ///
    /// Both the position and the orientation of the supplied pose are used;
    /// call this once before the first increment and again whenever the
    /// operator re-grabs the controller.
    pub fn reset_baseline(&mut self, pose: &Pose) -> Result<(), PoseError> {
        self.baseline = Some(pose_to_transform(pose)?);
        Ok(())
    }

    pub fn has_baseline(&self) -> bool {
        self.baseline.is_some()
    }

    /// The raw increment transform Z * inverse(B) * C.
    ///
    /// Callers that need frame adjustment apply it to this transform before
    /// decomposing; [`compute_increment`] decomposes it unadjusted.
    ///
    /// [`compute_increment`]: IncrementEngine::compute_increment
    pub fn increment_transform(&self, current: &Pose) -> Result<Matrix4<f64>, PoseError> {
        let baseline = self.baseline.ok_or_else(|| {
            PoseError::Uninitialized(
                "no baseline recorded; call reset_baseline before computing increments".to_string(),
            )
        })?;
        // A baseline built from a unit quaternion is always invertible, so a
        // failure here is an internal consistency violation.
        let inverse = baseline.try_inverse().ok_or_else(|| {
            PoseError::SingularMatrix("baseline transform is not invertible".to_string())
        })?;
        Ok(self.zero * inverse * pose_to_transform(current)?)
    }

    /// The commanded motion for `current`, decomposed into translation and
    /// canonical-sign orientation.
    pub fn compute_increment(&self, current: &Pose) -> Result<PoseDelta, PoseError> {
        let (translation, orientation) = decompose(&self.increment_transform(current)?);
        Ok(PoseDelta { translation, orientation })
    }
}

impl Default for IncrementEngine {
    fn default() -> Self {
        IncrementEngine::new()
    }
}
