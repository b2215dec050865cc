//! Grip-gated teleoperation session.
//!
//! Motion is only commanded while the operator holds the select button. On
//! each press edge the baseline is re-anchored to the controller's current
//! pose, so the actuator always resumes from rest instead of jumping to
//! wherever the controller drifted while released.

use log::{debug, info};

use pose_math::{adjust, decompose, Calibration, IncrementEngine, Pose, PoseDelta};
use teleop_traits::{ControllerData, Hand, TeleopError, TrackedSample};

/// Drives an [`IncrementEngine`] from tracked controller samples.
///
/// One session per hand; sessions own their baseline state independently.
pub struct TeleopSession {
    engine: IncrementEngine,
    calibration: Option<Calibration>,
    hand: Hand,
    engaged: bool,
}

impl TeleopSession {
    /// A session with an identity zero pose and no frame calibration.
    pub fn new(hand: Hand) -> Self {
        TeleopSession {
            engine: IncrementEngine::new(),
            calibration: None,
            hand,
            engaged: false,
        }
    }

    /// Remaps every increment into actuator conventions before decomposing.
    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = Some(calibration);
        self
    }

    /// Anchors increments on a non-trivial actuator rest pose. Builder-stage
    /// only: any recorded baseline is discarded.
    pub fn with_zero_pose(mut self, zero: &Pose) -> Result<Self, TeleopError> {
        self.engine = IncrementEngine::with_zero_pose(zero)?;
        self.engaged = false;
        Ok(self)
    }

    pub fn hand(&self) -> Hand {
        self.hand
    }

    /// Whether the operator currently holds the grip.
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Feeds the sample for this session's hand out of a controller update.
    ///
    /// Returns `Ok(None)` when the hand is absent from the update or the
    /// grip is released.
    pub fn update(&mut self, data: &ControllerData) -> Result<Option<PoseDelta>, TeleopError> {
        match data.hand(self.hand) {
            Some(sample) => self.apply(*sample),
            None => Ok(None),
        }
    }

    /// Feeds one tracked sample and returns the commanded motion, if any.
    pub fn apply(&mut self, sample: TrackedSample) -> Result<Option<PoseDelta>, TeleopError> {
        if !sample.buttons.select {
            if self.engaged {
                debug!("{} grip released, motion paused", self.hand);
            }
            self.engaged = false;
            return Ok(None);
        }

        if !self.engaged {
            self.engine.reset_baseline(&sample.pose)?;
            self.engaged = true;
            info!("baseline recorded for {} controller", self.hand);
        }

        let mut transform = self.engine.increment_transform(&sample.pose)?;
        if let Some(calibration) = &self.calibration {
            transform = adjust(&transform, calibration);
        }
        let (translation, orientation) = decompose(&transform);
        Ok(Some(PoseDelta { translation, orientation }))
    }
}
