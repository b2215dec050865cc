use pose_math::{Pose, PoseError};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::sync::mpsc;

// --- Controller Data ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Left,
    Right,
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hand::Left => write!(f, "left"),
            Hand::Right => write!(f, "right"),
        }
    }
}

/// Button states reported alongside a pose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonState {
    pub select: bool,
    pub menu: bool,
}

/// One controller's pose and buttons from a single tracking update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackedSample {
    pub pose: Pose,
    pub buttons: ButtonState,
}

/// The latest sample for each hand. A tracking update may carry either hand,
/// both, or neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControllerData {
    pub left: Option<TrackedSample>,
    pub right: Option<TrackedSample>,
}

impl ControllerData {
    pub fn hand(&self, hand: Hand) -> Option<&TrackedSample> {
        match hand {
            Hand::Left => self.left.as_ref(),
            Hand::Right => self.right.as_ref(),
        }
    }
}

// --- Standard Error Type ---

#[derive(Debug)]
pub enum TeleopError {
    /// Error originating from the underlying transport (socket setup, bind)
    Device(String),
    /// Error reading data from the transport or internal state
    Read(String),
    /// Received data that could not be decoded
    Parse(String),
    /// Error related to multithreading locks (e.g., poisoned)
    Lock(String),
    /// Error sending a command to the reader thread
    CommandSend(String),
    /// Error from the pose math core
    Pose(PoseError),
}

impl fmt::Display for TeleopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeleopError::Device(s) => write!(f, "Device error: {}", s),
            TeleopError::Read(s) => write!(f, "Read error: {}", s),
            TeleopError::Parse(s) => write!(f, "Parse error: {}", s),
            TeleopError::Lock(s) => write!(f, "Lock error: {}", s),
            TeleopError::CommandSend(s) => write!(f, "Command send error: {}", s),
            TeleopError::Pose(e) => write!(f, "Pose error: {}", e),
        }
    }
}

impl StdError for TeleopError {}

impl From<PoseError> for TeleopError {
    fn from(e: PoseError) -> Self {
        TeleopError::Pose(e)
    }
}

impl From<std::io::Error> for TeleopError {
    fn from(e: std::io::Error) -> Self {
        TeleopError::Device(e.to_string())
    }
}

impl From<serde_json::Error> for TeleopError {
    fn from(e: serde_json::Error) -> Self {
        TeleopError::Parse(e.to_string())
    }
}

impl<T> From<mpsc::SendError<T>> for TeleopError {
    fn from(e: mpsc::SendError<T>) -> Self {
        TeleopError::CommandSend(e.to_string())
    }
}

// --- Transport Trait ---

pub trait PoseSource {
    /// Retrieves the latest controller data, once per received update.
    fn get_data(&self) -> Result<ControllerData, TeleopError>;

    fn stop(&self) -> Result<(), TeleopError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_lookup() {
        let data = ControllerData {
            left: None,
            right: Some(TrackedSample::default()),
        };
        assert!(data.hand(Hand::Left).is_none());
        assert!(data.hand(Hand::Right).is_some());
    }

    #[test]
    fn pose_error_wraps() {
        let e: TeleopError = PoseError::Uninitialized("no baseline".to_string()).into();
        assert!(e.to_string().contains("no baseline"));
    }
}
