pub mod session;

pub use session::TeleopSession;

// --- Core re-exports ---

pub use pose_math::{
    adjust, build_transform, decompose, euler_to_matrix, euler_to_quat, matrix_to_euler,
    matrix_to_quat, pose_to_transform, quat_to_euler, quat_to_matrix, Calibration,
    CalibrationConfig, EulerAngles, IncrementEngine, Matrix3, Matrix4, Pose, PoseDelta, PoseError,
    Quaternion, Vector3,
};

pub use teleop_traits::{
    ButtonState, ControllerData, Hand, PoseSource, TeleopError, TrackedSample,
};

// --- Re-export concrete transports based on features ---

#[cfg(feature = "vr-udp")]
pub use vr_udp::{VrUdpReader, DEFAULT_BIND_ADDR};
