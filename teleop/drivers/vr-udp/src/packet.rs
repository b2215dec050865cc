//! Wire format of the controller packets.
//!
//! The OpenXR-side publisher sends one JSON object per UDP datagram:
//!
//! ```json
//! {
//!   "info": {
//!     "right": {
//!       "position": {"x": 0.34, "y": 0.85, "z": -0.40},
//!       "orientation": {"x": -0.05, "y": -0.19, "z": 0.48, "w": 0.84}
//!     }
//!   },
//!   "buttons": {"right": {"select": true, "menu": 0}}
//! }
//! ```
//!
//! Either hand may be absent from `info` or `buttons`, and button values
//! arrive as booleans or as 0/1 integers depending on the publisher.

use pose_math::{Pose, Quaternion, Vector3};
use serde::{Deserialize, Deserializer};
use teleop_traits::{ButtonState, ControllerData, TrackedSample};

#[derive(Debug, Default, Deserialize)]
pub struct Packet {
    #[serde(default)]
    pub info: HandMap<PosePacket>,
    #[serde(default)]
    pub buttons: HandMap<ButtonsPacket>,
}

// No field-level serde defaults here: they would force a `T: Default` bound
// onto the derived impl, and missing `Option` fields decode as `None` anyway.
#[derive(Debug, Deserialize)]
pub struct HandMap<T> {
    pub left: Option<T>,
    pub right: Option<T>,
}

// A manual impl because derive(Default) would require T: Default.
impl<T> Default for HandMap<T> {
    fn default() -> Self {
        HandMap { left: None, right: None }
    }
}

#[derive(Debug, Deserialize)]
pub struct PosePacket {
    pub position: VectorField,
    pub orientation: QuaternionField,
}

#[derive(Debug, Deserialize)]
pub struct VectorField {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Deserialize)]
pub struct QuaternionField {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ButtonsPacket {
    #[serde(default, deserialize_with = "flag")]
    pub select: bool,
    #[serde(default, deserialize_with = "flag")]
    pub menu: bool,
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Bool(b)) => b,
        Some(Raw::Int(n)) => n != 0,
        None => false,
    })
}

impl Packet {
    /// Combines the pose and button halves of the packet per hand.
    pub fn into_data(self) -> ControllerData {
        let sample = |pose: Option<PosePacket>, buttons: Option<ButtonsPacket>| {
            pose.map(|p| TrackedSample {
                pose: Pose::new(
                    Vector3::new(p.position.x, p.position.y, p.position.z),
                    Quaternion::new(
                        p.orientation.x,
                        p.orientation.y,
                        p.orientation.z,
                        p.orientation.w,
                    ),
                ),
                buttons: buttons
                    .map(|b| ButtonState { select: b.select, menu: b.menu })
                    .unwrap_or_default(),
            })
        };
        ControllerData {
            left: sample(self.info.left, self.buttons.left),
            right: sample(self.info.right, self.buttons.right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_packet() {
        let json = r#"{
            "info": {
                "left": {
                    "position": {"x": 0.1, "y": 0.2, "z": 0.3},
                    "orientation": {"x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0}
                },
                "right": {
                    "position": {"x": 0.34861052, "y": 0.85787028, "z": -0.4099614},
                    "orientation": {"x": -0.05216406, "y": -0.19402048, "z": 0.48760128, "w": 0.84963518}
                }
            },
            "buttons": {
                "left": {},
                "right": {"select": true, "menu": false}
            }
        }"#;

        let data = serde_json::from_str::<Packet>(json).unwrap().into_data();

        let left = data.left.unwrap();
        assert_eq!(left.pose.position.x, 0.1);
        assert!(!left.buttons.select);

        let right = data.right.unwrap();
        assert_eq!(right.pose.position.z, -0.4099614);
        assert_eq!(right.pose.orientation.w, 0.84963518);
        assert!(right.buttons.select);
        assert!(!right.buttons.menu);
    }

    #[test]
    fn missing_hands_and_buttons_are_tolerated() {
        let data = serde_json::from_str::<Packet>(r#"{"info": {}}"#)
            .unwrap()
            .into_data();
        assert!(data.left.is_none());
        assert!(data.right.is_none());
    }

    #[test]
    fn integer_button_flags_are_accepted() {
        let json = r#"{
            "info": {
                "right": {
                    "position": {"x": 0, "y": 0, "z": 0},
                    "orientation": {"x": 0, "y": 0, "z": 0, "w": 1}
                }
            },
            "buttons": {"right": {"select": 1, "menu": 0}}
        }"#;
        let data = serde_json::from_str::<Packet>(json).unwrap().into_data();
        let right = data.right.unwrap();
        assert!(right.buttons.select);
        assert!(!right.buttons.menu);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(serde_json::from_str::<Packet>("not json").is_err());
    }
}
