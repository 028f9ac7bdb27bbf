use serde::{Deserialize, Serialize};

use crate::geometry::Point3;

// MediaPipe pose landmark indices for the two legs.
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;

const LEFT_LEG: [usize; 3] = [LEFT_HIP, LEFT_KNEE, LEFT_ANKLE];
const RIGHT_LEG: [usize; 3] = [RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE];

/// One tracked body point as emitted by the external pose provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Detection confidence in [0, 1].
    pub visibility: f64,
}

impl Landmark {
    pub fn position(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }
}

/// Per-frame output of the landmark provider. Both landmark sets must be
/// present for the frame to count as a detection: the image-space set carries
/// the visibility scores used for side selection, the world set carries the
/// metric 3D positions used for the angle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameObservation {
    #[serde(default)]
    pub landmarks: Option<Vec<Landmark>>,
    #[serde(default)]
    pub world_landmarks: Option<Vec<Landmark>>,
}

impl FrameObservation {
    pub fn detected(&self) -> bool {
        self.leg().is_some()
    }

    /// Side selection for this frame: the tracked leg plus its (hip, knee,
    /// ankle) world positions, or `None` when no usable pose was found.
    pub fn leg(&self) -> Option<(Side, [Point3; 3])> {
        let landmarks = self.landmarks.as_deref()?;
        let world = self.world_landmarks.as_deref()?;
        if landmarks.len() <= RIGHT_ANKLE || world.len() <= RIGHT_ANKLE {
            return None;
        }
        let (side, ids) = choose_side(landmarks);
        Some((side, ids.map(|i| world[i].position())))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Pick the leg whose worst landmark is still the best tracked this frame.
/// Ties go left (the `>=` is longstanding observable behavior).
pub fn choose_side(landmarks: &[Landmark]) -> (Side, [usize; 3]) {
    let min_visibility =
        |ids: &[usize; 3]| ids.iter().map(|&i| landmarks[i].visibility).fold(f64::INFINITY, f64::min);

    if min_visibility(&LEFT_LEG) >= min_visibility(&RIGHT_LEG) {
        (Side::Left, LEFT_LEG)
    } else {
        (Side::Right, RIGHT_LEG)
    }
}
