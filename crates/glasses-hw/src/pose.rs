//! Tracked face pose and the anchor-frame transform.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// 6-DOF pose of the face anchor in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacePose {
    /// Anchor origin in meters.
    pub position: [f32; 3],
    /// Unit quaternion `[x, y, z, w]`.
    pub orientation: [f32; 4],
}

impl Default for FacePose {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            orientation: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl FacePose {
    /// Map an anchor-local point into world space (rotate, then translate).
    pub fn transform_point(&self, local: [f32; 3]) -> [f32; 3] {
        let [qx, qy, qz, qw] = self.orientation;
        let [px, py, pz] = local;

        // v' = v + 2w(q × v) + 2 q × (q × v)
        let tx = 2.0 * (qy * pz - qz * py);
        let ty = 2.0 * (qz * px - qx * pz);
        let tz = 2.0 * (qx * py - qy * px);

        let rx = px + qw * tx + (qy * tz - qz * ty);
        let ry = py + qw * ty + (qz * tx - qx * tz);
        let rz = pz + qw * tz + (qx * ty - qy * tx);

        [
            rx + self.position[0],
            ry + self.position[1],
            rz + self.position[2],
        ]
    }
}

/// Source of the tracked face pose, supplied by the AR platform.
///
/// Returns `None` while no face is being tracked.
pub trait FacePoseSource: Send + Sync {
    fn current_face_pose(&self) -> Option<FacePose>;
}

/// Pose source updated from outside (e.g., by a tracker callback).
#[derive(Debug, Clone, Default)]
pub struct SharedPoseSource {
    pose: Arc<Mutex<Option<FacePose>>>,
}

impl SharedPoseSource {
    pub fn new(initial: Option<FacePose>) -> Self {
        Self {
            pose: Arc::new(Mutex::new(initial)),
        }
    }

    /// Publish a new pose, or `None` when tracking is lost.
    pub fn update(&self, pose: Option<FacePose>) {
        match self.pose.lock() {
            Ok(mut guard) => *guard = pose,
            Err(poisoned) => *poisoned.into_inner() = pose,
        }
    }
}

impl FacePoseSource for SharedPoseSource {
    fn current_face_pose(&self) -> Option<FacePose> {
        match self.pose.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: [f32; 3], b: [f32; 3]) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-6, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_identity_pose_is_translation_only() {
        let pose = FacePose {
            position: [0.1, 0.2, -0.5],
            ..FacePose::default()
        };
        assert_close(pose.transform_point([0.035, 0.025, 0.06]), [0.135, 0.225, -0.44]);
    }

    #[test]
    fn test_yaw_quarter_turn() {
        // 90° about +y: x → -z, z → x
        let half = std::f32::consts::FRAC_PI_4;
        let pose = FacePose {
            position: [0.0; 3],
            orientation: [0.0, half.sin(), 0.0, half.cos()],
        };
        assert_close(pose.transform_point([1.0, 0.0, 0.0]), [0.0, 0.0, -1.0]);
        assert_close(pose.transform_point([0.0, 0.0, 1.0]), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_shared_source_tracks_updates() {
        let source = SharedPoseSource::default();
        assert_eq!(source.current_face_pose(), None);

        let pose = FacePose::default();
        source.clone().update(Some(pose));
        assert_eq!(source.current_face_pose(), Some(pose));

        source.update(None);
        assert_eq!(source.current_face_pose(), None);
    }
}
