//! glasses-hw — Host abstraction for face tracking.
//!
//! Detects whether the host can track faces and models the face pose
//! stream the AR platform supplies.

pub mod capability;
pub mod pose;

pub use capability::{
    CapabilityProbe, CapsQuery, FixedProbe, NodeCaps, SysfsProbe, V4l2Caps, VideoNode,
    UNSUPPORTED_ADVISORY,
};
pub use pose::{FacePose, FacePoseSource, SharedPoseSource};
