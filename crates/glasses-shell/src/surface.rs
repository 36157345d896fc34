//! Rendering surface seam and a headless implementation.

use glasses_core::Anchor;
use glasses_hw::FacePose;
use serde::Serialize;

/// Settings for the face-tracking session backing a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionConfig {
    pub light_estimation: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            light_estimation: true,
        }
    }
}

/// Surface that renders anchored scenes.
///
/// Owned by the presenter thread; only that thread mutates it.
pub trait RenderSurface: Send {
    /// Start the tracking session. Called once, before the first anchor.
    fn start_session(&mut self, config: SessionConfig);

    fn clear_anchors(&mut self);

    fn add_anchor(&mut self, anchor: Anchor);

    /// Anchors currently in the scene.
    fn anchors(&self) -> &[Anchor];

    /// Drop every anchor and insert `anchor` in its place.
    fn replace_anchor(&mut self, anchor: Anchor) {
        self.clear_anchors();
        self.add_anchor(anchor);
    }
}

/// In-memory surface with no renderer behind it.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    anchors: Vec<Anchor>,
    session: Option<SessionConfig>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session settings, once started.
    pub fn session(&self) -> Option<SessionConfig> {
        self.session
    }
}

impl RenderSurface for HeadlessSurface {
    fn start_session(&mut self, config: SessionConfig) {
        tracing::info!(light_estimation = config.light_estimation, "face tracking session started");
        self.session = Some(config);
    }

    fn clear_anchors(&mut self) {
        self.anchors.clear();
    }

    fn add_anchor(&mut self, anchor: Anchor) {
        self.anchors.push(anchor);
    }

    fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }
}

/// World-space position of every primitive in `anchor` under `pose`.
pub fn place(anchor: &Anchor, pose: &FacePose) -> Vec<[f32; 3]> {
    anchor
        .scene
        .primitives
        .iter()
        .map(|p| pose.transform_point(p.position))
        .collect()
}
