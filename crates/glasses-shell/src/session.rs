//! Capability gate: pick the advisory or the interactive presentation.

use crate::config::Config;
use crate::presenter::{spawn_presenter, PresenterConfig, PresenterError, PresenterHandle};
use crate::surface::{RenderSurface, SessionConfig};
use glasses_hw::{CapabilityProbe, FacePoseSource, UNSUPPORTED_ADVISORY};
use std::sync::Arc;

/// Terminal outcome of the capability gate.
pub enum Presentation {
    /// Face tracking unavailable; only the advisory is shown.
    Unsupported { advisory: &'static str },
    /// Face tracking available; the presenter has mounted the scene.
    Interactive(PresenterHandle),
}

/// Run the capability check once and start the matching presentation.
///
/// When face tracking is unsupported the surface is dropped untouched
/// and nothing is composed.
pub fn start<S>(
    probe: &dyn CapabilityProbe,
    surface: S,
    poses: Arc<dyn FacePoseSource>,
    config: &Config,
) -> Result<Presentation, PresenterError>
where
    S: RenderSurface + 'static,
{
    if !probe.supports_face_tracking() {
        tracing::warn!("face tracking not supported; showing advisory");
        return Ok(Presentation::Unsupported {
            advisory: UNSUPPORTED_ADVISORY,
        });
    }

    let handle = spawn_presenter(
        surface,
        poses,
        PresenterConfig {
            session: SessionConfig {
                light_estimation: config.light_estimation,
            },
            initial_color: config.initial_color,
            request_queue: config.request_queue,
        },
    )?;
    tracing::info!("face tracking supported; interactive presentation started");

    Ok(Presentation::Interactive(handle))
}
