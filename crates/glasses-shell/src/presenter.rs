use crate::surface::{place, RenderSurface, SessionConfig};
use glasses_core::{Anchor, ColorChoice, Selection};
use glasses_hw::{FacePose, FacePoseSource};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

#[derive(Error, Debug)]
pub enum PresenterError {
    #[error("failed to spawn presenter thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("presenter thread exited")]
    ChannelClosed,
    #[error("request queue capacity must be at least 1")]
    ZeroQueue,
}

/// Startup parameters for the presenter thread.
#[derive(Debug, Clone, Copy)]
pub struct PresenterConfig {
    pub session: SessionConfig,
    pub initial_color: ColorChoice,
    pub request_queue: usize,
}

/// What the surface shows after a request was handled.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub color: ColorChoice,
    /// Number of compositions so far; the mount composition is 1.
    pub generation: u64,
    pub anchors: Vec<Anchor>,
    /// Face pose at snapshot time, if a face is tracked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pose: Option<FacePose>,
    /// World positions of the face anchor's primitives under `pose`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub world_positions: Vec<[f32; 3]>,
}

/// Messages sent from the shell to the presenter thread.
enum PresenterRequest {
    Select {
        color: ColorChoice,
        reply: oneshot::Sender<Snapshot>,
    },
    Snapshot {
        reply: oneshot::Sender<Snapshot>,
    },
}

/// Clone-safe handle to the presenter thread.
#[derive(Clone)]
pub struct PresenterHandle {
    tx: mpsc::Sender<PresenterRequest>,
}

impl PresenterHandle {
    /// Select a lens color: recompose and replace the scene.
    pub async fn select(&self, color: ColorChoice) -> Result<Snapshot, PresenterError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(PresenterRequest::Select {
                color,
                reply: reply_tx,
            })
            .await
            .map_err(|_| PresenterError::ChannelClosed)?;
        reply_rx.await.map_err(|_| PresenterError::ChannelClosed)
    }

    /// Current surface contents.
    pub async fn snapshot(&self) -> Result<Snapshot, PresenterError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(PresenterRequest::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| PresenterError::ChannelClosed)?;
        reply_rx.await.map_err(|_| PresenterError::ChannelClosed)
    }
}

struct Presenter<S> {
    surface: S,
    selection: Selection,
    poses: Arc<dyn FacePoseSource>,
    generation: u64,
}

impl<S: RenderSurface> Presenter<S> {
    fn mount(&mut self, session: SessionConfig) {
        self.surface.start_session(session);
        let scene = self.selection.scene();
        self.present(Anchor::face(scene));
    }

    fn select(&mut self, color: ColorChoice) {
        let scene = self.selection.select(color);
        self.present(Anchor::face(scene));
    }

    fn present(&mut self, anchor: Anchor) {
        self.surface.replace_anchor(anchor);
        self.generation += 1;
        tracing::debug!(
            color = %self.selection.current(),
            generation = self.generation,
            "scene replaced"
        );
    }

    fn snapshot(&self) -> Snapshot {
        let anchors = self.surface.anchors().to_vec();
        let pose = self.poses.current_face_pose();
        let world_positions = match (&pose, anchors.first()) {
            (Some(pose), Some(anchor)) => place(anchor, pose),
            _ => Vec::new(),
        };
        Snapshot {
            color: self.selection.current(),
            generation: self.generation,
            anchors,
            pose,
            world_positions,
        }
    }
}

/// Spawn the presenter on a dedicated OS thread.
///
/// The thread starts the tracking session and mounts the scene for the
/// initial color before serving requests. Each request is handled to
/// completion, so a snapshot never sees a half-replaced scene.
pub fn spawn_presenter<S>(
    surface: S,
    poses: Arc<dyn FacePoseSource>,
    config: PresenterConfig,
) -> Result<PresenterHandle, PresenterError>
where
    S: RenderSurface + 'static,
{
    if config.request_queue == 0 {
        return Err(PresenterError::ZeroQueue);
    }
    let (tx, mut rx) = mpsc::channel::<PresenterRequest>(config.request_queue);

    let mut presenter = Presenter {
        surface,
        selection: Selection::new(config.initial_color),
        poses,
        generation: 0,
    };

    std::thread::Builder::new()
        .name("glasses-presenter".into())
        .spawn(move || {
            tracing::info!(color = %config.initial_color, "presenter thread started");
            presenter.mount(config.session);

            while let Some(req) = rx.blocking_recv() {
                match req {
                    PresenterRequest::Select { color, reply } => {
                        presenter.select(color);
                        let _ = reply.send(presenter.snapshot());
                    }
                    PresenterRequest::Snapshot { reply } => {
                        let _ = reply.send(presenter.snapshot());
                    }
                }
            }
            tracing::info!("presenter thread exiting");
        })?;

    Ok(PresenterHandle { tx })
}
