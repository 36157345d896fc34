//! glasses-shell — Presentation shell for the glasses overlay.
//!
//! Runs the capability gate, owns the render surface on a dedicated
//! presenter thread, and replaces the face-anchored scene on every
//! color selection.

pub mod config;
pub mod picker;
pub mod presenter;
pub mod session;
pub mod surface;

pub use config::{Config, ConfigError};
pub use picker::{handle_line, run_picker, PickerAction, PickerError, PickerEvent};
pub use presenter::{spawn_presenter, PresenterConfig, PresenterError, PresenterHandle, Snapshot};
pub use session::{start, Presentation};
pub use surface::{HeadlessSurface, RenderSurface, SessionConfig};
