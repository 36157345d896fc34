//! Picker selection state.

use crate::composer::compose;
use crate::types::{ColorChoice, Scene};

/// Current picker value. Starts at the default color (black); any color
/// can be selected from any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    current: ColorChoice,
}

impl Selection {
    pub fn new(initial: ColorChoice) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> ColorChoice {
        self.current
    }

    /// Scene for the current color, used on mount.
    pub fn scene(&self) -> Scene {
        compose(self.current)
    }

    /// Move to `color` and return the freshly composed scene.
    ///
    /// Re-selecting the current color still recomposes.
    pub fn select(&mut self, color: ColorChoice) -> Scene {
        if color != self.current {
            tracing::debug!(from = %self.current, to = %color, "selection changed");
        }
        self.current = color;
        compose(color)
    }
}
