//! glasses-core — Color selection and face-anchored scene composition.
//!
//! Pure logic only: no AR session, no rendering. The shell feeds the
//! composed scene to whatever surface renders it.

pub mod composer;
pub mod selection;
pub mod types;

pub use composer::compose;
pub use selection::Selection;
pub use types::{
    Anchor, ColorChoice, Material, ParseColorError, Primitive, Rgb, Scene, Shape, FACE_ANCHOR,
};
