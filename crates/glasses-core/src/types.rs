use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name of the tracked anchor every scene is bound to.
pub const FACE_ANCHOR: &str = "face";

/// Lens color offered by the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Red,
    Green,
    #[default]
    Black,
}

impl ColorChoice {
    /// Picker order.
    pub const ALL: [ColorChoice; 3] = [ColorChoice::Red, ColorChoice::Green, ColorChoice::Black];

    /// Picker label ("red", "green", "black").
    pub fn label(self) -> &'static str {
        match self {
            ColorChoice::Red => "red",
            ColorChoice::Green => "green",
            ColorChoice::Black => "black",
        }
    }

    /// Display color rendered for this choice.
    pub fn display_color(self) -> Rgb {
        match self {
            ColorChoice::Red => Rgb::RED,
            ColorChoice::Green => Rgb::GREEN,
            ColorChoice::Black => Rgb::BLACK,
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown color {0:?} (expected red, green or black)")]
pub struct ParseColorError(pub String);

impl FromStr for ColorChoice {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        ColorChoice::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
            .ok_or_else(|| ParseColorError(label.to_string()))
    }
}

/// Linear RGB color, components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const RED: Rgb = Rgb { r: 1.0, g: 0.0, b: 0.0 };
    pub const GREEN: Rgb = Rgb { r: 0.0, g: 1.0, b: 0.0 };
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };
}

/// Surface material of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub base_color: Rgb,
    pub metallic: bool,
    /// Opacity in [0, 1]; 1.0 is fully opaque.
    pub alpha: f32,
}

impl Material {
    pub fn opaque(base_color: Rgb) -> Self {
        Self {
            base_color,
            metallic: false,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::opaque(Rgb::RED)
    }
}

/// Mesh geometry. Sizes are in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    /// Axis-aligned box with edge `size`; a non-zero `corner_radius` rounds the edges.
    Box { size: f32, corner_radius: f32 },
    Sphere { radius: f32 },
}

/// One renderable shape instance, positioned in its anchor's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub shape: Shape,
    /// Offset from the anchor origin in meters.
    pub position: [f32; 3],
    /// Per-axis scale multiplier.
    pub scale: [f32; 3],
    pub material: Material,
}

impl Primitive {
    pub fn sphere(radius: f32) -> Self {
        Self {
            shape: Shape::Sphere { radius },
            ..Self::default()
        }
    }

    /// Plain box with square edges, like the 0.2 m box of the first overlay.
    pub fn cube(size: f32) -> Self {
        Self::rounded_box(size, 0.0)
    }

    pub fn rounded_box(size: f32, corner_radius: f32) -> Self {
        Self {
            shape: Shape::Box {
                size,
                corner_radius,
            },
            ..Self::default()
        }
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = [x, y, z];
        self
    }

    pub fn scaled(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = [x, y, z];
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }
}

impl Default for Primitive {
    fn default() -> Self {
        Self {
            shape: Shape::Sphere { radius: 0.05 },
            position: [0.0; 3],
            scale: [1.0; 3],
            material: Material::default(),
        }
    }
}

/// Ordered primitives owned by a single face anchor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// A scene bound to a tracked anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub target: String,
    pub scene: Scene,
}

impl Anchor {
    pub fn face(scene: Scene) -> Self {
        Self {
            target: FACE_ANCHOR.to_string(),
            scene,
        }
    }
}
