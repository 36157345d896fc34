//! Glasses scene composition.
//!
//! Builds the fixed glasses layout (two flattened rounded-box lenses and
//! a sphere bridge) in the face anchor's local frame. Pure: the output
//! depends only on the selected color.

use crate::types::{ColorChoice, Material, Primitive, Rgb, Scene};

// --- Layout constants (meters) ---
const LENS_EDGE: f32 = 0.05;
const LENS_CORNER_RADIUS: f32 = 0.025;
const LENS_OFFSET_X: f32 = 0.035;
const LENS_OFFSET_Y: f32 = 0.025;
const GLASSES_DEPTH: f32 = 0.06;
/// Widens the lens horizontally and flattens it into a disk along depth.
const LENS_SCALE: [f32; 3] = [1.1, 1.0, 0.01];
const BRIDGE_RADIUS: f32 = 0.025;

// --- Lens opacity ---
const DARK_LENS_ALPHA: f32 = 0.95;
const TINTED_LENS_ALPHA: f32 = 0.5;

/// Lens material for the selected color.
///
/// Black lenses are near-opaque; red and green are translucent.
pub fn lens_material(color: ColorChoice) -> Material {
    let alpha = match color {
        ColorChoice::Black => DARK_LENS_ALPHA,
        ColorChoice::Red | ColorChoice::Green => TINTED_LENS_ALPHA,
    };
    Material::opaque(color.display_color()).with_alpha(alpha)
}

fn lens(x: f32, color: ColorChoice) -> Primitive {
    let [sx, sy, sz] = LENS_SCALE;
    Primitive::rounded_box(LENS_EDGE, LENS_CORNER_RADIUS)
        .at(x, LENS_OFFSET_Y, GLASSES_DEPTH)
        .scaled(sx, sy, sz)
        .with_material(lens_material(color))
}

/// The bridge keeps its red accent whatever lens color is selected.
fn bridge() -> Primitive {
    Primitive::sphere(BRIDGE_RADIUS)
        .at(0.0, 0.0, GLASSES_DEPTH)
        .with_material(Material::opaque(Rgb::RED))
}

/// Compose the glasses scene for `color`.
///
/// Always returns three primitives in order: right lens (+x), left lens
/// (-x), bridge.
pub fn compose(color: ColorChoice) -> Scene {
    Scene {
        primitives: vec![
            lens(LENS_OFFSET_X, color),
            lens(-LENS_OFFSET_X, color),
            bridge(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Shape;

    #[test]
    fn test_compose_deterministic() {
        for color in ColorChoice::ALL {
            assert_eq!(compose(color), compose(color));
        }
    }

    #[test]
    fn test_compose_three_primitives() {
        for color in ColorChoice::ALL {
            assert_eq!(compose(color).len(), 3);
        }
    }

    #[test]
    fn test_lenses_mirror_across_midline() {
        for color in ColorChoice::ALL {
            let scene = compose(color);
            let right = scene.primitives[0].position;
            let left = scene.primitives[1].position;
            assert_eq!(right, [0.035, 0.025, 0.06]);
            assert_eq!(left, [-0.035, 0.025, 0.06]);
            assert_eq!(right[0], -left[0]);
        }
    }

    #[test]
    fn test_bridge_always_opaque_red() {
        for color in ColorChoice::ALL {
            let bridge = compose(color).primitives[2];
            assert_eq!(bridge.material.base_color, Rgb::RED);
            assert_eq!(bridge.material.alpha, 1.0);
            assert!(!bridge.material.metallic);
        }
    }

    #[test]
    fn test_lens_alpha_rule() {
        assert_eq!(lens_material(ColorChoice::Black).alpha, 0.95);
        assert_eq!(lens_material(ColorChoice::Red).alpha, 0.5);
        assert_eq!(lens_material(ColorChoice::Green).alpha, 0.5);
    }

    #[test]
    fn test_compose_green_scenario() {
        let scene = compose(ColorChoice::Green);
        let lens_shape = Shape::Box {
            size: 0.05,
            corner_radius: 0.025,
        };
        let expected_material = Material {
            base_color: Rgb::GREEN,
            metallic: false,
            alpha: 0.5,
        };

        for (p, x) in scene.primitives[..2].iter().zip([0.035, -0.035]) {
            assert_eq!(p.shape, lens_shape);
            assert_eq!(p.position, [x, 0.025, 0.06]);
            assert_eq!(p.scale, [1.1, 1.0, 0.01]);
            assert_eq!(p.material, expected_material);
        }

        let bridge = scene.primitives[2];
        assert_eq!(bridge.shape, Shape::Sphere { radius: 0.025 });
        assert_eq!(bridge.position, [0.0, 0.0, 0.06]);
        assert_eq!(bridge.scale, [1.0, 1.0, 1.0]);
        assert_eq!(bridge.material, Material::opaque(Rgb::RED));
    }

    #[test]
    fn test_lens_follows_selected_color() {
        assert_eq!(compose(ColorChoice::Red).primitives[0].material.base_color, Rgb::RED);
        assert_eq!(
            compose(ColorChoice::Black).primitives[1].material.base_color,
            Rgb::BLACK
        );
    }
}
