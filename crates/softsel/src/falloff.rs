//! Falloff color ramp: red at the center through orange, yellow and green
//! to a dark gray at the boundary.

/// RGBA color, components in 0..=1
pub type Rgba = [f32; 4];

/// Dark green-gray the last band fades from
const BOUNDARY_BASE: [f32; 3] = [0.2, 0.3, 0.2];

/// Normalized distance ratio, clamped to [0, 1].
///
/// A non-positive radius only contains its own center.
pub fn falloff_ratio(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return if distance <= 0.0 { 0.0 } else { 1.0 };
    }
    (distance / radius).clamp(0.0, 1.0)
}

/// Color for a point `distance` away from the falloff center.
pub fn falloff_color(distance: f32, radius: f32) -> Rgba {
    let t = falloff_ratio(distance, radius);
    let alpha = 0.8 + 0.2 * (1.0 - t);

    if t < 0.25 {
        [1.0, 4.0 * t, 0.0, alpha]
    } else if t < 0.5 {
        [1.0 - 4.0 * (t - 0.25), 1.0, 0.0, alpha]
    } else if t < 0.75 {
        [0.0, 1.0 - 4.0 * (t - 0.5), 0.0, alpha]
    } else {
        let fade = 1.0 - 4.0 * (t - 0.75);
        [
            BOUNDARY_BASE[0] * fade,
            BOUNDARY_BASE[1] * fade,
            BOUNDARY_BASE[2] * fade,
            alpha,
        ]
    }
}
