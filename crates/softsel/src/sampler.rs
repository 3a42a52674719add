//! Selection geometry sampling: falloff center, base radius and the colored
//! overlay primitives for the elements inside the effective radius.

use glam::Vec3;
use shared::DrawMode;

use crate::falloff::{falloff_color, Rgba};
use crate::viewport::mesh::{EditMesh, OverlayPrimitives, PrimitiveKind};

/// Face fills are shrunk to this fraction around their centroid so
/// neighbouring faces stay visually separate.
pub const FACE_INSET: f32 = 0.95;

/// Center (mean position) and base radius (max distance from the center)
/// of the selected vertices. `None` for an empty selection.
pub fn compute_center_and_base_radius(selected: &[Vec3]) -> Option<(Vec3, f32)> {
    if selected.is_empty() {
        return None;
    }

    let sum = selected.iter().fold(Vec3::ZERO, |acc, p| acc + *p);
    let center = sum / selected.len() as f32;
    let base_radius = selected
        .iter()
        .map(|p| p.distance(center))
        .fold(0.0_f32, f32::max);

    Some((center, base_radius))
}

/// Build the overlay primitives for `mode` around `center`.
pub fn sample(
    mesh: &EditMesh,
    center: Vec3,
    effective_radius: f32,
    mode: DrawMode,
) -> OverlayPrimitives {
    let mut out = OverlayPrimitives::new(PrimitiveKind::for_mode(mode));
    match mode {
        DrawMode::Vertex => sample_vertices(mesh, center, effective_radius, &mut out),
        DrawMode::Edge => sample_edges(mesh, center, effective_radius, &mut out),
        DrawMode::Face => sample_faces(mesh, center, effective_radius, &mut out),
    }
    out
}

fn sample_vertices(mesh: &EditMesh, center: Vec3, radius: f32, out: &mut OverlayPrimitives) {
    for p in mesh.positions() {
        let d = p.distance(center);
        if d <= radius {
            out.push(*p, falloff_color(d, radius));
        }
    }
}

fn sample_edges(mesh: &EditMesh, center: Vec3, radius: f32, out: &mut OverlayPrimitives) {
    for &[a, b] in mesh.edges() {
        let pa = mesh.position(a);
        let pb = mesh.position(b);
        let da = pa.distance(center);
        let db = pb.distance(center);
        if da > radius && db > radius {
            continue;
        }
        out.push(pa, falloff_color(da.min(radius), radius));
        out.push(pb, falloff_color(db.min(radius), radius));
    }
}

fn sample_faces(mesh: &EditMesh, center: Vec3, radius: f32, out: &mut OverlayPrimitives) {
    for face in mesh.faces() {
        if face.len() < 3 {
            continue;
        }
        let corners: Vec<Vec3> = face.iter().map(|&i| mesh.position(i)).collect();
        if !corners.iter().any(|p| p.distance(center) <= radius) {
            continue;
        }

        let inset = inset_polygon(&corners, FACE_INSET);
        let colored: Vec<(Vec3, [f32; 4])> = inset
            .iter()
            .map(|p| (*p, falloff_color(p.distance(center).min(radius), radius)))
            .collect();

        for [i, j, k] in triangulate(colored.len()) {
            for idx in [i, j, k] {
                let (p, c) = colored[idx];
                out.push(p, c);
            }
        }
    }
}

/// Arithmetic mean of the polygon corners
pub fn polygon_centroid(corners: &[Vec3]) -> Vec3 {
    let sum = corners.iter().fold(Vec3::ZERO, |acc, p| acc + *p);
    sum / corners.len().max(1) as f32
}

/// Move every corner toward the centroid, keeping `factor` of its offset
pub fn inset_polygon(corners: &[Vec3], factor: f32) -> Vec<Vec3> {
    let c = polygon_centroid(corners);
    corners.iter().map(|p| c + (*p - c) * factor).collect()
}

/// Triangle index triples for a convex polygon with `corners` vertices.
///
/// Quads split along the 0-2 diagonal; larger polygons fan from corner 0.
pub fn triangulate(corners: usize) -> Vec<[usize; 3]> {
    match corners {
        0..=2 => Vec::new(),
        3 => vec![[0, 1, 2]],
        4 => vec![[0, 1, 2], [0, 2, 3]],
        n => (1..n - 1).map(|i| [0, i, i + 1]).collect(),
    }
}

/// Inset used by the mesh topology display.
pub const DISPLAY_INSET: f32 = 0.9;

const DISPLAY_WIRE_COLOR: Rgba = [0.8, 0.8, 0.7, 1.0];
const DISPLAY_FILL_COLOR: Rgba = [0.5, 0.5, 0.5, 0.5];

/// Color for a vertex joined by `valence` edges: light blue for 3, green
/// for 4, yellow through red from 5 to 10 and up, white otherwise.
pub fn valence_color(valence: usize) -> Rgba {
    match valence {
        3 => [0.68, 0.85, 0.9, 1.0],
        4 => [0.0, 1.0, 0.0, 1.0],
        n if n >= 5 => {
            let ratio = ((n - 5) as f32 / 5.0).min(1.0);
            [1.0, 1.0 - ratio, 0.0, 1.0]
        }
        _ => [1.0, 1.0, 1.0, 1.0],
    }
}

/// Number of edges touching each vertex
pub fn vertex_valences(mesh: &EditMesh) -> Vec<usize> {
    let mut counts = vec![0usize; mesh.positions().len()];
    for &[a, b] in mesh.edges() {
        counts[a as usize] += 1;
        counts[b as usize] += 1;
    }
    counts
}

/// One point per vertex, colored by valence.
pub fn valence_points(mesh: &EditMesh) -> OverlayPrimitives {
    let mut out = OverlayPrimitives::new(PrimitiveKind::Points);
    for (p, valence) in mesh.positions().iter().zip(vertex_valences(mesh)) {
        out.push(*p, valence_color(valence));
    }
    out
}

/// Inset face outlines and their translucent fill.
#[derive(Debug, Clone)]
pub struct FaceDisplay {
    pub wire: OverlayPrimitives,
    pub fill: OverlayPrimitives,
}

pub fn face_display(mesh: &EditMesh) -> FaceDisplay {
    let mut wire = OverlayPrimitives::new(PrimitiveKind::Lines);
    let mut fill = OverlayPrimitives::new(PrimitiveKind::Triangles);

    for face in mesh.faces() {
        if face.len() < 3 {
            continue;
        }
        let corners: Vec<Vec3> = face.iter().map(|&i| mesh.position(i)).collect();
        let inset = inset_polygon(&corners, DISPLAY_INSET);

        for (i, p) in inset.iter().enumerate() {
            wire.push(*p, DISPLAY_WIRE_COLOR);
            wire.push(inset[(i + 1) % inset.len()], DISPLAY_WIRE_COLOR);
        }
        for tri in triangulate(inset.len()) {
            for idx in tri {
                fill.push(inset[idx], DISPLAY_FILL_COLOR);
            }
        }
    }

    FaceDisplay { wire, fill }
}
