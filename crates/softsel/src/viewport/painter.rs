//! egui painter implementation of the overlay canvas

use egui::{Color32, Painter, Pos2};
use glam::Vec2;

use softsel_lib::falloff::Rgba;
use softsel_lib::host::Canvas;
use softsel_lib::viewport::mesh::{EditMesh, OverlayPrimitives, PrimitiveKind};

use super::camera::ArcBallCamera;

const POINT_RADIUS: f32 = 4.0;
const LINE_WIDTH: f32 = 2.5;

pub fn to_color32(c: Rgba) -> Color32 {
    let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(byte(c[0]), byte(c[1]), byte(c[2]), byte(c[3]))
}

fn to_pos(p: Vec2) -> Pos2 {
    egui::pos2(p.x, p.y)
}

pub struct PainterCanvas<'a> {
    pub painter: &'a Painter,
    pub camera: &'a ArcBallCamera,
    pub rect: egui::Rect,
}

impl PainterCanvas<'_> {
    fn project(&self, prims: &OverlayPrimitives, index: usize) -> Option<Pos2> {
        self.camera.project(prims.position(index), self.rect)
    }

    fn draw_points(&self, prims: &OverlayPrimitives) {
        for i in 0..prims.vertex_count() {
            if let Some(p) = self.project(prims, i) {
                self.painter
                    .circle_filled(p, POINT_RADIUS, to_color32(prims.color(i)));
            }
        }
    }

    /// Each half of a segment takes the color of its endpoint
    fn draw_lines(&self, prims: &OverlayPrimitives) {
        for seg in 0..prims.primitive_count() {
            let (ia, ib) = (seg * 2, seg * 2 + 1);
            let (Some(a), Some(b)) = (self.project(prims, ia), self.project(prims, ib)) else {
                continue;
            };
            let mid = a + (b - a) * 0.5;
            self.painter.line_segment(
                [a, mid],
                egui::Stroke::new(LINE_WIDTH, to_color32(prims.color(ia))),
            );
            self.painter.line_segment(
                [mid, b],
                egui::Stroke::new(LINE_WIDTH, to_color32(prims.color(ib))),
            );
        }
    }

    fn draw_triangles(&self, prims: &OverlayPrimitives) {
        let mut mesh = egui::Mesh::default();
        for tri in 0..prims.primitive_count() {
            let corners = [tri * 3, tri * 3 + 1, tri * 3 + 2];
            let projected: Vec<Pos2> = corners
                .iter()
                .filter_map(|&i| self.project(prims, i))
                .collect();
            if projected.len() != 3 {
                continue;
            }
            let base = mesh.vertices.len() as u32;
            for (&i, p) in corners.iter().zip(&projected) {
                mesh.colored_vertex(*p, to_color32(prims.color(i)));
            }
            mesh.add_triangle(base, base + 1, base + 2);
        }
        if !mesh.is_empty() {
            self.painter.add(egui::Shape::mesh(mesh));
        }
    }
}

impl Canvas for PainterCanvas<'_> {
    fn draw_primitives(&mut self, primitives: &OverlayPrimitives) {
        match primitives.kind {
            PrimitiveKind::Points => self.draw_points(primitives),
            PrimitiveKind::Lines => self.draw_lines(primitives),
            PrimitiveKind::Triangles => self.draw_triangles(primitives),
        }
    }

    fn draw_polyline(&mut self, points: &[Vec2], closed: bool, color: Rgba) {
        let pts: Vec<Pos2> = points.iter().map(|p| to_pos(*p)).collect();
        let stroke = egui::Stroke::new(1.5, to_color32(color));
        let shape = if closed {
            egui::Shape::closed_line(pts, stroke)
        } else {
            egui::Shape::line(pts, stroke)
        };
        self.painter.add(shape);
    }

    fn draw_text(&mut self, pos: Vec2, text: &str, color: Rgba) {
        self.painter.text(
            to_pos(pos),
            egui::Align2::LEFT_TOP,
            text,
            egui::FontId::monospace(12.0),
            to_color32(color),
        );
    }
}

/// Gray wireframe of the whole mesh
pub fn draw_edges(painter: &Painter, rect: egui::Rect, camera: &ArcBallCamera, mesh: &EditMesh) {
    let wire = egui::Stroke::new(1.0, Color32::from_rgb(90, 90, 100));
    for &[a, b] in mesh.edges() {
        if let (Some(pa), Some(pb)) = (
            camera.project(mesh.position(a), rect),
            camera.project(mesh.position(b), rect),
        ) {
            painter.line_segment([pa, pb], wire);
        }
    }
}

/// Ring around every selected vertex
pub fn draw_selection(painter: &Painter, rect: egui::Rect, camera: &ArcBallCamera, mesh: &EditMesh) {
    let selected = Color32::from_rgb(255, 160, 40);
    for i in mesh.selected_indices() {
        if let Some(p) = camera.project(mesh.position(i), rect) {
            painter.circle_stroke(p, POINT_RADIUS + 2.0, egui::Stroke::new(1.5, selected));
        }
    }
}
