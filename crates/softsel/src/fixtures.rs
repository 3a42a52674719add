//! Factory functions for creating test meshes.
//!
//! Used by unit tests, integration tests and as the viewer's default scene.

use shared::MeshDescription;

/// Unit square centered on the origin in the XY plane, all four corners
/// selected, no edges or faces
pub fn unit_square_points() -> MeshDescription {
    MeshDescription {
        vertices: vec![
            [-0.5, -0.5, 0.0],
            [0.5, -0.5, 0.0],
            [0.5, 0.5, 0.0],
            [-0.5, 0.5, 0.0],
        ],
        edges: Vec::new(),
        faces: Vec::new(),
        selected: vec![0, 1, 2, 3],
    }
}

/// The unit square as one quad face
pub fn unit_quad() -> MeshDescription {
    MeshDescription {
        faces: vec![vec![0, 1, 2, 3]],
        ..unit_square_points()
    }
}

/// `cells` x `cells` quad grid in the XY plane, `size` wide, centered on
/// the origin, nothing selected
pub fn grid(cells: u32, size: f32) -> MeshDescription {
    let row = cells + 1;
    let step = size / cells as f32;
    let half = size * 0.5;

    let mut vertices = Vec::with_capacity((row * row) as usize);
    for j in 0..row {
        for i in 0..row {
            vertices.push([i as f32 * step - half, j as f32 * step - half, 0.0]);
        }
    }

    let mut faces = Vec::with_capacity((cells * cells) as usize);
    for j in 0..cells {
        for i in 0..cells {
            let a = j * row + i;
            faces.push(vec![a, a + 1, a + row + 1, a + row]);
        }
    }

    MeshDescription {
        vertices,
        edges: Vec::new(),
        faces,
        selected: Vec::new(),
    }
}

/// Index of the grid vertex closest to the origin
pub fn grid_center_vertex(cells: u32) -> u32 {
    let row = cells + 1;
    (cells / 2) * row + cells / 2
}

/// Axis-aligned cube with six quad faces
pub fn cube(size: f32) -> MeshDescription {
    let h = size * 0.5;
    MeshDescription {
        vertices: vec![
            [-h, -h, -h],
            [h, -h, -h],
            [h, h, -h],
            [-h, h, -h],
            [-h, -h, h],
            [h, -h, h],
            [h, h, h],
            [-h, h, h],
        ],
        edges: Vec::new(),
        faces: vec![
            vec![0, 3, 2, 1],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![1, 2, 6, 5],
            vec![2, 3, 7, 6],
            vec![3, 0, 4, 7],
        ],
        selected: Vec::new(),
    }
}

/// Regular pentagon of circumradius 1 in the XY plane
pub fn pentagon() -> MeshDescription {
    let vertices = (0..5)
        .map(|i| {
            let a = i as f32 * std::f32::consts::TAU / 5.0;
            [a.cos(), a.sin(), 0.0]
        })
        .collect();
    MeshDescription {
        vertices,
        edges: Vec::new(),
        faces: vec![vec![0, 1, 2, 3, 4]],
        selected: Vec::new(),
    }
}

/// Default viewer scene: a 10x10 grid with its center vertex selected
pub fn demo_mesh() -> MeshDescription {
    let mut mesh = grid(10, 10.0);
    mesh.selected = vec![grid_center_vertex(10)];
    mesh
}

