//! Indexed triangle mesh data handed to the render backend

use glam::Vec3;

/// CPU-side triangle mesh (positions, smooth normals, triangle indices).
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let mut mesh = Self {
            normals: vec![Vec3::ZERO; positions.len()],
            positions,
            indices,
        };
        mesh.compute_vertex_normals();
        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Area-weighted smooth normals from the current positions
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let face = (self.positions[b] - self.positions[a])
                .cross(self.positions[c] - self.positions[a]);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }
        for n in &mut normals {
            *n = n.normalize_or_zero();
        }
        self.normals = normals;
    }

    /// Axis-aligned bounds as (min, max); `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(min, max), &p| {
            (min.min(p), max.max(p))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_triangle_normal() {
        let mesh = MeshData::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Z],
            vec![0, 2, 1],
        );
        assert_eq!(mesh.triangle_count(), 1);
        for n in &mesh.normals {
            assert!((*n - Vec3::Y).length() < 1e-6);
        }
    }

    #[test]
    fn test_bounds() {
        let mesh = MeshData::new(
            vec![Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, -2.0, 0.0)],
            vec![],
        );
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(max, Vec3::new(3.0, 0.0, 2.0));
        assert!(MeshData::default().bounds().is_none());
    }
}
