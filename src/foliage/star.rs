//! Star polygon outlines and the extruded star-ring cross-section mesh.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::math::lerp;
use crate::scene::mesh::MeshData;

/// Star polygon with `points` tips alternating between two radii.
///
/// Vertex `k` sits at angle `k * PI / points`; even vertices are tips.
#[derive(Clone, Copy, Debug)]
pub struct StarOutline {
    pub points: u32,
    pub outer_radius: f32,
    pub inner_radius: f32,
}

impl StarOutline {
    pub fn new(points: u32, outer_radius: f32, inner_radius: f32) -> Self {
        Self { points: points.max(2), outer_radius, inner_radius }
    }

    /// Angular distance between adjacent vertices
    fn step(&self) -> f32 {
        PI / self.points as f32
    }

    /// Outline vertices in the XZ plane (x = cos, y = sin)
    pub fn vertices(&self) -> Vec<Vec2> {
        let step = self.step();
        (0..self.points * 2)
            .map(|k| {
                let r = if k % 2 == 0 { self.outer_radius } else { self.inner_radius };
                let a = k as f32 * step;
                Vec2::new(a.cos() * r, a.sin() * r)
            })
            .collect()
    }

    /// Radius of the outline along `angle`, linear between adjacent vertices
    pub fn radius_at_angle(&self, angle: f32) -> f32 {
        let step = self.step();
        let a = angle.rem_euclid(TAU);
        let segment = (a / step).floor();
        let local = (a - segment * step) / step;
        let (r0, r1) = if segment as u32 % 2 == 0 {
            (self.outer_radius, self.inner_radius)
        } else {
            (self.inner_radius, self.outer_radius)
        };
        lerp(r0, r1, local)
    }
}

/// Star-shaped ring: a star outline with a smaller star hole, extruded
/// symmetrically about y = 0.
#[derive(Clone, Copy, Debug)]
pub struct StarRing {
    pub points: u32,
    pub outer_radius: f32,
    /// Tip radius of the hole
    pub hole_radius: f32,
    pub thickness: f32,
}

impl StarRing {
    /// Valley depth of both outlines relative to their tip radius
    const VALLEY_RATIO: f32 = 0.5;

    pub fn outer_outline(&self) -> StarOutline {
        StarOutline::new(self.points, self.outer_radius, self.outer_radius * Self::VALLEY_RATIO)
    }

    pub fn hole_outline(&self) -> StarOutline {
        StarOutline::new(self.points, self.hole_radius, self.hole_radius * Self::VALLEY_RATIO)
    }

    /// Build the closed ring mesh.
    ///
    /// Vertex layout: four rings of `2 * points` vertices each, in order
    /// outer-top, outer-bottom, hole-top, hole-bottom. Caps and walls share
    /// vertices so normals come out smooth.
    pub fn mesh(&self) -> MeshData {
        let outer = self.outer_outline().vertices();
        let hole = self.hole_outline().vertices();
        let n = outer.len() as u32;
        let half = self.thickness * 0.5;

        let mut positions = Vec::with_capacity(outer.len() * 4);
        for (ring, y) in [(&outer, half), (&outer, -half), (&hole, half), (&hole, -half)] {
            positions.extend(ring.iter().map(|v| Vec3::new(v.x, y, v.y)));
        }

        let outer_top = 0;
        let outer_bottom = n;
        let hole_top = 2 * n;
        let hole_bottom = 3 * n;

        let mut indices = Vec::with_capacity(n as usize * 24);
        for k in 0..n {
            let k1 = (k + 1) % n;

            // Top cap (+Y)
            indices.extend([outer_top + k, hole_top + k, hole_top + k1]);
            indices.extend([outer_top + k, hole_top + k1, outer_top + k1]);
            // Bottom cap (-Y)
            indices.extend([outer_bottom + k, hole_bottom + k1, hole_bottom + k]);
            indices.extend([outer_bottom + k, outer_bottom + k1, hole_bottom + k1]);
            // Outer wall, facing away from the axis
            indices.extend([outer_top + k, outer_bottom + k1, outer_bottom + k]);
            indices.extend([outer_top + k, outer_top + k1, outer_bottom + k1]);
            // Hole wall, facing the axis
            indices.extend([hole_top + k, hole_bottom + k, hole_bottom + k1]);
            indices.extend([hole_top + k, hole_bottom + k1, hole_top + k1]);
        }

        MeshData::new(positions, indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_alternates_radii() {
        let star = StarOutline::new(5, 2.0, 1.0);
        let verts = star.vertices();
        assert_eq!(verts.len(), 10);
        for (k, v) in verts.iter().enumerate() {
            let expected = if k % 2 == 0 { 2.0 } else { 1.0 };
            assert!((v.length() - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_radius_at_angle_hits_vertices_and_midpoints() {
        let star = StarOutline::new(12, 3.0, 1.5);
        let step = PI / 12.0;
        assert!((star.radius_at_angle(0.0) - 3.0).abs() < 1e-5);
        assert!((star.radius_at_angle(step) - 1.5).abs() < 1e-4);
        assert!((star.radius_at_angle(step * 0.5) - 2.25).abs() < 1e-4);
        // Wraps negative angles
        assert!((star.radius_at_angle(-step * 0.5) - 2.25).abs() < 1e-4);
        assert!((star.radius_at_angle(TAU) - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_ring_mesh_topology() {
        let ring = StarRing { points: 12, outer_radius: 3.0, hole_radius: 1.65, thickness: 0.2 };
        let mesh = ring.mesh();
        assert_eq!(mesh.vertex_count(), 24 * 4);
        assert_eq!(mesh.triangle_count(), 24 * 8);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));

        let (min, max) = mesh.bounds().unwrap();
        assert!((max.y - 0.1).abs() < 1e-6);
        assert!((min.y + 0.1).abs() < 1e-6);
        assert!(max.x <= 3.0 + 1e-5);
    }

    #[test]
    fn test_ring_outer_wall_faces_outward() {
        let ring = StarRing { points: 8, outer_radius: 2.0, hole_radius: 1.1, thickness: 0.5 };
        let mesh = ring.mesh();
        // Outer-wall triangles are the 5th and 6th of each 8-triangle group
        for group in mesh.indices.chunks_exact(24) {
            let tri = &group[12..15];
            let a = mesh.positions[tri[0] as usize];
            let b = mesh.positions[tri[1] as usize];
            let c = mesh.positions[tri[2] as usize];
            let normal = (b - a).cross(c - a);
            let center = (a + b + c) / 3.0;
            let outward = Vec3::new(center.x, 0.0, center.z);
            assert!(normal.dot(outward) > 0.0);
        }
    }

    #[test]
    fn test_ring_top_cap_faces_up() {
        let ring = StarRing { points: 6, outer_radius: 2.0, hole_radius: 1.0, thickness: 0.3 };
        let mesh = ring.mesh();
        for group in mesh.indices.chunks_exact(24) {
            let tri = &group[0..3];
            let a = mesh.positions[tri[0] as usize];
            let b = mesh.positions[tri[1] as usize];
            let c = mesh.positions[tri[2] as usize];
            assert!((b - a).cross(c - a).y > 0.0);
        }
    }
}
