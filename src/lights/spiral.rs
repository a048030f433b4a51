//! Spiral cable path hugging the foliage silhouette.

use std::f32::consts::TAU;
use std::sync::Arc;

use glam::{Quat, Vec3};
use rand::Rng;

use crate::core::{Error, Result};
use crate::foliage::RadiusProfile;
use crate::math::{lerp, radial, smooth_noise, CatmullRomCurve, RngExt};
use crate::scene::{LocalTransform, Material, MeshData, NodeContent, NodeLayer, SceneGraph, SceneNodeId};

use super::config::CableConfig;

/// Smooth closed-form path queried by arc-length fraction `u`.
#[derive(Clone, Debug)]
pub struct SpiralPath {
    curve: CatmullRomCurve,
}

impl SpiralPath {
    pub fn curve(&self) -> &CatmullRomCurve {
        &self.curve
    }

    pub fn point_at(&self, u: f32) -> Vec3 {
        self.curve.point_at(u)
    }

    pub fn tangent_at(&self, u: f32) -> Vec3 {
        self.curve.tangent_at(u)
    }

    pub fn length(&self) -> f32 {
        self.curve.length()
    }

    /// Sweep a circle of `radius` along the path.
    ///
    /// Frames are carried by parallel transport so the tube does not twist.
    pub fn tube_mesh(&self, radius: f32, tubular_segments: u32, radial_segments: u32) -> MeshData {
        let segments = tubular_segments.max(1);
        let radial_count = radial_segments.max(3);

        let tangents: Vec<Vec3> = (0..=segments)
            .map(|i| self.curve.tangent_at(i as f32 / segments as f32))
            .collect();

        // Start from the axis least aligned with the first tangent
        let t0 = tangents[0];
        let axis = [Vec3::X, Vec3::Y, Vec3::Z]
            .into_iter()
            .min_by(|a, b| a.dot(t0).abs().total_cmp(&b.dot(t0).abs()))
            .unwrap_or(Vec3::X);
        let mut normal = t0.cross(axis).normalize_or(Vec3::X);

        let mut positions = Vec::with_capacity(((segments + 1) * radial_count) as usize);
        for (i, tangent) in tangents.iter().enumerate() {
            if i > 0 {
                normal = (Quat::from_rotation_arc(tangents[i - 1], *tangent) * normal).normalize_or(normal);
            }
            let binormal = tangent.cross(normal);
            let center = self.curve.point_at(i as f32 / segments as f32);

            for j in 0..radial_count {
                let v = j as f32 / radial_count as f32 * TAU;
                let dir = normal * -v.cos() + binormal * v.sin();
                positions.push(center + dir * radius);
            }
        }

        let mut indices = Vec::with_capacity((segments * radial_count * 6) as usize);
        for i in 0..segments {
            for j in 0..radial_count {
                let j1 = (j + 1) % radial_count;
                let a = i * radial_count + j;
                let b = (i + 1) * radial_count + j;
                let c = (i + 1) * radial_count + j1;
                let d = i * radial_count + j1;
                indices.extend([a, b, d, b, c, d]);
            }
        }

        MeshData::new(positions, indices)
    }

    /// Add the cable tube under `parent`.
    pub fn spawn(&self, graph: &mut SceneGraph, parent: SceneNodeId, config: &CableConfig) -> SceneNodeId {
        let tubular = self.curve.points().len() as u32 * 2;
        let mesh = self.tube_mesh(config.tube_radius, tubular, config.tube_radial_segments);
        graph.spawn(
            parent,
            "cable",
            NodeLayer::Lights,
            NodeContent::Mesh(Arc::new(mesh)),
            LocalTransform::identity(),
            Some(Material {
                metalness: 0.05,
                ..Material::standard(config.color).with_roughness(0.9)
            }),
        )
    }
}

/// Builds the cable spiral from a radius profile.
pub struct SpiralPathBuilder {
    config: CableConfig,
}

impl SpiralPathBuilder {
    pub fn new(config: CableConfig) -> Self {
        Self { config }
    }

    /// Control points of the spiral; exposed for inspection and tests.
    pub fn control_points<R: Rng + ?Sized>(&self, profile: &RadiusProfile, rng: &mut R) -> Vec<Vec3> {
        let cfg = &self.config;
        let bottom = profile.bottom();
        let top = profile.top();
        let y_bottom = bottom.height - bottom.half_height + cfg.bottom_offset;
        let y_top = top.height + top.half_height - cfg.top_offset;
        let phase = rng.angle();
        let seed = rng.angle();
        let samples = cfg.samples.max(2);

        (0..samples)
            .map(|i| {
                let t = i as f32 / (samples - 1) as f32;
                let y = lerp(y_bottom, y_top, t)
                    + smooth_noise(t, cfg.height_noise_frequency, cfg.height_noise_amplitude, seed);
                let r = self.radius_at(profile, y, t, seed);
                let angle = t * cfg.turns * TAU + phase;
                radial(angle) * r + Vec3::Y * y
            })
            .collect()
    }

    /// Cable radius at height `y`: nominal inset plus noise, kept within
    /// `[silhouette - min_inset - band_depth, silhouette - min_inset]`.
    fn radius_at(&self, profile: &RadiusProfile, y: f32, t: f32, seed: f32) -> f32 {
        let cfg = &self.config;
        let max_r = profile.radius_at(y) - cfg.min_inset;
        let nominal = (max_r - (cfg.inset - cfg.min_inset)).max(cfg.min_radius);
        let noisy = nominal
            + smooth_noise(
                t,
                cfg.radius_noise_frequency,
                cfg.radius_noise_amplitude,
                seed + cfg.radius_noise_seed_offset,
            );
        noisy.min(max_r).max(max_r - cfg.band_depth).max(cfg.radius_floor)
    }

    pub fn build<R: Rng + ?Sized>(&self, profile: &RadiusProfile, rng: &mut R) -> Result<SpiralPath> {
        let points = self.control_points(profile, rng);
        let curve = CatmullRomCurve::new(points)
            .ok_or_else(|| Error::Geometry("spiral path needs at least two samples".into()))?;
        log::debug!(
            "Spiral cable: {} samples, {:.1} turns, length {:.2}",
            curve.points().len(),
            self.config.turns,
            curve.length()
        );
        Ok(SpiralPath { curve })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foliage::FoliageLayer;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn profile() -> RadiusProfile {
        let layers = (0..10)
            .map(|i| FoliageLayer {
                height: 2.0 + i as f32,
                outer_radius: 4.0 - i as f32 * 0.35,
                half_height: 0.1,
            })
            .collect();
        RadiusProfile::new(layers).unwrap()
    }

    #[test]
    fn test_points_stay_inside_silhouette() {
        let cfg = CableConfig::default();
        let p = profile();
        let points = SpiralPathBuilder::new(cfg.clone())
            .control_points(&p, &mut StdRng::seed_from_u64(1));
        assert_eq!(points.len(), 260);
        for pt in &points {
            let r = Vec3::new(pt.x, 0.0, pt.z).length();
            let max_r = p.radius_at(pt.y) - cfg.min_inset;
            assert!(r <= max_r + 1e-4, "r {r} > {max_r}");
            assert!(r >= max_r - cfg.band_depth - 1e-4);
        }
    }

    #[test]
    fn test_height_runs_bottom_to_top() {
        let cfg = CableConfig::default();
        let p = profile();
        let points = SpiralPathBuilder::new(cfg.clone())
            .control_points(&p, &mut StdRng::seed_from_u64(2));
        let noise = cfg.height_noise_amplitude * 1.5;
        let first = points[0].y;
        let last = points[points.len() - 1].y;
        assert!((first - (2.0 - 0.1 + 0.15)).abs() <= noise + 1e-4);
        assert!((last - (11.0 + 0.1 - 0.1)).abs() <= noise + 1e-4);
    }

    #[test]
    fn test_turn_count() {
        let cfg = CableConfig { turns: 3.0, ..Default::default() };
        let points = SpiralPathBuilder::new(cfg).control_points(&profile(), &mut StdRng::seed_from_u64(3));
        let mut total = 0.0;
        for w in points.windows(2) {
            let a0 = w[0].z.atan2(w[0].x);
            let a1 = w[1].z.atan2(w[1].x);
            total += (a1 - a0 + TAU * 1.5).rem_euclid(TAU) - TAU * 0.5;
        }
        assert!((total / TAU - 3.0).abs() < 1e-2, "turns {}", total / TAU);
    }

    #[test]
    fn test_radius_floor_on_thin_profile() {
        let thin = RadiusProfile::new(vec![
            FoliageLayer { height: 0.0, outer_radius: 0.1, half_height: 0.1 },
            FoliageLayer { height: 1.0, outer_radius: 0.1, half_height: 0.1 },
        ])
        .unwrap();
        let cfg = CableConfig::default();
        let points = SpiralPathBuilder::new(cfg.clone()).control_points(&thin, &mut StdRng::seed_from_u64(4));
        for pt in points {
            assert!(Vec3::new(pt.x, 0.0, pt.z).length() >= cfg.radius_floor - 1e-5);
        }
    }

    #[test]
    fn test_tube_mesh_wraps_curve() {
        let path = SpiralPathBuilder::new(CableConfig { samples: 40, ..Default::default() })
            .build(&profile(), &mut StdRng::seed_from_u64(5))
            .unwrap();
        let mesh = path.tube_mesh(0.02, 80, 8);
        assert_eq!(mesh.vertex_count(), 81 * 8);
        assert_eq!(mesh.triangle_count(), 80 * 8 * 2);

        // Each ring sits at the tube radius around its curve sample
        for i in [0usize, 40, 80] {
            let center = path.point_at(i as f32 / 80.0);
            for v in &mesh.positions[i * 8..(i + 1) * 8] {
                assert!(((*v - center).length() - 0.02).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_single_sample_is_clamped() {
        let path = SpiralPathBuilder::new(CableConfig { samples: 1, ..Default::default() })
            .build(&profile(), &mut StdRng::seed_from_u64(6));
        assert!(path.is_ok());
    }
}
