//! Centripetal Catmull-Rom space curve with arc-length parametrization

use glam::Vec3;

/// Cubic polynomial coefficients for one axis of one segment
#[derive(Clone, Copy, Debug, Default)]
struct Cubic {
    c0: f32,
    c1: f32,
    c2: f32,
    c3: f32,
}

impl Cubic {
    /// Hermite form from end values and end tangents
    fn hermite(x0: f32, x1: f32, t0: f32, t1: f32) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    /// Non-uniform Catmull-Rom between `x1` and `x2` with knot spacings `dt0..dt2`
    fn nonuniform(x0: f32, x1: f32, x2: f32, x3: f32, dt0: f32, dt1: f32, dt2: f32) -> Self {
        let mut t1 = (x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1;
        let mut t2 = (x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2;
        t1 *= dt1;
        t2 *= dt1;
        Self::hermite(x1, x2, t1, t2)
    }

    fn eval(&self, t: f32) -> f32 {
        let t2 = t * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t2 * t
    }
}

/// Smooth interpolating curve through a list of control points.
///
/// Parameter `t` in `[0, 1]` is uniform per segment; `u` in `[0, 1]` is
/// uniform in arc length. Queries by `u` are what callers usually want for
/// evenly spaced placement.
#[derive(Clone, Debug)]
pub struct CatmullRomCurve {
    points: Vec<Vec3>,
    /// Cumulative arc lengths at `divisions + 1` uniform `t` samples
    arc_lengths: Vec<f32>,
}

impl CatmullRomCurve {
    /// Finite-difference step used for tangents
    const TANGENT_DELTA: f32 = 1e-4;

    /// Build a curve through `points`.
    ///
    /// Returns `None` for fewer than two points.
    pub fn new(points: Vec<Vec3>) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let divisions = (points.len() * 4).max(200);
        let mut curve = Self {
            points,
            arc_lengths: Vec::new(),
        };
        curve.arc_lengths = curve.compute_arc_lengths(divisions);
        Some(curve)
    }

    /// Control points the curve interpolates
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Total arc length (approximated by the sample polyline)
    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at uniform segment parameter `t`
    pub fn point(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let last = self.points.len() - 1;
        let p = last as f32 * t;
        let mut index = p.floor() as usize;
        let mut weight = p - index as f32;
        if index >= last {
            index = last - 1;
            weight = 1.0;
        }

        let p1 = self.points[index];
        let p2 = self.points[index + 1];
        // Open curve: extrapolate phantom end points
        let p0 = if index > 0 { self.points[index - 1] } else { p1 * 2.0 - p2 };
        let p3 = if index + 2 <= last { self.points[index + 2] } else { p2 * 2.0 - p1 };

        // Centripetal knot spacing (alpha = 0.5)
        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }

        let axis = |a: f32, b: f32, c: f32, d: f32| {
            Cubic::nonuniform(a, b, c, d, dt0, dt1, dt2).eval(weight)
        };
        Vec3::new(
            axis(p0.x, p1.x, p2.x, p3.x),
            axis(p0.y, p1.y, p2.y, p3.y),
            axis(p0.z, p1.z, p2.z, p3.z),
        )
    }

    /// Point at arc-length parameter `u`
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.point(self.u_to_t(u))
    }

    /// Unit tangent at arc-length parameter `u`
    pub fn tangent_at(&self, u: f32) -> Vec3 {
        let t = self.u_to_t(u);
        let t1 = (t - Self::TANGENT_DELTA).max(0.0);
        let t2 = (t + Self::TANGENT_DELTA).min(1.0);
        (self.point(t2) - self.point(t1)).normalize_or(Vec3::Y)
    }

    fn compute_arc_lengths(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut sum = 0.0;
        let mut prev = self.point(0.0);
        lengths.push(0.0);
        for i in 1..=divisions {
            let current = self.point(i as f32 / divisions as f32);
            sum += current.distance(prev);
            lengths.push(sum);
            prev = current;
        }
        lengths
    }

    /// Map arc-length fraction to segment parameter via the cumulative table
    fn u_to_t(&self, u: f32) -> f32 {
        let total = self.length();
        let divisions = self.arc_lengths.len() - 1;
        if total <= 0.0 || divisions == 0 {
            return u.clamp(0.0, 1.0);
        }
        let target = u.clamp(0.0, 1.0) * total;

        // Last index whose cumulative length is <= target
        let i = self
            .arc_lengths
            .partition_point(|&len| len <= target)
            .saturating_sub(1)
            .min(divisions - 1);

        let before = self.arc_lengths[i];
        let segment = self.arc_lengths[i + 1] - before;
        let fraction = if segment > 0.0 { (target - before) / segment } else { 0.0 };
        ((i as f32 + fraction) / divisions as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> CatmullRomCurve {
        CatmullRomCurve::new(vec![
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_requires_two_points() {
        assert!(CatmullRomCurve::new(vec![]).is_none());
        assert!(CatmullRomCurve::new(vec![Vec3::ONE]).is_none());
        assert!(CatmullRomCurve::new(vec![Vec3::ZERO, Vec3::ONE]).is_some());
    }

    #[test]
    fn test_interpolates_control_points() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(2.0, 0.0, 1.0),
            Vec3::new(3.0, 2.0, 1.0),
        ];
        let curve = CatmullRomCurve::new(points.clone()).unwrap();
        for (i, p) in points.iter().enumerate() {
            let t = i as f32 / (points.len() - 1) as f32;
            assert!((curve.point(t) - *p).length() < 1e-4, "point {i}");
        }
    }

    #[test]
    fn test_arc_length_parametrization_on_line() {
        let curve = line();
        assert!((curve.length() - 4.0).abs() < 1e-3);
        // Uneven control spacing, but u maps to distance
        let mid = curve.point_at(0.5);
        assert!((mid.x - 2.0).abs() < 0.02, "mid = {mid:?}");
        assert!((curve.point_at(1.0).x - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_tangent_on_line() {
        let curve = line();
        for u in [0.0, 0.3, 0.7, 1.0] {
            let t = curve.tangent_at(u);
            assert!((t - Vec3::X).length() < 1e-3, "u={u} t={t:?}");
        }
    }
}
