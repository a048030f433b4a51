//! Fog calculation.

use crate::atmosphere::config::FogConfig;

/// Fraction of a surface at `distance` hidden by fog, in `[0, 1]`.
///
/// Exponential-squared falloff: `1 - exp(-(density * distance)^2)`.
/// Disabled fog always returns 0.
pub fn compute_fog_factor(distance: f32, config: &FogConfig) -> f32 {
    if !config.enabled || config.density <= 0.0 {
        return 0.0;
    }
    let d = config.density * distance.max(0.0);
    (1.0 - (-d * d).exp()).clamp(0.0, 1.0)
}
