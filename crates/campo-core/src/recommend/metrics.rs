//! Energy alignment and confidence.

use crate::energy::EnergyLevel;
use crate::task::SacredTask;

use super::RecommendationSettings;

/// Mean of `1 - |energy - energy_required| / 10` over `tasks`.
///
/// Returns 0.0 for an empty slice. Individual terms are not clamped.
pub fn energy_alignment(tasks: &[SacredTask], energy: EnergyLevel) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let current = f64::from(energy.value());
    let total: f64 = tasks
        .iter()
        .map(|t| 1.0 - (current - f64::from(t.energy_required)).abs() / 10.0)
        .sum();
    total / tasks.len() as f64
}

/// `min(cap, alignment + base)`.
pub fn confidence(alignment: f64, settings: &RecommendationSettings) -> f64 {
    (alignment + settings.confidence_base).min(settings.confidence_cap)
}
