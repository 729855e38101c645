//! Template-filled explanation shown with a recommendation.

use crate::energy::EnergyLevel;
use crate::task::SacredTask;

/// Build the explanation for `ranked` at `energy`.
///
/// Counts run over every ranked task, not just the ones that make the cut.
pub fn generate(ranked: &[SacredTask], energy: EnergyLevel, high_priority_threshold: u8) -> String {
    let non_negotiable = ranked.iter().filter(|t| t.non_negotiable).count();
    let high_priority = ranked
        .iter()
        .filter(|t| t.is_high_priority(high_priority_threshold))
        .count();

    let mut reasoning = format!(
        "Basado en tu energía actual ({}/10) y el momento del día, ",
        energy.value()
    );
    if non_negotiable > 0 {
        reasoning.push_str(&format!(
            "tienes {non_negotiable} tarea(s) no negociable(s) que requieren atención inmediata. "
        ));
    }
    if high_priority > 0 {
        reasoning.push_str(&format!(
            "Hay {high_priority} tarea(s) de alta prioridad que se alinean bien con tu energía actual. "
        ));
    }
    reasoning.push_str("Te recomiendo enfocarte en las tareas que mejor se adapten a tu estado energético.");
    reasoning
}
