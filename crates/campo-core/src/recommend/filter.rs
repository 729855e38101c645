//! Energy and dependency filtering of candidate tasks.

use tracing::debug;

use crate::energy::EnergyLevel;
use crate::task::SacredTask;

/// Tasks whose energy cost fits `energy`, in input order.
pub fn fits_energy(tasks: &[SacredTask], energy: EnergyLevel) -> Vec<SacredTask> {
    tasks
        .iter()
        .filter(|t| energy.can_perform(t.energy_required))
        .cloned()
        .collect()
}

/// True when one of `task`'s dependency ids names a non-negotiable task in
/// `candidates`. Unknown ids never block.
///
/// This gates on the dependency's `non_negotiable` flag, not on whether the
/// dependency has been completed.
pub fn is_blocked(task: &SacredTask, candidates: &[SacredTask]) -> bool {
    task.dependencies.iter().any(|dep_id| {
        candidates
            .iter()
            .find(|c| &c.id == dep_id)
            .is_some_and(|c| c.non_negotiable)
    })
}

/// Keep the tasks that fit `energy` and are not blocked by a dependency.
///
/// Dependencies resolve against the full `tasks` list, so a task can be
/// blocked by a non-negotiable task that is itself too expensive to keep.
pub fn filter_tasks(tasks: &[SacredTask], energy: EnergyLevel) -> Vec<SacredTask> {
    let kept: Vec<SacredTask> = tasks
        .iter()
        .filter(|t| energy.can_perform(t.energy_required) && !is_blocked(t, tasks))
        .cloned()
        .collect();
    debug!(
        candidates = tasks.len(),
        kept = kept.len(),
        energy = energy.value(),
        "filtered tasks"
    );
    kept
}
