//! Sacred task recommendations.
//!
//! Given the candidate tasks, the current energy level and the wall-clock
//! time, produce the top tasks to work on together with a confidence score,
//! an explanation and a coarse time window.
//!
//! # Pipeline
//!
//! 1. [`filter`]: drop tasks that cost more energy than available or that
//!    depend on a non-negotiable task
//! 2. [`rank`]: non-negotiable, then priority, then ideal-hour distance
//! 3. [`metrics`]: energy alignment and confidence
//! 4. [`reasoning`] and [`window`]: presentation
//!
//! Everything here is pure: no I/O and no clock reads.

pub mod filter;
pub mod metrics;
pub mod rank;
pub mod reasoning;
pub mod window;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::energy::EnergyLevel;
use crate::task::SacredTask;

pub use filter::{filter_tasks, fits_energy, is_blocked};
pub use metrics::{confidence, energy_alignment};
pub use rank::{compare_tasks, rank_tasks, ranked};
pub use window::OptimalTime;

/// Tunables of the recommender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSettings {
    /// Maximum number of tasks returned
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Added to the energy alignment to form the confidence
    #[serde(default = "default_confidence_base")]
    pub confidence_base: f64,
    /// Upper bound of the confidence
    #[serde(default = "default_confidence_cap")]
    pub confidence_cap: f64,
    /// Priorities at or below this count as high priority
    #[serde(default = "default_high_priority_threshold")]
    pub high_priority_threshold: u8,
}

fn default_top_n() -> usize {
    5
}
fn default_confidence_base() -> f64 {
    0.3
}
fn default_confidence_cap() -> f64 {
    0.9
}
fn default_high_priority_threshold() -> u8 {
    3
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            confidence_base: default_confidence_base(),
            confidence_cap: default_confidence_cap(),
            high_priority_threshold: default_high_priority_threshold(),
        }
    }
}

/// Output of [`Recommender::recommend`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// Ranked tasks, at most `top_n`
    pub tasks: Vec<SacredTask>,
    pub reasoning: String,
    /// In `[base, cap]` for non-negative alignment
    pub confidence: f64,
    pub optimal_time: OptimalTime,
    /// Mean energy fit of the compatible tasks (0.0 when there are none)
    pub energy_alignment: f64,
    pub energy: EnergyLevel,
    pub generated_at: NaiveDateTime,
}

/// Recommendation engine with injected settings.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    settings: RecommendationSettings,
}

impl Recommender {
    pub fn new(settings: RecommendationSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RecommendationSettings {
        &self.settings
    }

    /// Filter and rank `tasks` for `energy` at local time `at`.
    pub fn recommend(
        &self,
        tasks: &[SacredTask],
        energy: EnergyLevel,
        at: NaiveDateTime,
    ) -> RecommendationResult {
        let hour = at.hour() as u8;
        let compatible = filter_tasks(tasks, energy);
        let ordered = ranked(&compatible, hour);

        let energy_alignment = energy_alignment(&compatible, energy);
        let reasoning =
            reasoning::generate(&ordered, energy, self.settings.high_priority_threshold);
        let confidence = confidence(energy_alignment, &self.settings);

        debug!(
            compatible = compatible.len(),
            energy_alignment, confidence, hour, "ranked recommendation"
        );

        RecommendationResult {
            tasks: ordered.into_iter().take(self.settings.top_n).collect(),
            reasoning,
            confidence,
            optimal_time: OptimalTime::from_hour(hour),
            energy_alignment,
            energy,
            generated_at: at,
        }
    }
}

/// [`Recommender::recommend`] with default settings.
pub fn recommend(
    tasks: &[SacredTask],
    energy: EnergyLevel,
    at: NaiveDateTime,
) -> RecommendationResult {
    Recommender::default().recommend(tasks, energy, at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(hour, 30, 0)
            .unwrap()
    }

    fn level(v: f64) -> EnergyLevel {
        EnergyLevel::new(v).unwrap()
    }

    #[test]
    fn empty_input() {
        let result = recommend(&[], level(6.0), at(10));
        assert!(result.tasks.is_empty());
        assert_eq!(result.energy_alignment, 0.0);
        assert!((result.confidence - 0.3).abs() < 1e-9);
        assert_eq!(result.optimal_time, OptimalTime::Morning);
    }

    #[test]
    fn non_negotiable_first_regardless_of_priority() {
        let tasks = vec![
            SacredTask::with_id("flex", "flex", 2, 3).unwrap(),
            SacredTask::with_id("fixed", "fixed", 1, 3)
                .unwrap()
                .non_negotiable(true),
        ];
        let result = recommend(&tasks, level(7.0), at(9));
        let ids: Vec<&str> = result.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["fixed", "flex"]);
        // both |7-3| = 4 -> 0.6 alignment, confidence 0.9
        assert!((result.energy_alignment - 0.6).abs() < 1e-9);
        assert!((result.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn truncates_to_top_n_but_counts_all() {
        let tasks: Vec<SacredTask> = (1..=8)
            .map(|p| SacredTask::with_id(format!("t{p}"), "t", p, 2).unwrap())
            .collect();
        let result = recommend(&tasks, level(5.0), at(14));
        assert_eq!(result.tasks.len(), 5);
        assert_eq!(result.tasks[0].id, "t1");
        assert!(result.reasoning.contains("Hay 3 tarea(s) de alta prioridad"));
    }

    #[test]
    fn custom_settings_are_honoured() {
        let recommender = Recommender::new(RecommendationSettings {
            top_n: 1,
            confidence_base: 0.1,
            confidence_cap: 0.5,
            high_priority_threshold: 1,
        });
        let tasks = vec![
            SacredTask::with_id("a", "a", 2, 4).unwrap(),
            SacredTask::with_id("b", "b", 1, 4).unwrap(),
        ];
        let result = recommender.recommend(&tasks, level(4.0), at(22));
        assert_eq!(result.tasks.len(), 1);
        assert_eq!(result.tasks[0].id, "b");
        assert!((result.confidence - 0.5).abs() < 1e-9);
        assert_eq!(result.optimal_time, OptimalTime::LateNight);
    }

    #[test]
    fn dependency_on_non_negotiable_task_is_filtered_out() {
        let tasks = vec![
            SacredTask::with_id("prayer", "prayer", 1, 2)
                .unwrap()
                .non_negotiable(true),
            SacredTask::with_id("study", "study", 2, 4)
                .unwrap()
                .with_dependencies(["prayer"]),
        ];
        let result = recommend(&tasks, level(6.0), at(9));
        let ids: Vec<&str> = result.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["prayer"]);
        // only the prayer counts: 1 - |6-2|/10
        assert!((result.energy_alignment - 0.6).abs() < 1e-9);
    }

    #[test]
    fn expensive_tasks_do_not_count_toward_alignment() {
        let tasks = vec![
            SacredTask::with_id("ok", "ok", 5, 5).unwrap(),
            SacredTask::with_id("heavy", "heavy", 5, 10).unwrap(),
        ];
        let result = recommend(&tasks, level(5.0), at(8));
        assert_eq!(result.tasks.len(), 1);
        assert!((result.energy_alignment - 1.0).abs() < 1e-9);
    }
}
