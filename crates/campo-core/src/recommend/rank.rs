//! Deterministic ordering of recommended tasks.

use std::cmp::Ordering;

use crate::task::SacredTask;

/// Compare two tasks for a given hour of day.
///
/// Non-negotiable tasks first, then lower priority value, then closeness of
/// the ideal hour to `hour`. The last criterion only applies when both tasks
/// have an ideal hour.
pub fn compare_tasks(a: &SacredTask, b: &SacredTask, hour: u8) -> Ordering {
    b.non_negotiable
        .cmp(&a.non_negotiable)
        .then_with(|| a.priority.cmp(&b.priority))
        .then_with(|| match (a.ideal_hour(), b.ideal_hour()) {
            (Some(ha), Some(hb)) => ha.abs_diff(hour).cmp(&hb.abs_diff(hour)),
            _ => Ordering::Equal,
        })
}

/// Sort `tasks` in place. Fully tied tasks keep their input order.
///
/// Stable insertion sort: [`compare_tasks`] is not transitive once only some
/// tasks carry an ideal hour, which `slice::sort_by` is allowed to reject.
pub fn rank_tasks(tasks: &mut [SacredTask], hour: u8) {
    for i in 1..tasks.len() {
        let mut j = i;
        while j > 0 && compare_tasks(&tasks[j - 1], &tasks[j], hour) == Ordering::Greater {
            tasks.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Ranked copy of `tasks`.
pub fn ranked(tasks: &[SacredTask], hour: u8) -> Vec<SacredTask> {
    let mut out = tasks.to_vec();
    rank_tasks(&mut out, hour);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, priority: u8) -> SacredTask {
        SacredTask::with_id(id, id, priority, 3).unwrap()
    }

    fn ids(tasks: &[SacredTask]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn non_negotiable_beats_priority() {
        let tasks = vec![task("flex", 1), task("fixed", 9).non_negotiable(true)];
        assert_eq!(ids(&ranked(&tasks, 12)), vec!["fixed", "flex"]);
    }

    #[test]
    fn lower_priority_value_first() {
        let tasks = vec![task("p5", 5), task("p1", 1), task("p3", 3)];
        assert_eq!(ids(&ranked(&tasks, 12)), vec!["p1", "p3", "p5"]);
    }

    #[test]
    fn closer_ideal_hour_breaks_priority_ties() {
        let tasks = vec![
            task("far", 2).at_hour(20).unwrap(),
            task("near", 2).at_hour(9).unwrap(),
        ];
        assert_eq!(ids(&ranked(&tasks, 8)), vec!["near", "far"]);
    }

    #[test]
    fn hour_distance_is_not_circular() {
        let tasks = vec![
            task("midnight", 2).at_hour(0).unwrap(),
            task("evening", 2).at_hour(18).unwrap(),
        ];
        // 23 -> 0 is 23 hours apart, 23 -> 18 is 5.
        assert_eq!(ids(&ranked(&tasks, 23)), vec!["evening", "midnight"]);
    }

    #[test]
    fn missing_ideal_hour_keeps_input_order() {
        let tasks = vec![
            task("a", 2),
            task("b", 2).at_hour(8).unwrap(),
            task("c", 2),
        ];
        assert_eq!(ids(&ranked(&tasks, 8)), vec!["a", "b", "c"]);
    }

    #[test]
    fn mixed_ideal_hours_sort_by_adjacent_comparison() {
        let tasks = vec![
            task("a", 4).at_hour(6).unwrap(),
            task("b", 4),
            task("c", 4).at_hour(13).unwrap(),
        ];
        // b is tied with both neighbours, so c never moves past it.
        assert_eq!(ids(&ranked(&tasks, 13)), vec!["a", "b", "c"]);
    }

    #[test]
    fn ranking_is_idempotent() {
        let tasks = vec![
            task("a", 4).at_hour(6).unwrap(),
            task("b", 1),
            task("c", 4).non_negotiable(true),
            task("d", 4).at_hour(14).unwrap(),
            task("e", 4),
        ];
        let once = ranked(&tasks, 13);
        let twice = ranked(&once, 13);
        assert_eq!(once, twice);
    }
}
