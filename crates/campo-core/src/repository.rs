//! Task repository.
//!
//! [`TaskRepository`] is the task-listing capability the recommendation use
//! case depends on. [`KvTaskRepository`] keeps every task as one JSON array
//! in a [`KvStore`].

use tracing::info;

use crate::energy::EnergyLevel;
use crate::error::{CoreError, Result};
use crate::storage::{get_json, set_json, KvStore};
use crate::task::{SacredTask, TaskCategory, TaskUpdate};

/// Key under which the task list is stored.
pub const TASKS_KEY: &str = "tasks";

pub trait TaskRepository {
    fn find_by_id(&self, id: &str) -> Result<Option<SacredTask>>;
    fn find_all(&self) -> Result<Vec<SacredTask>>;
    fn save(&mut self, task: SacredTask) -> Result<SacredTask>;
    /// Fails with [`CoreError::TaskNotFound`] for an unknown id.
    fn update(&mut self, id: &str, update: &TaskUpdate) -> Result<SacredTask>;
    /// Returns whether a task was removed.
    fn delete(&mut self, id: &str) -> Result<bool>;

    /// Active tasks, the candidates for recommendation.
    fn find_available(&self) -> Result<Vec<SacredTask>> {
        Ok(self.find_all()?.into_iter().filter(|t| t.active).collect())
    }

    fn find_by_category(&self, category: TaskCategory) -> Result<Vec<SacredTask>> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|t| t.category == category)
            .collect())
    }

    /// Tasks with `min <= priority <= max`.
    fn find_by_priority(&self, min: u8, max: u8) -> Result<Vec<SacredTask>> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|t| (min..=max).contains(&t.priority))
            .collect())
    }

    fn find_non_negotiable(&self) -> Result<Vec<SacredTask>> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|t| t.non_negotiable)
            .collect())
    }

    /// Tasks `level` has enough energy for.
    fn find_by_energy_level(&self, level: EnergyLevel) -> Result<Vec<SacredTask>> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|t| level.can_perform(t.energy_required))
            .collect())
    }

    /// Tasks whose ideal hour lies in `start..end`.
    fn find_by_hour_range(&self, start: u8, end: u8) -> Result<Vec<SacredTask>> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|t| t.ideal_hour().is_some_and(|h| (start..end).contains(&h)))
            .collect())
    }
}

/// [`TaskRepository`] over any [`KvStore`].
#[derive(Debug)]
pub struct KvTaskRepository<S> {
    store: S,
}

impl<S: KvStore> KvTaskRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn load(&self) -> Result<Vec<SacredTask>> {
        let tasks: Option<Vec<SacredTask>> = get_json(&self.store, TASKS_KEY)?;
        Ok(tasks.unwrap_or_default())
    }

    fn persist(&mut self, tasks: &[SacredTask]) -> Result<()> {
        set_json(&mut self.store, TASKS_KEY, tasks)
    }
}

impl<S: KvStore> TaskRepository for KvTaskRepository<S> {
    fn find_by_id(&self, id: &str) -> Result<Option<SacredTask>> {
        Ok(self.load()?.into_iter().find(|t| t.id == id))
    }

    fn find_all(&self) -> Result<Vec<SacredTask>> {
        self.load()
    }

    /// Insert, or replace the task with the same id in place.
    fn save(&mut self, task: SacredTask) -> Result<SacredTask> {
        task.validate()?;
        let mut tasks = self.load()?;
        match tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task.clone(),
            None => tasks.push(task.clone()),
        }
        self.persist(&tasks)?;
        info!(id = %task.id, name = %task.name, "saved task");
        Ok(task)
    }

    fn update(&mut self, id: &str, update: &TaskUpdate) -> Result<SacredTask> {
        let mut tasks = self.load()?;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;
        let updated = update.apply(slot)?;
        *slot = updated.clone();
        self.persist(&tasks)?;
        info!(id, "updated task");
        Ok(updated)
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        let mut tasks = self.load()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Ok(false);
        }
        self.persist(&tasks)?;
        info!(id, "deleted task");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn repo_with(tasks: Vec<SacredTask>) -> KvTaskRepository<MemoryStore> {
        let mut repo = KvTaskRepository::new(MemoryStore::new());
        for t in tasks {
            repo.save(t).unwrap();
        }
        repo
    }

    fn task(id: &str, priority: u8, energy: u8) -> SacredTask {
        SacredTask::with_id(id, id, priority, energy).unwrap()
    }

    #[test]
    fn empty_store_has_no_tasks() {
        let repo = KvTaskRepository::new(MemoryStore::new());
        assert!(repo.find_all().unwrap().is_empty());
        assert!(repo.find_by_id("x").unwrap().is_none());
    }

    #[test]
    fn save_replaces_existing_id() {
        let mut repo = repo_with(vec![task("a", 1, 1), task("b", 2, 2)]);
        repo.save(task("a", 9, 9)).unwrap();
        let all = repo.find_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "a");
        assert_eq!(all[0].priority, 9);
    }

    #[test]
    fn save_rejects_invalid_task() {
        let mut repo = repo_with(vec![]);
        let mut bad = task("a", 1, 1);
        bad.priority = 0;
        assert!(repo.save(bad).is_err());
        assert!(repo.find_all().unwrap().is_empty());
    }

    #[test]
    fn update_unknown_id_fails() {
        let mut repo = repo_with(vec![task("a", 1, 1)]);
        let err = repo.update("zzz", &TaskUpdate::default()).unwrap_err();
        assert!(matches!(err, CoreError::TaskNotFound(id) if id == "zzz"));
    }

    #[test]
    fn update_changes_fields() {
        let mut repo = repo_with(vec![task("a", 1, 1)]);
        let updated = repo
            .update(
                "a",
                &TaskUpdate {
                    active: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(!updated.active);
        assert!(repo.find_available().unwrap().is_empty());
    }

    #[test]
    fn delete_reports_presence() {
        let mut repo = repo_with(vec![task("a", 1, 1)]);
        assert!(repo.delete("a").unwrap());
        assert!(!repo.delete("a").unwrap());
    }

    #[test]
    fn query_helpers() {
        let repo = repo_with(vec![
            task("pray", 1, 2)
                .non_negotiable(true)
                .with_category(TaskCategory::Spiritual)
                .at_hour(5)
                .unwrap(),
            task("gym", 2, 7).with_category(TaskCategory::Physical).at_hour(7).unwrap(),
            task("code", 4, 8).at_hour(10).unwrap(),
            task("read", 6, 3),
        ]);

        let ids = |v: Vec<SacredTask>| v.into_iter().map(|t| t.id).collect::<Vec<_>>();

        assert_eq!(ids(repo.find_non_negotiable().unwrap()), vec!["pray"]);
        assert_eq!(
            ids(repo.find_by_category(TaskCategory::Physical).unwrap()),
            vec!["gym"]
        );
        assert_eq!(ids(repo.find_by_priority(2, 4).unwrap()), vec!["gym", "code"]);
        assert_eq!(
            ids(repo.find_by_energy_level(EnergyLevel::new(3.0).unwrap()).unwrap()),
            vec!["pray", "read"]
        );
        assert_eq!(ids(repo.find_by_hour_range(5, 10).unwrap()), vec!["pray", "gym"]);
    }
}
