//! Recommendation use case: repository in, ranked tasks out.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::energy::EnergyLevel;
use crate::error::{CoreError, Result};
use crate::recommend::{RecommendationResult, Recommender};
use crate::repository::TaskRepository;

/// Raw input for [`GenerateRecommendation::execute`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Unvalidated energy (1-10, rounded)
    pub current_energy: f64,
    /// Local wall-clock time
    pub current_time: NaiveDateTime,
    /// Caller-supplied context (location, mood, notes). Carried for logging;
    /// it does not affect ranking.
    #[serde(default)]
    pub context: Option<serde_json::Value>,
}

/// Fetches the active tasks and hands them to the [`Recommender`].
pub struct GenerateRecommendation<R> {
    repository: R,
    recommender: Recommender,
}

impl<R: TaskRepository> GenerateRecommendation<R> {
    pub fn new(repository: R, recommender: Recommender) -> Self {
        Self {
            repository,
            recommender,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// # Errors
    ///
    /// Every failure (invalid energy, repository error) is returned as
    /// [`CoreError::Recommendation`] wrapping the cause.
    pub fn execute(&self, request: &RecommendationRequest) -> Result<RecommendationResult> {
        self.run(request).map_err(|e| {
            warn!(error = %e, "recommendation failed");
            CoreError::recommendation(e)
        })
    }

    fn run(&self, request: &RecommendationRequest) -> Result<RecommendationResult> {
        let energy = EnergyLevel::new(request.current_energy)?;
        let available = self.repository.find_available()?;
        debug!(
            available = available.len(),
            context = ?request.context,
            "candidate tasks"
        );
        Ok(self
            .recommender
            .recommend(&available, energy, request.current_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::repository::KvTaskRepository;
    use crate::storage::MemoryStore;
    use crate::task::{SacredTask, TaskUpdate};
    use chrono::NaiveDate;

    struct FailingRepository;

    impl TaskRepository for FailingRepository {
        fn find_by_id(&self, _id: &str) -> Result<Option<SacredTask>> {
            unreachable!()
        }
        fn find_all(&self) -> Result<Vec<SacredTask>> {
            Err(CoreError::Io(std::io::Error::other("store offline")))
        }
        fn save(&mut self, _task: SacredTask) -> Result<SacredTask> {
            unreachable!()
        }
        fn update(&mut self, _id: &str, _update: &TaskUpdate) -> Result<SacredTask> {
            unreachable!()
        }
        fn delete(&mut self, _id: &str) -> Result<bool> {
            unreachable!()
        }
    }

    fn request(energy: f64, hour: u32) -> RecommendationRequest {
        RecommendationRequest {
            current_energy: energy,
            current_time: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            context: None,
        }
    }

    #[test]
    fn invalid_energy_is_wrapped() {
        let usecase = GenerateRecommendation::new(
            KvTaskRepository::new(MemoryStore::new()),
            Recommender::default(),
        );
        let err = usecase.execute(&request(11.0, 8)).unwrap_err();
        match err {
            CoreError::Recommendation(inner) => assert!(matches!(
                *inner,
                CoreError::Validation(ValidationError::EnergyOutOfRange { .. })
            )),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn repository_failure_is_wrapped() {
        let usecase = GenerateRecommendation::new(FailingRepository, Recommender::default());
        let err = usecase.execute(&request(5.0, 8)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to generate sacred recommendation: IO error: store offline"
        );
    }

    #[test]
    fn applies_dependency_rule_and_skips_inactive() {
        let mut repo = KvTaskRepository::new(MemoryStore::new());
        repo.save(
            SacredTask::with_id("fajr", "Fajr", 1, 3)
                .unwrap()
                .non_negotiable(true),
        )
        .unwrap();
        repo.save(
            SacredTask::with_id("study", "Study", 2, 4)
                .unwrap()
                .with_dependencies(["fajr"]),
        )
        .unwrap();
        let mut archived = SacredTask::with_id("old", "Old", 1, 1).unwrap();
        archived.active = false;
        repo.save(archived).unwrap();
        repo.save(SacredTask::with_id("walk", "Walk", 5, 2).unwrap())
            .unwrap();

        let usecase = GenerateRecommendation::new(repo, Recommender::default());
        let result = usecase.execute(&request(7.6, 5)).unwrap();
        let ids: Vec<&str> = result.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["fajr", "walk"]);
        assert_eq!(result.energy.value(), 8);
        assert_eq!(result.optimal_time.label(), "Madrugada (5:00-7:00)");
    }

    #[test]
    fn request_context_is_optional() {
        let req: RecommendationRequest = serde_json::from_str(
            r#"{"current_energy": 6.0, "current_time": "2025-06-01T09:00:00"}"#,
        )
        .unwrap();
        assert!(req.context.is_none());

        let req: RecommendationRequest = serde_json::from_str(
            r#"{"current_energy": 6.0, "current_time": "2025-06-01T09:00:00", "context": {"mood": "calm"}}"#,
        )
        .unwrap();
        assert_eq!(req.context.unwrap()["mood"], "calm");
    }
}
