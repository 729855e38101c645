//! # Campo Sagrado Core Library
//!
//! This library provides the business logic behind the Campo Sagrado
//! life-management dashboard: sacred tasks, a self-reported energy model,
//! and the recommendation engine that ranks what to do next. The `campo`
//! CLI is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Recommendation**: pure filter/rank/score pipeline over in-memory tasks
//! - **Storage**: pluggable key-value stores (memory, JSON file, SQLite) and
//!   TOML configuration
//! - **Profile**: personal positioning and gifts, passed explicitly
//! - **Orchestrator**: work fields and the next action across them
//! - **Integrations**: prayer times over HTTP and Markdown export
//!
//! ## Key Components
//!
//! - [`Recommender`]: ranks tasks for an energy level and time of day
//! - [`GenerateRecommendation`]: repository-backed recommendation use case
//! - [`EnergyLevel`]: validated 1-10 energy value
//! - [`KvStore`]: key-value persistence trait
//! - [`Config`]: application configuration management

pub mod circadian;
pub mod energy;
pub mod error;
pub mod export;
pub mod orchestrator;
pub mod prayer;
pub mod profile;
pub mod recommend;
pub mod repository;
pub mod storage;
pub mod task;
pub mod usecase;

pub use circadian::{binary_recommendation, BinaryRecommendation, CircadianPhase, OptionChoice};
pub use energy::{Activity, EnergyBand, EnergyLevel};
pub use error::{ConfigError, CoreError, Result, StorageError, ValidationError};
pub use export::{ExportPaths, MarkdownExporter};
pub use orchestrator::{FieldState, Orchestrator, OrchestratorStore, SuggestedAction, WorkField};
pub use prayer::{PrayerTimesClient, PrayerTimings};
pub use profile::{Gift, GiftDomain, Positioning, PositioningUpdate, Profile, ProfileStore};
pub use recommend::{
    recommend, OptimalTime, RecommendationResult, RecommendationSettings, Recommender,
};
pub use repository::{KvTaskRepository, TaskRepository};
pub use storage::{Config, FileStore, KvStore, MemoryStore, SqliteStore, StorageBackend};
pub use task::{IdealTime, PrayerAnchor, SacredTask, TaskCategory, TaskKind, TaskUpdate};
pub use usecase::{GenerateRecommendation, RecommendationRequest};
