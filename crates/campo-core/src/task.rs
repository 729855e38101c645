//! Sacred task model.
//!
//! A sacred task is a user-defined recurring or one-off activity with a
//! priority, an energy cost, and an optional preferred time of day.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Life area a task belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Spiritual,
    Physical,
    Work,
    Family,
    Learning,
    Rest,
}

impl Default for TaskCategory {
    fn default() -> Self {
        TaskCategory::Work
    }
}

impl TaskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Spiritual => "spiritual",
            TaskCategory::Physical => "physical",
            TaskCategory::Work => "work",
            TaskCategory::Family => "family",
            TaskCategory::Learning => "learning",
            TaskCategory::Rest => "rest",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spiritual" => Ok(TaskCategory::Spiritual),
            "physical" => Ok(TaskCategory::Physical),
            "work" => Ok(TaskCategory::Work),
            "family" => Ok(TaskCategory::Family),
            "learning" => Ok(TaskCategory::Learning),
            "rest" => Ok(TaskCategory::Rest),
            other => Err(ValidationError::InvalidValue {
                field: "category".into(),
                message: format!("unknown category '{other}'"),
            }),
        }
    }
}

/// Recurrence of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Daily,
    Weekly,
    OneOff,
}

impl Default for TaskKind {
    fn default() -> Self {
        TaskKind::Daily
    }
}

impl FromStr for TaskKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "daily" => Ok(TaskKind::Daily),
            "weekly" => Ok(TaskKind::Weekly),
            "one_off" | "once" => Ok(TaskKind::OneOff),
            other => Err(ValidationError::InvalidValue {
                field: "kind".into(),
                message: format!("unknown task kind '{other}'"),
            }),
        }
    }
}

/// One of the five daily prayers a task can be anchored to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PrayerAnchor {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerAnchor {
    pub const ALL: [PrayerAnchor; 5] = [
        PrayerAnchor::Fajr,
        PrayerAnchor::Dhuhr,
        PrayerAnchor::Asr,
        PrayerAnchor::Maghrib,
        PrayerAnchor::Isha,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerAnchor::Fajr => "fajr",
            PrayerAnchor::Dhuhr => "dhuhr",
            PrayerAnchor::Asr => "asr",
            PrayerAnchor::Maghrib => "maghrib",
            PrayerAnchor::Isha => "isha",
        }
    }
}

impl FromStr for PrayerAnchor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrayerAnchor::ALL
            .into_iter()
            .find(|p| p.as_str() == s.to_lowercase())
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "prayer_anchor".into(),
                message: format!("unknown prayer '{s}'"),
            })
    }
}

/// Preferred time of day for a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdealTime {
    /// Hour of day (0-23)
    pub hour: u8,
    /// Minute (0-59)
    #[serde(default)]
    pub minute: u8,
    /// Expected duration in minutes
    #[serde(default)]
    pub duration_min: u32,
}

impl IdealTime {
    /// # Errors
    ///
    /// Returns an error if `hour` is not 0-23 or `minute` is not 0-59.
    pub fn new(hour: u8, minute: u8, duration_min: u32) -> Result<Self, ValidationError> {
        let time = Self {
            hour,
            minute,
            duration_min,
        };
        time.validate()?;
        Ok(time)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check_range("ideal_time.hour", self.hour.into(), 0, 23)?;
        ValidationError::check_range("ideal_time.minute", self.minute.into(), 0, 59)
    }
}

/// A user-defined sacred task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SacredTask {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: TaskCategory,
    #[serde(default)]
    pub kind: TaskKind,
    /// 1 (highest) to 10 (lowest)
    pub priority: u8,
    /// 1 to 10
    pub energy_required: u8,
    #[serde(default)]
    pub non_negotiable: bool,
    #[serde(default)]
    pub ideal_time: Option<IdealTime>,
    /// Ids of tasks this one depends on
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub prayer_anchor: Option<PrayerAnchor>,
    /// Inactive tasks are kept but never offered for recommendation.
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl SacredTask {
    /// Create a task with a fresh UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if `priority` or `energy_required` is outside 1-10.
    pub fn new(
        name: impl Into<String>,
        priority: u8,
        energy_required: u8,
    ) -> Result<Self, ValidationError> {
        Self::with_id(uuid::Uuid::new_v4().to_string(), name, priority, energy_required)
    }

    /// Create a task with a caller-chosen id.
    pub fn with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        priority: u8,
        energy_required: u8,
    ) -> Result<Self, ValidationError> {
        let task = Self {
            id: id.into(),
            name: name.into(),
            category: TaskCategory::default(),
            kind: TaskKind::default(),
            priority,
            energy_required,
            non_negotiable: false,
            ideal_time: None,
            dependencies: Vec::new(),
            prayer_anchor: None,
            active: true,
        };
        task.validate()?;
        Ok(task)
    }

    pub fn non_negotiable(mut self, value: bool) -> Self {
        self.non_negotiable = value;
        self
    }

    pub fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_ideal_time(mut self, ideal_time: IdealTime) -> Self {
        self.ideal_time = Some(ideal_time);
        self
    }

    /// Shorthand for an ideal time on the hour with no duration.
    pub fn at_hour(self, hour: u8) -> Result<Self, ValidationError> {
        Ok(self.with_ideal_time(IdealTime::new(hour, 0, 0)?))
    }

    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_prayer_anchor(mut self, anchor: PrayerAnchor) -> Self {
        self.prayer_anchor = Some(anchor);
        self
    }

    /// Preferred hour of day, if any.
    pub fn ideal_hour(&self) -> Option<u8> {
        self.ideal_time.map(|t| t.hour)
    }

    /// Priority 1-3 counts as high priority in the default settings.
    pub fn is_high_priority(&self, threshold: u8) -> bool {
        self.priority <= threshold
    }

    /// Re-check invariants, e.g. after deserializing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "id".into(),
                message: "must not be empty".into(),
            });
        }
        ValidationError::check_range("priority", self.priority.into(), 1, 10)?;
        ValidationError::check_range("energy_required", self.energy_required.into(), 1, 10)?;
        if let Some(time) = &self.ideal_time {
            time.validate()?;
        }
        Ok(())
    }
}

/// Partial update applied by [`crate::repository::TaskRepository::update`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub name: Option<String>,
    pub category: Option<TaskCategory>,
    pub kind: Option<TaskKind>,
    pub priority: Option<u8>,
    pub energy_required: Option<u8>,
    pub non_negotiable: Option<bool>,
    /// `Some(None)` clears the ideal time.
    pub ideal_time: Option<Option<IdealTime>>,
    pub dependencies: Option<Vec<String>>,
    pub prayer_anchor: Option<Option<PrayerAnchor>>,
    pub active: Option<bool>,
}

impl TaskUpdate {
    /// Apply onto a copy of `task` and validate the result.
    pub fn apply(&self, task: &SacredTask) -> Result<SacredTask, ValidationError> {
        let mut updated = task.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(category) = self.category {
            updated.category = category;
        }
        if let Some(kind) = self.kind {
            updated.kind = kind;
        }
        if let Some(priority) = self.priority {
            updated.priority = priority;
        }
        if let Some(energy) = self.energy_required {
            updated.energy_required = energy;
        }
        if let Some(flag) = self.non_negotiable {
            updated.non_negotiable = flag;
        }
        if let Some(ideal_time) = self.ideal_time {
            updated.ideal_time = ideal_time;
        }
        if let Some(deps) = &self.dependencies {
            updated.dependencies = deps.clone();
        }
        if let Some(anchor) = self.prayer_anchor {
            updated.prayer_anchor = anchor;
        }
        if let Some(active) = self.active {
            updated.active = active;
        }
        updated.validate()?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_ranges() {
        assert!(SacredTask::new("Fajr", 1, 3).is_ok());
        assert!(SacredTask::new("Bad", 0, 3).is_err());
        assert!(SacredTask::new("Bad", 11, 3).is_err());
        assert!(SacredTask::new("Bad", 5, 0).is_err());
        assert!(SacredTask::new("Bad", 5, 11).is_err());
    }

    #[test]
    fn ideal_hour_is_optional() {
        let task = SacredTask::with_id("t1", "Walk", 4, 4).unwrap();
        assert_eq!(task.ideal_hour(), None);
        let task = task.at_hour(6).unwrap();
        assert_eq!(task.ideal_hour(), Some(6));
        assert!(SacredTask::with_id("t2", "Late", 4, 4).unwrap().at_hour(24).is_err());
    }

    #[test]
    fn deserializes_minimal_json_with_defaults() {
        let json = r#"{"id":"a","name":"Read","priority":3,"energy_required":2}"#;
        let task: SacredTask = serde_json::from_str(json).unwrap();
        assert!(task.active);
        assert!(!task.non_negotiable);
        assert!(task.dependencies.is_empty());
        assert_eq!(task.category, TaskCategory::Work);
    }

    #[test]
    fn update_applies_and_validates() {
        let task = SacredTask::with_id("a", "Read", 3, 2).unwrap().at_hour(20).unwrap();
        let update = TaskUpdate {
            priority: Some(1),
            ideal_time: Some(None),
            ..Default::default()
        };
        let updated = update.apply(&task).unwrap();
        assert_eq!(updated.priority, 1);
        assert_eq!(updated.ideal_hour(), None);

        let bad = TaskUpdate {
            energy_required: Some(12),
            ..Default::default()
        };
        assert!(bad.apply(&task).is_err());
    }

    #[test]
    fn parses_enums_from_strings() {
        assert_eq!("Spiritual".parse::<TaskCategory>().unwrap(), TaskCategory::Spiritual);
        assert_eq!("one-off".parse::<TaskKind>().unwrap(), TaskKind::OneOff);
        assert_eq!("maghrib".parse::<PrayerAnchor>().unwrap(), PrayerAnchor::Maghrib);
        assert!("brunch".parse::<PrayerAnchor>().is_err());
    }
}
