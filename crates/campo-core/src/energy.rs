//! Self-reported energy on a 1-10 scale.
//!
//! [`EnergyLevel`] is the only validated input of the recommendation core:
//! once constructed, every downstream operation is total.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Lowest accepted energy value.
pub const MIN_ENERGY: u8 = 1;
/// Highest accepted energy value.
pub const MAX_ENERGY: u8 = 10;

/// Coarse classification of an energy value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyBand {
    /// 1-3
    Low,
    /// 4-7
    Medium,
    /// 8-10
    High,
}

impl EnergyBand {
    /// Classify a value already known to lie in 1-10.
    pub fn from_value(value: u8) -> Self {
        if value >= 8 {
            EnergyBand::High
        } else if value >= 4 {
            EnergyBand::Medium
        } else {
            EnergyBand::Low
        }
    }

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            EnergyBand::Low => "low",
            EnergyBand::Medium => "medium",
            EnergyBand::High => "high",
        }
    }

    /// Activities that suit this band.
    pub fn optimal_activities(&self) -> &'static [Activity] {
        match self {
            EnergyBand::High => &[
                Activity::CreativeWork,
                Activity::ComplexTasks,
                Activity::Planning,
                Activity::Innovation,
            ],
            EnergyBand::Medium => &[
                Activity::ModerateWork,
                Activity::Collaboration,
                Activity::Review,
                Activity::Learning,
            ],
            EnergyBand::Low => &[
                Activity::Rest,
                Activity::LightTasks,
                Activity::Reflection,
                Activity::Maintenance,
            ],
        }
    }
}

/// Activity tag suggested for an energy band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    CreativeWork,
    ComplexTasks,
    Planning,
    Innovation,
    ModerateWork,
    Collaboration,
    Review,
    Learning,
    Rest,
    LightTasks,
    Reflection,
    Maintenance,
}

impl Activity {
    /// Stable snake_case tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::CreativeWork => "creative_work",
            Activity::ComplexTasks => "complex_tasks",
            Activity::Planning => "planning",
            Activity::Innovation => "innovation",
            Activity::ModerateWork => "moderate_work",
            Activity::Collaboration => "collaboration",
            Activity::Review => "review",
            Activity::Learning => "learning",
            Activity::Rest => "rest",
            Activity::LightTasks => "light_tasks",
            Activity::Reflection => "reflection",
            Activity::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated energy value in 1-10.
///
/// The raw input is range-checked before rounding, so `7.6` becomes 8 while
/// both `0.6` and `10.4` are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "u8")]
pub struct EnergyLevel(u8);

impl EnergyLevel {
    /// Validate and round a raw energy value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EnergyOutOfRange`] if `level` is outside
    /// 1-10 or not a number.
    pub fn new(level: f64) -> Result<Self, ValidationError> {
        if !(f64::from(MIN_ENERGY)..=f64::from(MAX_ENERGY)).contains(&level) {
            return Err(ValidationError::EnergyOutOfRange { value: level });
        }
        Ok(Self(level.round() as u8))
    }

    /// Numeric value (1-10).
    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn band(&self) -> EnergyBand {
        EnergyBand::from_value(self.0)
    }

    pub fn is_high(&self) -> bool {
        self.band() == EnergyBand::High
    }

    pub fn is_medium(&self) -> bool {
        self.band() == EnergyBand::Medium
    }

    pub fn is_low(&self) -> bool {
        self.band() == EnergyBand::Low
    }

    /// True when a task needing `required` energy fits this level.
    pub fn can_perform(&self, required: u8) -> bool {
        self.0 >= required
    }

    pub fn optimal_activities(&self) -> &'static [Activity] {
        self.band().optimal_activities()
    }
}

impl TryFrom<f64> for EnergyLevel {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EnergyLevel> for u8 {
    fn from(level: EnergyLevel) -> Self {
        level.0
    }
}

impl FromStr for EnergyLevel {
    type Err = ValidationError;

    /// Parse an integer energy value such as `"7"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: i64 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidEnergy(s.to_string()))?;
        Self::new(n as f64)
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, MAX_ENERGY)
    }
}
