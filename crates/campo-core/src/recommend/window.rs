//! Coarse time-of-day labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Time window derived from the hour of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptimalTime {
    #[serde(rename = "Madrugada (5:00-7:00)")]
    EarlyMorning,
    #[serde(rename = "Mañana (8:00-12:00)")]
    Morning,
    #[serde(rename = "Tarde (13:00-17:00)")]
    Afternoon,
    #[serde(rename = "Noche (18:00-21:00)")]
    Evening,
    #[serde(rename = "Noche tardía (22:00+)")]
    LateNight,
}

impl OptimalTime {
    /// Thresholds are checked in order: <6, <12, <17, <21, else.
    pub fn from_hour(hour: u8) -> Self {
        if hour < 6 {
            OptimalTime::EarlyMorning
        } else if hour < 12 {
            OptimalTime::Morning
        } else if hour < 17 {
            OptimalTime::Afternoon
        } else if hour < 21 {
            OptimalTime::Evening
        } else {
            OptimalTime::LateNight
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OptimalTime::EarlyMorning => "Madrugada (5:00-7:00)",
            OptimalTime::Morning => "Mañana (8:00-12:00)",
            OptimalTime::Afternoon => "Tarde (13:00-17:00)",
            OptimalTime::Evening => "Noche (18:00-21:00)",
            OptimalTime::LateNight => "Noche tardía (22:00+)",
        }
    }
}

impl fmt::Display for OptimalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_by_hour() {
        assert_eq!(OptimalTime::from_hour(5).label(), "Madrugada (5:00-7:00)");
        assert_eq!(OptimalTime::from_hour(22).label(), "Noche tardía (22:00+)");
        assert_eq!(OptimalTime::from_hour(0), OptimalTime::EarlyMorning);
        assert_eq!(OptimalTime::from_hour(6), OptimalTime::Morning);
        assert_eq!(OptimalTime::from_hour(12), OptimalTime::Afternoon);
        assert_eq!(OptimalTime::from_hour(17), OptimalTime::Evening);
        assert_eq!(OptimalTime::from_hour(21), OptimalTime::LateNight);
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&OptimalTime::Afternoon).unwrap();
        assert_eq!(json, "\"Tarde (13:00-17:00)\"");
    }
}
