//! Circadian phases and the two-option ("A or B") recommendation.
//!
//! Independent of the task list: it only looks at the hour of day and the
//! self-reported energy.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::energy::{EnergyBand, EnergyLevel};

/// Phase of the day with its typical energy profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CircadianPhase {
    /// 05:00-08:59
    Dawn,
    /// 09:00-12:59
    Morning,
    /// 13:00-15:59
    Midday,
    /// 16:00-19:59
    Afternoon,
    /// 20:00-04:59
    Night,
}

impl CircadianPhase {
    pub fn from_hour(hour: u8) -> Self {
        match hour {
            5..=8 => CircadianPhase::Dawn,
            9..=12 => CircadianPhase::Morning,
            13..=15 => CircadianPhase::Midday,
            16..=19 => CircadianPhase::Afternoon,
            _ => CircadianPhase::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CircadianPhase::Dawn => "AMANECER",
            CircadianPhase::Morning => "MAÑANA",
            CircadianPhase::Midday => "MEDIODÍA",
            CircadianPhase::Afternoon => "TARDE",
            CircadianPhase::Night => "NOCHE",
        }
    }

    /// Typical energy, 0-1.
    pub fn energy(&self) -> f64 {
        match self {
            CircadianPhase::Dawn => 0.9,
            CircadianPhase::Morning => 0.85,
            CircadianPhase::Midday => 0.6,
            CircadianPhase::Afternoon => 0.7,
            CircadianPhase::Night => 0.4,
        }
    }

    /// Typical cognitive capacity, 0-1.
    pub fn cognitive_capacity(&self) -> f64 {
        match self {
            CircadianPhase::Dawn => 0.95,
            CircadianPhase::Morning => 0.9,
            CircadianPhase::Midday => 0.7,
            CircadianPhase::Afternoon => 0.75,
            CircadianPhase::Night => 0.5,
        }
    }

    pub fn optimal_activity(&self) -> &'static str {
        match self {
            CircadianPhase::Dawn => "Trabajo profundo",
            CircadianPhase::Morning => "Tareas creativas",
            CircadianPhase::Midday => "Tareas colaborativas",
            CircadianPhase::Afternoon => "Revisión y planificación",
            CircadianPhase::Night => "Descanso y restauración",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionChoice {
    A,
    B,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationOption {
    pub action: String,
    pub duration_min: u32,
    pub description: String,
    /// 0-1
    pub alignment_score: f64,
}

impl RecommendationOption {
    fn new(action: &str, duration_min: u32, description: &str, alignment_score: f64) -> Self {
        Self {
            action: action.into(),
            duration_min,
            description: description.into(),
            alignment_score,
        }
    }
}

/// Two options and the one to pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryRecommendation {
    pub timestamp: NaiveDateTime,
    pub phase: CircadianPhase,
    pub option_a: RecommendationOption,
    pub option_b: RecommendationOption,
    pub recommended: OptionChoice,
    pub confidence: f64,
    pub factors: BTreeMap<String, String>,
}

impl BinaryRecommendation {
    pub fn chosen(&self) -> &RecommendationOption {
        match self.recommended {
            OptionChoice::A => &self.option_a,
            OptionChoice::B => &self.option_b,
        }
    }
}

/// Pick between two activity options from energy and phase.
pub fn binary_recommendation(energy: EnergyLevel, at: NaiveDateTime) -> BinaryRecommendation {
    let phase = CircadianPhase::from_hour(at.hour() as u8);

    let (option_a, option_b, recommended, confidence) = match energy.band() {
        EnergyBand::High => (
            RecommendationOption::new(
                "TRABAJO INTENSO",
                90,
                "Tareas que requieren máxima concentración y creatividad",
                0.9,
            ),
            RecommendationOption::new(
                "PROYECTOS COMPLEJOS",
                75,
                "Desarrollo de ideas, planificación estratégica, innovación",
                0.85,
            ),
            OptionChoice::A,
            0.85,
        ),
        EnergyBand::Low => (
            RecommendationOption::new(
                "DESCANSO ACTIVO",
                30,
                "Caminar, estirar, respiración consciente",
                0.85,
            ),
            RecommendationOption::new(
                "TRABAJO LIGERO",
                45,
                "Tareas simples que no requieren mucha energía",
                0.6,
            ),
            OptionChoice::A,
            0.8,
        ),
        EnergyBand::Medium => (
            RecommendationOption::new(
                "TRABAJO MODERADO",
                60,
                "Tareas que requieren atención pero no máxima intensidad",
                0.75,
            ),
            RecommendationOption::new(
                "REUNIONES/COLABORACIÓN",
                45,
                "Interacción con otros, brainstorming, feedback",
                0.7,
            ),
            if phase.energy() > 0.6 {
                OptionChoice::A
            } else {
                OptionChoice::B
            },
            0.7,
        ),
    };

    let mut factors = BTreeMap::new();
    factors.insert("circadian_phase".into(), phase.label().into());
    factors.insert(
        "cognitive_capacity".into(),
        format!("{:.0}%", phase.cognitive_capacity() * 100.0),
    );
    factors.insert("user_energy".into(), energy.to_string());
    factors.insert("optimal_activity".into(), phase.optimal_activity().into());

    BinaryRecommendation {
        timestamp: at,
        phase,
        option_a,
        option_b,
        recommended,
        confidence,
        factors,
    }
}
