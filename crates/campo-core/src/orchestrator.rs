//! Work-field orchestration.
//!
//! A work field ("campo") is a long-running area such as sales or family,
//! with a progress percentage and a state. [`Orchestrator::next_action`]
//! picks the field to work on for the current energy and turns it into a
//! concrete [`SuggestedAction`], scored against the [`Profile`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use crate::energy::EnergyLevel;
use crate::error::{CoreError, Result, ValidationError};
use crate::profile::Profile;
use crate::storage::{get_json, set_json, KvStore};

/// Key under which the fields are stored.
pub const ORCHESTRATOR_KEY: &str = "orchestrator";

/// Field id of the fallback suggestion when nothing fits.
pub const REST_FIELD: &str = "descanso";

const MINUTES_PER_ENERGY: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    Active,
    Paused,
    Completed,
}

impl FieldState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldState::Active => "active",
            FieldState::Paused => "paused",
            FieldState::Completed => "completed",
        }
    }
}

impl fmt::Display for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(FieldState::Active),
            "paused" => Ok(FieldState::Paused),
            "completed" => Ok(FieldState::Completed),
            other => Err(ValidationError::InvalidValue {
                field: "state".into(),
                message: format!("unknown field state '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkField {
    pub id: String,
    pub name: String,
    /// 0-100
    pub progress: u8,
    /// 1-10
    pub energy_required: u8,
    /// 1 is highest
    pub priority: u8,
    pub last_activity: DateTime<Utc>,
    pub state: FieldState,
}

impl WorkField {
    fn new(id: &str, name: &str, energy_required: u8, priority: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            progress: 0,
            energy_required,
            priority,
            last_activity: Utc::now(),
            state: FieldState::Active,
        }
    }
}

/// What to do next, and why it fits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedAction {
    pub field: String,
    pub action: String,
    pub duration_min: u32,
    pub energy_required: u8,
    pub priority: u8,
    /// 0-100
    pub coherence: f64,
    pub applicable_gifts: Vec<String>,
}

impl SuggestedAction {
    fn rest() -> Self {
        Self {
            field: REST_FIELD.into(),
            action: "Tiempo de regeneración y consulta sacral".into(),
            duration_min: 30,
            energy_required: 0,
            priority: 0,
            coherence: 100.0,
            applicable_gifts: Vec::new(),
        }
    }

    pub fn is_rest(&self) -> bool {
        self.field == REST_FIELD
    }
}

fn action_catalogue(field: &str) -> &'static [&'static str] {
    match field {
        "ventas" => &[
            "Revisar CRM y hacer 3 llamadas de seguimiento",
            "Preparar propuesta para cliente potencial",
            "Analizar métricas de conversión de la semana",
        ],
        "desarrollo" => &[
            "Continuar implementación del Campo Sagrado",
            "Refactorizar componente EnergySlider",
            "Implementar tests para RecommendationService",
        ],
        "contenido" => &[
            "Crear post sobre patrones detectados esta semana",
            "Grabar video explicando Clean Architecture",
            "Escribir documentación para nuevos componentes",
        ],
        "familia" => &[
            "Tiempo de juego presente con el bebé",
            "Planificar actividad familiar del fin de semana",
            "Revisar calendario familiar y compromisos",
        ],
        _ => &[],
    }
}

fn gifts_for(field: &str) -> &'static [&'static str] {
    match field {
        "ventas" | "contenido" => &["Entrelazamiento", "Catálisis de Innovación"],
        "desarrollo" => &["Percepción de Patrones", "Catálisis de Innovación"],
        "familia" => &["Entrelazamiento"],
        _ => &[],
    }
}

/// Concrete action for `field`, advancing one step every 25% of progress.
pub fn action_for(field: &WorkField) -> String {
    let actions = action_catalogue(&field.id);
    if actions.is_empty() {
        return "Consultar sacralmente la siguiente prioridad".into();
    }
    let index = usize::from(field.progress / 25) % actions.len();
    actions[index].into()
}

/// `min(100, (profile coherence + positioning factor + progress factor) / 3)`.
///
/// The positioning factor is 20 when the profile leans toward the field
/// (technical for development, active for content, collective for family),
/// 10 otherwise, and 15 for fields without a mapped axis. The progress
/// factor is `max(0, 20 - progress / 5)`.
pub fn action_coherence(field: &WorkField, profile: &Profile) -> f64 {
    let p = &profile.positioning;
    let positioning_factor = match field.id.as_str() {
        "desarrollo" if p.spiritual_technical > 0.0 => 20.0,
        "contenido" if p.contemplative_active > 0.0 => 20.0,
        "familia" if p.individual_collective < 0.0 => 20.0,
        "desarrollo" | "contenido" | "familia" => 10.0,
        _ => 15.0,
    };
    let progress_factor = (20.0 - f64::from(field.progress) * 0.2).max(0.0);
    ((profile.coherence() + positioning_factor + progress_factor) / 3.0).min(100.0)
}

/// Names of the profile's active gifts that apply to `field`, in profile
/// order.
pub fn applicable_gifts(field: &WorkField, profile: &Profile) -> Vec<String> {
    let mapped = gifts_for(&field.id);
    profile
        .active_gifts()
        .filter(|g| mapped.contains(&g.name.as_str()))
        .map(|g| g.name.clone())
        .collect()
}

/// The set of work fields, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orchestrator {
    fields: Vec<WorkField>,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self {
            fields: vec![
                WorkField::new("ventas", "Ventas", 3, 1),
                WorkField::new("desarrollo", "Desarrollo", 5, 2),
                WorkField::new("contenido", "Contenido", 4, 3),
                WorkField::new("familia", "Familia", 2, 1),
            ],
        }
    }
}

impl Orchestrator {
    pub fn fields(&self) -> &[WorkField] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&WorkField> {
        self.fields.iter().find(|f| f.id == id)
    }

    fn field_mut(&mut self, id: &str) -> Result<&mut WorkField> {
        self.fields
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| CoreError::FieldNotFound(id.to_string()))
    }

    /// Replace the fields whose ids appear in `saved` and append the rest.
    pub fn merge(&mut self, saved: Vec<WorkField>) {
        for field in saved {
            match self.fields.iter_mut().find(|f| f.id == field.id) {
                Some(slot) => *slot = field,
                None => self.fields.push(field),
            }
        }
    }

    /// Best field for `energy`: active and affordable, lowest priority value
    /// first, then least progress. Falls back to a rest suggestion.
    pub fn next_action(&self, energy: EnergyLevel, profile: &Profile) -> SuggestedAction {
        let best = self
            .fields
            .iter()
            .filter(|f| f.state == FieldState::Active && energy.can_perform(f.energy_required))
            .min_by_key(|f| (f.priority, f.progress));

        let Some(field) = best else {
            debug!(energy = energy.value(), "no field fits, suggesting rest");
            return SuggestedAction::rest();
        };

        SuggestedAction {
            field: field.id.clone(),
            action: action_for(field),
            duration_min: u32::from(field.energy_required) * MINUTES_PER_ENERGY,
            energy_required: field.energy_required,
            priority: field.priority,
            coherence: action_coherence(field, profile),
            applicable_gifts: applicable_gifts(field, profile),
        }
    }

    /// Add `increment` percentage points, capped at 100. Reaching 100 marks
    /// the field completed.
    pub fn advance_progress(&mut self, id: &str, increment: u8) -> Result<&WorkField> {
        let field = self.field_mut(id)?;
        field.progress = field.progress.saturating_add(increment).min(100);
        field.last_activity = Utc::now();
        if field.progress >= 100 {
            field.state = FieldState::Completed;
        }
        Ok(field)
    }

    pub fn set_state(&mut self, id: &str, state: FieldState) -> Result<&WorkField> {
        let field = self.field_mut(id)?;
        field.state = state;
        Ok(field)
    }
}

/// Loads and saves the [`Orchestrator`] in a [`KvStore`].
pub struct OrchestratorStore<S> {
    store: S,
}

impl<S: KvStore> OrchestratorStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Default fields overlaid with whatever was saved.
    pub fn load(&self) -> Result<Orchestrator> {
        let mut orchestrator = Orchestrator::default();
        let saved: Option<Vec<WorkField>> = get_json(&self.store, ORCHESTRATOR_KEY)?;
        if let Some(saved) = saved {
            orchestrator.merge(saved);
        }
        Ok(orchestrator)
    }

    pub fn save(&mut self, orchestrator: &Orchestrator) -> Result<()> {
        set_json(&mut self.store, ORCHESTRATOR_KEY, orchestrator.fields())?;
        info!(fields = orchestrator.fields().len(), "saved work fields");
        Ok(())
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::PositioningUpdate;
    use crate::storage::MemoryStore;

    fn level(v: f64) -> EnergyLevel {
        EnergyLevel::new(v).unwrap()
    }

    #[test]
    fn ties_on_priority_and_progress_keep_declaration_order() {
        let next = Orchestrator::default().next_action(level(5.0), &Profile::default());
        assert_eq!(next.field, "ventas");
        assert_eq!(next.action, "Revisar CRM y hacer 3 llamadas de seguimiento");
        assert_eq!(next.duration_min, 90);
        assert_eq!(
            next.applicable_gifts,
            vec!["Entrelazamiento".to_string(), "Catálisis de Innovación".to_string()]
        );
    }

    #[test]
    fn less_progress_wins_within_a_priority() {
        let mut orch = Orchestrator::default();
        orch.advance_progress("ventas", 30).unwrap();
        let next = orch.next_action(level(5.0), &Profile::default());
        assert_eq!(next.field, "familia");
        assert_eq!(next.duration_min, 60);
        assert_eq!(next.applicable_gifts, vec!["Entrelazamiento".to_string()]);
    }

    #[test]
    fn low_energy_and_paused_fields_fall_back_to_rest() {
        let mut orch = Orchestrator::default();
        orch.set_state("familia", FieldState::Paused).unwrap();
        let next = orch.next_action(level(2.0), &Profile::default());
        assert!(next.is_rest());
        assert_eq!(next.coherence, 100.0);
        assert!(next.applicable_gifts.is_empty());
    }

    #[test]
    fn action_steps_with_progress() {
        let mut orch = Orchestrator::default();
        orch.advance_progress("desarrollo", 50).unwrap();
        let field = orch.field("desarrollo").unwrap();
        assert_eq!(action_for(field), "Implementar tests para RecommendationService");
        orch.advance_progress("desarrollo", 25).unwrap();
        let field = orch.field("desarrollo").unwrap();
        // 75 / 25 = 3 wraps back to the first action
        assert_eq!(action_for(field), "Continuar implementación del Campo Sagrado");
    }

    #[test]
    fn progress_caps_and_completes() {
        let mut orch = Orchestrator::default();
        let field = orch.advance_progress("contenido", 250).unwrap();
        assert_eq!(field.progress, 100);
        assert_eq!(field.state, FieldState::Completed);
        assert!(matches!(
            orch.advance_progress("ghost", 10),
            Err(CoreError::FieldNotFound(_))
        ));
    }

    #[test]
    fn coherence_follows_positioning() {
        let mut profile = Profile::default();
        let orch = Orchestrator::default();
        let dev = orch.field("desarrollo").unwrap();
        // spiritual_technical 0.3 > 0 gives the full factor
        let expected = (profile.coherence() + 20.0 + 20.0) / 3.0;
        assert!((action_coherence(dev, &profile) - expected).abs() < 1e-9);

        profile
            .update_positioning(PositioningUpdate {
                spiritual_technical: Some(-0.3),
                ..Default::default()
            })
            .unwrap();
        let expected = (profile.coherence() + 10.0 + 20.0) / 3.0;
        assert!((action_coherence(dev, &profile) - expected).abs() < 1e-9);

        let sales = orch.field("ventas").unwrap();
        let expected = (profile.coherence() + 15.0 + 20.0) / 3.0;
        assert!((action_coherence(sales, &profile) - expected).abs() < 1e-9);
    }

    #[test]
    fn inactive_gifts_are_not_applicable() {
        let mut profile = Profile::default();
        profile.deactivate_gift("Catálisis de Innovación");
        let orch = Orchestrator::default();
        let gifts = applicable_gifts(orch.field("desarrollo").unwrap(), &profile);
        assert_eq!(gifts, vec!["Percepción de Patrones".to_string()]);
    }

    #[test]
    fn store_overlays_saved_fields_on_defaults() {
        let mut store = OrchestratorStore::new(MemoryStore::new());
        let mut orch = store.load().unwrap();
        orch.advance_progress("familia", 40).unwrap();
        store.save(&orch).unwrap();

        // an older save that only knows one field
        let mut raw = MemoryStore::new();
        let only_sales = vec![WorkField {
            progress: 10,
            ..orch.field("ventas").unwrap().clone()
        }];
        set_json(&mut raw, ORCHESTRATOR_KEY, &only_sales).unwrap();
        let merged = OrchestratorStore::new(raw).load().unwrap();
        assert_eq!(merged.fields().len(), 4);
        assert_eq!(merged.field("ventas").unwrap().progress, 10);

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.field("familia").unwrap().progress, 40);
        assert_eq!(reloaded.fields()[0].id, "ventas");
    }
}
