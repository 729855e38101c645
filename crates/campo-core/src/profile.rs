//! Personal profile: positioning, gifts and non-negotiable commitments.
//!
//! The profile is an ordinary value. Components that need it receive it
//! explicitly; [`ProfileStore`] loads and saves it through a [`KvStore`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ValidationError};
use crate::storage::{get_json, set_json, KvStore};

/// Key under which the profile is stored.
pub const PROFILE_KEY: &str = "profile";

/// Four axes, each in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Positioning {
    /// -1 technical, 1 spiritual
    pub spiritual_technical: f64,
    /// -1 individual, 1 collective
    pub individual_collective: f64,
    /// -1 ancestral, 1 emergent
    pub ancestral_emergent: f64,
    /// -1 contemplative, 1 active
    pub contemplative_active: f64,
}

impl Positioning {
    fn axes(&self) -> [f64; 4] {
        [
            self.spiritual_technical,
            self.individual_collective,
            self.ancestral_emergent,
            self.contemplative_active,
        ]
    }

    /// Sum of absolute axis values.
    pub fn magnitude(&self) -> f64 {
        self.axes().iter().map(|v| v.abs()).sum()
    }
}

/// Partial positioning change; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PositioningUpdate {
    pub spiritual_technical: Option<f64>,
    pub individual_collective: Option<f64>,
    pub ancestral_emergent: Option<f64>,
    pub contemplative_active: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GiftDomain {
    Technical,
    Spiritual,
    Creative,
    Relational,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gift {
    pub name: String,
    pub domain: GiftDomain,
    /// 0-100
    pub intensity: u8,
    #[serde(default)]
    pub expressions: Vec<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub cognitive_type: String,
    pub design_profile: String,
    pub authority: String,
    pub configuration: String,
    pub positioning: Positioning,
    pub gifts: Vec<Gift>,
    pub non_negotiables: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Entrelazador".into(),
            cognitive_type: "ENTP-A".into(),
            design_profile: "4/6".into(),
            authority: "Sacral".into(),
            configuration: "Generador".into(),
            positioning: Positioning {
                spiritual_technical: 0.3,
                individual_collective: -0.2,
                ancestral_emergent: 0.5,
                contemplative_active: 0.1,
            },
            gifts: vec![
                Gift {
                    name: "Percepción de Patrones".into(),
                    domain: GiftDomain::Technical,
                    intensity: 85,
                    expressions: vec![
                        "Código".into(),
                        "Arquitectura de sistemas".into(),
                        "Conexiones interdimensionales".into(),
                    ],
                    active: true,
                },
                Gift {
                    name: "Entrelazamiento".into(),
                    domain: GiftDomain::Spiritual,
                    intensity: 90,
                    expressions: vec![
                        "Síntesis de opuestos".into(),
                        "Puentes entre mundos".into(),
                        "Traducción de lenguajes".into(),
                    ],
                    active: true,
                },
                Gift {
                    name: "Catálisis de Innovación".into(),
                    domain: GiftDomain::Creative,
                    intensity: 75,
                    expressions: vec![
                        "Nuevas soluciones".into(),
                        "Disrupción constructiva".into(),
                        "Emergencia de posibilidades".into(),
                    ],
                    active: true,
                },
            ],
            non_negotiables: vec![
                "5 rezos diarios".into(),
                "Estado Cero matutino".into(),
                "3 consultas sacrales mínimo".into(),
                "2h deep work".into(),
                "Tiempo familia presente".into(),
                "Documentación viva".into(),
                "Cierre regenerativo".into(),
            ],
            updated_at: Utc::now(),
        }
    }
}

fn check_axis(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if (-1.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::InvalidValue {
            field: field.into(),
            message: format!("{value} is outside -1..=1"),
        })
    }
}

impl Profile {
    /// Merge `update` into the positioning. Nothing changes if any axis is
    /// out of range.
    pub fn update_positioning(&mut self, update: PositioningUpdate) -> Result<(), ValidationError> {
        let mut next = self.positioning;
        if let Some(v) = update.spiritual_technical {
            next.spiritual_technical = check_axis("spiritual_technical", v)?;
        }
        if let Some(v) = update.individual_collective {
            next.individual_collective = check_axis("individual_collective", v)?;
        }
        if let Some(v) = update.ancestral_emergent {
            next.ancestral_emergent = check_axis("ancestral_emergent", v)?;
        }
        if let Some(v) = update.contemplative_active {
            next.contemplative_active = check_axis("contemplative_active", v)?;
        }
        self.positioning = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn set_gift_active(&mut self, name: &str, active: bool) -> bool {
        match self.gifts.iter_mut().find(|g| g.name == name) {
            Some(gift) => {
                gift.active = active;
                self.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Returns false when no gift has that name.
    pub fn activate_gift(&mut self, name: &str) -> bool {
        self.set_gift_active(name, true)
    }

    /// Returns false when no gift has that name.
    pub fn deactivate_gift(&mut self, name: &str) -> bool {
        self.set_gift_active(name, false)
    }

    pub fn active_gifts(&self) -> impl Iterator<Item = &Gift> {
        self.gifts.iter().filter(|g| g.active)
    }

    /// Coherence score in 0-100.
    ///
    /// `(mean active intensity + positioning magnitude * 25) / 2`, capped at
    /// 100. With no active gift the mean intensity is 0.
    pub fn coherence(&self) -> f64 {
        let (sum, count) = self
            .active_gifts()
            .fold((0.0, 0usize), |(s, n), g| (s + f64::from(g.intensity), n + 1));
        let mean_intensity = if count == 0 { 0.0 } else { sum / count as f64 };
        ((mean_intensity + self.positioning.magnitude() * 25.0) / 2.0).min(100.0)
    }
}

/// Loads and saves the [`Profile`] in a [`KvStore`].
pub struct ProfileStore<S> {
    store: S,
}

impl<S: KvStore> ProfileStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored profile, or the default one if nothing was saved yet.
    pub fn load(&self) -> Result<Profile> {
        let stored: Option<Profile> = get_json(&self.store, PROFILE_KEY)?;
        Ok(stored.unwrap_or_default())
    }

    pub fn save(&mut self, profile: &Profile) -> Result<()> {
        set_json(&mut self.store, PROFILE_KEY, profile)?;
        info!(name = %profile.name, "saved profile");
        Ok(())
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
