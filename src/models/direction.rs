//! Direction model
//!
//! A direction is the event track a visitor registers for. Raw route tokens
//! are normalised through a fixed alias table into a [`DirectionKey`], which
//! also decides how the registration form is rendered.

use std::collections::HashMap;
use std::fmt;
use serde::Serialize;
use crate::config::SeatsConfig;

/// Direction used when the route carries no token at all
pub const DEFAULT_DIRECTION: &str = "ai";

/// Seat capacity used for directions missing from the capacity table
pub const DEFAULT_SEAT_CAPACITY: u32 = 50;

/// Alias table, keyed by lower-cased token. Every target maps to itself.
const DIRECTION_ALIASES: &[(&str, &str)] = &[
    ("ai", "ai"),
    ("rsumo", "rsumo"),
    ("robosumo", "rsumo"),
    ("robo-sumo", "rsumo"),
    ("rfutbol", "rfutbol"),
    ("robofutbol", "rfutbol"),
    ("robo-futbol", "rfutbol"),
    ("contest", "contest"),
    ("fixtirolar", "fixtirolar"),
    ("ixtirolar", "ixtirolar"),
];

/// Directions registered by a team of two
pub const TEAM_DIRECTIONS: &[&str] = &["rfutbol"];

/// Directions without a registration form
pub const NO_FORM_DIRECTIONS: &[&str] = &["contest"];

/// Normalised direction key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DirectionKey(String);

impl DirectionKey {
    /// Resolve a raw route token
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            Some(token) if !token.is_empty() => {
                let lowered = token.to_lowercase();
                match alias_for(&lowered) {
                    Some(canonical) => Self(canonical.to_string()),
                    None => Self(lowered),
                }
            }
            _ => Self(DEFAULT_DIRECTION.to_string()),
        }
    }

    /// Canonicalise a free-text direction value, falling back to `fallback`
    /// when the value is blank
    pub fn canonicalize(value: &str, fallback: &DirectionKey) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            fallback.clone()
        } else {
            Self::resolve(Some(trimmed))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Link the catalog uses for this direction
    pub fn register_link(&self) -> String {
        format!("/register/{}", self.0)
    }

    pub fn mode(&self) -> FormMode {
        FormMode::for_direction(self)
    }
}

impl fmt::Display for DirectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Look up a lower-cased token in the alias table
pub fn alias_for(lowered: &str) -> Option<&'static str> {
    DIRECTION_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, canonical)| *canonical)
}

/// Resolve a raw route token into a direction key
pub fn resolve_direction(raw: Option<&str>) -> DirectionKey {
    DirectionKey::resolve(raw)
}

/// How the registration page behaves for a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormMode {
    /// One participant form
    Standard,
    /// Primary participant plus partner
    Team,
    /// Social call-to-actions and an agreement checkbox, no form
    NoForm,
}

impl FormMode {
    /// Classify a direction. No-form wins over team membership.
    pub fn for_direction(direction: &DirectionKey) -> Self {
        let key = direction.as_str();
        if NO_FORM_DIRECTIONS.contains(&key) {
            FormMode::NoForm
        } else if TEAM_DIRECTIONS.contains(&key) {
            FormMode::Team
        } else {
            FormMode::Standard
        }
    }

    pub fn has_form(&self) -> bool {
        !matches!(self, FormMode::NoForm)
    }

    pub fn is_team(&self) -> bool {
        matches!(self, FormMode::Team)
    }
}

impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormMode::Standard => write!(f, "standard"),
            FormMode::Team => write!(f, "team"),
            FormMode::NoForm => write!(f, "no-form"),
        }
    }
}

/// Static seat capacity table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatCapacities {
    default_capacity: u32,
    capacities: HashMap<String, u32>,
}

impl SeatCapacities {
    pub fn new(default_capacity: u32, capacities: HashMap<String, u32>) -> Self {
        Self {
            default_capacity,
            capacities,
        }
    }

    pub fn from_config(config: &SeatsConfig) -> Self {
        Self::new(config.default_capacity, config.capacities.clone())
    }

    /// Capacity of a direction, or the fallback constant
    pub fn capacity_for(&self, direction: &DirectionKey) -> u32 {
        self.capacities
            .get(direction.as_str())
            .copied()
            .unwrap_or(self.default_capacity)
    }
}

impl Default for SeatCapacities {
    fn default() -> Self {
        Self::new(DEFAULT_SEAT_CAPACITY, HashMap::new())
    }
}
