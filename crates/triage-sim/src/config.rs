//! Configuration System
//!
//! Scenario shape, stand-in mechanics timings and the triage policy, loaded
//! from one TOML file. Every section is optional.

use std::path::Path;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use triage_engine::PolicyConfig;

use crate::error::SimError;

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "triage_sim.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub simulation: SimulationConfig,
    pub scenario: ScenarioConfig,
    pub timing: TimingConfig,
    pub policy: PolicyConfig,
}

/// Simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub default_ticks: u64,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_ticks: 2_000,
            seed: 42,
        }
    }
}

/// What gets spawned in each zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub zones: u32,
    pub caregivers_per_zone: u32,
    /// Colony mechs that can also give care
    pub mechs_per_zone: u32,
    /// Wounded colonists at the start
    pub patients_per_zone: u32,
    pub animals_per_zone: u32,
    pub hostiles_per_zone: u32,
    pub beds_per_zone: u32,
    pub food_portions_per_zone: u32,
    pub medicine_per_zone: u32,
    /// Side length of the square each zone occupies
    pub zone_size: f32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            zones: 2,
            caregivers_per_zone: 4,
            mechs_per_zone: 1,
            patients_per_zone: 3,
            animals_per_zone: 1,
            hostiles_per_zone: 0,
            beds_per_zone: 2,
            food_portions_per_zone: 40,
            medicine_per_zone: 10,
            zone_size: 60.0,
        }
    }
}

/// Stand-in mechanics. Durations are in ticks.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Ticks between rare-tick checks on busy caregivers
    pub rare_tick_interval: u64,
    pub tend_ticks: u64,
    pub rescue_ticks: u64,
    pub eat_ticks: u64,
    /// Shortest and longest routine activity
    pub routine_min_ticks: u64,
    pub routine_max_ticks: u64,
    pub hunger_per_tick: f32,
    /// Severity gained per tick by an untended wound
    pub bleed_per_tick: f32,
    /// Severity lost per tick by a tended wound
    pub heal_per_tick: f32,
    /// Chance per pawn per tick of a fresh wound
    pub injury_chance: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            rare_tick_interval: 250,
            tend_ticks: 20,
            rescue_ticks: 30,
            eat_ticks: 10,
            routine_min_ticks: 40,
            routine_max_ticks: 160,
            hunger_per_tick: 0.0008,
            bleed_per_tick: 0.0005,
            heal_per_tick: 0.002,
            injury_chance: 0.0005,
        }
    }
}

impl TimingConfig {
    /// How long a dispatched action keeps its caregiver busy
    pub fn duration_of(&self, action: &triage_types::Action) -> u64 {
        use triage_types::Action;
        match action {
            Action::None => 0,
            Action::Eat { .. } => self.eat_ticks,
            Action::Rescue { .. } => self.rescue_ticks,
            Action::Tend(_) => self.tend_ticks,
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SimError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, SimError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, SimError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        self.policy.validate()?;
        if self.timing.rare_tick_interval == 0 {
            return Err(SimError::InvalidConfig {
                field: "timing.rare_tick_interval",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.timing.routine_min_ticks == 0
            || self.timing.routine_min_ticks > self.timing.routine_max_ticks
        {
            return Err(SimError::InvalidConfig {
                field: "timing.routine_min_ticks",
                reason: format!(
                    "{}..{} is not a usable range",
                    self.timing.routine_min_ticks, self.timing.routine_max_ticks
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.timing.injury_chance) {
            return Err(SimError::InvalidConfig {
                field: "timing.injury_chance",
                reason: format!("{} is not a probability", self.timing.injury_chance),
            });
        }
        if !self.scenario.zone_size.is_finite() || self.scenario.zone_size <= 0.0 {
            return Err(SimError::InvalidConfig {
                field: "scenario.zone_size",
                reason: format!("{} is not a positive size", self.scenario.zone_size),
            });
        }
        Ok(())
    }
}
