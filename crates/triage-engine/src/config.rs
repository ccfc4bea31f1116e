//! Configuration loading for the triage engine.
//!
//! The host owns the policy and hands it to the engine; the engine never
//! writes it. Settings can be loaded from a TOML file, and every field has a
//! default so partial files are fine.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Condition categories that bypass the ordinary-sickness gate.
pub const DEFAULT_EMERGENCY_CONDITIONS: &[&str] = &[
    "HeartAttack",
    "WoundInfection",
    "Burn",
    "ChemicalBurn",
    "Crush",
    "Cut",
    "SurgicalCut",
    "Scratch",
    "Bite",
    "Stab",
    "Gunshot",
    "Shredded",
    "BeamWound",
    "InfantIllness",
    "Crack",
    "Bruise",
];

/// Pawn kinds that are never caregivers while their expansion is active.
pub const DEFAULT_EXCLUDED_KINDS: &[&str] = &["Dryad_Basic", "Dryad_Gaumaker"];

/// Ticks between full candidate pool rebuilds
pub const DEFAULT_REFRESH_INTERVAL_TICKS: u64 = 300;

/// Accepted range for the caregiving priority threshold
pub const PRIORITY_THRESHOLD_RANGE: std::ops::RangeInclusive<u8> = 1..=4;

/// Where the hunger check sits relative to interrupting the current activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HungerCheck {
    /// End the current activity first, then send a hungry caregiver to eat
    #[default]
    AfterInterrupt,
    /// Send a hungry caregiver to eat without ending the current activity.
    /// Uninterruptible activities still block both.
    BeforeInterrupt,
}

/// Triage policy. Read-only during a decision cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Ordinary sickness counts as needing care now
    pub include_sickness: bool,
    /// Resting caregivers may be woken to treat
    pub wake_to_tend: bool,
    /// Eating caregivers finish their meal, and urgently hungry ones eat first
    pub allow_eating: bool,
    /// Highest doctoring priority (1 = top) that still counts as a caregiver
    pub caregiving_priority_threshold: u8,
    /// Log ineligibility reasons and host faults
    pub verbose_diagnostics: bool,
    /// Injured caregivers waiting on a non-emergency surgery may be pulled out
    pub interrupt_surgery_if_injured: bool,
    pub hunger_check: HungerCheck,
    /// Condition category names treated as emergencies
    pub emergency_conditions: Vec<String>,
    /// Pawn kind definitions that never act as caregivers
    pub excluded_kinds: Vec<String>,
    pub refresh_interval_ticks: u64,
    /// Refuse rescues while a hostile is within `threat_radius` of the patient
    pub rescue_requires_no_threat: bool,
    pub threat_radius: f32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            include_sickness: false,
            wake_to_tend: false,
            allow_eating: true,
            caregiving_priority_threshold: 1,
            verbose_diagnostics: false,
            interrupt_surgery_if_injured: false,
            hunger_check: HungerCheck::AfterInterrupt,
            emergency_conditions: DEFAULT_EMERGENCY_CONDITIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            excluded_kinds: DEFAULT_EXCLUDED_KINDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            refresh_interval_ticks: DEFAULT_REFRESH_INTERVAL_TICKS,
            rescue_requires_no_threat: false,
            threat_radius: 18.0,
        }
    }
}

impl PolicyConfig {
    /// Loads and validates a policy from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses and validates a policy from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns this policy as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks value ranges the type system can't express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !PRIORITY_THRESHOLD_RANGE.contains(&self.caregiving_priority_threshold) {
            return Err(ConfigError::Invalid {
                field: "caregiving_priority_threshold",
                reason: format!(
                    "{} is outside {}..={}",
                    self.caregiving_priority_threshold,
                    PRIORITY_THRESHOLD_RANGE.start(),
                    PRIORITY_THRESHOLD_RANGE.end()
                ),
            });
        }
        if self.refresh_interval_ticks == 0 {
            return Err(ConfigError::Invalid {
                field: "refresh_interval_ticks",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.threat_radius.is_finite() || self.threat_radius < 0.0 {
            return Err(ConfigError::Invalid {
                field: "threat_radius",
                reason: format!("{} is not a non-negative distance", self.threat_radius),
            });
        }
        Ok(())
    }

    /// Whether a condition category is in the emergency set
    pub fn is_emergency_condition(&self, def_name: &str) -> bool {
        self.emergency_conditions.iter().any(|c| c == def_name)
    }

    /// Whether a pawn kind definition is excluded from caregiving
    pub fn is_excluded_kind(&self, kind_def: &str) -> bool {
        self.excluded_kinds.iter().any(|k| k == kind_def)
    }
}

/// Returns the default policy as a TOML string.
pub fn default_config_toml() -> Result<String, ConfigError> {
    PolicyConfig::default().to_toml()
}

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
