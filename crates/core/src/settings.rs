//! User-editable greenhouse settings.
//!
//! Settings are stored as independent sections (thresholds, plant profile,
//! auto control, system) so each form on the settings page can be saved on
//! its own. Missing sections fall back to defaults.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::metrics::ThresholdConfig;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Storage key of a settings section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsSection {
    Thresholds,
    PlantProfile,
    AutoControl,
    System,
}

impl SettingsSection {
    pub const ALL: [SettingsSection; 4] = [
        SettingsSection::Thresholds,
        SettingsSection::PlantProfile,
        SettingsSection::AutoControl,
        SettingsSection::System,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SettingsSection::Thresholds => "thresholds",
            SettingsSection::PlantProfile => "plant_profile",
            SettingsSection::AutoControl => "auto_control",
            SettingsSection::System => "system",
        }
    }
}

impl fmt::Display for SettingsSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingsSection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingsSection::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown settings section: {s}")))
    }
}

// ---------------------------------------------------------------------------
// Section payloads
// ---------------------------------------------------------------------------

/// Default farm name shown before the user saves a profile.
pub const DEFAULT_FARM_NAME: &str = "Hydroponic Farm";

/// Default crop.
pub const DEFAULT_PLANT_TYPE: &str = "lettuce";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PlantProfile {
    #[validate(length(min = 1, max = 200))]
    pub farm_name: String,
    #[validate(length(min = 1, max = 100))]
    pub plant_type: String,
    /// Planting date, if the user recorded one.
    #[serde(default)]
    pub plant_date: Option<NaiveDate>,
}

impl Default for PlantProfile {
    fn default() -> Self {
        Self {
            farm_name: DEFAULT_FARM_NAME.to_string(),
            plant_type: DEFAULT_PLANT_TYPE.to_string(),
            plant_date: None,
        }
    }
}

/// Automation preferences. Stored for the controller board and the UI; the
/// server never actuates devices on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoControl {
    pub auto_water: bool,
    pub auto_light: bool,
    pub auto_fan: bool,
    pub auto_buzzer: bool,
}

impl Default for AutoControl {
    fn default() -> Self {
        Self {
            auto_water: false,
            auto_light: false,
            auto_fan: false,
            auto_buzzer: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SystemSettings {
    /// Dashboard refresh interval.
    #[validate(range(min = 1, max = 3600))]
    pub update_interval_secs: u32,
    /// How long sensor readings are kept before the retention job purges them.
    #[validate(range(min = 1, max = 3650))]
    pub data_retention_days: u32,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            update_interval_secs: 5,
            data_retention_days: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// The effective settings: stored sections layered over defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub thresholds: ThresholdConfig,
    pub plant_profile: PlantProfile,
    pub auto_control: AutoControl,
    pub system: SystemSettings,
}

impl Settings {
    /// Overlay one stored section.
    ///
    /// The payload is parsed and validated; an invalid section is an error
    /// and leaves `self` unchanged.
    pub fn apply_section(
        &mut self,
        section: SettingsSection,
        value: serde_json::Value,
    ) -> Result<(), CoreError> {
        match section {
            SettingsSection::Thresholds => {
                let parsed: ThresholdConfig = parse_section(section, value)?;
                parsed.validate()?;
                self.thresholds = parsed;
            }
            SettingsSection::PlantProfile => {
                let parsed: PlantProfile = parse_section(section, value)?;
                validate_plant_profile(&parsed)?;
                self.plant_profile = parsed;
            }
            SettingsSection::AutoControl => {
                self.auto_control = parse_section(section, value)?;
            }
            SettingsSection::System => {
                let parsed: SystemSettings = parse_section(section, value)?;
                parsed.validate()?;
                self.system = parsed;
            }
        }
        Ok(())
    }
}

/// Validate a plant profile, trimming-aware for the name fields.
pub fn validate_plant_profile(profile: &PlantProfile) -> Result<(), CoreError> {
    profile.validate()?;
    if profile.farm_name.trim().is_empty() {
        return Err(CoreError::Validation(
            "farm_name must not be blank".to_string(),
        ));
    }
    if profile.plant_type.trim().is_empty() {
        return Err(CoreError::Validation(
            "plant_type must not be blank".to_string(),
        ));
    }
    Ok(())
}

fn parse_section<T: serde::de::DeserializeOwned>(
    section: SettingsSection,
    value: serde_json::Value,
) -> Result<T, CoreError> {
    serde_json::from_value(value)
        .map_err(|e| CoreError::Validation(format!("Invalid {section} settings: {e}")))
}
