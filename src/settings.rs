//! Game settings and preferences
//!
//! Persisted in LocalStorage as JSON; anything missing or invalid falls
//! back to defaults.

use serde::{Deserialize, Serialize};

use crate::consts::{PRACTICE_SPEED_DEFAULT, PRACTICE_SPEED_MAX, PRACTICE_SPEED_MIN};
use crate::error::{Error, Result};
use crate::platform::storage;
use crate::sim::GameMode;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Gameplay ===
    /// Mode preselected in the menu
    pub default_mode: GameMode,
    /// Practice crossing time in seconds (lower is harder)
    pub practice_speed: f32,
    /// Pause when the tab is hidden or the window loses focus
    pub pause_on_blur: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_mode: GameMode::Survival,
            practice_speed: PRACTICE_SPEED_DEFAULT,
            pause_on_blur: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "zombie_typist_settings";

    pub fn validate(&self) -> Result<()> {
        if !(PRACTICE_SPEED_MIN..=PRACTICE_SPEED_MAX).contains(&self.practice_speed) {
            return Err(Error::PracticeSpeedOutOfRange(self.practice_speed));
        }
        for (name, value) in [("master", self.master_volume), ("sfx", self.sfx_volume)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::VolumeOutOfRange { name, value });
            }
        }
        Ok(())
    }

    /// Set the practice crossing time, rejecting out-of-range values
    pub fn set_practice_speed(&mut self, speed: f32) -> Result<()> {
        if !(PRACTICE_SPEED_MIN..=PRACTICE_SPEED_MAX).contains(&speed) {
            return Err(Error::PracticeSpeedOutOfRange(speed));
        }
        self.practice_speed = speed;
        Ok(())
    }

    /// Parse stored JSON, falling back to defaults on any problem
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => match settings.validate() {
                Ok(()) => settings,
                Err(e) => {
                    log::warn!("Ignoring stored settings: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn load() -> Self {
        match storage::load_string(Self::STORAGE_KEY) {
            Some(json) => {
                log::info!("Loaded settings from storage");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        match storage::save_json(Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Settings not saved: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_practice_speed_range() {
        let mut settings = Settings::default();
        assert!(settings.set_practice_speed(2.5).is_ok());
        assert_eq!(settings.practice_speed, 2.5);
        assert!(matches!(
            settings.set_practice_speed(0.5),
            Err(Error::PracticeSpeedOutOfRange(_))
        ));
        assert!(settings.set_practice_speed(f32::NAN).is_err());
        assert_eq!(settings.practice_speed, 2.5);
    }

    #[test]
    fn test_volume_validation() {
        let settings = Settings {
            sfx_volume: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(Error::VolumeOutOfRange { name: "sfx", .. })
        ));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"practice_speed": 3.0, "default_mode": "practice"}"#);
        assert_eq!(settings.practice_speed, 3.0);
        assert_eq!(settings.default_mode, GameMode::Practice);
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
        assert_eq!(
            Settings::from_json(r#"{"practice_speed": 60.0}"#),
            Settings::default()
        );
    }
}
