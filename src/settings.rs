//! Game settings
//!
//! Read once at startup and never written back. The browser build takes JSON
//! from the `data-settings` attribute of the `#game` element; the native
//! build reads the `BELT_TYPER_SETTINGS` environment variable.

use serde::{Deserialize, Serialize};

use crate::sim::Vocabulary;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Play feedback sounds
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Accessibility ===
    /// Suppress splash/smoke pulses
    pub reduced_motion: bool,

    // === Game ===
    /// Fixed RNG seed (random per launch when unset)
    pub seed: Option<u64>,
    /// Replace the bundled word list
    pub vocabulary: Option<Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            reduced_motion: false,
            seed: None,
            vocabulary: None,
        }
    }
}

impl Settings {
    /// Environment variable holding native settings JSON
    pub const ENV_VAR: &'static str = "BELT_TYPER_SETTINGS";

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => Some(settings.clamped()),
            Err(e) => {
                log::warn!("Ignoring invalid settings: {}", e);
                None
            }
        }
    }

    fn clamped(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    /// Effective sound effect volume (0 when sound is off)
    pub fn effective_volume(&self) -> f32 {
        if self.sound {
            self.master_volume * self.sfx_volume
        } else {
            0.0
        }
    }

    /// Whether splash/smoke pulses are shown
    pub fn feedback_pulses(&self) -> bool {
        !self.reduced_motion
    }

    /// Custom vocabulary if set and valid, otherwise the bundled list
    pub fn vocabulary(&self) -> Vocabulary {
        match &self.vocabulary {
            Some(words) => Vocabulary::new(words.iter().cloned()).unwrap_or_else(|| {
                log::warn!("Custom vocabulary rejected, using bundled words");
                Vocabulary::bundled()
            }),
            None => Vocabulary::bundled(),
        }
    }

    /// Load settings from the `#game` element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("game"))
            .and_then(|el| el.get_attribute("data-settings"));

        if let Some(settings) = json.as_deref().and_then(Self::from_json) {
            log::info!("Loaded settings from page");
            return settings;
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the environment (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        if let Ok(json) = std::env::var(Self::ENV_VAR) {
            if let Some(settings) = Self::from_json(&json) {
                log::info!("Loaded settings from {}", Self::ENV_VAR);
                return settings;
            }
        }

        log::info!("Using default settings");
        Self::default()
    }
}
