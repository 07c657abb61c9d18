//! Configuration snapshot consumed by the coordinator
//!
//! Preferences arrive as JSON from the configuration service. The topology is
//! static for a given board.

use core::cell::RefCell;

use critical_section::Mutex;
use serde::Deserialize;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{Rgb, rgb_from_u32};
use crate::mode::LightMode;
use crate::topology::LightsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Payload is not valid preferences JSON
    Parse,
}

/// User preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Mode applied on boot and after every configuration change
    pub light_mode: LightMode,
    /// Colors in 0xRRGGBB format
    pub headlight_color: u32,
    pub brake_color: u32,
    pub turn_color: u32,
    pub accent_color: u32,
    /// Level of the headlight and brake lights when not highlighted
    pub normal_brightness: u8,
    pub blink_interval_ms: u16,
}

impl Preferences {
    pub const DEFAULT: Self = Self {
        light_mode: LightMode::Running,
        headlight_color: 0x00FF_FFFF,
        brake_color: 0x00FF_0000,
        turn_color: 0x00FF_8C00,
        accent_color: 0x0000_A0FF,
        normal_brightness: 96,
        blink_interval_ms: 500,
    };

    /// Parse preferences, missing fields keep their defaults
    pub fn from_json(json: &[u8]) -> Result<Self, ConfigError> {
        match serde_json_core::from_slice::<Self>(json) {
            Ok((prefs, _)) => Ok(prefs),
            Err(_err) => {
                #[cfg(feature = "esp32-log")]
                println!("[config] invalid preferences: {:?}", _err);
                Err(ConfigError::Parse)
            }
        }
    }

    pub const fn headlight(&self) -> Rgb {
        rgb_from_u32(self.headlight_color)
    }

    pub const fn brake(&self) -> Rgb {
        rgb_from_u32(self.brake_color)
    }

    pub const fn turn(&self) -> Rgb {
        rgb_from_u32(self.turn_color)
    }

    pub const fn accent(&self) -> Rgb {
        rgb_from_u32(self.accent_color)
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Everything renderers need to be built
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub prefs: Preferences,
    pub lights: LightsConfig,
}

/// Source of the current configuration
pub trait ConfigSource {
    /// Returns a snapshot of the current configuration
    fn load(&self) -> AppConfig;
}

/// Configuration shared between the configuration service and the coordinator
pub struct SharedConfig {
    inner: Mutex<RefCell<AppConfig>>,
}

impl SharedConfig {
    pub const fn new(lights: LightsConfig) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(AppConfig {
                prefs: Preferences::DEFAULT,
                lights,
            })),
        }
    }

    pub fn store(&self, config: AppConfig) {
        critical_section::with(|cs| {
            *self.inner.borrow(cs).borrow_mut() = config;
        });
    }

    pub fn set_preferences(&self, prefs: Preferences) {
        critical_section::with(|cs| {
            self.inner.borrow(cs).borrow_mut().prefs = prefs;
        });
    }

    /// Replace preferences from a JSON payload
    ///
    /// The stored preferences are left untouched on parse errors.
    pub fn update_preferences(&self, json: &[u8]) -> Result<Preferences, ConfigError> {
        let prefs = Preferences::from_json(json)?;
        self.set_preferences(prefs);
        Ok(prefs)
    }
}

impl ConfigSource for SharedConfig {
    fn load(&self) -> AppConfig {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().clone())
    }
}
