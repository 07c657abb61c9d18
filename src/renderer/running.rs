//! Running lights
//!
//! Headlight, brake light and turn signals, each driven by its own command
//! channel. Channels are composited as layered region requests so turn
//! signals paint over the taillight they share pixels with.

use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{ChannelCommands, Renderer, RendererError, RendererInputs};
use crate::color::{BLACK, Rgb, scale_color};
use crate::command::LightCommand;
use crate::config::{AppConfig, Preferences};
use crate::frame::fill_region;
use crate::parameters::{LightEffect, LightingParameters, by_layer};
use crate::topology::{
    LightsConfig, REGION_HEADLIGHT, REGION_TAILLIGHT, REGION_TURN_LEFT, REGION_TURN_RIGHT,
    TopologyError,
};

const REQUIRED_REGIONS: [&str; 4] = [
    REGION_HEADLIGHT,
    REGION_TAILLIGHT,
    REGION_TURN_LEFT,
    REGION_TURN_RIGHT,
];

const LAYER_HEADLIGHT: u8 = 0;
const LAYER_BRAKE: u8 = 1;
const LAYER_TURN: u8 = 2;

const MAX_LAYERS: usize = 4;

pub struct RunningRenderer {
    lights: LightsConfig,
    prefs: Preferences,
    commands: ChannelCommands,
    layers: Vec<LightingParameters, MAX_LAYERS>,
}

impl RunningRenderer {
    pub fn new(config: &AppConfig, capacity: usize) -> Result<Self, RendererError> {
        config.lights.validate(capacity)?;
        if let Some(missing) = REQUIRED_REGIONS
            .iter()
            .find(|name| config.lights.region(name).is_none())
        {
            return Err(RendererError::MissingRegion(*missing));
        }

        let mut renderer = Self {
            lights: config.lights.clone(),
            prefs: config.prefs,
            commands: ChannelCommands::DEFAULT,
            layers: Vec::new(),
        };
        renderer.compose()?;
        Ok(renderer)
    }

    /// Active layer requests, lowest layer first
    pub fn layers(&self) -> &[LightingParameters] {
        &self.layers
    }

    /// Rebuild the layer requests from the channel commands
    fn compose(&mut self) -> Result<(), TopologyError> {
        self.layers.clear();
        let normal = self.prefs.normal_brightness;

        let headlight = match self.commands.headlight {
            LightCommand::HeadlightBright => Some(self.prefs.headlight()),
            LightCommand::HeadlightNormal => Some(scale_color(self.prefs.headlight(), normal)),
            _ => None,
        };
        self.push_layer(REGION_HEADLIGHT, LAYER_HEADLIGHT, headlight, None)?;

        let brake = match self.commands.brake {
            LightCommand::BrakeActive => Some(self.prefs.brake()),
            LightCommand::BrakeNormal => Some(scale_color(self.prefs.brake(), normal)),
            _ => None,
        };
        self.push_layer(REGION_TAILLIGHT, LAYER_BRAKE, brake, None)?;

        let blink = Some(Duration::from_millis(u64::from(self.prefs.blink_interval_ms)));
        let turn = self.prefs.turn();
        match self.commands.turn {
            LightCommand::TurnLeft => {
                self.push_layer(REGION_TURN_LEFT, LAYER_TURN, Some(turn), blink)?;
            }
            LightCommand::TurnRight => {
                self.push_layer(REGION_TURN_RIGHT, LAYER_TURN, Some(turn), blink)?;
            }
            LightCommand::TurnHazard => {
                self.push_layer(REGION_TURN_LEFT, LAYER_TURN, Some(turn), blink)?;
                self.push_layer(REGION_TURN_RIGHT, LAYER_TURN, Some(turn), blink)?;
            }
            _ => {}
        }

        self.layers.sort_unstable_by(by_layer);
        Ok(())
    }

    fn push_layer(
        &mut self,
        region: &str,
        layer: u8,
        color: Option<Rgb>,
        blink: Option<Duration>,
    ) -> Result<(), TopologyError> {
        let request = match (color, blink) {
            (None, _) => LightingParameters::new(region, LightEffect::Off, layer)?,
            (Some(color), None) => {
                LightingParameters::new(region, LightEffect::Static, layer)?
                    .with_colors(color, BLACK)
            }
            (Some(color), Some(period)) => {
                LightingParameters::new(region, LightEffect::Blink, layer)?
                    .with_colors(color, BLACK)
                    .with_duration(period)
            }
        };
        self.layers
            .push(request)
            .map_err(|_| TopologyError::TooManyEntries)
    }

    fn paint(&self, now: Instant, pixels: &mut [Rgb]) {
        pixels.fill(BLACK);
        for request in &self.layers {
            let Some(region) = self.lights.region(&request.region) else {
                continue;
            };
            let color = match request.effect {
                LightEffect::Static => request.first,
                // The dark half of a blink leaves the lower layers visible
                LightEffect::Blink if !blink_phase(now, request.duration) => continue,
                LightEffect::Blink => request.first,
                _ => request.second,
            };
            fill_region(pixels, &self.lights, region, color);
        }
    }
}

/// Returns `true` during the lit half of a blink period
fn blink_phase(now: Instant, period: Duration) -> bool {
    let period_ms = period.as_millis();
    if period_ms == 0 {
        return true;
    }
    (now.as_millis() / period_ms).is_multiple_of(2)
}

impl Renderer for RunningRenderer {
    const RENDER_ON_START: bool = true;

    fn process(&mut self, now: Instant, inputs: &RendererInputs, pixels: &mut [Rgb]) {
        if self.commands.receive(inputs) {
            if let Err(_err) = self.compose() {
                #[cfg(feature = "esp32-log")]
                println!("[RunningRenderer.process] compose failed: {:?}", _err);
            }
        }
        self.paint(now, pixels);
    }

    fn shutdown(&mut self, pixels: &mut [Rgb]) {
        self.layers.clear();
        pixels.fill(BLACK);
    }

    fn commands(&self) -> ChannelCommands {
        self.commands
    }

    fn lights(&self) -> &LightsConfig {
        &self.lights
    }
}
