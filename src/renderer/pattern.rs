//! Decorative full-strip patterns
//!
//! Patterns ignore the per-channel meaning of commands. They only go dark
//! while every channel is switched off (board flipped over) and resume on
//! any other command.

use embassy_time::Instant;

use super::{ChannelCommands, Renderer, RendererError, RendererInputs};
use crate::color::{BLACK, Rgb, scale_color, wheel};
use crate::config::AppConfig;
use crate::math8::Random8;
use crate::mode::LightMode;
use crate::topology::LightsConfig;

const PATTERN_NAME_RAINBOW: &str = "rainbow";
const PATTERN_NAME_THEATER_CHASE: &str = "theater-chase";
const PATTERN_NAME_THEATER_CHASE_RAINBOW: &str = "theater-chase-rainbow";
const PATTERN_NAME_LIGHTNING: &str = "lightning";

const RAINBOW_CYCLE_MS: u64 = 5_000;
const CHASE_STEP_MS: u64 = 100;
const CHASE_SPACING: usize = 3;

const FLASH_DECAY_MS: f32 = 120.0;
const FLASH_LENGTH_MS: u64 = 600;
const FLASH_GAP_MIN_MS: u32 = 400;
const FLASH_GAP_MAX_MS: u32 = 3_000;
const FLASH_COLOR: Rgb = Rgb {
    r: 200,
    g: 210,
    b: 255,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Rainbow,
    TheaterChase,
    TheaterChaseRainbow,
    Lightning,
}

impl Pattern {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rainbow => PATTERN_NAME_RAINBOW,
            Self::TheaterChase => PATTERN_NAME_THEATER_CHASE,
            Self::TheaterChaseRainbow => PATTERN_NAME_THEATER_CHASE_RAINBOW,
            Self::Lightning => PATTERN_NAME_LIGHTNING,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            PATTERN_NAME_RAINBOW => Some(Self::Rainbow),
            PATTERN_NAME_THEATER_CHASE => Some(Self::TheaterChase),
            PATTERN_NAME_THEATER_CHASE_RAINBOW => Some(Self::TheaterChaseRainbow),
            PATTERN_NAME_LIGHTNING => Some(Self::Lightning),
            _ => None,
        }
    }
}

/// A single lightning strike
#[derive(Debug, Clone, Copy)]
struct Flash {
    start_ms: u64,
    first: usize,
    len: usize,
}

#[derive(Debug, Clone)]
struct Lightning {
    rng: Random8,
    next_ms: Option<u64>,
    flash: Option<Flash>,
}

impl Lightning {
    const fn new(seed: u32) -> Self {
        Self {
            rng: Random8::new(seed),
            next_ms: None,
            flash: None,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        leds.fill(BLACK);
        if leds.is_empty() {
            return;
        }

        let now_ms = now.as_millis();
        let next_ms = *self.next_ms.get_or_insert(now_ms);
        if now_ms >= next_ms {
            let count = leds.len() as u32;
            let first = self.rng.next_range(0, count) as usize;
            let len = self.rng.next_range(1, count + 1 - first as u32) as usize;
            self.flash = Some(Flash {
                start_ms: now_ms,
                first,
                len,
            });
            let gap = self.rng.next_range(FLASH_GAP_MIN_MS, FLASH_GAP_MAX_MS);
            self.next_ms = Some(now_ms + u64::from(gap));
        }

        let Some(flash) = self.flash else {
            return;
        };
        let elapsed = now_ms.saturating_sub(flash.start_ms);
        if elapsed > FLASH_LENGTH_MS {
            self.flash = None;
            return;
        }

        #[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
        let level = (255.0 * libm::expf(-(elapsed as f32) / FLASH_DECAY_MS)) as u8;
        let color = scale_color(FLASH_COLOR, level);
        for led in leds.iter_mut().skip(flash.first).take(flash.len) {
            *led = color;
        }
    }
}

pub struct PatternRenderer {
    mode: LightMode,
    pattern: Pattern,
    lights: LightsConfig,
    color: Rgb,
    commands: ChannelCommands,
    lightning: Lightning,
}

impl PatternRenderer {
    pub fn new(
        mode: LightMode,
        name: &str,
        config: &AppConfig,
        capacity: usize,
    ) -> Result<Self, RendererError> {
        let pattern = Pattern::parse_from_str(name).ok_or(RendererError::UnknownPattern)?;
        config.lights.validate(capacity)?;

        Ok(Self {
            mode,
            pattern,
            lights: config.lights.clone(),
            color: config.prefs.accent(),
            commands: ChannelCommands::DEFAULT,
            lightning: Lightning::new(config.prefs.accent_color ^ u32::from(mode.as_raw())),
        })
    }

    pub const fn mode(&self) -> LightMode {
        self.mode
    }

    pub const fn pattern(&self) -> Pattern {
        self.pattern
    }
}

/// Hue of a pixel in a rainbow spread over the whole strip
#[allow(clippy::cast_possible_truncation)]
fn rainbow_hue(base: u8, index: usize, len: usize) -> u8 {
    base.wrapping_add(((index * 256) / len.max(1)) as u8)
}

impl Renderer for PatternRenderer {
    #[allow(clippy::cast_possible_truncation)]
    fn process(&mut self, now: Instant, inputs: &RendererInputs, pixels: &mut [Rgb]) {
        self.commands.receive(inputs);

        let count = self.lights.pixel_count().min(pixels.len());
        let (leds, rest) = pixels.split_at_mut(count);
        rest.fill(BLACK);

        if self.commands.is_dark() {
            leds.fill(BLACK);
            return;
        }

        let now_ms = now.as_millis();
        let base_hue = ((now_ms % RAINBOW_CYCLE_MS) * 256 / RAINBOW_CYCLE_MS) as u8;
        let step = ((now_ms / CHASE_STEP_MS) % CHASE_SPACING as u64) as usize;
        let len = leds.len();

        match self.pattern {
            Pattern::Rainbow => {
                for (index, led) in leds.iter_mut().enumerate() {
                    *led = wheel(rainbow_hue(base_hue, index, len));
                }
            }
            Pattern::TheaterChase => {
                for (index, led) in leds.iter_mut().enumerate() {
                    *led = if index % CHASE_SPACING == step {
                        self.color
                    } else {
                        BLACK
                    };
                }
            }
            Pattern::TheaterChaseRainbow => {
                for (index, led) in leds.iter_mut().enumerate() {
                    *led = if index % CHASE_SPACING == step {
                        wheel(rainbow_hue(base_hue, index, len))
                    } else {
                        BLACK
                    };
                }
            }
            Pattern::Lightning => self.lightning.render(now, leds),
        }
    }

    fn shutdown(&mut self, pixels: &mut [Rgb]) {
        self.lightning.flash = None;
        pixels.fill(BLACK);
    }

    fn commands(&self) -> ChannelCommands {
        self.commands
    }

    fn lights(&self) -> &LightsConfig {
        &self.lights
    }
}
