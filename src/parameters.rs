//! Effect requests composited by renderers
//!
//! Requests targeting overlapping regions are painted from the lowest layer
//! up, so a higher layer wins.

use core::cmp::Ordering;

use embassy_time::Duration;
use heapless::String;

use crate::color::Rgb;
use crate::topology::{REGION_NAME_LEN, TopologyError};

/// Per-region effect kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LightEffect {
    #[default]
    Off,
    Static,
    Blink,
    ColorWipe,
    Breathe,
    Fade,
    Scan,
    Rainbow,
    RainbowCycle,
    ColorChase,
    TheaterChase,
    TheaterChaseRainbow,
    Twinkle,
    Sparkle,
    Alternate,
}

/// Effect request for one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightingParameters {
    pub region: String<REGION_NAME_LEN>,
    pub effect: LightEffect,
    /// Compositing priority, higher is painted later
    pub layer: u8,
    pub first: Rgb,
    pub second: Rgb,
    pub third: Rgb,
    /// Effect period
    pub duration: Duration,
}

impl LightingParameters {
    pub fn new(region: &str, effect: LightEffect, layer: u8) -> Result<Self, TopologyError> {
        let mut name = String::new();
        name.push_str(region)
            .map_err(|()| TopologyError::NameTooLong)?;
        Ok(Self {
            region: name,
            effect,
            layer,
            first: Rgb::default(),
            second: Rgb::default(),
            third: Rgb::default(),
            duration: Duration::from_millis(0),
        })
    }

    #[must_use]
    pub fn with_colors(mut self, first: Rgb, second: Rgb) -> Self {
        self.first = first;
        self.second = second;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Orders requests by compositing layer only
pub fn by_layer(a: &LightingParameters, b: &LightingParameters) -> Ordering {
    a.layer.cmp(&b.layer)
}
