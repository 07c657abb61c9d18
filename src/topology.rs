//! Static strip topology
//!
//! Physical channels are laid out back to back in a single frame buffer, in
//! the order they were added. Named regions pick pixel ranges out of one or
//! more channels.

use heapless::{String, Vec};

pub const MAX_CHANNELS: usize = 4;
pub const MAX_REGIONS: usize = 8;
pub const MAX_SECTIONS: usize = 4;
pub const MAX_BREAKS: usize = 4;
pub const REGION_NAME_LEN: usize = 16;

/// Region lit by the headlight channel
pub const REGION_HEADLIGHT: &str = "headlight";
/// Region lit by the brake channel
pub const REGION_TAILLIGHT: &str = "taillight";
pub const REGION_TURN_LEFT: &str = "turn-left";
pub const REGION_TURN_RIGHT: &str = "turn-right";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyError {
    /// Section references a channel that was never added
    UnknownChannel(u8),
    /// Section range does not fit its channel
    SectionOutOfRange,
    /// Strip has more pixels than the frame buffer can hold
    CapacityExceeded { required: usize, capacity: usize },
    /// Fixed size table is full
    TooManyEntries,
    NameTooLong,
}

/// LED chipset and color order, passed through to the strip driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StripType {
    #[default]
    NeoPixelGrb,
    NeoPixelGrbw,
    NeoPixelRgb,
    NeoPixelRgbw,
    DotStarBgr,
    DotStarLbgr,
    DotStarGrb,
    DotStarLgrb,
}

/// Physical output channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightChannel {
    pub channel: u8,
    pub leds: u16,
    pub strip_type: StripType,
}

/// Pixel range `start..end` on one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightSection {
    pub channel: u8,
    pub start: u16,
    pub end: u16,
}

impl LightSection {
    pub const fn new(channel: u8, start: u16, end: u16) -> Self {
        Self {
            channel,
            start,
            end,
        }
    }

    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start) as usize
    }

    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// Named logical region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightRegion {
    pub name: String<REGION_NAME_LEN>,
    pub sections: Vec<LightSection, MAX_SECTIONS>,
    /// Pixel offsets (within the region) where the region is visually split
    pub breaks: Vec<u16, MAX_BREAKS>,
}

impl LightRegion {
    pub fn new(name: &str) -> Result<Self, TopologyError> {
        let mut region_name = String::new();
        region_name
            .push_str(name)
            .map_err(|()| TopologyError::NameTooLong)?;
        Ok(Self {
            name: region_name,
            sections: Vec::new(),
            breaks: Vec::new(),
        })
    }

    pub fn with_section(mut self, section: LightSection) -> Result<Self, TopologyError> {
        self.sections
            .push(section)
            .map_err(|_| TopologyError::TooManyEntries)?;
        Ok(self)
    }

    pub fn with_break(mut self, offset: u16) -> Result<Self, TopologyError> {
        self.breaks
            .push(offset)
            .map_err(|_| TopologyError::TooManyEntries)?;
        Ok(self)
    }

    /// Total number of pixels in the region
    pub fn count(&self) -> usize {
        self.sections.iter().map(|section| section.len()).sum()
    }

    /// Flat frame buffer indices of every pixel in the region
    pub fn pixels<'a>(&'a self, lights: &'a LightsConfig) -> impl Iterator<Item = usize> + 'a {
        self.sections.iter().flat_map(move |section| {
            match lights.channel_offset(section.channel) {
                Some(offset) => offset + section.start as usize..offset + section.end as usize,
                None => 0..0,
            }
        })
    }
}

/// Complete strip topology
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LightsConfig {
    pub channels: Vec<LightChannel, MAX_CHANNELS>,
    pub regions: Vec<LightRegion, MAX_REGIONS>,
}

impl LightsConfig {
    pub const fn new() -> Self {
        Self {
            channels: Vec::new(),
            regions: Vec::new(),
        }
    }

    /// Default layout: a front strip with the headlight and a rear strip
    /// with the taillight whose outer ends double as turn signals.
    pub fn standard() -> Result<Self, TopologyError> {
        let mut lights = Self::new();
        lights.add_channel(LightChannel {
            channel: 0,
            leds: 20,
            strip_type: StripType::NeoPixelGrb,
        })?;
        lights.add_channel(LightChannel {
            channel: 1,
            leds: 40,
            strip_type: StripType::NeoPixelGrb,
        })?;
        lights.add_region(
            LightRegion::new(REGION_HEADLIGHT)?.with_section(LightSection::new(0, 0, 20))?,
        )?;
        lights.add_region(
            LightRegion::new(REGION_TAILLIGHT)?
                .with_section(LightSection::new(1, 0, 40))?
                .with_break(20)?,
        )?;
        lights.add_region(
            LightRegion::new(REGION_TURN_LEFT)?.with_section(LightSection::new(1, 0, 10))?,
        )?;
        lights.add_region(
            LightRegion::new(REGION_TURN_RIGHT)?.with_section(LightSection::new(1, 30, 40))?,
        )?;
        Ok(lights)
    }

    pub fn add_channel(&mut self, channel: LightChannel) -> Result<(), TopologyError> {
        self.channels
            .push(channel)
            .map_err(|_| TopologyError::TooManyEntries)
    }

    pub fn add_region(&mut self, region: LightRegion) -> Result<(), TopologyError> {
        self.regions
            .push(region)
            .map_err(|_| TopologyError::TooManyEntries)
    }

    pub fn channel(&self, channel: u8) -> Option<&LightChannel> {
        self.channels.iter().find(|c| c.channel == channel)
    }

    pub fn region(&self, name: &str) -> Option<&LightRegion> {
        self.regions.iter().find(|r| r.name.as_str() == name)
    }

    /// Index of the first pixel of `channel` in the frame buffer
    pub fn channel_offset(&self, channel: u8) -> Option<usize> {
        let mut offset = 0;
        for c in &self.channels {
            if c.channel == channel {
                return Some(offset);
            }
            offset += c.leds as usize;
        }
        None
    }

    /// Total number of pixels across all channels
    pub fn pixel_count(&self) -> usize {
        self.channels.iter().map(|c| c.leds as usize).sum()
    }

    /// Check that every section fits its channel and the strip fits `capacity`
    pub fn validate(&self, capacity: usize) -> Result<(), TopologyError> {
        let required = self.pixel_count();
        if required > capacity {
            return Err(TopologyError::CapacityExceeded { required, capacity });
        }

        for section in self.regions.iter().flat_map(|r| r.sections.iter()) {
            let channel = self
                .channel(section.channel)
                .ok_or(TopologyError::UnknownChannel(section.channel))?;
            if section.start > section.end || section.end > channel.leds {
                return Err(TopologyError::SectionOutOfRange);
            }
        }

        Ok(())
    }
}
