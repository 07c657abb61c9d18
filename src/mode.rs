//! Light modes selectable by the user
//!
//! Each mode maps onto exactly one renderer variant.

use serde::Deserialize;

const MODE_NAME_RUNNING: &str = "running";
const MODE_NAME_RAINBOW: &str = "rainbow";
const MODE_NAME_THEATER_CHASE: &str = "theater-chase";
const MODE_NAME_THEATER_CHASE_RAINBOW: &str = "theater-chase-rainbow";
const MODE_NAME_LIGHTNING: &str = "lightning";

const MODE_ID_RUNNING: u8 = 0;
const MODE_ID_RAINBOW: u8 = 1;
const MODE_ID_THEATER_CHASE: u8 = 2;
const MODE_ID_THEATER_CHASE_RAINBOW: u8 = 3;
const MODE_ID_LIGHTNING: u8 = 4;

/// Known light modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum LightMode {
    /// Vehicle lights: headlight, brake and turn signals
    #[default]
    Running = MODE_ID_RUNNING,
    Rainbow = MODE_ID_RAINBOW,
    TheaterChase = MODE_ID_THEATER_CHASE,
    TheaterChaseRainbow = MODE_ID_THEATER_CHASE_RAINBOW,
    Lightning = MODE_ID_LIGHTNING,
}

impl LightMode {
    pub const ALL: [Self; 5] = [
        Self::Running,
        Self::Rainbow,
        Self::TheaterChase,
        Self::TheaterChaseRainbow,
        Self::Lightning,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_RUNNING => Self::Running,
            MODE_ID_RAINBOW => Self::Rainbow,
            MODE_ID_THEATER_CHASE => Self::TheaterChase,
            MODE_ID_THEATER_CHASE_RAINBOW => Self::TheaterChaseRainbow,
            MODE_ID_LIGHTNING => Self::Lightning,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => MODE_NAME_RUNNING,
            Self::Rainbow => MODE_NAME_RAINBOW,
            Self::TheaterChase => MODE_NAME_THEATER_CHASE,
            Self::TheaterChaseRainbow => MODE_NAME_THEATER_CHASE_RAINBOW,
            Self::Lightning => MODE_NAME_LIGHTNING,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_RUNNING => Some(Self::Running),
            MODE_NAME_RAINBOW => Some(Self::Rainbow),
            MODE_NAME_THEATER_CHASE => Some(Self::TheaterChase),
            MODE_NAME_THEATER_CHASE_RAINBOW => Some(Self::TheaterChaseRainbow),
            MODE_NAME_LIGHTNING => Some(Self::Lightning),
            _ => None,
        }
    }
}
