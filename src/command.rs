use crate::mode::LightMode;
use crate::vehicle::{AccelerationState, Orientation, TurnState, VehicleState};

const COMMAND_ID_NONE: u8 = 0x00;
const COMMAND_ID_OFF: u8 = 0x01;
const COMMAND_ID_RESET: u8 = 0x02;
const COMMAND_ID_BRAKE_NORMAL: u8 = 0x03;
const COMMAND_ID_BRAKE_ACTIVE: u8 = 0x04;
const COMMAND_ID_HEADLIGHT_NORMAL: u8 = 0x05;
const COMMAND_ID_HEADLIGHT_BRIGHT: u8 = 0x06;
const COMMAND_ID_TURN_CENTER: u8 = 0x07;
const COMMAND_ID_TURN_LEFT: u8 = 0x08;
const COMMAND_ID_TURN_RIGHT: u8 = 0x09;
const COMMAND_ID_TURN_HAZARD: u8 = 0x0A;

/// Semantic action for a single light channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum LightCommand {
    /// Leave the channel unchanged
    #[default]
    NoCommand = COMMAND_ID_NONE,
    Off = COMMAND_ID_OFF,
    /// Return the channel to its default state
    Reset = COMMAND_ID_RESET,
    BrakeNormal = COMMAND_ID_BRAKE_NORMAL,
    BrakeActive = COMMAND_ID_BRAKE_ACTIVE,
    HeadlightNormal = COMMAND_ID_HEADLIGHT_NORMAL,
    HeadlightBright = COMMAND_ID_HEADLIGHT_BRIGHT,
    TurnCenter = COMMAND_ID_TURN_CENTER,
    TurnLeft = COMMAND_ID_TURN_LEFT,
    TurnRight = COMMAND_ID_TURN_RIGHT,
    TurnHazard = COMMAND_ID_TURN_HAZARD,
}

impl LightCommand {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            COMMAND_ID_NONE => Self::NoCommand,
            COMMAND_ID_OFF => Self::Off,
            COMMAND_ID_RESET => Self::Reset,
            COMMAND_ID_BRAKE_NORMAL => Self::BrakeNormal,
            COMMAND_ID_BRAKE_ACTIVE => Self::BrakeActive,
            COMMAND_ID_HEADLIGHT_NORMAL => Self::HeadlightNormal,
            COMMAND_ID_HEADLIGHT_BRIGHT => Self::HeadlightBright,
            COMMAND_ID_TURN_CENTER => Self::TurnCenter,
            COMMAND_ID_TURN_LEFT => Self::TurnLeft,
            COMMAND_ID_TURN_RIGHT => Self::TurnRight,
            COMMAND_ID_TURN_HAZARD => Self::TurnHazard,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    /// Brake channel command for an acceleration state
    pub const fn for_acceleration(state: AccelerationState) -> Self {
        match state {
            AccelerationState::Braking => Self::BrakeActive,
            AccelerationState::Neutral => Self::BrakeNormal,
        }
    }

    /// Turn channel command for a turn state
    pub const fn for_turn(state: TurnState) -> Self {
        match state {
            TurnState::Left => Self::TurnLeft,
            TurnState::Right => Self::TurnRight,
            TurnState::Hazard => Self::TurnHazard,
            TurnState::Center => Self::TurnCenter,
        }
    }

    /// Command forced onto every channel when the orientation changes
    pub const fn for_orientation(orientation: Orientation) -> Self {
        match orientation {
            Orientation::TopSideUp => Self::Off,
            Orientation::Other => Self::Reset,
        }
    }
}

/// Bundle of commands broadcast to listeners
///
/// Channels not affected by the triggering change carry
/// [`LightCommand::NoCommand`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LightCommands {
    pub mode: LightMode,
    pub brake: LightCommand,
    pub turn: LightCommand,
    pub headlight: LightCommand,
}

impl LightCommands {
    /// Mode change notification without channel overrides
    pub const fn mode_only(mode: LightMode) -> Self {
        Self {
            mode,
            brake: LightCommand::NoCommand,
            turn: LightCommand::NoCommand,
            headlight: LightCommand::NoCommand,
        }
    }

    /// Bundle forced onto every channel when the orientation changes
    ///
    /// Top side up switches every channel off. Any other orientation resets
    /// the channels, except that brake and turn take the state of the same
    /// snapshot when it differs from their defaults.
    pub const fn for_orientation_change(mode: LightMode, state: VehicleState) -> Self {
        let command = LightCommand::for_orientation(state.orientation);
        let bundle = Self::mode_only(mode)
            .with_brake(command)
            .with_turn(command)
            .with_headlight(command);
        if let Orientation::TopSideUp = state.orientation {
            return bundle;
        }

        let bundle = match LightCommand::for_acceleration(state.acceleration) {
            LightCommand::BrakeNormal => bundle,
            brake => bundle.with_brake(brake),
        };
        match LightCommand::for_turn(state.turn) {
            LightCommand::TurnCenter => bundle,
            turn => bundle.with_turn(turn),
        }
    }

    #[must_use]
    pub const fn with_brake(mut self, command: LightCommand) -> Self {
        self.brake = command;
        self
    }

    #[must_use]
    pub const fn with_turn(mut self, command: LightCommand) -> Self {
        self.turn = command;
        self
    }

    #[must_use]
    pub const fn with_headlight(mut self, command: LightCommand) -> Self {
        self.headlight = command;
        self
    }
}
