//! Vehicle motion snapshot reported by the motion subsystem.

/// Longitudinal acceleration state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccelerationState {
    Braking,
    #[default]
    Neutral,
}

/// Turn signal state derived from lateral motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Center,
    Left,
    Right,
    Hazard,
}

/// Board orientation
///
/// `TopSideUp` means the device is flipped over and not riding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    TopSideUp,
    Other,
}

/// Immutable snapshot of the vehicle motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VehicleState {
    pub acceleration: AccelerationState,
    pub turn: TurnState,
    pub orientation: Orientation,
}

impl VehicleState {
    pub const fn new(
        acceleration: AccelerationState,
        turn: TurnState,
        orientation: Orientation,
    ) -> Self {
        Self {
            acceleration,
            turn,
            orientation,
        }
    }
}
