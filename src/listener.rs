//! Collaborator contracts and their standard single-slot endpoints

use crate::channel::Slot;
use crate::command::LightCommands;
use crate::mode::LightMode;
use crate::vehicle::VehicleState;

/// Receives a notification whenever persisted preferences change
pub trait ConfigListener {
    fn on_config_updated(&self);
}

/// Receives vehicle state snapshots from the motion subsystem
pub trait MotionListener {
    fn on_vehicle_state(&self, state: VehicleState);
}

/// Receives light mode selections from the transport
pub trait ModeSelector {
    fn select_light_mode(&self, mode: LightMode);
}

/// Receives every light command notification
///
/// Delivery must not block; implementations are expected to keep only the
/// values they can handle.
pub trait RenderListener {
    fn on_lights_changed(&self, commands: LightCommands);
}

/// Tracks the raw vehicle state, whether or not it changed any light
pub trait VehicleStateListener {
    fn on_vehicle_state_changed(&self, state: VehicleState);
}

/// Collaborator that needs periodic servicing from the coordinator loop
pub trait Service {
    fn process(&self);
}

/// Motion subsystem controls used on renderer start
pub trait MotionControl {
    fn reset_motion_detection(&self);
}

/// Single-slot [`RenderListener`] endpoint
///
/// A pending bundle is replaced by a newer one; the owner polls with
/// [`LightCommandsSlot::take`].
#[derive(Default)]
pub struct LightCommandsSlot {
    slot: Slot<LightCommands>,
}

impl LightCommandsSlot {
    pub const fn new() -> Self {
        Self { slot: Slot::new() }
    }

    pub fn take(&self) -> Option<LightCommands> {
        self.slot.try_receive().ok()
    }
}

impl RenderListener for LightCommandsSlot {
    fn on_lights_changed(&self, commands: LightCommands) {
        self.slot.send_overwrite(commands);
    }
}

/// Single-slot [`VehicleStateListener`] endpoint
#[derive(Default)]
pub struct VehicleStateSlot {
    slot: Slot<VehicleState>,
}

impl VehicleStateSlot {
    pub const fn new() -> Self {
        Self { slot: Slot::new() }
    }

    pub fn take(&self) -> Option<VehicleState> {
        self.slot.try_receive().ok()
    }
}

impl VehicleStateListener for VehicleStateSlot {
    fn on_vehicle_state_changed(&self, state: VehicleState) {
        self.slot.send_overwrite(state);
    }
}
