//! Coordinator inputs
//!
//! Collaborators running on other tasks only ever touch the coordinator
//! through these channels. Every channel keeps the newest values: pending
//! configuration and mode requests are replaced, and the vehicle queue drops
//! its oldest snapshot when full.

use crate::channel::{Channel, Slot};
use crate::listener::{ConfigListener, ModeSelector, MotionListener};
use crate::mode::LightMode;
use crate::vehicle::VehicleState;

pub const VEHICLE_QUEUE_SIZE: usize = 5;

/// Type alias for the vehicle state queue
pub type VehicleStateChannel = Channel<VehicleState, VEHICLE_QUEUE_SIZE>;

pub struct AppInbox {
    config_updated: Slot<bool>,
    light_mode: Slot<LightMode>,
    vehicle: VehicleStateChannel,
}

impl AppInbox {
    pub const fn new() -> Self {
        Self {
            config_updated: Slot::new(),
            light_mode: Slot::new(),
            vehicle: Channel::new(),
        }
    }

    /// Take the pending configuration notification
    pub(crate) fn take_config_updated(&self) -> bool {
        self.config_updated.try_receive().unwrap_or(false)
    }

    pub(crate) fn take_light_mode(&self) -> Option<LightMode> {
        self.light_mode.try_receive().ok()
    }

    /// Drain the vehicle queue, keeping only the newest snapshot
    pub(crate) fn take_vehicle_state(&self) -> Option<VehicleState> {
        let mut latest = None;
        while let Ok(state) = self.vehicle.try_receive() {
            latest = Some(state);
        }
        latest
    }
}

impl Default for AppInbox {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigListener for AppInbox {
    fn on_config_updated(&self) {
        self.config_updated.send_overwrite(true);
    }
}

impl ModeSelector for AppInbox {
    fn select_light_mode(&self, mode: LightMode) {
        self.light_mode.send_overwrite(mode);
    }
}

impl MotionListener for AppInbox {
    fn on_vehicle_state(&self, state: VehicleState) {
        self.vehicle.send_overwrite(state);
    }
}
