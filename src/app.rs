//! Lighting coordinator
//!
//! Turns configuration changes, mode selections and vehicle state snapshots
//! into light commands, owns the render session lifecycle and fans command
//! notifications out to listeners.
//!
//! [`App::process`] is driven by an external loop. It never blocks: all input
//! arrives through the [`AppInbox`] channels and all output leaves through
//! single-slot endpoints.

use embassy_time::Instant;
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::command::{LightCommand, LightCommands};
use crate::config::{AppConfig, ConfigSource};
use crate::inbox::AppInbox;
use crate::listener::{MotionControl, RenderListener, Service, VehicleStateListener};
use crate::mode::LightMode;
use crate::render_host::RenderHost;
use crate::renderer::{RendererError, RendererSlot};
use crate::vehicle::{AccelerationState, TurnState, VehicleState};

pub const MAX_RENDER_LISTENERS: usize = 4;
pub const MAX_VEHICLE_LISTENERS: usize = 2;
pub const MAX_SERVICES: usize = 4;

/// Mode started when the requested one cannot be built and nothing runs
pub const SAFE_MODE: LightMode = LightMode::Running;

pub struct App<'a, C: ConfigSource, const N: usize> {
    // External dependencies
    host: &'a RenderHost<N>,
    inbox: &'a AppInbox,
    config_source: &'a C,

    // Internal state
    config: AppConfig,
    light_mode: Option<LightMode>,
    vehicle_state: VehicleState,

    // Registered collaborators
    render_listeners: Vec<&'a dyn RenderListener, MAX_RENDER_LISTENERS>,
    vehicle_listeners: Vec<&'a dyn VehicleStateListener, MAX_VEHICLE_LISTENERS>,
    services: Vec<&'a dyn Service, MAX_SERVICES>,
    motion: Option<&'a dyn MotionControl>,
}

impl<'a, C: ConfigSource, const N: usize> App<'a, C, N> {
    /// Create an idle coordinator
    ///
    /// No renderer runs until a mode is selected or the configuration
    /// reports an update.
    pub fn new(host: &'a RenderHost<N>, inbox: &'a AppInbox, config_source: &'a C) -> Self {
        Self {
            host,
            inbox,
            config_source,
            config: config_source.load(),
            light_mode: None,
            vehicle_state: VehicleState::default(),
            render_listeners: Vec::new(),
            vehicle_listeners: Vec::new(),
            services: Vec::new(),
            motion: None,
        }
    }

    #[must_use]
    pub fn with_motion_control(mut self, motion: &'a dyn MotionControl) -> Self {
        self.motion = Some(motion);
        self
    }

    /// Register a listener for light command notifications
    ///
    /// Returns the listener if the registry is full
    pub fn add_render_listener(
        &mut self,
        listener: &'a dyn RenderListener,
    ) -> Result<(), &'a dyn RenderListener> {
        self.render_listeners.push(listener)
    }

    /// Register a listener for raw vehicle state
    ///
    /// Returns the listener if the registry is full
    pub fn add_vehicle_listener(
        &mut self,
        listener: &'a dyn VehicleStateListener,
    ) -> Result<(), &'a dyn VehicleStateListener> {
        self.vehicle_listeners.push(listener)
    }

    /// Register a service pumped at the end of every poll cycle
    ///
    /// Returns the service if the registry is full
    pub fn add_service(&mut self, service: &'a dyn Service) -> Result<(), &'a dyn Service> {
        self.services.push(service)
    }

    pub const fn light_mode(&self) -> Option<LightMode> {
        self.light_mode
    }

    pub const fn vehicle_state(&self) -> VehicleState {
        self.vehicle_state
    }

    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run one poll cycle
    ///
    /// Order is fixed: configuration, mode selection, vehicle state, services.
    pub fn process(&mut self) {
        if self.inbox.take_config_updated() {
            self.on_config_updated();
        }

        if let Some(mode) = self.inbox.take_light_mode()
            && let Err(_err) = self.set_light_mode(mode)
        {
            #[cfg(feature = "esp32-log")]
            println!(
                "[App.process] cannot switch to {}: {:?}",
                mode.as_str(),
                _err
            );
        }

        if let Some(state) = self.inbox.take_vehicle_state() {
            self.on_vehicle_state(state);
        }

        for service in &self.services {
            service.process();
        }
    }

    /// Reload the configuration and re-apply the configured mode
    ///
    /// When the configured mode is already active its renderer is rebuilt
    /// with the new configuration, keeping the applied commands and without
    /// a mode change notification.
    pub fn on_config_updated(&mut self) {
        self.config = self.config_source.load();
        let mode = self.config.prefs.light_mode;

        #[cfg(feature = "esp32-log")]
        println!("[App.on_config_updated] applying mode {}", mode.as_str());

        let result = if self.light_mode == Some(mode) {
            self.reload(mode)
        } else {
            self.set_light_mode(mode)
        };
        if let Err(_err) = result {
            #[cfg(feature = "esp32-log")]
            println!(
                "[App.on_config_updated] cannot apply {}: {:?}",
                mode.as_str(),
                _err
            );
        }
    }

    fn reload(&mut self, mode: LightMode) -> Result<(), RendererError> {
        let renderer = RendererSlot::build(mode, &self.config, self.host.capacity())?;
        self.host.start(renderer, Instant::now());
        Ok(())
    }

    /// Switch the active renderer
    ///
    /// Selecting the active mode does nothing. If the renderer for `mode`
    /// cannot be built, the current renderer keeps running; when nothing is
    /// running the [`SAFE_MODE`] renderer is started instead. The build error
    /// is returned in both cases.
    pub fn set_light_mode(&mut self, mode: LightMode) -> Result<(), RendererError> {
        if self.light_mode == Some(mode) {
            return Ok(());
        }

        match RendererSlot::build(mode, &self.config, self.host.capacity()) {
            Ok(renderer) => {
                self.activate(renderer);
                Ok(())
            }
            Err(err) => {
                self.fall_back(mode);
                Err(err)
            }
        }
    }

    fn fall_back(&mut self, failed: LightMode) {
        if self.light_mode.is_some() || failed == SAFE_MODE {
            return;
        }
        if let Ok(renderer) = RendererSlot::build(SAFE_MODE, &self.config, self.host.capacity()) {
            self.activate(renderer);
        }
    }

    fn activate(&mut self, renderer: RendererSlot) {
        let mode = renderer.mode();

        // The old renderer is shut down before the new session can tick
        self.host.start(renderer, Instant::now());

        if let Some(motion) = self.motion {
            motion.reset_motion_detection();
        }

        self.light_mode = Some(mode);
        self.notify_lights_changed(LightCommands::mode_only(mode));
    }

    /// Re-announce the commands of the active renderer
    pub fn on_power_up(&self) {
        if let Some(commands) = self.host.commands() {
            self.notify_lights_changed(commands);
        }
    }

    /// Stop rendering; the next mode selection starts a fresh session
    pub fn on_power_down(&mut self) {
        #[cfg(feature = "esp32-log")]
        println!("[App.on_power_down] stopping render host");

        self.host.stop();
        self.light_mode = None;
    }

    fn on_vehicle_state(&mut self, state: VehicleState) {
        let previous = self.vehicle_state;

        if previous.orientation != state.orientation {
            self.on_orientation_changed(state);
        } else {
            if previous.acceleration != state.acceleration {
                self.on_acceleration_changed(state.acceleration);
            }
            if previous.turn != state.turn {
                self.on_turn_changed(state.turn);
            }
        }

        for listener in &self.vehicle_listeners {
            listener.on_vehicle_state_changed(state);
        }

        self.vehicle_state = state;
    }

    fn on_acceleration_changed(&self, state: AccelerationState) {
        self.set_brakes(LightCommand::for_acceleration(state));
    }

    fn on_turn_changed(&self, state: TurnState) {
        self.set_turn_lights(LightCommand::for_turn(state));
    }

    /// Orientation overrides every channel with a single bundle
    ///
    /// The bundle already carries the brake and turn state of the snapshot.
    fn on_orientation_changed(&self, state: VehicleState) {
        let Some(mode) = self.light_mode else {
            return;
        };
        let commands = LightCommands::for_orientation_change(mode, state);
        self.host.inputs().apply(commands);
        self.notify_lights_changed(commands);
    }

    pub fn set_headlight(&self, command: LightCommand) {
        let Some(mode) = self.light_mode else {
            return;
        };
        self.host.inputs().headlight.send_overwrite(command);
        self.notify_lights_changed(LightCommands::mode_only(mode).with_headlight(command));
    }

    pub fn set_brakes(&self, command: LightCommand) {
        let Some(mode) = self.light_mode else {
            return;
        };
        self.host.inputs().brake.send_overwrite(command);
        self.notify_lights_changed(LightCommands::mode_only(mode).with_brake(command));
    }

    pub fn set_turn_lights(&self, command: LightCommand) {
        let Some(mode) = self.light_mode else {
            return;
        };
        self.host.inputs().turn.send_overwrite(command);
        self.notify_lights_changed(LightCommands::mode_only(mode).with_turn(command));
    }

    fn notify_lights_changed(&self, commands: LightCommands) {
        for listener in &self.render_listeners {
            listener.on_lights_changed(commands);
        }
    }
}
