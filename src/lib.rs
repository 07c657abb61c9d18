#![no_std]

pub mod app;
pub mod channel;
pub mod color;
pub mod command;
pub mod config;
pub mod frame;
pub mod inbox;
pub mod listener;
pub mod math8;
pub mod mode;
pub mod parameters;
pub mod render_host;
pub mod renderer;
pub mod topology;
pub mod vehicle;

pub use app::App;
pub use command::{LightCommand, LightCommands};
pub use config::{AppConfig, ConfigSource, Preferences, SharedConfig};
pub use inbox::AppInbox;
pub use listener::{
    ConfigListener, LightCommandsSlot, ModeSelector, MotionControl, MotionListener,
    RenderListener, Service, VehicleStateListener, VehicleStateSlot,
};
pub use mode::LightMode;
pub use render_host::RenderHost;
pub use renderer::{Renderer, RendererError, RendererSlot};
pub use topology::{LightChannel, LightRegion, LightSection, LightsConfig, StripType};
pub use vehicle::{AccelerationState, Orientation, TurnState, VehicleState};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The render host task writes every frame through it.
pub trait OutputDriver {
    /// Write colors to the strip attached to `channel`
    fn write(&mut self, channel: u8, colors: &[Rgb]);
}
