//! Renderers turn light commands into pixels
//!
//! There is one renderer variant per [`LightMode`]. All variants are stored in
//! [`RendererSlot`] to avoid heap allocations, and each implements the
//! [`Renderer`] trait.

mod pattern;
mod running;

use embassy_time::Instant;
pub use pattern::{Pattern, PatternRenderer};
pub use running::RunningRenderer;

use crate::channel::Slot;
use crate::color::Rgb;
use crate::command::{LightCommand, LightCommands};
use crate::config::AppConfig;
use crate::mode::LightMode;
use crate::topology::{LightsConfig, TopologyError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererError {
    /// No pattern with the requested name
    UnknownPattern,
    /// Topology lacks a region the renderer draws into
    MissingRegion(&'static str),
    Topology(TopologyError),
}

impl From<TopologyError> for RendererError {
    fn from(err: TopologyError) -> Self {
        Self::Topology(err)
    }
}

/// Per-channel command inputs of the active renderer
///
/// Owned by the render host and written by the coordinator. Each input keeps
/// only the latest command.
pub struct RendererInputs {
    pub headlight: Slot<LightCommand>,
    pub brake: Slot<LightCommand>,
    pub turn: Slot<LightCommand>,
}

impl RendererInputs {
    pub const fn new() -> Self {
        Self {
            headlight: Slot::new(),
            brake: Slot::new(),
            turn: Slot::new(),
        }
    }

    pub fn clear(&self) {
        self.headlight.clear();
        self.brake.clear();
        self.turn.clear();
    }

    /// Write every command of a bundle, skipping `NoCommand` fields
    pub fn apply(&self, commands: LightCommands) {
        for (input, command) in self.with_commands(commands) {
            if command != LightCommand::NoCommand {
                input.send_overwrite(command);
            }
        }
    }

    /// Like [`RendererInputs::apply`], but pending commands are kept
    pub fn seed_vacant(&self, commands: LightCommands) {
        for (input, command) in self.with_commands(commands) {
            if command != LightCommand::NoCommand && input.is_empty() {
                input.send_overwrite(command);
            }
        }
    }

    fn with_commands(&self, commands: LightCommands) -> [(&Slot<LightCommand>, LightCommand); 3] {
        [
            (&self.headlight, commands.headlight),
            (&self.brake, commands.brake),
            (&self.turn, commands.turn),
        ]
    }
}

impl Default for RendererInputs {
    fn default() -> Self {
        Self::new()
    }
}

/// Last command applied to each channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelCommands {
    pub headlight: LightCommand,
    pub brake: LightCommand,
    pub turn: LightCommand,
}

impl ChannelCommands {
    pub const DEFAULT: Self = Self {
        headlight: LightCommand::HeadlightNormal,
        brake: LightCommand::BrakeNormal,
        turn: LightCommand::TurnCenter,
    };

    /// Drain pending inputs
    ///
    /// Returns `true` if any channel changed.
    pub fn receive(&mut self, inputs: &RendererInputs) -> bool {
        let before = *self;
        if let Ok(command) = inputs.headlight.try_receive() {
            self.headlight = match command {
                LightCommand::Off
                | LightCommand::HeadlightNormal
                | LightCommand::HeadlightBright => command,
                LightCommand::Reset => Self::DEFAULT.headlight,
                _ => self.headlight,
            };
        }
        if let Ok(command) = inputs.brake.try_receive() {
            self.brake = match command {
                LightCommand::Off | LightCommand::BrakeNormal | LightCommand::BrakeActive => {
                    command
                }
                LightCommand::Reset => Self::DEFAULT.brake,
                _ => self.brake,
            };
        }
        if let Ok(command) = inputs.turn.try_receive() {
            self.turn = match command {
                LightCommand::Off
                | LightCommand::TurnCenter
                | LightCommand::TurnLeft
                | LightCommand::TurnRight
                | LightCommand::TurnHazard => command,
                LightCommand::Reset => Self::DEFAULT.turn,
                _ => self.turn,
            };
        }
        before != *self
    }

    /// All channels were switched off
    pub fn is_dark(&self) -> bool {
        self.headlight == LightCommand::Off
            && self.brake == LightCommand::Off
            && self.turn == LightCommand::Off
    }

    pub const fn to_light_commands(self, mode: LightMode) -> LightCommands {
        LightCommands {
            mode,
            brake: self.brake,
            turn: self.turn,
            headlight: self.headlight,
        }
    }
}

impl Default for ChannelCommands {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub trait Renderer {
    /// Render one pass synchronously as soon as the renderer is installed
    const RENDER_ON_START: bool = false;

    /// Advance one animation tick
    ///
    /// Must return promptly; it runs with the render host locked.
    fn process(&mut self, now: Instant, inputs: &RendererInputs, pixels: &mut [Rgb]);

    /// Release resources and blank the pixels owned by the renderer
    fn shutdown(&mut self, pixels: &mut [Rgb]);

    /// Commands currently applied by the renderer
    fn commands(&self) -> ChannelCommands;

    /// Topology the renderer draws into
    fn lights(&self) -> &LightsConfig;
}

/// Renderer slot - enum containing all renderer variants
pub enum RendererSlot {
    Running(RunningRenderer),
    Pattern(PatternRenderer),
}

impl RendererSlot {
    /// Build the renderer for a mode
    ///
    /// Pure function of the mode and the configuration; nothing is drawn.
    pub fn build(
        mode: LightMode,
        config: &AppConfig,
        capacity: usize,
    ) -> Result<Self, RendererError> {
        match pattern_name(mode) {
            Some(name) => Ok(Self::Pattern(PatternRenderer::new(
                mode, name, config, capacity,
            )?)),
            None => Ok(Self::Running(RunningRenderer::new(config, capacity)?)),
        }
    }

    pub fn mode(&self) -> LightMode {
        match self {
            Self::Running(_) => LightMode::Running,
            Self::Pattern(renderer) => renderer.mode(),
        }
    }

    /// Returns if the renderer wants an immediate pass on start
    ///
    /// Derived from each renderer's `Renderer::RENDER_ON_START` constant.
    pub fn renders_on_start(&self) -> bool {
        match self {
            Self::Running(_) => RunningRenderer::RENDER_ON_START,
            Self::Pattern(_) => PatternRenderer::RENDER_ON_START,
        }
    }

    pub fn process(&mut self, now: Instant, inputs: &RendererInputs, pixels: &mut [Rgb]) {
        match self {
            Self::Running(renderer) => renderer.process(now, inputs, pixels),
            Self::Pattern(renderer) => renderer.process(now, inputs, pixels),
        }
    }

    pub fn shutdown(&mut self, pixels: &mut [Rgb]) {
        match self {
            Self::Running(renderer) => renderer.shutdown(pixels),
            Self::Pattern(renderer) => renderer.shutdown(pixels),
        }
    }

    pub fn commands(&self) -> LightCommands {
        let commands = match self {
            Self::Running(renderer) => renderer.commands(),
            Self::Pattern(renderer) => renderer.commands(),
        };
        commands.to_light_commands(self.mode())
    }

    pub fn lights(&self) -> &LightsConfig {
        match self {
            Self::Running(renderer) => renderer.lights(),
            Self::Pattern(renderer) => renderer.lights(),
        }
    }
}

/// Pattern drawn for each non-running mode
pub const fn pattern_name(mode: LightMode) -> Option<&'static str> {
    match mode {
        LightMode::Running => None,
        LightMode::Rainbow => Some("rainbow"),
        LightMode::TheaterChase => Some("theater-chase"),
        LightMode::TheaterChaseRainbow => Some("theater-chase-rainbow"),
        LightMode::Lightning => Some("lightning"),
    }
}
