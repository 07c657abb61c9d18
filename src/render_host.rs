//! Render host
//!
//! Owns the active renderer and the frame buffer, and ticks the renderer at a
//! fixed period. The output driver belongs to the task running
//! [`RenderHost::run`].
//!
//! The renderer and its session live behind a single critical-section mutex.
//! [`RenderHost::tick`] holds the lock for the whole `process()` call and
//! [`RenderHost::stop`] takes the same lock to shut the renderer down, so a
//! stop returns only once no `process()` call is in flight and the next tick
//! can no longer reach the old renderer.
//!
//! Driver writes happen outside the lock. [`RenderHost::flush`] copies the
//! latest frame out and writes it afterwards; a frame produced later is
//! always written later, so a blanked strip after `stop()` is never followed
//! by a stale frame.
//!
//! # Usage
//!
//! ```ignore
//! static HOST: RenderHost<128> = RenderHost::new();
//!
//! // On the executor of the second core
//! #[embassy_executor::task]
//! async fn render_host_task(mut driver: StripDriver) {
//!     HOST.run(&mut driver).await;
//! }
//! ```

use core::cell::RefCell;

use embassy_futures::select::{Either, select};
use embassy_sync::blocking_mutex::CriticalSectionMutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Timer};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::command::LightCommands;
use crate::frame::Frame;
use crate::mode::LightMode;
use crate::renderer::{RendererInputs, RendererSlot};
use crate::topology::{LightChannel, MAX_CHANNELS};

/// Default period between two renderer ticks
pub const DEFAULT_RENDER_PERIOD: Duration = Duration::from_millis(50);

type Channels = Vec<LightChannel, MAX_CHANNELS>;

/// Active render session
struct Session {
    renderer: RendererSlot,
    ticks: u32,
}

struct HostState<const N: usize> {
    frame: Frame<N>,
    /// Layout the frame is written with, kept after a stop to blank the strip
    channels: Channels,
    /// Frame changed since the last flush
    dirty: bool,
    session: Option<Session>,
    generation: u32,
}

pub struct RenderHost<const N: usize> {
    state: CriticalSectionMutex<RefCell<HostState<N>>>,
    inputs: RendererInputs,
    wake: Signal<CriticalSectionRawMutex, ()>,
    period: Duration,
}

impl<const N: usize> RenderHost<N> {
    pub const fn new() -> Self {
        Self::with_period(DEFAULT_RENDER_PERIOD)
    }

    pub const fn with_period(period: Duration) -> Self {
        Self {
            state: CriticalSectionMutex::new(RefCell::new(HostState {
                frame: Frame::new(),
                channels: Vec::new(),
                dirty: false,
                session: None,
                generation: 0,
            })),
            inputs: RendererInputs::new(),
            wake: Signal::new(),
            period,
        }
    }

    /// Command inputs of whichever renderer is active
    pub const fn inputs(&self) -> &RendererInputs {
        &self.inputs
    }

    /// Number of pixels the frame buffer holds
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Start a new session with `renderer`
    ///
    /// A running session is stopped first and the commands it had applied
    /// are carried over to the new renderer, unless a newer command is
    /// already pending for that channel. Returns the session generation.
    pub fn start(&self, renderer: RendererSlot, now: Instant) -> u32 {
        let generation = self.state.lock(|state| {
            let mut state = state.borrow_mut();
            let state = &mut *state;
            if let Some(session) = state.session.as_ref() {
                self.inputs.seed_vacant(session.renderer.commands());
            }
            Self::stop_session(state);

            state.generation = state.generation.wrapping_add(1);
            let mut session = Session { renderer, ticks: 0 };

            #[cfg(feature = "esp32-log")]
            println!(
                "[RenderHost.start] session {} mode {}",
                state.generation,
                session.renderer.mode().as_str()
            );

            state.channels.clone_from(&session.renderer.lights().channels);
            if session.renderer.renders_on_start() {
                session
                    .renderer
                    .process(now, &self.inputs, state.frame.pixels_mut());
                state.dirty = true;
            }

            state.session = Some(session);
            state.generation
        });
        self.wake.signal(());
        generation
    }

    /// Stop the running session, if any
    ///
    /// The renderer is shut down and dropped before this returns, and pending
    /// inputs are dropped. Returns the mode of the stopped session.
    pub fn stop(&self) -> Option<LightMode> {
        let mode = self
            .state
            .lock(|state| Self::stop_session(&mut state.borrow_mut()));
        self.inputs.clear();
        self.wake.signal(());
        mode
    }

    fn stop_session(state: &mut HostState<N>) -> Option<LightMode> {
        let mut session = state.session.take()?;

        #[cfg(feature = "esp32-log")]
        println!(
            "[RenderHost.stop] session {} after {} ticks",
            state.generation, session.ticks
        );

        session.renderer.shutdown(state.frame.pixels_mut());
        state.dirty = true;
        Some(session.renderer.mode())
    }

    /// Advance the active renderer by one tick
    ///
    /// Returns `false` when no session is running.
    pub fn tick(&self, now: Instant) -> bool {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            let state = &mut *state;
            let Some(session) = state.session.as_mut() else {
                return false;
            };

            session
                .renderer
                .process(now, &self.inputs, state.frame.pixels_mut());
            session.ticks = session.ticks.wrapping_add(1);
            state.dirty = true;
            true
        })
    }

    /// Write the latest frame to `driver` if it changed since the last flush
    ///
    /// The frame is copied under the lock and written after releasing it.
    pub fn flush<D: OutputDriver>(&self, driver: &mut D) -> bool {
        let mut frame = Frame::<N>::new();
        let mut channels = Channels::new();
        let dirty = self.state.lock(|state| {
            let mut state = state.borrow_mut();
            if !state.dirty {
                return false;
            }
            state.dirty = false;
            frame.pixels_mut().copy_from_slice(state.frame.pixels());
            channels.clone_from(&state.channels);
            true
        });
        if dirty {
            frame.flush(&channels, driver);
        }
        dirty
    }

    /// Tick and write frames forever at the configured period
    ///
    /// Spawn once, on the execution context reserved for rendering. Session
    /// starts and stops are written out without waiting for the next tick.
    pub async fn run<D: OutputDriver>(&self, driver: &mut D) {
        loop {
            self.tick(Instant::now());
            self.flush(driver);

            let deadline = Instant::now() + self.period;
            while let Either::Second(()) = select(Timer::at(deadline), self.wake.wait()).await {
                self.flush(driver);
            }
        }
    }

    pub fn active_mode(&self) -> Option<LightMode> {
        self.state.lock(|state| {
            state
                .borrow()
                .session
                .as_ref()
                .map(|session| session.renderer.mode())
        })
    }

    pub fn is_running(&self) -> bool {
        self.active_mode().is_some()
    }

    /// Generation of the last started session, 0 if none was ever started
    pub fn generation(&self) -> u32 {
        self.state.lock(|state| state.borrow().generation)
    }

    /// Ticks processed by the running session
    pub fn ticks(&self) -> Option<u32> {
        self.state.lock(|state| {
            state
                .borrow()
                .session
                .as_ref()
                .map(|session| session.ticks)
        })
    }

    /// Commands currently applied by the active renderer
    pub fn commands(&self) -> Option<LightCommands> {
        self.state.lock(|state| {
            state
                .borrow()
                .session
                .as_ref()
                .map(|session| session.renderer.commands())
        })
    }
}

impl<const N: usize> Default for RenderHost<N> {
    fn default() -> Self {
        Self::new()
    }
}
