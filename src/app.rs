//! App struct: configuration, stylesheet loading, and the frame loop.
//!
//! [`App`] ties together the [`StyleEngine`], the host toolkit and an
//! optional [`SignalReceiver`]. [`App::frame`] runs one cooperative frame;
//! [`App::run`] drives frames on a tokio interval until there is nothing
//! left to do.

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use crate::css::stylesheet::Stylesheet;
use crate::dom::NodeId;
use crate::error::Error;
use crate::event::bridge::{dispatch, SignalReceiver};
use crate::event::signal::WidgetSignal;
use crate::style::StyleEngine;
use crate::widget::Toolkit;

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Where the stylesheet comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StylesheetSource {
    Inline(String),
    Path(PathBuf),
}

impl StylesheetSource {
    /// Read (if needed) and parse the stylesheet.
    pub fn load(&self) -> Result<Stylesheet, Error> {
        match self {
            StylesheetSource::Inline(css) => Ok(Stylesheet::parse(css)?),
            StylesheetSource::Path(path) => Stylesheet::from_path(path),
        }
    }
}

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub stylesheet: StylesheetSource,
    /// Target frames per second for animation ticks.
    pub fps: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stylesheet: StylesheetSource::Inline(String::new()),
            fps: 60,
        }
    }
}

impl AppConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use inline stylesheet text (builder).
    pub fn with_stylesheet(mut self, css: impl Into<String>) -> Self {
        self.stylesheet = StylesheetSource::Inline(css.into());
        self
    }

    /// Read the stylesheet from a file (builder).
    pub fn with_stylesheet_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stylesheet = StylesheetSource::Path(path.into());
        self
    }

    /// Set the target FPS (builder).
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Period between frames. A zero `fps` is treated as 1.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// What one frame did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Signals drained from the receiver.
    pub signals: usize,
    /// Widgets re-applied by animation ticks.
    pub restyled: usize,
}

/// The main application struct.
pub struct App<T> {
    pub engine: StyleEngine<T>,
    pub config: AppConfig,
    signals: Option<SignalReceiver>,
}

impl<T: Toolkit> App<T> {
    /// Load the configured stylesheet and build an empty engine.
    pub fn new(config: AppConfig, toolkit: T) -> Result<Self, Error> {
        let stylesheet = config.stylesheet.load()?;
        tracing::debug!(rules = stylesheet.len(), fps = config.fps, "app configured");
        Ok(Self {
            engine: StyleEngine::new(Rc::new(stylesheet), toolkit),
            config,
            signals: None,
        })
    }

    /// Feed signals from `receiver` into the engine on every frame.
    pub fn attach(&mut self, receiver: SignalReceiver) {
        self.signals = Some(receiver);
    }

    /// Whether a receiver is attached and still open.
    pub fn is_listening(&self) -> bool {
        self.signals.as_ref().is_some_and(|rx| !rx.is_closed())
    }

    /// Drain pending signals, then advance animations by `dt`.
    pub fn frame(&mut self, dt: Duration) -> FrameStats {
        let signals = match self.signals.as_mut() {
            Some(rx) => rx.drain_into(&mut self.engine),
            None => 0,
        };
        let restyled = self.engine.tick(dt);
        FrameStats { signals, restyled }
    }

    /// Run frames until the receiver is closed (or absent) and no
    /// animation is running.
    ///
    /// Signals are dispatched as soon as they arrive; animations advance on
    /// a `fps` interval by the real time elapsed since the previous frame.
    pub async fn run(&mut self) {
        let mut interval = tokio::time::interval(self.config.frame_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last = Instant::now();

        loop {
            let listening = self.is_listening();
            if !listening && !self.engine.is_animating() {
                break;
            }
            tokio::select! {
                now = interval.tick() => {
                    let dt = now.saturating_duration_since(last);
                    last = now;
                    self.frame(dt);
                }
                Some((node, signal)) = next_signal(&mut self.signals), if listening => {
                    dispatch(&mut self.engine, node, signal);
                }
            }
        }
        tracing::debug!("app loop finished");
    }
}

async fn next_signal(signals: &mut Option<SignalReceiver>) -> Option<(NodeId, WidgetSignal)> {
    match signals {
        Some(rx) => rx.recv().await,
        None => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
