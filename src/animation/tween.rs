//! Time-driven progress driver
//!
//! A [`Tween`] turns elapsed time into an eased progress value in `[0, 1]`.
//! It moves through `Idle → Delayed → Animating → Idle` and reports each
//! lifecycle step as a [`TweenEvent`] returned from the call that caused it.

use serde::{Deserialize, Serialize};

use super::easing::Easing;
use super::scheduler::{Handle, Scheduler};

/// How long the animating phase lasts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TweenDuration {
    /// Milliseconds. Zero or less completes on the first frame.
    Finite(f64),
    /// Progress stays at 0 until stopped
    Infinite,
}

#[derive(Debug, Clone, Copy)]
pub struct TweenConfig {
    pub delay_ms: f64,
    pub duration: TweenDuration,
    pub easing: Easing,
}

impl TweenConfig {
    pub const DEFAULT: TweenConfig = TweenConfig {
        delay_ms: 0.0,
        duration: TweenDuration::Finite(1000.0),
        easing: Easing::Linear,
    };

    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_duration(mut self, duration: TweenDuration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not playing; also the state after a stop
    Idle,
    /// Waiting out the configured delay
    Delayed,
    /// Ticking once per frame
    Animating,
}

/// Lifecycle notifications
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenEvent {
    /// The delay elapsed and animation began
    Started,
    /// Eased progress for this frame
    Tick(f64),
    /// Final tick at the given eased progress, then completion
    Finished(f64),
    /// Completed early through [`Tween::stop`]
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Delay(Handle),
    Frame(Handle),
}

impl Pending {
    fn handle(&self) -> Handle {
        match self {
            Pending::Delay(handle) | Pending::Frame(handle) => *handle,
        }
    }
}

#[derive(Debug)]
pub struct Tween {
    config: TweenConfig,
    phase: Phase,
    started_at_ms: f64,
    progress: f64,
    pending: Option<Pending>,
}

impl Tween {
    pub fn new(config: TweenConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            started_at_ms: 0.0,
            progress: 0.0,
            pending: None,
        }
    }

    pub fn config(&self) -> &TweenConfig {
        &self.config
    }

    /// Replace the configuration. Ignored while the tween is playing;
    /// returns whether it was applied.
    pub fn set_config(&mut self, config: TweenConfig) -> bool {
        if self.is_active() {
            tracing::warn!("ignoring tween reconfiguration while active");
            return false;
        }
        self.config = config;
        true
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Raw (un-eased) progress of the current run
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn started_at_ms(&self) -> f64 {
        self.started_at_ms
    }

    /// The delay or frame handle this tween is waiting on
    pub fn pending(&self) -> Option<Handle> {
        self.pending.map(|p| p.handle())
    }

    pub fn owns(&self, handle: Handle) -> bool {
        self.pending() == Some(handle)
    }

    /// Begin the delay. Does nothing if already playing.
    pub fn play(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        if self.is_active() {
            return false;
        }
        self.phase = Phase::Delayed;
        self.progress = 0.0;
        self.pending = Some(Pending::Delay(scheduler.schedule_delay(self.config.delay_ms)));
        true
    }

    /// Handle a fired delay or frame. Handles this tween is not waiting on
    /// are ignored.
    pub fn wake(&mut self, handle: Handle, scheduler: &mut dyn Scheduler) -> Option<TweenEvent> {
        match self.pending {
            Some(Pending::Delay(h)) if h == handle => {
                self.phase = Phase::Animating;
                self.started_at_ms = scheduler.now_ms();
                self.pending = Some(Pending::Frame(scheduler.schedule_frame()));
                Some(TweenEvent::Started)
            }
            Some(Pending::Frame(h)) if h == handle => {
                self.pending = None;
                self.update_progress(scheduler.now_ms());
                let eased = self.config.easing.apply(self.progress);

                if self.progress < 1.0 {
                    self.pending = Some(Pending::Frame(scheduler.schedule_frame()));
                    Some(TweenEvent::Tick(eased))
                } else {
                    self.reset();
                    Some(TweenEvent::Finished(eased))
                }
            }
            _ => None,
        }
    }

    /// Complete now. Cancels whatever is pending and reports
    /// [`TweenEvent::Stopped`]; a second call does nothing.
    pub fn stop(&mut self, scheduler: &mut dyn Scheduler) -> Option<TweenEvent> {
        if !self.is_active() {
            return None;
        }
        self.release(scheduler);
        Some(TweenEvent::Stopped)
    }

    /// Abandon the run without reporting completion
    pub fn cancel(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        if !self.is_active() {
            return false;
        }
        self.release(scheduler);
        true
    }

    fn release(&mut self, scheduler: &mut dyn Scheduler) {
        match self.pending.take() {
            Some(Pending::Delay(handle)) => scheduler.cancel_delay(handle),
            Some(Pending::Frame(handle)) => scheduler.cancel_frame(handle),
            None => {}
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.pending = None;
        self.progress = 0.0;
    }

    fn update_progress(&mut self, now_ms: f64) {
        self.progress = match self.config.duration {
            TweenDuration::Infinite => 0.0,
            TweenDuration::Finite(duration) if duration <= 0.0 => 1.0,
            TweenDuration::Finite(duration) => ((now_ms - self.started_at_ms) / duration).min(1.0),
        };
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::new(TweenConfig::DEFAULT)
    }
}
