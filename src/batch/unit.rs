//! A single coin travelling along its own Bézier arc

use std::f64::consts::TAU;

use serde::Serialize;

use crate::animation::{Easing, Handle, Scheduler, Tween, TweenConfig, TweenDuration, TweenEvent};
use crate::motion::{math, Vector2};

/// Everything a unit needs to fly
#[derive(Debug, Clone)]
pub struct UnitConfig {
    pub start: Vector2,
    pub end: Vector2,
    /// Share of the batch total this unit represents
    pub quantity: i64,
    pub delay_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
    /// Control point distance as a fraction of the start/end distance
    pub curve_start_intensity: f64,
    pub curve_end_intensity: f64,
    /// Angle offsets in radians
    pub curve_start_angle: f64,
    pub curve_end_angle: f64,
    /// Opaque label handed through from the batch
    pub container: Option<String>,
}

impl UnitConfig {
    pub const DEFAULT: UnitConfig = UnitConfig {
        start: Vector2::ZERO,
        end: Vector2::ZERO,
        quantity: 0,
        delay_ms: 0.0,
        duration_ms: 400.0,
        easing: Easing::CubicIn,
        curve_start_intensity: 0.5,
        curve_end_intensity: 0.5,
        curve_start_angle: 0.0,
        curve_end_angle: 0.0,
        container: None,
    };

    fn tween_config(&self) -> TweenConfig {
        TweenConfig {
            delay_ms: self.delay_ms,
            duration: TweenDuration::Finite(self.duration_ms),
            easing: self.easing,
        }
    }
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Hooks a unit calls as it moves. Every method defaults to doing nothing.
pub trait UnitObserver {
    /// Called synchronously from [`Unit::start`]
    fn before_start(&mut self, _unit: &Unit) {}

    /// The delay elapsed and the unit began to move
    fn on_start(&mut self, _unit: &Unit) {}

    /// The unit moved to `position`; this is where drawing happens
    fn on_tick(&mut self, _position: Vector2, _unit: &Unit) {}

    fn on_complete(&mut self, _unit: &Unit) {}
}

impl UnitObserver for () {}

/// Control point `intensity * |from - to|` away from `from`, rotated
/// `angle_offset` radians off the straight line towards `to`
pub fn control_point(from: Vector2, to: Vector2, intensity: f64, angle_offset: f64) -> Vector2 {
    let length = from.distance_to(to) * intensity;
    let angle = math::cycle_number(from.angle_to(to) + angle_offset, TAU);
    from + Vector2::from_polar(angle, length)
}

#[derive(Debug)]
pub struct Unit {
    index: usize,
    config: UnitConfig,
    tween: Tween,
    position: Vector2,
    control_points: [Vector2; 2],
    active: bool,
    moving: bool,
}

impl Unit {
    pub fn new(config: UnitConfig) -> Self {
        let control_points = [
            control_point(
                config.start,
                config.end,
                config.curve_start_intensity,
                config.curve_start_angle,
            ),
            control_point(
                config.end,
                config.start,
                config.curve_end_intensity,
                config.curve_end_angle,
            ),
        ];

        Self {
            index: 0,
            position: config.start,
            tween: Tween::new(config.tween_config()),
            control_points,
            config,
            active: false,
            moving: false,
        }
    }

    /// Position of this unit within its batch
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn config(&self) -> &UnitConfig {
        &self.config
    }

    pub fn quantity(&self) -> i64 {
        self.config.quantity
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn control_points(&self) -> [Vector2; 2] {
        self.control_points
    }

    /// Started and not yet ended
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Past its delay and still travelling
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    /// The scheduler handle this unit is waiting on
    pub fn pending(&self) -> Option<Handle> {
        self.tween.pending()
    }

    /// Launch the unit. Does nothing if it is already active.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler, observer: &mut dyn UnitObserver) -> bool {
        if self.active {
            return false;
        }

        self.tween.cancel(scheduler);
        self.tween.set_config(self.config.tween_config());
        self.active = true;
        observer.before_start(self);
        self.tween.play(scheduler)
    }

    /// Route a fired scheduler handle to this unit's tween.
    /// Returns false if the handle was not ours.
    pub fn wake(
        &mut self,
        handle: Handle,
        scheduler: &mut dyn Scheduler,
        observer: &mut dyn UnitObserver,
    ) -> bool {
        match self.tween.wake(handle, scheduler) {
            Some(event) => {
                self.handle_event(event, observer);
                true
            }
            None => false,
        }
    }

    /// End the flight where it is, reporting completion
    pub fn stop(&mut self, scheduler: &mut dyn Scheduler, observer: &mut dyn UnitObserver) -> bool {
        match self.tween.stop(scheduler) {
            Some(event) => {
                self.handle_event(event, observer);
                true
            }
            None => false,
        }
    }

    /// Abandon the flight without reporting completion
    pub fn cancel(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        let cancelled = self.tween.cancel(scheduler);
        self.active = false;
        self.moving = false;
        cancelled
    }

    fn handle_event(&mut self, event: TweenEvent, observer: &mut dyn UnitObserver) {
        match event {
            TweenEvent::Started => {
                self.moving = true;
                observer.on_start(self);
            }
            TweenEvent::Tick(t) => self.tick(t, observer),
            TweenEvent::Finished(t) => {
                self.tick(t, observer);
                self.end(observer);
            }
            TweenEvent::Stopped => self.end(observer),
        }
    }

    fn tick(&mut self, t: f64, observer: &mut dyn UnitObserver) {
        let [c1, c2] = self.control_points;
        self.position
            .apply_cubic_bezier(t, self.config.start, c1, c2, self.config.end);
        observer.on_tick(self.position, self);
    }

    fn end(&mut self, observer: &mut dyn UnitObserver) {
        self.moving = false;
        self.active = false;
        observer.on_complete(self);
    }
}

/// Serializable summary of a unit's trajectory
#[derive(Debug, Clone, Serialize)]
pub struct UnitPlan {
    pub index: usize,
    pub quantity: i64,
    pub delay_ms: f64,
    pub duration_ms: f64,
    pub curve_start_intensity: f64,
    pub curve_end_intensity: f64,
    pub curve_start_angle: f64,
    pub curve_end_angle: f64,
    pub control_points: [Vector2; 2],
}

impl From<&Unit> for UnitPlan {
    fn from(unit: &Unit) -> Self {
        let config = unit.config();
        Self {
            index: unit.index(),
            quantity: config.quantity,
            delay_ms: config.delay_ms,
            duration_ms: config.duration_ms,
            curve_start_intensity: config.curve_start_intensity,
            curve_end_intensity: config.curve_end_intensity,
            curve_start_angle: config.curve_start_angle,
            curve_end_angle: config.curve_end_angle,
            control_points: unit.control_points(),
        }
    }
}
