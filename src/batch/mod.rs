//! Batch orchestration
//!
//! A [`Batch`] turns a total quantity into a set of [`Unit`]s, flies them
//! all on one scheduler, and reports a single completion once every unit
//! has landed.

mod settings;
mod split;
mod unit;

pub use settings::*;
pub use split::*;
pub use unit::*;

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::animation::{FrameScheduler, Handle, Scheduler};
use crate::motion::{math, Anchor, Vector2};

/// Hooks a batch calls during a run. Every method defaults to doing nothing.
pub trait BatchObserver {
    /// Units are populated and about to start
    fn before_start(&mut self) {}

    /// Every unit has been launched
    fn on_batch_start(&mut self) {}

    /// A unit finished its delay and began to move
    fn on_unit_start(&mut self, _unit: &Unit) {}

    /// A unit moved; this is where drawing happens
    fn on_unit_tick(&mut self, _position: Vector2, _unit: &Unit) {}

    fn on_unit_complete(&mut self, _unit: &Unit) {}

    /// Fired exactly once per run, after the last unit completes
    fn on_batch_complete(&mut self) {}

    /// The run was abandoned through [`Batch::cancel`]
    fn on_batch_cancel(&mut self) {}
}

impl BatchObserver for () {}

/// Forwards unit hooks to the batch observer and counts completions
struct Relay<'a> {
    observer: &'a mut dyn BatchObserver,
    completed: usize,
}

impl<'a> Relay<'a> {
    fn new(observer: &'a mut dyn BatchObserver) -> Self {
        Self {
            observer,
            completed: 0,
        }
    }
}

impl UnitObserver for Relay<'_> {
    fn on_start(&mut self, unit: &Unit) {
        self.observer.on_unit_start(unit);
    }

    fn on_tick(&mut self, position: Vector2, unit: &Unit) {
        self.observer.on_unit_tick(position, unit);
    }

    fn on_complete(&mut self, unit: &Unit) {
        self.completed += 1;
        self.observer.on_unit_complete(unit);
    }
}

pub struct Batch {
    config: BatchConfig,
    source: Box<dyn Anchor>,
    destination: Box<dyn Anchor>,
    rng: Box<dyn RngCore>,
    active: bool,
    origin: Vector2,
    target: Vector2,
    units: Vec<Unit>,
    completed: usize,
    routes: HashMap<Handle, usize>,
    runs: u64,
}

impl Batch {
    /// Create an idle batch flying from `source` to `destination`.
    ///
    /// The random source is seeded from `config.seed` when set, otherwise
    /// from entropy.
    pub fn new(config: BatchConfig, source: Box<dyn Anchor>, destination: Box<dyn Anchor>) -> Self {
        let rng = seeded_rng(config.seed);
        Self {
            config,
            source,
            destination,
            rng,
            active: false,
            origin: Vector2::ZERO,
            target: Vector2::ZERO,
            units: Vec::new(),
            completed: 0,
            routes: HashMap::new(),
            runs: 0,
        }
    }

    /// Replace the random source
    pub fn with_rng(mut self, rng: impl RngCore + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Replace the configuration. Ignored while a run is in flight; returns
    /// whether it was applied. A configured seed restarts the random source.
    pub fn set_config(&mut self, config: BatchConfig) -> bool {
        if self.active {
            tracing::warn!("ignoring batch reconfiguration while active");
            return false;
        }
        if config.seed.is_some() {
            self.rng = seeded_rng(config.seed);
        }
        self.config = config;
        true
    }

    /// Swap the geometry providers; takes effect on the next start
    pub fn set_anchors(&mut self, source: Box<dyn Anchor>, destination: Box<dyn Anchor>) {
        self.source = source;
        self.destination = destination;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Units of the current run, in launch order
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Units that have completed in the current run
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Start point resolved for the current or most recent run
    pub fn origin(&self) -> Vector2 {
        self.origin
    }

    /// End point resolved for the current or most recent run
    pub fn target(&self) -> Vector2 {
        self.target
    }

    /// Number of runs started so far
    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn split(&self) -> QuantitySplit {
        QuantitySplit::compute(
            self.config.total_quantity,
            self.config.increment,
            self.config.max_units,
        )
    }

    /// Launch a run. Does nothing if one is already in flight.
    ///
    /// With zero units the run completes before this returns.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler, observer: &mut dyn BatchObserver) -> bool {
        if self.active {
            return false;
        }

        self.resolve_anchors();
        self.units = self.populate();
        self.completed = 0;
        self.routes.clear();
        self.active = true;
        self.runs += 1;

        tracing::debug!(
            run = self.runs,
            units = self.units.len(),
            total = self.config.total_quantity,
            "starting batch"
        );

        observer.before_start();

        let mut relay = Relay::new(observer);
        for (index, unit) in self.units.iter_mut().enumerate() {
            unit.start(scheduler, &mut relay);
            if let Some(handle) = unit.pending() {
                self.routes.insert(handle, index);
            }
        }

        observer.on_batch_start();

        if self.units.is_empty() {
            self.finish(observer);
        }
        true
    }

    /// Deliver one fired scheduler handle to the unit waiting on it.
    /// Returns false for handles this batch does not own.
    pub fn dispatch(
        &mut self,
        handle: Handle,
        scheduler: &mut dyn Scheduler,
        observer: &mut dyn BatchObserver,
    ) -> bool {
        let Some(index) = self.routes.remove(&handle) else {
            tracing::trace!(%handle, "no unit waiting on handle");
            return false;
        };

        let mut relay = Relay::new(observer);
        let handled = match self.units.get_mut(index) {
            Some(unit) => unit.wake(handle, scheduler, &mut relay),
            None => false,
        };
        let completed = relay.completed;

        if let Some(next) = self.units.get(index).and_then(Unit::pending) {
            self.routes.insert(next, index);
        }

        for _ in 0..completed {
            self.record_completion(observer);
        }
        handled
    }

    /// Run one frame: fire everything due on `scheduler` and route it.
    ///
    /// Handles owned by anything other than this batch are dropped, so share
    /// a scheduler between batches through [`dispatch`](Self::dispatch).
    pub fn pump(&mut self, scheduler: &mut FrameScheduler, observer: &mut dyn BatchObserver) -> usize {
        let mut handled = 0;
        for handle in scheduler.due() {
            if self.dispatch(handle, scheduler, observer) {
                handled += 1;
            }
        }
        handled
    }

    /// Land every unit immediately. Each unit reports completion and the
    /// batch completes as usual.
    pub fn stop(&mut self, scheduler: &mut dyn Scheduler, observer: &mut dyn BatchObserver) -> bool {
        if !self.active {
            return false;
        }

        let mut relay = Relay::new(observer);
        for unit in self.units.iter_mut() {
            unit.stop(scheduler, &mut relay);
        }
        let completed = relay.completed;

        for _ in 0..completed {
            self.record_completion(observer);
        }
        true
    }

    /// Abandon the run. Units are cancelled without completing and no
    /// completion is reported for this run.
    pub fn cancel(&mut self, scheduler: &mut dyn Scheduler, observer: &mut dyn BatchObserver) -> bool {
        if !self.active {
            return false;
        }

        for unit in self.units.iter_mut() {
            unit.cancel(scheduler);
        }
        tracing::debug!(run = self.runs, completed = self.completed, "batch cancelled");
        self.reset();
        observer.on_batch_cancel();
        true
    }

    /// Trajectories of the current run, or of a fresh draw when idle.
    ///
    /// A fresh draw consumes random numbers exactly as a start would.
    pub fn plan(&mut self) -> Vec<UnitPlan> {
        if self.active {
            return self.units.iter().map(UnitPlan::from).collect();
        }
        self.resolve_anchors();
        self.populate().iter().map(UnitPlan::from).collect()
    }

    fn resolve_anchors(&mut self) {
        self.origin = self.source.locate();
        self.target = self.destination.locate();
    }

    fn populate(&mut self) -> Vec<Unit> {
        let split = self.split();
        let mut units = Vec::with_capacity(split.count);
        for index in 0..split.count {
            let config = self.unit_config(split.amount_for(index));
            units.push(Unit::new(config).with_index(index));
        }
        units
    }

    fn unit_config(&mut self, quantity: i64) -> UnitConfig {
        let angle_range = self.config.curve_angle_range;
        let (curve_start_angle, curve_end_angle) = if self.config.symmetric_curve {
            let curve = self.sample(angle_range);
            (curve, -curve)
        } else {
            (self.sample(angle_range), self.sample(angle_range))
        };

        UnitConfig {
            start: self.origin,
            end: self.target,
            quantity,
            delay_ms: self.sample(self.config.delay_range),
            duration_ms: self.sample(self.config.duration_range),
            easing: self.config.easing,
            curve_start_intensity: self.sample(self.config.curve_intensity_range),
            curve_end_intensity: self.sample(self.config.curve_intensity_range),
            curve_start_angle,
            curve_end_angle,
            container: self.config.container.clone(),
        }
    }

    fn sample(&mut self, range: [f64; 2]) -> f64 {
        math::modulate(self.rng.gen::<f64>(), 1.0, range)
    }

    fn record_completion(&mut self, observer: &mut dyn BatchObserver) {
        if !self.active {
            return;
        }
        self.completed += 1;
        if self.completed == self.units.len() {
            self.finish(observer);
        }
    }

    fn finish(&mut self, observer: &mut dyn BatchObserver) {
        tracing::debug!(run = self.runs, units = self.completed, "batch complete");
        self.reset();
        observer.on_batch_complete();
    }

    fn reset(&mut self) {
        self.units.clear();
        self.routes.clear();
        self.completed = 0;
        self.active = false;
    }
}

fn seeded_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(StdRng::from_entropy()),
    }
}
