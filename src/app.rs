//! Application state management

use anyhow::Result;
use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

use coinburst::batch::{Batch, BatchObserver, BatchOverrides, Unit};
use coinburst::config::Config;
use coinburst::motion::{Region, Vector2};
use coinburst::FrameScheduler;

/// Frames of landing history kept for the activity sparkline
const HISTORY_LEN: usize = 120;

/// Messages kept for the log panel
const LOG_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Idle,
    Flying,
    Complete,
    Cancelled,
}

/// The collecting side of the demo: a balance that grows as coins land
#[derive(Debug)]
pub struct Wallet {
    pub balance: i64,
    pub landed: usize,
    pub expected: usize,
    pub collected: i64,
    pub status: RunStatus,

    /// Frames left on the highlight after a landing
    pub pulse: u32,
    pulse_frames: u32,

    landed_this_frame: u64,
    log: VecDeque<String>,
    unread: Vec<String>,
}

impl Wallet {
    pub fn new(starting_balance: i64, pulse_frames: u32) -> Self {
        Self {
            balance: starting_balance,
            landed: 0,
            expected: 0,
            collected: 0,
            status: RunStatus::Idle,
            pulse: 0,
            pulse_frames,
            landed_this_frame: 0,
            log: VecDeque::with_capacity(LOG_LEN),
            unread: Vec::new(),
        }
    }

    /// Recent messages, oldest first
    pub fn log(&self) -> impl Iterator<Item = &String> {
        self.log.iter()
    }

    /// Messages added since the last call
    pub fn take_unread(&mut self) -> Vec<String> {
        std::mem::take(&mut self.unread)
    }

    fn note(&mut self, message: String) {
        if self.log.len() == LOG_LEN {
            self.log.pop_front();
        }
        self.log.push_back(message.clone());
        self.unread.push(message);
    }
}

impl BatchObserver for Wallet {
    fn before_start(&mut self) {
        self.landed = 0;
        self.collected = 0;
        self.status = RunStatus::Flying;
    }

    fn on_batch_start(&mut self) {
        tracing::debug!(coins = self.expected, "coins launched");
    }

    fn on_unit_complete(&mut self, unit: &Unit) {
        self.balance += unit.quantity();
        self.collected += unit.quantity();
        self.landed += 1;
        self.landed_this_frame += 1;
        self.pulse = self.pulse_frames;
        self.note(format!(
            "coin {} landed +{} (balance {})",
            unit.index(),
            unit.quantity(),
            self.balance
        ));
    }

    fn on_batch_complete(&mut self) {
        self.status = RunStatus::Complete;
        self.note(format!(
            "batch complete: collected {} in {} coins, balance {}",
            self.collected, self.landed, self.balance
        ));
    }

    fn on_batch_cancel(&mut self) {
        self.status = RunStatus::Cancelled;
        self.note(format!(
            "batch cancelled after {} of {} coins",
            self.landed, self.expected
        ));
    }
}

/// Application state
pub struct App {
    /// Configuration
    pub config: Config,

    pub batch: Batch,

    pub scheduler: FrameScheduler,

    pub wallet: Wallet,

    /// Where coins take off; follows the Collect button
    pub source: Rc<Cell<Region>>,

    /// Where coins land; follows the wallet box
    pub target: Rc<Cell<Region>>,

    /// Coins landed per frame, most recent last
    pub history: VecDeque<u64>,

    /// Animation tick counter
    pub tick: u64,

    clock: Instant,
}

impl App {
    pub fn new(config_path: Option<&str>, overrides: &BatchOverrides) -> Result<Self> {
        let mut config = Config::load(config_path)?;
        config.batch = overrides.apply(&config.batch);
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: Config) -> Self {
        let source = Rc::new(Cell::new(Region::default()));
        let target = Rc::new(Cell::new(Region::default()));
        let batch = Batch::new(
            config.batch.clone(),
            Box::new(Rc::clone(&source)),
            Box::new(Rc::clone(&target)),
        );
        let wallet = Wallet::new(config.wallet.starting_balance, config.ui.pulse_frames);

        Self {
            config,
            batch,
            scheduler: FrameScheduler::new(),
            wallet,
            source,
            target,
            history: VecDeque::with_capacity(HISTORY_LEN),
            tick: 0,
            clock: Instant::now(),
        }
    }

    /// Record where the button and the wallet currently sit on screen
    pub fn set_layout(&mut self, source: Region, target: Region) {
        self.source.set(source);
        self.target.set(target);
    }

    /// Launch a batch from the button to the wallet
    pub fn collect(&mut self) {
        if self.batch.is_active() {
            return;
        }
        self.wallet.expected = self.batch.split().count;
        self.batch.start(&mut self.scheduler, &mut self.wallet);
    }

    /// Land every coin in flight right away
    pub fn stop(&mut self) {
        self.batch.stop(&mut self.scheduler, &mut self.wallet);
    }

    /// Drop every coin in flight without crediting the wallet
    pub fn cancel(&mut self) {
        self.batch.cancel(&mut self.scheduler, &mut self.wallet);
    }

    /// Advance to wall-clock time
    pub fn tick(&mut self) {
        let now_ms = self.clock.elapsed().as_secs_f64() * 1000.0;
        self.advance_to(now_ms);
    }

    /// Advance the animation clock to `now_ms` and run one frame
    pub fn advance_to(&mut self, now_ms: f64) {
        self.scheduler.advance_to(now_ms);
        self.batch.pump(&mut self.scheduler, &mut self.wallet);

        self.tick = self.tick.wrapping_add(1);
        self.wallet.pulse = self.wallet.pulse.saturating_sub(1);

        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(std::mem::take(&mut self.wallet.landed_this_frame));
    }

    /// Coins currently moving, as screen positions
    pub fn coins_in_flight(&self) -> impl Iterator<Item = Vector2> + '_ {
        self.batch
            .units()
            .iter()
            .filter(|unit| unit.is_moving())
            .map(Unit::position)
    }

    /// Fraction of the current run that has landed
    pub fn progress(&self) -> f64 {
        if self.wallet.expected == 0 {
            return match self.wallet.status {
                RunStatus::Complete => 1.0,
                _ => 0.0,
            };
        }
        self.wallet.landed as f64 / self.wallet.expected as f64
    }
}
