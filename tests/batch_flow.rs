//! End-to-end runs of the library against a virtual clock

use coinburst::animation::Scheduler;
use coinburst::batch::{BatchObserver, BatchOverrides, Unit};
use coinburst::{Batch, BatchConfig, Easing, FrameScheduler, Region, Vector2};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct Ledger {
    starts: usize,
    landings: Vec<(usize, i64, Vector2)>,
    last_tick: Option<Vector2>,
    completions: usize,
    landed_before_complete: usize,
}

impl BatchObserver for Ledger {
    fn on_unit_start(&mut self, _unit: &Unit) {
        self.starts += 1;
    }

    fn on_unit_tick(&mut self, position: Vector2, _unit: &Unit) {
        self.last_tick = Some(position);
    }

    fn on_unit_complete(&mut self, unit: &Unit) {
        self.landings
            .push((unit.index(), unit.quantity(), unit.position()));
    }

    fn on_batch_complete(&mut self) {
        self.completions += 1;
        self.landed_before_complete = self.landings.len();
    }
}

fn config(total: i64, increment: i64, seed: u64) -> BatchConfig {
    BatchOverrides {
        total_quantity: Some(total),
        increment: Some(increment),
        seed: Some(seed),
        easing: Some(Easing::QuadOut),
        ..BatchOverrides::default()
    }
    .apply(&BatchConfig::default())
}

fn close(a: Vector2, b: Vector2) -> bool {
    a.distance_to(b) < 1e-6
}

#[test]
fn test_batch_lands_every_coin_on_target() {
    let target = Region::new(300.0, 10.0, 40.0, 20.0);
    let mut batch = Batch::new(
        config(100, 30, 5),
        Box::new(Vector2::new(0.0, 400.0)),
        Box::new(target),
    );
    let mut scheduler = FrameScheduler::new();
    let mut ledger = Ledger::default();

    assert!(batch.start(&mut scheduler, &mut ledger));
    let mut frames = 0;
    while batch.is_active() {
        scheduler.advance_by(16.0);
        batch.pump(&mut scheduler, &mut ledger);
        frames += 1;
        assert!(frames < 1000, "batch never finished");
    }

    assert_eq!(ledger.starts, 3);
    assert_eq!(ledger.completions, 1);
    assert_eq!(ledger.landed_before_complete, 3);

    let mut quantities: Vec<i64> = ledger.landings.iter().map(|l| l.1).collect();
    quantities.sort();
    assert_eq!(quantities, vec![30, 30, 40]);
    assert!(ledger
        .landings
        .iter()
        .all(|&(_, _, position)| close(position, target.center())));
    assert!(close(ledger.last_tick.unwrap(), target.center()));
    assert!(scheduler.is_idle());
}

#[test]
fn test_batches_share_one_scheduler() {
    let mut left = Batch::new(
        config(50, 10, 1),
        Box::new(Vector2::ZERO),
        Box::new(Vector2::new(100.0, 0.0)),
    );
    let mut right = Batch::new(
        config(40, 20, 2),
        Box::new(Vector2::ZERO),
        Box::new(Vector2::new(-100.0, 0.0)),
    );
    let mut scheduler = FrameScheduler::new();
    let mut left_ledger = Ledger::default();
    let mut right_ledger = Ledger::default();

    left.start(&mut scheduler, &mut left_ledger);
    right.start(&mut scheduler, &mut right_ledger);

    while left.is_active() || right.is_active() {
        scheduler.advance_by(10.0);
        for handle in scheduler.due() {
            if !left.dispatch(handle, &mut scheduler, &mut left_ledger) {
                assert!(right.dispatch(handle, &mut scheduler, &mut right_ledger));
            }
        }
    }

    assert_eq!(left_ledger.landings.len(), 5);
    assert_eq!(right_ledger.landings.len(), 2);
    assert_eq!(left_ledger.completions, 1);
    assert_eq!(right_ledger.completions, 1);
    assert!(left_ledger
        .landings
        .iter()
        .all(|&(_, _, p)| close(p, Vector2::new(100.0, 0.0))));
    assert!(right_ledger
        .landings
        .iter()
        .all(|&(_, _, p)| close(p, Vector2::new(-100.0, 0.0))));
}

#[test]
fn test_restart_after_completion_draws_new_paths() {
    let mut batch = Batch::new(
        config(20, 10, 9),
        Box::new(Vector2::ZERO),
        Box::new(Vector2::new(50.0, 50.0)),
    );
    let mut scheduler = FrameScheduler::new();
    let mut ledger = Ledger::default();

    let first = batch.plan();
    batch.start(&mut scheduler, &mut ledger);
    batch.stop(&mut scheduler, &mut ledger);
    assert_eq!(ledger.completions, 1);
    assert!(!batch.is_active());

    batch.start(&mut scheduler, &mut ledger);
    let second = batch.plan();
    assert_eq!(second.len(), first.len());
    assert_ne!(first[0].control_points, second[0].control_points);

    batch.cancel(&mut scheduler, &mut ledger);
    assert_eq!(ledger.completions, 1);
    assert!(scheduler.is_idle());
    assert!(scheduler.now_ms() >= 0.0);
}
