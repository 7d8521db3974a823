#![allow(clippy::float_cmp)]

use super::*;
use crate::coords::Point;

fn line() -> DrawCommand {
    DrawCommand::Line { from: Point::new(0.0, 0.0), to: Point::new(1.0, 1.0), color: Color::BLACK, thickness: 1.0 }
}

// =============================================================
// TurtleRegistry
// =============================================================

#[test]
fn registry_ids_start_at_zero_and_increase() {
    let mut reg = TurtleRegistry::new();
    assert_eq!(reg.register(TurtleState::default()), 0);
    assert_eq!(reg.register(TurtleState::default()), 1);
    assert_eq!(reg.register(TurtleState::default()), 2);
    assert_eq!(reg.len(), 3);
}

#[test]
fn registry_ids_are_not_reused_after_removal() {
    let mut reg = TurtleRegistry::new();
    let a = reg.register(TurtleState::default());
    assert!(reg.remove(a).is_some());
    let b = reg.register(TurtleState::default());
    assert_ne!(a, b);
    assert_eq!(b, 1);
}

#[test]
fn registry_update_replaces_snapshot() {
    let mut reg = TurtleRegistry::new();
    let id = reg.register(TurtleState::default());
    let moved = TurtleState::default().with_heading(90.0);
    assert!(reg.update(id, moved));
    assert_eq!(reg.get(id), Some(&moved));
}

#[test]
fn registry_update_unknown_id_is_noop() {
    let mut reg = TurtleRegistry::new();
    assert!(!reg.update(7, TurtleState::default()));
    assert!(reg.is_empty());
}

#[test]
fn registry_iter_is_in_id_order() {
    let mut reg = TurtleRegistry::new();
    for _ in 0..4 {
        reg.register(TurtleState::default());
    }
    reg.remove(1);
    let ids: Vec<TurtleId> = reg.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![0, 2, 3]);
}

// =============================================================
// MemoryCanvas: contract
// =============================================================

#[test]
fn new_canvas_reports_extents_and_is_ready() {
    let canvas = MemoryCanvas::new(640.0, 480.0);
    assert_eq!(canvas.width(), 640.0);
    assert_eq!(canvas.height(), 480.0);
    assert!(canvas.is_ready());
    assert_eq!(canvas.surface(), Surface::new(640.0, 480.0));
}

#[test]
fn default_canvas_is_800_by_600_white() {
    let canvas = MemoryCanvas::default();
    assert_eq!(canvas.surface(), Surface::new(800.0, 600.0));
    assert_eq!(canvas.background_color(), Color::WHITE);
}

#[test]
fn add_command_appends_in_order_and_clear_empties() {
    let canvas = MemoryCanvas::default();
    canvas.add_command(line());
    canvas.add_command(DrawCommand::FillBegin { color: Color::RED });
    assert_eq!(canvas.command_count(), 2);
    assert_eq!(canvas.commands()[1], DrawCommand::FillBegin { color: Color::RED });
    canvas.clear();
    assert_eq!(canvas.command_count(), 0);
}

#[test]
fn clear_keeps_turtle_snapshots() {
    let canvas = MemoryCanvas::default();
    let id = canvas.register_turtle(TurtleState::default());
    canvas.add_command(line());
    canvas.clear();
    assert!(canvas.turtle(id).is_some());
}

#[test]
fn register_update_remove_round_trip() {
    let canvas = MemoryCanvas::default();
    let id = canvas.register_turtle(TurtleState::default());
    assert_eq!(id, 0);
    let turned = TurtleState::default().with_heading(45.0);
    canvas.update_turtle(id, turned);
    assert_eq!(canvas.turtle(id), Some(turned));
    canvas.remove_turtle(id);
    assert_eq!(canvas.turtle(id), None);
    assert_eq!(canvas.turtle_count(), 0);
    assert_eq!(canvas.register_turtle(TurtleState::default()), 1);
}

#[test]
fn update_unknown_turtle_does_not_register_it() {
    let canvas = MemoryCanvas::default();
    canvas.update_turtle(3, TurtleState::default());
    assert_eq!(canvas.turtle_count(), 0);
}

#[test]
fn turtles_lists_snapshots_in_id_order() {
    let canvas = MemoryCanvas::default();
    let a = canvas.register_turtle(TurtleState::default());
    let b = canvas.register_turtle(TurtleState::default().with_visible(false));
    let all = canvas.turtles();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].0, a);
    assert_eq!(all[1].0, b);
    assert!(!all[1].1.visible);
}

#[test]
fn invalidate_and_background_change_count_redraw_hints() {
    let canvas = MemoryCanvas::default();
    canvas.invalidate();
    canvas.invalidate();
    canvas.set_background_color(Color::BLACK);
    assert_eq!(canvas.invalidations(), 3);
    assert_eq!(canvas.background_color(), Color::BLACK);
}

#[test]
fn resize_changes_reported_extents() {
    let canvas = MemoryCanvas::new(100.0, 100.0);
    canvas.resize(300.0, 200.0);
    assert_eq!(canvas.width(), 300.0);
    assert_eq!(canvas.height(), 200.0);
}

#[test]
fn unattached_canvas_is_not_ready_until_attached() {
    let canvas = MemoryCanvas::unattached(Pacing::Instant);
    assert!(!canvas.is_ready());
    canvas.attach(320.0, 240.0);
    assert!(canvas.is_ready());
    assert_eq!(canvas.surface(), Surface::new(320.0, 240.0));
}

// =============================================================
// MemoryCanvas: pacing
// =============================================================

#[test]
fn instant_pacing_does_not_animate() {
    let canvas = MemoryCanvas::new(10.0, 10.0);
    assert_eq!(canvas.pacing(), Pacing::Instant);
    assert!(!canvas.animates());
}

#[test]
fn realtime_and_recorded_pacing_animate() {
    assert!(MemoryCanvas::with_pacing(10.0, 10.0, Pacing::Realtime).animates());
    assert!(MemoryCanvas::with_pacing(10.0, 10.0, Pacing::Recorded).animates());
}

#[tokio::test]
async fn instant_delay_records_nothing() {
    let canvas = MemoryCanvas::new(10.0, 10.0);
    canvas.delay(50).await;
    assert!(canvas.recorded_delays().is_empty());
}

#[tokio::test]
async fn recorded_delay_keeps_call_order() {
    let canvas = MemoryCanvas::with_pacing(10.0, 10.0, Pacing::Recorded);
    canvas.delay(95).await;
    canvas.delay(5).await;
    assert_eq!(canvas.recorded_delays(), vec![95, 5]);
}

#[tokio::test(start_paused = true)]
async fn realtime_delay_sleeps_on_tokio_timer() {
    let canvas = MemoryCanvas::with_pacing(10.0, 10.0, Pacing::Realtime);
    let start = tokio::time::Instant::now();
    canvas.delay(250).await;
    assert!(start.elapsed() >= Duration::from_millis(250));
    assert!(canvas.recorded_delays().is_empty());
}
