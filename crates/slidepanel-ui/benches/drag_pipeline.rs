use std::cell::Cell;
use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use slidepanel_animation::ManualFrameClock;
use slidepanel_foundation::MotionEvent;
use slidepanel_geometry::IntRect;
use slidepanel_ui::{PanelConfig, PanelMeasurements, ScrollableChild, SlidingPanel};

const CONTAINER_WIDTH: i32 = 1080;
const CONTAINER_HEIGHT: i32 = 1920;
const SLIDEABLE_HEIGHT: i32 = 1800;
const FRAME_MS: u64 = 16;
const EVENT_INTERVAL_MS: u64 = 8;
const MOVE_SAMPLES: &[usize] = &[16, 64];

struct DragFixture {
    panel: SlidingPanel,
    clock: ManualFrameClock,
    uptime_ms: u64,
}

impl DragFixture {
    fn new(config: PanelConfig) -> Self {
        let clock = ManualFrameClock::new(0);
        let mut panel = SlidingPanel::new(config, Rc::new(clock.clone()), Box::new(()));
        panel.measure(
            PanelMeasurements::new(CONTAINER_WIDTH, CONTAINER_HEIGHT)
                .with_slideable_height(SLIDEABLE_HEIGHT),
        );
        panel.layout();
        Self {
            panel,
            clock,
            uptime_ms: 0,
        }
    }

    fn with_scrollable(mut self) -> Self {
        let bounds = IntRect::new(0, 120, CONTAINER_WIDTH, SLIDEABLE_HEIGHT);
        let position = Rc::new(Cell::new(0));
        self.panel.set_scrollable(Some(ScrollableChild::new(
            bounds,
            Rc::new(move |_: bool| position.get()),
        )));
        self
    }

    fn send(&mut self, event: MotionEvent) -> bool {
        self.panel.dispatch_touch_event(&event)
    }

    /// Drags from the collapsed panel toward the top in `moves` steps and
    /// lifts with the velocity intact.
    fn fling_open(&mut self, moves: usize) {
        let from = (CONTAINER_HEIGHT - 40) as f32;
        let step = (CONTAINER_HEIGHT / 2) as f32 / moves as f32;
        self.uptime_ms += EVENT_INTERVAL_MS;
        self.send(MotionEvent::down(0, 540.0, from, self.uptime_ms));
        let mut y = from;
        for _ in 0..moves {
            y -= step;
            self.uptime_ms += EVENT_INTERVAL_MS;
            self.send(MotionEvent::moved(0, 540.0, y, self.uptime_ms));
        }
        self.send(MotionEvent::up(0, 540.0, y, self.uptime_ms));
    }

    fn settle(&mut self) -> usize {
        let mut frames = 0;
        loop {
            self.clock.advance(FRAME_MS);
            frames += 1;
            if !self.panel.on_frame() {
                return frames;
            }
        }
    }
}

fn bench_fling_and_settle(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_pipeline_fling");
    for &moves in MOVE_SAMPLES {
        group.bench_with_input(BenchmarkId::new("moves", moves), &moves, |b, &moves| {
            b.iter(|| {
                let mut fixture = DragFixture::new(PanelConfig::default());
                fixture.fling_open(moves);
                black_box(fixture.settle());
                black_box(fixture.panel.panel_state());
            });
        });
    }
    group.finish();
}

fn bench_nested_scroll_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_pipeline_nested_scroll");
    for &moves in MOVE_SAMPLES {
        group.bench_with_input(BenchmarkId::new("moves", moves), &moves, |b, &moves| {
            b.iter(|| {
                let mut fixture = DragFixture::new(PanelConfig::default()).with_scrollable();
                fixture.fling_open(moves);
                black_box(fixture.panel.current_layout());
            });
        });
    }
    group.finish();
}

fn bench_programmatic_settle(c: &mut Criterion) {
    c.bench_function("drag_pipeline_programmatic_settle", |b| {
        let mut fixture = DragFixture::new(PanelConfig::default().with_anchor_point(0.5));
        b.iter(|| {
            fixture.panel.smooth_slide_to(1.0);
            let frames = fixture.settle();
            fixture.panel.smooth_slide_to(0.0);
            black_box(frames + fixture.settle());
        });
    });
}

criterion_group!(
    benches,
    bench_fling_and_settle,
    bench_nested_scroll_routing,
    bench_programmatic_settle
);
criterion_main!(benches);
