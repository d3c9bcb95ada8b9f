use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use segline_lib::gesture::{CaptureSurface, PointerId};
use segline_lib::packing::PackingPolicy;
use segline_lib::timeline::{PointerTarget, TimelineLayout};
use segline_lib::{
    compose, EngineInput, EngineState, Segment, SegmentId, TimelineConfig, TimelineEvent,
    TimelineSession,
};

#[derive(Clone, Default)]
struct CountingSurface {
    held: Arc<Mutex<i32>>,
}

impl CountingSurface {
    fn held(&self) -> i32 {
        *self.held.lock().unwrap()
    }
}

impl CaptureSurface for CountingSurface {
    fn acquire(&mut self, _pointer: PointerId) {
        *self.held.lock().unwrap() += 1;
    }

    fn release(&mut self, _pointer: PointerId) {
        *self.held.lock().unwrap() -= 1;
    }
}

fn seg(id: i64, label: &str, start: f64, end: f64) -> Segment {
    Segment::new(SegmentId::Persisted(id), label, start, end)
}

fn loaded(
    config: TimelineConfig,
    segments: Vec<Segment>,
    surface: CountingSurface,
) -> TimelineSession<CountingSurface, Vec<TimelineEvent>> {
    let mut session = TimelineSession::new(config, surface, Vec::new());
    session.dispatch_all([
        EngineInput::SetClock {
            current_time: 0.0,
            duration: 120.0,
        },
        EngineInput::SetTrackWidth { width_px: 1200.0 },
        EngineInput::SetSegments { segments },
    ]);
    session
}

fn random_segments(seed: u64, count: usize) -> Vec<Segment> {
    let labels = ["polyp", "blood", "snare", "nbi"];
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let start: f64 = rng.gen_range(0.0..110.0);
            let len: f64 = rng.gen_range(0.5..15.5);
            let label = labels[rng.gen_range(0..labels.len())];
            seg(i as i64, label, start, (start + len).min(120.0))
        })
        .collect()
}

fn assert_rows_disjoint(layout: &TimelineLayout, gap: f64) {
    for row in &layout.rows {
        for (i, a) in row.segments.iter().enumerate() {
            for b in row.segments.iter().skip(i + 1) {
                assert!(
                    a.end_time + gap <= b.start_time || b.end_time + gap <= a.start_time,
                    "overlap in {}: {:?} / {:?}",
                    row.key,
                    (a.start_time, a.end_time),
                    (b.start_time, b.end_time)
                );
            }
        }
    }
}

#[test]
fn drag_scenario_emits_single_final_move() {
    let surface = CountingSurface::default();
    let mut session = loaded(
        TimelineConfig::default(),
        vec![seg(1, "polyp", 10.0, 30.0)],
        surface.clone(),
    );

    session.dispatch(EngineInput::PointerDown {
        pointer_id: PointerId(7),
        x_px: 50.0,
        target: PointerTarget::SegmentBody {
            id: SegmentId::Persisted(1),
        },
    });
    assert_eq!(surface.held(), 1);
    for x in [80.0, 150.0, 260.0] {
        session.dispatch(EngineInput::PointerMove {
            pointer_id: PointerId(7),
            x_px: x,
        });
    }
    assert!(session.sink().is_empty());

    session.dispatch(EngineInput::PointerUp {
        pointer_id: PointerId(7),
        x_px: 290.0,
    });
    assert_eq!(
        session.sink().as_slice(),
        &[TimelineEvent::SegmentMove {
            id: SegmentId::Persisted(1),
            start_time: 34.0,
            end_time: 54.0,
            is_final: true,
        }]
    );
    assert_eq!(surface.held(), 0);
}

#[test]
fn greedy_forced_overlap_keeps_every_segment() {
    let mut config = TimelineConfig::default();
    config.packing.policy = PackingPolicy::Greedy;
    config.packing.max_rows = 1;

    let session = loaded(
        config,
        vec![seg(1, "polyp", 0.0, 10.0), seg(2, "blood", 5.0, 15.0)],
        CountingSurface::default(),
    );
    let layout = session.layout();
    assert_eq!(layout.rows.len(), 1);
    assert_eq!(layout.rows[0].segments.len(), 2);
}

#[test]
fn playhead_is_zero_before_media_loads() {
    let mut state = EngineState::default();
    state.apply(EngineInput::SetClock {
        current_time: 12.0,
        duration: 0.0,
    });
    let layout = compose(&state);
    assert_eq!(layout.playhead_percent, 0.0);
    assert!(!layout.playhead_percent.is_nan());
}

#[test]
fn packing_never_overlaps_and_is_deterministic() {
    for seed in 1..20u64 {
        let segments = random_segments(seed, 40);

        let mut greedy = TimelineConfig::default();
        greedy.packing.policy = PackingPolicy::Greedy;
        greedy.packing.max_rows = 100;
        let first = loaded(greedy.clone(), segments.clone(), CountingSurface::default());
        let second = loaded(greedy, segments.clone(), CountingSurface::default());
        assert_rows_disjoint(first.layout(), 0.1);
        assert_eq!(first.layout(), second.layout());

        let grouped = loaded(TimelineConfig::default(), segments, CountingSurface::default());
        assert_rows_disjoint(grouped.layout(), -1e-4);
        for row in &grouped.layout().rows {
            assert!(row.segments.iter().all(|s| Some(&s.label) == row.label.as_ref()));
        }
        assert_eq!(grouped.layout().segment_count(), 40);
    }
}

#[test]
fn drags_never_leave_the_media() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..50 {
        let mut session = loaded(
            TimelineConfig::default(),
            vec![seg(1, "polyp", 40.0, 60.0)],
            CountingSurface::default(),
        );
        let id = SegmentId::Persisted(1);
        let target = match rng.gen_range(0..3) {
            0 => PointerTarget::SegmentBody { id },
            1 => PointerTarget::StartHandle { id },
            _ => PointerTarget::EndHandle { id },
        };
        session.dispatch(EngineInput::PointerDown {
            pointer_id: PointerId(1),
            x_px: 500.0,
            target,
        });
        session.dispatch(EngineInput::PointerUp {
            pointer_id: PointerId(1),
            x_px: rng.gen_range(-2000.0..2000.0),
        });

        let segment = &session.state().segments()[0];
        assert!(segment.start_time >= 0.0);
        assert!(segment.end_time <= 120.0);
        assert!(segment.start_time < segment.end_time);
    }
}

#[test]
fn cancelled_gesture_restores_bits() {
    let segments = random_segments(5, 10);
    let mut session = loaded(
        TimelineConfig::default(),
        segments.clone(),
        CountingSurface::default(),
    );
    session.dispatch(EngineInput::PointerDown {
        pointer_id: PointerId(1),
        x_px: 10.0,
        target: PointerTarget::StartHandle {
            id: SegmentId::Persisted(3),
        },
    });
    session.dispatch(EngineInput::PointerMove {
        pointer_id: PointerId(1),
        x_px: 333.3,
    });
    session.dispatch(EngineInput::PointerCancel {
        pointer_id: PointerId(1),
    });

    for (after, before) in session.state().segments().iter().zip(&segments) {
        assert_eq!(after.start_time.to_bits(), before.start_time.to_bits());
        assert_eq!(after.end_time.to_bits(), before.end_time.to_bits());
    }
    assert!(session.sink().is_empty());
}

#[test]
fn selection_creates_request_and_keyboard_deletes_active() {
    let mut session = loaded(
        TimelineConfig::default(),
        vec![seg(1, "polyp", 80.0, 90.0)],
        CountingSurface::default(),
    );
    session.dispatch_all([
        EngineInput::SetSelectionMode { enabled: true },
        EngineInput::PointerDown {
            pointer_id: PointerId(2),
            x_px: 120.0,
            target: PointerTarget::Track,
        },
        EngineInput::PointerMove {
            pointer_id: PointerId(2),
            x_px: 250.0,
        },
    ]);
    assert!(session.layout().selection.is_some());

    session.dispatch(EngineInput::PointerUp {
        pointer_id: PointerId(2),
        x_px: 300.0,
    });
    session.dispatch(EngineInput::SegmentClick {
        id: SegmentId::Persisted(1),
    });
    session.dispatch(EngineInput::KeyDown {
        key: "Backspace".into(),
        editable_target: true,
    });
    session.dispatch(EngineInput::KeyDown {
        key: "Delete".into(),
        editable_target: false,
    });

    assert_eq!(
        session.sink().as_slice(),
        &[
            TimelineEvent::TimeSelection {
                start: 12.0,
                end: 30.0
            },
            TimelineEvent::SegmentSelect {
                id: SegmentId::Persisted(1)
            },
            TimelineEvent::SegmentDelete {
                id: SegmentId::Persisted(1)
            },
        ]
    );
}
