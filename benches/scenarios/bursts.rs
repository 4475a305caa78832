//! Whole gestures: N fingers land one by one, slide together, then lift.
//!
//! Every batch is built up front, so the loop measures routing only (plus a
//! short render to drain the voice queue, as the audio thread would).

use std::{hint::black_box, sync::Arc};

use criterion::{BenchmarkId, Criterion};
use sauce_pad::{
    control::{ControllerChain, Knob},
    synth,
    touch::{ContactRegistry, Rect, StartupBarrier, TouchAction, TouchBatch},
    SurfaceConfig, TouchEngine,
};

use crate::FINGER_COUNTS;

const MOVES: usize = 8;

fn gesture(fingers: usize) -> Vec<TouchBatch> {
    let position = |finger: usize, step: usize| {
        let x = (finger as f32 + 0.5) / fingers as f32 * 0.8;
        let y = 0.2 + step as f32 * 0.05;
        (x, y)
    };
    let with_fingers = |action: TouchAction, subject: Option<usize>, count: usize, step: usize| {
        let mut batch = TouchBatch::new(action);
        if let Some(subject) = subject {
            batch = batch.with_subject(subject as i32);
        }
        (0..count).fold(batch, |b, f| {
            let (x, y) = position(f, step);
            b.with_contact(f as i32, x, y)
        })
    };

    let mut batches = Vec::new();
    for f in 0..fingers {
        let action = if f == 0 {
            TouchAction::Down
        } else {
            TouchAction::PointerDown
        };
        batches.push(with_fingers(action, Some(f), f + 1, 0));
    }
    for step in 1..=MOVES {
        batches.push(with_fingers(TouchAction::Move, None, fingers, step));
    }
    for f in (1..fingers).rev() {
        batches.push(with_fingers(TouchAction::PointerUp, Some(f), f + 1, MOVES));
    }
    batches.push(with_fingers(TouchAction::Up, Some(0), 1, MOVES));
    batches
}

pub fn bench_bursts(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/bursts");

    for &fingers in FINGER_COUNTS {
        let mut config = SurfaceConfig::default();
        config.synth.voices = 16;
        config.synth.queue_capacity = 1024;

        let registry = Arc::new(ContactRegistry::new(config.max_contacts));
        let (bank, link) =
            synth::connect(&config.synth, Arc::clone(&registry)).expect("valid synth config");
        let (mut synth, params) = link.into_synth(48_000.0);

        let barrier = StartupBarrier::new();
        barrier.signal_ready(params);
        let mut engine = TouchEngine::new(&config, registry, bank, ());
        engine.start(&barrier, |params| {
            // A knob off to the side so the chain is not empty
            let mut chain = ControllerChain::new();
            let knob = chain.insert(Knob::new("gain", Rect::new(0.9, 0.0, 0.1, 0.5), params.gain));
            chain.push_layer(knob);
            chain
        });

        let batches = gesture(fingers);
        let mut drain = vec![0.0f32; 64];

        group.bench_with_input(BenchmarkId::new("press_slide_lift", fingers), &fingers, |b, _| {
            b.iter(|| {
                for batch in &batches {
                    engine.handle_batch(black_box(batch));
                }
                synth.render_block(&mut drain);
            })
        });
    }

    group.finish();
}
