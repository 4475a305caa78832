//! Audio-side cost of held voices.
//!
//! Each block the synth drains its queue, checks every voice against the
//! registry for orphans, mixes and runs the effects rack.

use std::{hint::black_box, sync::Arc};

use criterion::{BenchmarkId, Criterion};
use sauce_pad::{
    config::SynthConfig,
    synth::{self, VoiceBank},
    touch::{ContactRegistry, EntityRef},
};

use crate::FINGER_COUNTS;

const BLOCK: usize = 256;

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/render");

    for &fingers in FINGER_COUNTS {
        let config = SynthConfig {
            voices: 16,
            ..SynthConfig::default()
        };
        let registry = Arc::new(ContactRegistry::new(16));
        let (mut bank, link) =
            synth::connect(&config, Arc::clone(&registry)).expect("valid synth config");
        let (mut synth, _) = link.into_synth(48_000.0);

        for finger in 0..fingers {
            let x = finger as f32 / fingers as f32;
            if let Some(voice) = bank.allocate_or_get(finger as i32, x, 0.3) {
                registry.bind(finger as i32, EntityRef::Voice(voice));
                bank.start(voice, x, 0.3);
            }
        }

        let mut buffer = vec![0.0f32; BLOCK];
        group.bench_with_input(BenchmarkId::new("held_voices", fingers), &fingers, |b, _| {
            b.iter(|| synth.render_block(black_box(&mut buffer)))
        });
    }

    group.finish();
}
