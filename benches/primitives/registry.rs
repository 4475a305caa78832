//! Contact registry operations.
//!
//! `contains_value` is the one the audio thread calls for every voice on
//! every block, so it is measured at full capacity.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sauce_pad::{
    control::ControlId,
    synth::VoiceId,
    touch::{ContactRegistry, EntityRef},
};

pub fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives/registry");

    for capacity in [16usize, 32] {
        let registry = ContactRegistry::new(capacity);

        group.bench_with_input(BenchmarkId::new("bind_unbind", capacity), &capacity, |b, _| {
            b.iter(|| {
                registry.bind(black_box(3), EntityRef::Voice(VoiceId(1)));
                registry.unbind(black_box(3))
            })
        });

        // Fill every slot, half voices and half controls
        for id in 0..capacity {
            let entity = if id % 2 == 0 {
                EntityRef::Voice(VoiceId(id as u16))
            } else {
                EntityRef::Control(ControlId(id as u16))
            };
            registry.bind(id as i32, entity);
        }

        group.bench_with_input(BenchmarkId::new("contains_miss", capacity), &capacity, |b, _| {
            b.iter(|| registry.contains_value(black_box(EntityRef::Voice(VoiceId(999)))))
        });

        group.bench_with_input(BenchmarkId::new("get", capacity), &capacity, |b, _| {
            b.iter(|| registry.get(black_box(capacity as i32 - 1)))
        });
    }

    group.finish();
}
