//! Lock-free parameters shared between controls and the audio thread.
//!
//! A knob writes, the effects rack reads once per block. Values are stored
//! as `f32` bits in an `AtomicU32`; relaxed ordering is enough because each
//! parameter is independent and a block may see either the old or new value.

use std::sync::{
    atomic::{AtomicBool, AtomicU32, Ordering},
    Arc,
};

struct ParamInner {
    name: &'static str,
    min: f32,
    max: f32,
    value: AtomicU32,
}

/// A continuous value in `min..=max`.
#[derive(Clone)]
pub struct Param {
    inner: Arc<ParamInner>,
}

impl Param {
    pub fn new(name: &'static str, min: f32, max: f32, value: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            inner: Arc::new(ParamInner {
                name,
                min,
                max,
                value: AtomicU32::new(value.clamp(min, max).to_bits()),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.inner.value.load(Ordering::Relaxed))
    }

    pub fn set(&self, value: f32) {
        let value = value.clamp(self.inner.min, self.inner.max);
        self.inner.value.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Current value mapped to 0.0..=1.0.
    pub fn normalized(&self) -> f32 {
        let range = self.inner.max - self.inner.min;
        if range <= 0.0 {
            return 0.0;
        }
        (self.get() - self.inner.min) / range
    }

    pub fn set_normalized(&self, amount: f32) {
        let amount = amount.clamp(0.0, 1.0);
        self.set(self.inner.min + amount * (self.inner.max - self.inner.min));
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Param")
            .field("name", &self.inner.name)
            .field("value", &self.get())
            .finish()
    }
}

/// An on/off switch.
#[derive(Clone, Debug)]
pub struct Toggle {
    name: &'static str,
    state: Arc<AtomicBool>,
}

impl Toggle {
    pub fn new(name: &'static str, on: bool) -> Self {
        Self {
            name,
            state: Arc::new(AtomicBool::new(on)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_on(&self) -> bool {
        self.state.load(Ordering::Relaxed)
    }

    pub fn set(&self, on: bool) {
        self.state.store(on, Ordering::Relaxed);
    }

    pub fn flip(&self) {
        self.state.fetch_xor(true, Ordering::Relaxed);
    }
}
