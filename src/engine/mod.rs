pub mod allocator;
pub mod router;

use std::{sync::Arc, time::Duration};

use crate::{
    config::SurfaceConfig,
    control::ControllerChain,
    synth::VoiceBank,
    touch::{ContactRegistry, EntityRef, Rect, StartupBarrier, TouchBatch},
    Error, Result,
};

use self::{
    allocator::{FingeredVoice, VoiceAllocator},
    router::TouchRouter,
};

/// Rendering side of the engine: told when a voice appears or goes away.
pub trait Surface {
    fn publish(&mut self, entity: EntityRef);
    fn unpublish(&mut self, entity: EntityRef);
}

/// A surface that draws nothing.
impl Surface for () {
    fn publish(&mut self, _: EntityRef) {}
    fn unpublish(&mut self, _: EntityRef) {}
}

/// Touch dispatch for one surface.
///
/// Owns the voice allocator, the controls and the rendering hook; shares the
/// contact registry with the audio side. Batches are ignored until
/// [`start`](Self::start) has built the controls.
pub struct TouchEngine<B: VoiceBank, S: Surface> {
    registry: Arc<ContactRegistry>,
    voices: VoiceAllocator<B>,
    router: TouchRouter,
    chain: Option<ControllerChain>,
    surface: S,
}

impl<B: VoiceBank, S: Surface> TouchEngine<B, S> {
    pub fn new(config: &SurfaceConfig, registry: Arc<ContactRegistry>, bank: B, surface: S) -> Self {
        Self {
            registry,
            voices: VoiceAllocator::new(bank, config.pad),
            router: TouchRouter::new(config.precedence, config.pad_overlap),
            chain: None,
            surface,
        }
    }

    /// Wait for the audio side, then build the controls from what it sent.
    ///
    /// Returns false without waiting if the engine was already started.
    pub fn start<T, F>(&mut self, barrier: &StartupBarrier<T>, build: F) -> bool
    where
        T: Clone,
        F: FnOnce(T) -> ControllerChain,
    {
        if self.chain.is_some() {
            return false;
        }
        let value = barrier.await_ready();
        self.install(build(value));
        true
    }

    /// Like [`start`](Self::start), failing if the audio side stays silent
    /// for `timeout`.
    pub fn start_timeout<T, F>(
        &mut self,
        barrier: &StartupBarrier<T>,
        timeout: Duration,
        build: F,
    ) -> Result<bool>
    where
        T: Clone,
        F: FnOnce(T) -> ControllerChain,
    {
        if self.chain.is_some() {
            return Ok(false);
        }
        let value = barrier
            .await_ready_timeout(timeout)
            .ok_or(Error::StartupTimeout(timeout))?;
        self.install(build(value));
        Ok(true)
    }

    fn install(&mut self, chain: ControllerChain) {
        log::info!(
            "touch engine ready: {} controls in {} layers",
            chain.len(),
            chain.layers().len()
        );
        self.chain = Some(chain);
    }

    pub fn is_ready(&self) -> bool {
        self.chain.is_some()
    }

    /// Route one batch. Returns false if the engine has not started yet.
    pub fn handle_batch(&mut self, batch: &TouchBatch) -> bool {
        let Some(chain) = self.chain.as_mut() else {
            return false;
        };
        self.router.dispatch(
            batch,
            &self.registry,
            &mut self.voices,
            chain,
            &mut self.surface,
        );
        true
    }

    pub fn registry(&self) -> &Arc<ContactRegistry> {
        &self.registry
    }

    pub fn chain(&self) -> Option<&ControllerChain> {
        self.chain.as_ref()
    }

    pub fn chain_mut(&mut self) -> Option<&mut ControllerChain> {
        self.chain.as_mut()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn bank(&self) -> &B {
        self.voices.bank()
    }

    pub fn bank_mut(&mut self) -> &mut B {
        self.voices.bank_mut()
    }

    pub fn fingered(&self) -> impl Iterator<Item = &FingeredVoice> {
        self.voices.fingered()
    }

    pub fn pad(&self) -> Rect {
        self.voices.pad()
    }

    /// Move the voice region, e.g. after a resize.
    pub fn set_pad(&mut self, pad: Rect) {
        self.voices.set_pad(pad);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::VoiceId;
    use std::thread;

    struct Silent;

    impl VoiceBank for Silent {
        fn capacity(&self) -> usize {
            1
        }
        fn allocate_or_get(&mut self, _: i32, _: f32, _: f32) -> Option<VoiceId> {
            Some(VoiceId(0))
        }
        fn start(&mut self, _: VoiceId, _: f32, _: f32) {}
        fn update(&mut self, _: VoiceId, _: f32, _: f32) {}
        fn release(&mut self, _: VoiceId) {}
        fn stop_all(&mut self) {}
        fn is_playing(&self) -> bool {
            false
        }
    }

    fn engine() -> TouchEngine<Silent, ()> {
        let config = SurfaceConfig::default();
        let registry = Arc::new(ContactRegistry::new(config.max_contacts));
        TouchEngine::new(&config, registry, Silent, ())
    }

    #[test]
    fn batches_before_start_are_unhandled() {
        let mut engine = engine();
        assert!(!engine.handle_batch(&TouchBatch::down(0, 0.5, 0.5)));
        assert!(engine.registry().is_empty());
    }

    #[test]
    fn start_builds_once() {
        let mut engine = engine();
        let barrier = Arc::new(StartupBarrier::<u8>::new());

        let audio = {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || barrier.signal_ready(1))
        };

        let mut builds = 0;
        assert!(engine.start(&barrier, |_| {
            builds += 1;
            ControllerChain::new()
        }));
        assert!(!engine.start(&barrier, |_| {
            builds += 1;
            ControllerChain::new()
        }));
        assert!(audio.join().unwrap());
        assert_eq!(builds, 1);
        assert!(engine.handle_batch(&TouchBatch::down(0, 0.5, 0.5)));
    }

    #[test]
    fn silent_audio_side_times_out() {
        let mut engine = engine();
        let barrier = StartupBarrier::<()>::new();
        let result = engine.start_timeout(&barrier, Duration::from_millis(5), |_| ControllerChain::new());
        assert!(matches!(result, Err(Error::StartupTimeout(_))));
        assert!(!engine.is_ready());
    }
}
