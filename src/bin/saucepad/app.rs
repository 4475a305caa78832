//! SaucePad - wires the audio thread, the touch engine and the terminal

use std::{
    io::stdout,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use rtrb::{Producer, RingBuffer};

use sauce_pad::{
    synth::{self, fx::FxParams, AudioLink},
    touch::{ContactRegistry, StartupBarrier},
    SurfaceConfig, TouchEngine, MAX_BLOCK_SIZE,
};

use super::ui::{layout, PadView, UiApp};

/// Samples buffered for the oscilloscope
const SCOPE_CAPACITY: usize = 8192;

pub struct SaucePad {
    config: SurfaceConfig,
}

impl SaucePad {
    pub fn new(config: SurfaceConfig) -> Self {
        Self { config }
    }

    /// Run until the user quits.
    pub fn run(self) -> EyreResult<()> {
        let registry = Arc::new(ContactRegistry::new(self.config.max_contacts));
        let (bank, link) = synth::connect(&self.config.synth, Arc::clone(&registry))
            .wrap_err("failed to set up the voice bank")?;

        let barrier = Arc::new(StartupBarrier::<FxParams>::new());
        let shutdown = Arc::new(AtomicBool::new(false));
        let (scope_tx, scope_rx) = RingBuffer::new(SCOPE_CAPACITY);

        // Audio owns its stream for its whole life, so it gets its own thread
        let audio = {
            let barrier = Arc::clone(&barrier);
            let shutdown = Arc::clone(&shutdown);
            thread::Builder::new()
                .name("saucepad-audio".into())
                .spawn(move || {
                    if let Err(err) = run_audio(link, &barrier, scope_tx, &shutdown) {
                        log::error!("audio thread failed: {err:#}");
                    }
                })
                .wrap_err("failed to spawn audio thread")?
        };

        let mut engine = TouchEngine::new(&self.config, registry, bank, PadView::default());
        engine.set_pad(layout::PAD);

        let started = match self.config.startup_timeout() {
            Some(timeout) => engine
                .start_timeout(barrier.as_ref(), timeout, layout::build_controls)
                .map(|_| ()),
            None => {
                engine.start(barrier.as_ref(), layout::build_controls);
                Ok(())
            }
        };
        if let Err(err) = started {
            shutdown.store(true, Ordering::Release);
            let _ = audio.join();
            return Err(err).wrap_err("audio output never became ready (see the log file)");
        }

        let mut terminal = ratatui::init();
        execute!(stdout(), EnableMouseCapture)?;

        let result = UiApp::new(engine, scope_rx, self.config.synth.clone()).run(&mut terminal);

        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        shutdown.store(true, Ordering::Release);
        if audio.join().is_err() {
            log::error!("audio thread panicked");
        }
        result
    }
}

/// Audio thread body: open the device, build the synth, signal the UI,
/// then keep the stream alive until shutdown.
fn run_audio(
    link: AudioLink,
    barrier: &StartupBarrier<FxParams>,
    mut scope_tx: Producer<f32>,
    shutdown: &AtomicBool,
) -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    log::info!("audio output: {sample_rate} Hz, {channels} channels");

    let (mut synth, params) = link.into_synth(sample_rate);
    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| {
            let total_frames = data.len() / channels;
            let mut frames_written = 0;

            while frames_written < total_frames {
                let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                let block = &mut render_buf[..frames];
                synth.render_block(block);

                // Mono to every channel
                let out = &mut data[frames_written * channels..(frames_written + frames) * channels];
                for (frame, &sample) in out.chunks_mut(channels).zip(block.iter()) {
                    frame.fill(sample);
                }

                // The scope is best effort; a full buffer just drops samples
                for &sample in block.iter() {
                    if scope_tx.push(sample).is_err() {
                        break;
                    }
                }

                frames_written += frames;
            }
        },
        |err| log::error!("audio stream error: {err}"),
        None,
    )?;
    stream.play()?;

    barrier.signal_ready(params);

    while !shutdown.load(Ordering::Acquire) {
        thread::sleep(Duration::from_millis(50));
    }
    drop(stream);
    Ok(())
}
