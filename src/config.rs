//! Surface configuration, read from TOML.
//!
//! Every field has a default, so an empty file is a valid config:
//!
//! ```toml
//! max_contacts = 10
//! precedence = "bound-first"
//! pad_overlap = "controls"
//! startup_timeout_ms = 3000
//!
//! [pad]
//! x = 0.0
//! y = 0.0
//! width = 800.0
//! height = 480.0
//!
//! [synth]
//! voices = 8
//! scale = "blues"
//! base_note = 48
//! octaves = 3
//! ```

use std::{path::Path, time::Duration};

use serde::Deserialize;

use crate::{
    synth::scale::Scale,
    touch::Rect,
    Error, Result, MAX_CONTACTS,
};

/// Upper bound on registry capacity; contact ids at or above it are ignored.
pub const MAX_REGISTRY_CAPACITY: usize = 32;

/// Order in which a batch's contacts are visited.
///
/// Either way, contacts already bound to a control settle before new
/// contacts are routed, so controls win ties with the voice pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Precedence {
    /// Highest batch index first
    #[default]
    ReverseIndex,
    /// Contacts bound at batch start first, then the rest; each pass in
    /// reverse index order
    BoundFirst,
}

/// Who gets an unbound contact that lands on a control drawn over the pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PadOverlap {
    #[default]
    Pad,
    Controls,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    pub voices: usize,
    pub queue_capacity: usize,
    pub scale: String,
    pub base_note: u8,
    pub octaves: u8,
    pub attack_ms: f32,
    pub release_ms: f32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            voices: 8,
            queue_capacity: 256,
            scale: "minor_pentatonic".into(),
            base_note: 57,
            octaves: 2,
            attack_ms: 5.0,
            release_ms: 250.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub pad: Rect,
    pub max_contacts: usize,
    pub precedence: Precedence,
    pub pad_overlap: PadOverlap,
    pub startup_timeout_ms: Option<u64>,
    pub synth: SynthConfig,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            pad: Rect::default(),
            max_contacts: MAX_CONTACTS,
            precedence: Precedence::default(),
            pad_overlap: PadOverlap::default(),
            startup_timeout_ms: Some(5_000),
            synth: SynthConfig::default(),
        }
    }
}

impl SurfaceConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_contacts == 0 || self.max_contacts > MAX_REGISTRY_CAPACITY {
            return Err(Error::InvalidConfig(format!(
                "max_contacts must be in 1..={MAX_REGISTRY_CAPACITY}, got {}",
                self.max_contacts
            )));
        }
        if self.pad.width <= 0.0 || self.pad.height <= 0.0 {
            return Err(Error::InvalidConfig("pad must have a positive size".into()));
        }
        let synth = &self.synth;
        if synth.voices == 0 || synth.voices > u16::MAX as usize {
            return Err(Error::InvalidConfig(format!(
                "synth.voices must be at least 1, got {}",
                synth.voices
            )));
        }
        if synth.queue_capacity == 0 {
            return Err(Error::InvalidConfig("synth.queue_capacity must be non-zero".into()));
        }
        if synth.base_note > 127 {
            return Err(Error::InvalidConfig(format!(
                "synth.base_note must be a MIDI note, got {}",
                synth.base_note
            )));
        }
        Scale::by_name(&synth.scale)?;
        Ok(())
    }

    pub fn startup_timeout(&self) -> Option<Duration> {
        self.startup_timeout_ms.map(Duration::from_millis)
    }
}
