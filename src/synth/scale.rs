//! Mapping pad positions to pitch and loudness.

use crate::{Error, Result};

/// Convert a (possibly fractional) MIDI note number to frequency in Hz.
/// A4 = 440 Hz = MIDI note 69
#[inline]
pub fn midi_note_to_freq(note: f32) -> f32 {
    440.0 * 2.0_f32.powf((note - 69.0) / 12.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    name: &'static str,
    intervals: &'static [u8],
}

const SCALES: &[Scale] = &[
    Scale {
        name: "chromatic",
        intervals: &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
    },
    Scale {
        name: "major",
        intervals: &[0, 2, 4, 5, 7, 9, 11],
    },
    Scale {
        name: "minor",
        intervals: &[0, 2, 3, 5, 7, 8, 10],
    },
    Scale {
        name: "major_pentatonic",
        intervals: &[0, 2, 4, 7, 9],
    },
    Scale {
        name: "minor_pentatonic",
        intervals: &[0, 3, 5, 7, 10],
    },
    Scale {
        name: "blues",
        intervals: &[0, 3, 5, 6, 7, 10],
    },
];

impl Scale {
    pub fn by_name(name: &str) -> Result<Self> {
        SCALES
            .iter()
            .find(|scale| scale.name.eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| Error::UnknownScale(name.to_owned()))
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        SCALES.iter().map(|scale| scale.name)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn intervals(&self) -> &'static [u8] {
        self.intervals
    }
}

/// Turns pad-relative positions (0.0..=1.0 on both axes) into sound.
///
/// Left to right walks up the scale from `base_note` over `octaves`; top of
/// the pad is loudest.
#[derive(Debug, Clone, Copy)]
pub struct PadMapping {
    scale: Scale,
    base_note: u8,
    octaves: u8,
}

impl PadMapping {
    pub fn new(scale: Scale, base_note: u8, octaves: u8) -> Self {
        Self {
            scale,
            base_note,
            octaves: octaves.max(1),
        }
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Number of distinct notes across the pad.
    pub fn steps(&self) -> usize {
        self.scale.intervals.len() * self.octaves as usize
    }

    /// MIDI note for a horizontal pad position.
    pub fn note(&self, x: f32) -> u8 {
        let per_octave = self.scale.intervals.len();
        let steps = self.steps();
        let step = ((x.clamp(0.0, 1.0) * steps as f32) as usize).min(steps - 1);
        let octave = (step / per_octave) as u8;
        let interval = self.scale.intervals[step % per_octave];
        self.base_note
            .saturating_add(octave.saturating_mul(12))
            .saturating_add(interval)
            .min(127)
    }

    pub fn frequency(&self, x: f32) -> f32 {
        midi_note_to_freq(self.note(x) as f32)
    }

    pub fn amplitude(&self, y: f32) -> f32 {
        // Keep a floor so the bottom edge is quiet, not silent
        0.1 + 0.9 * (1.0 - y.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_scale_is_an_error() {
        assert!(matches!(
            Scale::by_name("lydian-dominant"),
            Err(Error::UnknownScale(_))
        ));
        assert_eq!(Scale::by_name("Minor").unwrap().name(), "minor");
    }

    #[test]
    fn pad_edges_map_to_scale_ends() {
        let mapping = PadMapping::new(Scale::by_name("minor_pentatonic").unwrap(), 57, 2);
        assert_eq!(mapping.note(0.0), 57);
        assert_eq!(mapping.note(0.19), 60); // second step: minor third
        assert_eq!(mapping.note(0.55), 69); // second octave root
        assert_eq!(mapping.note(1.0), 57 + 12 + 10);
    }

    #[test]
    fn a4_is_440() {
        let freq = midi_note_to_freq(69.0);
        assert!((freq - 440.0).abs() < 1e-3);
    }

    #[test]
    fn top_is_loudest() {
        let mapping = PadMapping::new(Scale::by_name("major").unwrap(), 60, 1);
        assert!(mapping.amplitude(0.0) > mapping.amplitude(1.0));
        assert!(mapping.amplitude(1.0) > 0.0);
    }
}
