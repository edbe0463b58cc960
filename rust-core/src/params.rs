//! Effect parameters shared between the control thread and the audio thread
//!
//! Each parameter is its own atomic cell, so a reader sees every value either
//! before or after a write, never a torn one. The audio thread reads all of
//! them once per processed chunk through [`PhaserParams::snapshot`].

use atomic_float::AtomicF32;
use std::sync::atomic::{AtomicBool, Ordering};

/// Lock-free phaser parameters
#[derive(Debug)]
pub struct PhaserParams {
    /// Notch spacing as a MIDI note (69 = A4 = 440 Hz)
    pitch: AtomicF32,

    /// Rotation of the comb pattern, wrapped into [0, 1)
    phase: AtomicF32,

    /// 0 = linear notch spacing, 1 = logarithmic
    morph: AtomicF32,

    /// Random per-bin phase rotation
    metallic: AtomicBool,
}

/// Parameter values read at the start of a processing call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    pub pitch: f32,
    pub phase: f32,
    pub morph: f32,
    pub metallic: bool,
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            pitch: 69.0,
            phase: 0.0,
            morph: 0.0,
            metallic: false,
        }
    }
}

impl Default for PhaserParams {
    fn default() -> Self {
        Self::from_snapshot(ParamSnapshot::default())
    }
}

impl PhaserParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(values: ParamSnapshot) -> Self {
        let params = Self {
            pitch: AtomicF32::new(0.0),
            phase: AtomicF32::new(0.0),
            morph: AtomicF32::new(0.0),
            metallic: AtomicBool::new(false),
        };
        params.set_pitch(values.pitch);
        params.set_phase(values.phase);
        params.set_morph(values.morph);
        params.set_metallic(values.metallic);
        params
    }

    /// Set pitch in MIDI note units; fractional and out-of-keyboard notes are kept
    pub fn set_pitch(&self, pitch: f32) {
        if pitch.is_finite() {
            self.pitch.store(pitch, Ordering::Relaxed);
        }
    }

    /// Set comb phase; any finite value is wrapped into [0, 1)
    pub fn set_phase(&self, phase: f32) {
        if phase.is_finite() {
            let wrapped = phase - phase.floor();
            // floor of a value just below an integer can round up to 1.0
            let wrapped = if wrapped >= 1.0 { 0.0 } else { wrapped };
            self.phase.store(wrapped, Ordering::Relaxed);
        }
    }

    /// Set morph, clamped to [0, 1]
    pub fn set_morph(&self, morph: f32) {
        if morph.is_finite() {
            self.morph.store(morph.clamp(0.0, 1.0), Ordering::Relaxed);
        }
    }

    pub fn set_metallic(&self, metallic: bool) {
        self.metallic.store(metallic, Ordering::Relaxed);
    }

    pub fn pitch(&self) -> f32 {
        self.pitch.load(Ordering::Relaxed)
    }

    pub fn phase(&self) -> f32 {
        self.phase.load(Ordering::Relaxed)
    }

    pub fn morph(&self) -> f32 {
        self.morph.load(Ordering::Relaxed)
    }

    pub fn metallic(&self) -> bool {
        self.metallic.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            pitch: self.pitch(),
            phase: self.phase(),
            morph: self.morph(),
            metallic: self.metallic(),
        }
    }
}
