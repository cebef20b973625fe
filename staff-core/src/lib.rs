// staff-core/src/lib.rs

//! The core logic for the staff pitch trainer.
//! This crate is responsible for audio capture, pitch detection, and
//! mapping detected frequencies onto the one-octave staff range.
//! It is completely headless and contains no display code.

pub mod audio;
pub mod notes;
pub mod pitch;
pub mod session;

/// Represents the result of analyzing a single audio frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAnalysis {
    /// The detected fundamental frequency in Hz, if any.
    pub frequency: Option<f32>,
    /// The staff position for that frequency (0 = C1 .. 13 = above C2).
    pub position: Option<u8>,
}

/// Runs the full per-frame pipeline: pitch estimation, then staff mapping.
///
/// The mapper is only consulted when a pitch was actually detected, so a
/// silent frame yields `None` for both fields rather than a sentinel.
pub fn analyze_frame(frame: &[f32], sample_rate: u32, amplitude_threshold: f32) -> FrameAnalysis {
    let frequency = pitch::estimate(frame, sample_rate, amplitude_threshold);
    let position = frequency.map(notes::map_to_position);
    FrameAnalysis {
        frequency,
        position,
    }
}
