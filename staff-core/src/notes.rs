//! # Note Mapping Module
//!
//! This module quantizes detected frequencies onto the one-octave staff
//! range (C1 to C2) used by the display. It handles the semitone math and
//! the fixed note-name table for the 13 staff positions.
//!
//! ## Features
//! - Equal temperament semitone offsets relative to C1
//! - Saturating clamp into the staff range (no out-of-range errors)
//! - Static note table with per-position target frequencies

use once_cell::sync::Lazy;

/// Frequency of C1 in Hz, the bottom of the staff range.
pub const C1_FREQUENCY: f32 = 32.70;

/// Number of staff positions, C1 through C2 inclusive plus the overflow
/// slot above C2 that out-of-range frequencies saturate into.
pub const POSITION_COUNT: u8 = 14;

/// Represents a single musical note with its name and frequency.
#[derive(Debug, Clone)]
pub struct Note {
    /// Note name (e.g., "C1", "F#1", "C2")
    pub name: &'static str,
    /// Equal temperament frequency in Hz
    pub frequency: f32,
}

/// Statically computed notes for the one-octave staff (C1 to C2).
///
/// The 13 entries are indexed by staff position. Frequencies are derived
/// from C1 with the equal temperament formula `f = C1 * 2^(n/12)`, computed
/// once at startup.
static NOTES: Lazy<Vec<Note>> = Lazy::new(|| {
    const NOTE_NAMES: [&str; 13] = [
        "C1", "C#1", "D1", "D#1", "E1", "F1", "F#1", "G1", "G#1", "A1", "A#1", "B1", "C2",
    ];
    NOTE_NAMES
        .iter()
        .enumerate()
        .map(|(i, &name)| Note {
            name,
            frequency: C1_FREQUENCY * 2.0_f32.powf(i as f32 / 12.0),
        })
        .collect()
});

/// Maps a frequency to its staff position in `[0, 13]`.
///
/// The semitone offset from C1 is `12 * log2(freq / C1)`, rounded to the
/// nearest integer and clamped: frequencies below C1 saturate to 0 and
/// frequencies well above C2 saturate to 13. There is no failure mode for
/// a positive finite frequency.
///
/// # Arguments
/// * `frequency` - Detected frequency in Hz, must be positive
///
/// # Returns
/// * Staff position (0 = C1, 12 = C2, 13 = above the range)
///
/// # Panics
/// Panics on a non-positive frequency; the pitch detector never forwards
/// its "no pitch" outcome as a frequency value.
pub fn map_to_position(frequency: f32) -> u8 {
    assert!(
        frequency > 0.0,
        "frequency must be positive, got {frequency}"
    );
    let semitones = 12.0 * (frequency / C1_FREQUENCY).log2();
    semitones.round().clamp(0.0, (POSITION_COUNT - 1) as f32) as u8
}

/// Looks up the display name for a staff position.
///
/// Position 13 is the saturation slot above C2 and has no name; the
/// display renders it blank.
pub fn note_name(position: u8) -> Option<&'static str> {
    NOTES.get(position as usize).map(|note| note.name)
}

/// Returns the equal temperament target frequency for a named staff
/// position (0-12).
///
/// # Panics
/// Panics if the position is the unnamed saturation slot or beyond.
pub fn position_frequency(position: u8) -> f32 {
    NOTES[position as usize].frequency
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn far_out_of_range_frequencies_saturate() {
        assert_eq!(map_to_position(10.0), 0);
        assert_eq!(map_to_position(500.0), 13);
    }

    #[test]
    fn octave_endpoints_follow_the_semitone_formula() {
        // 12 * log2(32.70 / 32.70) = 0
        assert_eq!(map_to_position(32.70), 0);
        // 12 * log2(65.41 / 32.70) = 12.0026, rounds down to 12
        assert_eq!(map_to_position(65.41), 12);
    }

    #[test]
    fn table_frequencies_map_back_to_their_position() {
        for position in 0..13 {
            assert_eq!(map_to_position(position_frequency(position)), position);
        }
    }

    #[test]
    fn mapping_is_monotonic_across_the_octave() {
        let mut last = 0;
        let mut freq = C1_FREQUENCY;
        while freq < 2.0 * C1_FREQUENCY {
            let position = map_to_position(freq);
            assert!(position >= last, "position dropped at {freq} Hz");
            last = position;
            freq += 0.25;
        }
    }

    #[test]
    fn note_names_cover_the_octave_and_nothing_more() {
        assert_eq!(note_name(0), Some("C1"));
        assert_eq!(note_name(6), Some("F#1"));
        assert_eq!(note_name(12), Some("C2"));
        assert_eq!(note_name(13), None);
    }

    #[test]
    #[should_panic(expected = "frequency must be positive")]
    fn non_positive_frequency_panics() {
        map_to_position(0.0);
    }
}
