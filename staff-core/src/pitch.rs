//! # Pitch Detection Module
//!
//! This module implements real-time fundamental frequency estimation for
//! monophonic audio signals using normalized autocorrelation.
//!
//! ## Features
//! - Absolute-difference autocorrelation with early termination
//! - RMS amplitude gating to filter out silence
//! - Zero-lag guard so the trivial self-match can never win
//! - Stateless: identical input always yields identical output

/// Canonical RMS amplitude gate for a [-1, 1]-normalized signal.
pub const AMPLITUDE_THRESHOLD: f32 = 0.01;

/// Similarity level that counts as a strong periodic match.
const GOOD_MATCH_THRESHOLD: f32 = 0.9;

/// Minimum best similarity required to report any pitch at all.
const MIN_SIMILARITY: f32 = 0.01;

/// Estimates the fundamental frequency of a single audio frame.
///
/// The search computes, for each candidate lag, the mean absolute difference
/// between the frame and itself shifted by that lag, converted to a
/// similarity score (`1.0` = perfect self-match). The lag with the highest
/// similarity is the fundamental period.
///
/// Scanning stops early once a strong match has been seen and similarity
/// falls back below the match threshold: the first strong peak is taken as
/// the true periodicity, which bounds worst-case cost and avoids locking
/// onto a later copy of the peak. The flag only arms on a *rising* crossing
/// of the threshold (previous similarity is seeded with the trivial lag-0
/// value of 1.0), so the self-match plateau around lag 0 neither arms the
/// early exit nor gets reported as the answer.
///
/// # Arguments
/// * `signal` - Input audio frame, at least 2 samples
/// * `sample_rate` - Sample rate in Hz, must be positive
/// * `amplitude_threshold` - Minimum RMS amplitude for pitch detection
///
/// # Returns
/// * `Some(frequency)` - Detected fundamental frequency in Hz
/// * `None` - No pitch detected (silence or no strong periodicity)
///
/// # Panics
/// Panics if the frame has fewer than 2 samples or the sample rate is zero;
/// both are caller contract violations, not signal conditions.
pub fn estimate(signal: &[f32], sample_rate: u32, amplitude_threshold: f32) -> Option<f32> {
    assert!(signal.len() >= 2, "audio frame must hold at least 2 samples");
    assert!(sample_rate > 0, "sample rate must be positive");

    let frame_size = signal.len();
    // Restricting lag to half the frame keeps both windows in bounds.
    let max_lag = frame_size / 2;

    // --- Noise Gate: Calculate RMS to filter out silence/noise ---
    let rms = (signal.iter().map(|&s| s * s).sum::<f32>() / frame_size as f32).sqrt();
    if rms < amplitude_threshold {
        return None;
    }

    // --- Lag search: track the most self-similar shift ---
    let mut best_similarity = 0.0_f32;
    let mut best_lag: Option<usize> = None;
    // Lag 0 compares the frame with itself and is a perfect match by
    // construction; seeding with it means the plateau around lag 0 is seen
    // as falling, never as a fresh peak.
    let mut last_similarity = 1.0_f32;
    let mut found_good_match = false;

    for lag in 1..max_lag {
        let mut diff = 0.0;
        for i in 0..max_lag {
            diff += (signal[i] - signal[i + lag]).abs();
        }
        let similarity = 1.0 - diff / max_lag as f32;

        if similarity > best_similarity {
            best_similarity = similarity;
            best_lag = Some(lag);
        }

        // --- Early exit: stop once the first strong peak has passed ---
        if similarity > GOOD_MATCH_THRESHOLD && similarity > last_similarity {
            found_good_match = true;
        } else if found_good_match && similarity < GOOD_MATCH_THRESHOLD {
            break;
        }
        last_similarity = similarity;
    }

    // --- Report: best lag is the fundamental period ---
    match best_lag {
        Some(lag) if best_similarity > MIN_SIMILARITY => Some(sample_rate as f32 / lag as f32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine_frame(frequency: f32, sample_rate: u32, amplitude: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| {
                amplitude
                    * (2.0 * std::f32::consts::PI * frequency * i as f32 / sample_rate as f32)
                        .sin()
            })
            .collect()
    }

    #[test]
    fn silence_is_rejected() {
        for len in [2, 16, 2048] {
            let frame = vec![0.0; len];
            assert_eq!(estimate(&frame, 44100, AMPLITUDE_THRESHOLD), None);
        }
    }

    #[test]
    fn below_threshold_noise_floor_is_rejected() {
        // Peak amplitude 0.005 puts the RMS well under the 0.01 gate.
        let frame = sine_frame(220.0, 44100, 0.005, 2048);
        assert_eq!(estimate(&frame, 44100, AMPLITUDE_THRESHOLD), None);
    }

    #[test]
    fn pure_sine_is_recovered() {
        // 147 Hz at 44.1 kHz is an exact 300-sample period, ~6.8 periods
        // per 2048-sample frame, far below the Nyquist margin.
        let frame = sine_frame(147.0, 44100, 0.5, 2048);
        let freq = estimate(&frame, 44100, AMPLITUDE_THRESHOLD).expect("pitch expected");
        assert!((freq - 147.0).abs() / 147.0 < 0.05, "got {freq} Hz");
    }

    #[test]
    fn estimate_is_deterministic() {
        let frame = sine_frame(98.0, 48000, 0.4, 2048);
        let first = estimate(&frame, 48000, AMPLITUDE_THRESHOLD);
        let second = estimate(&frame, 48000, AMPLITUDE_THRESHOLD);
        assert_eq!(first, second);
    }

    #[test]
    fn reported_frequency_is_always_finite_and_positive() {
        // A DC frame is self-similar at every lag; the winning lag must
        // still be nonzero so the frequency stays finite.
        let dc = vec![0.5; 1024];
        if let Some(freq) = estimate(&dc, 44100, AMPLITUDE_THRESHOLD) {
            assert!(freq.is_finite() && freq > 0.0);
        }
        let tone = sine_frame(65.41, 44100, 0.5, 2048);
        if let Some(freq) = estimate(&tone, 44100, AMPLITUDE_THRESHOLD) {
            assert!(freq.is_finite() && freq > 0.0);
        }
    }

    #[test]
    #[should_panic(expected = "at least 2 samples")]
    fn empty_frame_panics() {
        estimate(&[], 44100, AMPLITUDE_THRESHOLD);
    }

    #[test]
    #[should_panic(expected = "at least 2 samples")]
    fn single_sample_frame_panics() {
        estimate(&[0.1], 44100, AMPLITUDE_THRESHOLD);
    }

    #[test]
    #[should_panic(expected = "sample rate must be positive")]
    fn zero_sample_rate_panics() {
        estimate(&[0.1, 0.2], 0, AMPLITUDE_THRESHOLD);
    }
}
