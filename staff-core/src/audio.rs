//! # Audio Capture Module
//!
//! Microphone capture via CPAL. The capture callback slices the incoming
//! stream into fixed-size frames and hands them to the analysis side over a
//! channel; everything downstream only ever sees complete frames.

use anyhow::{Result, anyhow};
use cpal::SupportedStreamConfigRange;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::Sender;

/// Number of samples per analysis frame (~46ms at 44.1 kHz).
///
/// Larger frames resolve lower fundamentals but add latency; 2048 fits
/// roughly three periods of C1 at 44.1 kHz, enough for the lag search.
pub const FRAME_SIZE: usize = 2048;

/// Target sample rate in Hz; the nearest supported rate is used.
const TARGET_SAMPLE_RATE: u32 = 44100;

/// Opens the default input device and starts streaming frames.
///
/// Selects a mono f32 input configuration as close to 44.1 kHz as the
/// device supports, then installs a callback that accumulates samples and
/// sends one `FRAME_SIZE` frame at a time. Frames are sent with `try_send`
/// so a slow consumer drops frames instead of stalling the audio thread.
///
/// # Arguments
/// * `sender` - Channel sender carrying complete frames to the consumer
///
/// # Returns
/// * `Ok((stream, sample_rate))` - Live stream handle and the actual rate
/// * `Err(e)` - No input device or no usable mono f32 configuration
pub fn start_capture(sender: Sender<Vec<f32>>) -> Result<(cpal::Stream, u32)> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| anyhow!("No input device available"))?;

    println!("[AUDIO] Using input device: {}", device.name()?);

    let configs = device.supported_input_configs()?.collect::<Vec<_>>();
    let supported = nearest_mono_f32_config(configs, TARGET_SAMPLE_RATE)
        .ok_or_else(|| anyhow!("No suitable mono f32 input format found"))?;

    let config = supported.with_sample_rate(cpal::SampleRate(TARGET_SAMPLE_RATE));
    let sample_rate = config.sample_rate().0;
    let config: cpal::StreamConfig = config.into();

    println!("[AUDIO] Capturing at {} Hz", sample_rate);

    let err_fn = |err| eprintln!("[AUDIO] Stream error: {}", err);

    let mut pending = Vec::with_capacity(FRAME_SIZE * 2);
    let stream = device.build_input_stream(
        &config,
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            pending.extend_from_slice(data);
            while pending.len() >= FRAME_SIZE {
                let frame: Vec<f32> = pending.drain(..FRAME_SIZE).collect();
                let _ = sender.try_send(frame);
            }
        },
        err_fn,
        None,
    )?;

    stream.play()?;

    Ok((stream, sample_rate))
}

/// Picks the supported configuration whose rate range lies closest to the
/// target, restricted to mono f32.
fn nearest_mono_f32_config(
    configs: Vec<SupportedStreamConfigRange>,
    target_rate: u32,
) -> Option<SupportedStreamConfigRange> {
    configs
        .into_iter()
        .filter(|c| c.channels() == 1 && c.sample_format() == cpal::SampleFormat::F32)
        .min_by_key(|c| {
            let below = (c.min_sample_rate().0 as i32 - target_rate as i32).abs();
            let above = (c.max_sample_rate().0 as i32 - target_rate as i32).abs();
            below.min(above)
        })
}
