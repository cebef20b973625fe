//! # Audio Session Module
//!
//! Explicit ownership of a capture session. The session owns the live CPAL
//! stream, the sample rate negotiated at open time, and the receiving end of
//! the frame channel, so a driver can run a plain pull loop:
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! let session = staff_core::session::AudioSession::open()?;
//! while let Some(frame) = session.next_frame() {
//!     let analysis = staff_core::analyze_frame(
//!         &frame,
//!         session.sample_rate(),
//!         staff_core::pitch::AMPLITUDE_THRESHOLD,
//!     );
//!     // hand analysis to the display
//!     # let _ = analysis;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Dropping the session drops the stream and stops capture; there is no
//! in-flight state to cancel beyond that.

use anyhow::Result;
use crossbeam_channel::{Receiver, bounded};

use crate::audio;

/// Frames buffered between the audio callback and the consumer before the
/// capture side starts dropping.
const FRAME_QUEUE_DEPTH: usize = 8;

/// A live microphone capture session.
///
/// The stream handle is held only to keep capture running; all interaction
/// goes through [`AudioSession::next_frame`].
pub struct AudioSession {
    _stream: cpal::Stream,
    sample_rate: u32,
    frames: Receiver<Vec<f32>>,
}

impl AudioSession {
    /// Opens the default input device and starts capturing.
    pub fn open() -> Result<AudioSession> {
        let (sender, receiver) = bounded(FRAME_QUEUE_DEPTH);
        let (stream, sample_rate) = audio::start_capture(sender)?;
        Ok(AudioSession {
            _stream: stream,
            sample_rate,
            frames: receiver,
        })
    }

    /// Sample rate negotiated with the device, in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Blocks until the next complete frame is available.
    ///
    /// Returns `None` once the capture side has shut down and the queue has
    /// drained, which ends the driver's pull loop.
    pub fn next_frame(&self) -> Option<Vec<f32>> {
        self.frames.recv().ok()
    }
}
