//! # Staff CLI - Pitch-to-Staff Display
//!
//! Thin console front end for the staff pitch trainer. It owns the audio
//! session and runs the pull loop: one frame in, one analysis out, and the
//! detected note rendered as a text staff line.
//!
//! ## Architecture
//! - **Session**: `staff-core` owns the CPAL stream and frame channel
//! - **Driver**: this binary pulls frames and runs estimate-then-map
//! - **Display**: a one-line text staff, redrawn when the note changes

use anyhow::Result;
use staff_core::session::AudioSession;
use staff_core::{analyze_frame, notes, pitch};

/// Main entry point: open the microphone session and run the frame loop.
fn main() -> Result<()> {
    println!("[MAIN] Staff pitch trainer (C1 to C2)");
    let session = AudioSession::open()?;
    println!(
        "[MAIN] Listening at {} Hz; sing or play a note between C1 and C2",
        session.sample_rate()
    );

    let mut last_position: Option<u8> = None;
    while let Some(frame) = session.next_frame() {
        let analysis = analyze_frame(&frame, session.sample_rate(), pitch::AMPLITUDE_THRESHOLD);

        // Silence renders nothing; only redraw when the note moves.
        if analysis.position != last_position {
            if let Some(position) = analysis.position {
                println!("{}", staff_line(position));
            }
            last_position = analysis.position;
        }
    }

    println!("[MAIN] Capture ended");
    Ok(())
}

/// Renders one staff position as a text line: a marker among the 14 slots
/// followed by the note name (blank for the overflow slot above C2).
fn staff_line(position: u8) -> String {
    let slots: String = (0..notes::POSITION_COUNT)
        .map(|slot| if slot == position { '#' } else { '-' })
        .collect();
    match notes::note_name(position) {
        Some(name) => format!("C1 |{}| C2  {}", slots, name),
        None => format!("C1 |{}| C2", slots),
    }
}
