//! Terminal frame renderer.
//!
//! Draws each pulled frame as one glyph per cell, followed by the
//! sweep's counters line.

use std::fmt::Display;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;
use tessera_core::CellState;
use tessera_engine::{Frame, Frames};
use tessera_rules::UpdateRule;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// How frames are played back.
#[derive(Clone, Copy, Debug)]
pub struct Playback {
    /// Pause after each drawn frame.
    pub delay: Duration,
    /// Draw every `every`-th frame only; the rest still run.
    pub every: u64,
    /// Clear the terminal before each frame.
    pub clear: bool,
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(50),
            every: 1,
            clear: true,
        }
    }
}

/// `glyph label` pairs for every state, e.g. `. Dead  # Alive`.
pub fn legend<S: CellState>() -> String {
    S::ALL
        .iter()
        .map(|s| format!("{} {}", s.glyph(), s.label()))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Write one frame: header, lattice rows, counters.
pub fn write_frame<W, S, M>(out: &mut W, frame: &Frame<'_, S, M>) -> io::Result<()>
where
    W: Write,
    S: CellState,
    M: Display,
{
    writeln!(out, "Sweep {}    {}", frame.sweep, legend::<S>())?;
    write!(out, "{}", frame.lattice)?;
    writeln!(out, "{}", frame.summary)
}

/// Draw frames until the cursor is exhausted. Returns the number of
/// sweeps run.
pub fn play<R, W>(mut frames: Frames<R>, out: &mut W, playback: &Playback) -> io::Result<u64>
where
    R: UpdateRule,
    W: Write,
{
    let every = playback.every.max(1);
    let mut ran = 0;
    while let Some(frame) = frames.advance() {
        ran += 1;
        if frame.sweep.0 % every != 0 {
            continue;
        }
        if playback.clear {
            write!(out, "{CLEAR_SCREEN}")?;
        }
        write_frame(out, &frame)?;
        out.flush()?;
        if !playback.delay.is_zero() {
            thread::sleep(playback.delay);
        }
    }
    Ok(ran)
}
