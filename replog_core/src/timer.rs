//! Rest timer with an injected interrupt strategy.
//!
//! The countdown renders remaining time as `MM:SS` once per second.
//! Whether the timer can be skipped is decided at startup by choosing an
//! [`InterruptSource`], not by probing the environment at runtime:
//! [`crate::input::FeedInterrupt`] polls the shared line feed without
//! blocking, [`NeverInterrupt`] runs the full duration unconditionally.

use crate::Result;
use std::io::Write;
use std::thread;
use std::time::Duration;

/// Outcome of a rest countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerOutcome {
    /// The full duration elapsed.
    Completed,
    /// The user skipped the remainder.
    Skipped,
}

/// Non-blocking source of "skip the rest" signals, polled once per tick.
pub trait InterruptSource {
    fn pending(&mut self) -> bool;
}

/// Strategy for non-interruptible timers: never signals.
pub struct NeverInterrupt;

impl InterruptSource for NeverInterrupt {
    fn pending(&mut self) -> bool {
        false
    }
}

/// Format a second count as `MM:SS`.
pub fn format_mm_ss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Countdown rest timer.
pub struct RestTimer {
    duration_seconds: u32,
}

impl RestTimer {
    pub fn new(duration_seconds: u32) -> Self {
        Self { duration_seconds }
    }

    /// Run the countdown, polling `interrupt` once per tick.
    ///
    /// Renders into `out` so the CLI can point it at stdout and tests at
    /// a buffer.
    pub fn run(
        &self,
        interrupt: &mut dyn InterruptSource,
        out: &mut impl Write,
    ) -> Result<TimerOutcome> {
        tracing::debug!("Starting {}s rest timer", self.duration_seconds);

        for remaining in (1..=self.duration_seconds).rev() {
            write!(out, "\rRest time left: {}", format_mm_ss(remaining))?;
            out.flush()?;

            if interrupt.pending() {
                writeln!(out, "\nTimer skipped!")?;
                return Ok(TimerOutcome::Skipped);
            }

            thread::sleep(Duration::from_secs(1));
        }

        writeln!(out, "\nRest over!")?;
        Ok(TimerOutcome::Completed)
    }
}
