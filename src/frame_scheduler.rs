//! Frame pacing for the animation loop.
//!
//! Portable and sans-io: the host owns one background execution context
//! (task or thread), calls [`FrameScheduler::tick`] with the current time
//! and sleeps until the returned deadline. All frame planning, rendering
//! and committing happens inside `tick`.

use embassy_time::{Duration, Instant};

use crate::color::Rgb;
use crate::engine::LightEngine;
use crate::{HardwareError, PixelSink};

/// Default target frame rate (25 FPS, 40 ms per frame).
pub const DEFAULT_FPS: u32 = 25;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Fixed-rate driver of the engine's animation frames.
///
/// Each tick plans the next frame under the engine lock, renders it outside
/// the lock, and commits it back under the lock. If the animation slot is
/// idle the tick is a no-op apart from timing, so the loop can keep running
/// between animations.
pub struct FrameScheduler<'a, S: PixelSink, const MAX_LEDS: usize> {
    engine: &'a LightEngine<S, MAX_LEDS>,
    buffer: [Rgb; MAX_LEDS],
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, S: PixelSink, const MAX_LEDS: usize> FrameScheduler<'a, S, MAX_LEDS> {
    /// Create a frame scheduler at the default frame rate.
    pub fn new(engine: &'a LightEngine<S, MAX_LEDS>) -> Self {
        Self::with_frame_duration(engine, DEFAULT_FRAME_DURATION)
    }

    /// Create a frame scheduler with a custom frame duration.
    pub fn with_frame_duration(
        engine: &'a LightEngine<S, MAX_LEDS>,
        frame_duration: Duration,
    ) -> Self {
        Self {
            engine,
            buffer: [Rgb::default(); MAX_LEDS],
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// Returns `Err` when a sink write failed twice in a row; the affected
    /// animation has then already been cancelled and the loop may keep
    /// ticking.
    pub fn tick(&mut self, now: Instant) -> Result<FrameResult, HardwareError> {
        // Drift correction: if we've fallen too far behind, reset to now.
        // This prevents catch-up bursts after long stalls.
        let max_drift_ms = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift_ms {
            self.next_frame = now;
        }

        let outcome = match self.engine.plan_frame(now) {
            Some(plan) => {
                let frame = &mut self.buffer[..self.engine.pixel_count()];
                let brightness =
                    plan.kind
                        .render(frame, plan.t_secs, plan.fraction, plan.duration);
                self.engine.commit_frame(&plan, frame, brightness)
            }
            None => Ok(()),
        };

        // Calculate next frame deadline
        self.next_frame += self.frame_duration;

        // Calculate sleep duration (may be zero if we're behind)
        let sleep_duration = if self.next_frame.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_frame.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        outcome.map(|()| FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        })
    }
}
