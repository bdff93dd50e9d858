//! Animation slot: at most one animation owns the strip at a time.
//!
//! The slot is a small state machine, `Idle -> Running -> (Completed |
//! Cancelled) -> Idle`. Starting a new animation supersedes the running one
//! by retiring it as `Cancelled`; a bounded history keeps the terminal
//! status of recently finished animations so stale handles can still be
//! queried.

use embassy_time::{Duration, Instant};
use heapless::Deque;

use crate::color::Rgb;
use crate::gradient::{GradientConfig, render_into};
use crate::sun_cycle::{Season, SunDirection};

/// How many finished animations keep a queryable terminal status.
const FINISHED_HISTORY: usize = 8;

/// Opaque identifier for one in-flight, cancellable animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationHandle(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    Running,
    Completed,
    Cancelled,
}

/// Frame source for the active animation.
///
/// A closed set: the frame loop matches on this exhaustively instead of
/// dispatching through trait objects.
#[derive(Debug, Clone)]
pub(crate) enum AnimationKind {
    Gradient(GradientConfig),
    SunCycle {
        season: Season,
        direction: SunDirection,
    },
}

impl AnimationKind {
    /// Render one frame at elapsed time `t_secs` / `fraction` of `duration`.
    ///
    /// Returns the global brightness to hand to the sink. Gradient frames
    /// bake their configured brightness into the channels, so they report
    /// full sink brightness; sun cycles drive the sink brightness from the
    /// seasonal curve.
    pub(crate) fn render(
        &self,
        frame: &mut [Rgb],
        t_secs: f32,
        fraction: f32,
        duration: Duration,
    ) -> f32 {
        match self {
            Self::Gradient(config) => {
                render_into(config, frame, t_secs);
                1.0
            }
            Self::SunCycle { season, direction } => {
                let profile = season.profile();
                let color = profile.color_at(fraction, *direction);
                frame.fill(color);
                profile.brightness_at(fraction, *direction, duration)
            }
        }
    }
}

/// One running animation, owned by the slot.
#[derive(Debug, Clone)]
pub(crate) struct ActiveAnimation {
    pub(crate) handle: AnimationHandle,
    pub(crate) kind: AnimationKind,
    pub(crate) started: Instant,
    /// `None` runs until cancelled or superseded.
    pub(crate) duration: Option<Duration>,
    /// Cooperative cancellation flag, checked once per frame tick.
    pub(crate) cancelled: bool,
}

impl ActiveAnimation {
    /// Completed fraction in `[0, 1]`; `None` for unbounded animations.
    pub(crate) fn progress(&self, now: Instant) -> Option<f32> {
        let duration = self.duration?;
        let total = duration.as_millis();
        if total == 0 {
            return Some(1.0);
        }
        let elapsed = now.as_millis().saturating_sub(self.started.as_millis());
        #[allow(clippy::cast_precision_loss)]
        let fraction = (elapsed as f32 / total as f32).clamp(0.0, 1.0);
        Some(fraction)
    }
}

#[derive(Debug)]
pub(crate) struct AnimationSlot {
    active: Option<ActiveAnimation>,
    next_id: u32,
    finished: Deque<(AnimationHandle, AnimationStatus), FINISHED_HISTORY>,
}

impl AnimationSlot {
    pub(crate) const fn new() -> Self {
        Self {
            active: None,
            next_id: 1,
            finished: Deque::new(),
        }
    }

    pub(crate) fn active(&self) -> Option<&ActiveAnimation> {
        self.active.as_ref()
    }

    /// Install a new animation, superseding (cancelling) any running one.
    pub(crate) fn begin(
        &mut self,
        kind: AnimationKind,
        started: Instant,
        duration: Option<Duration>,
    ) -> AnimationHandle {
        self.cancel();

        let handle = AnimationHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1).max(1);
        self.active = Some(ActiveAnimation {
            handle,
            kind,
            started,
            duration,
            cancelled: false,
        });
        handle
    }

    /// Mark the active animation cancelled and retire it.
    ///
    /// Returns its handle, or `None` when the slot was idle.
    pub(crate) fn cancel(&mut self) -> Option<AnimationHandle> {
        let mut animation = self.active.take()?;
        animation.cancelled = true;
        self.record(animation.handle, AnimationStatus::Cancelled);
        Some(animation.handle)
    }

    /// Retire the active animation as completed.
    pub(crate) fn complete(&mut self) -> Option<AnimationHandle> {
        let animation = self.active.take()?;
        self.record(animation.handle, AnimationStatus::Completed);
        Some(animation.handle)
    }

    /// Set the cooperative cancellation flag without retiring the record.
    /// The frame loop observes the flag and retires the animation itself.
    pub(crate) fn request_cancel(&mut self) -> bool {
        match self.active.as_mut() {
            Some(animation) => {
                animation.cancelled = true;
                true
            }
            None => false,
        }
    }

    /// Status of a handle: the running one, or a recently finished one.
    pub(crate) fn status(&self, handle: AnimationHandle) -> Option<AnimationStatus> {
        if let Some(active) = &self.active {
            if active.handle == handle {
                return Some(if active.cancelled {
                    AnimationStatus::Cancelled
                } else {
                    AnimationStatus::Running
                });
            }
        }
        self.finished
            .iter()
            .rev()
            .find(|(finished, _)| *finished == handle)
            .map(|(_, status)| *status)
    }

    fn record(&mut self, handle: AnimationHandle, status: AnimationStatus) {
        if self.finished.is_full() {
            let _ = self.finished.pop_front();
        }
        // Cannot fail: an entry was just evicted if the deque was full.
        let _ = self.finished.push_back((handle, status));
    }
}
