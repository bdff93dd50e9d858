//! Lighting engine: shared state, command entry points and the frame
//! commit path.
//!
//! The engine core (sink, state, animation slot) sits behind one
//! `critical-section` mutex, so command entry points may be called from any
//! execution context while a [`FrameScheduler`](crate::FrameScheduler)
//! drives the frame loop elsewhere. Frames are planned and committed under
//! the lock with a handle check in between, which is what guarantees that
//! a superseded animation can never reach the sink after the superseding
//! call has returned.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::Rgb;
use crate::gamma::GammaTable;
use crate::gradient::{GradientConfig, ValidationError, render_into};
use crate::scheduler::{
    AnimationHandle, AnimationKind, AnimationSlot, AnimationStatus,
};
use crate::state::{AnimationProgress, LightingMode, LightingSnapshot, LightingState};
use crate::sun_cycle::{Season, SunDirection};
use crate::{HardwareError, PixelSink};

/// Error returned by engine command entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Malformed request; state and strip are unchanged.
    Validation(ValidationError),
    /// The sink write failed twice in a row.
    Hardware(HardwareError),
}

impl From<ValidationError> for EngineError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<HardwareError> for EngineError {
    fn from(err: HardwareError) -> Self {
        Self::Hardware(err)
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Number of pixels on the strip; clamped to the engine's `MAX_LEDS`.
    pub pixel_count: usize,
    /// Optional gamma correction applied to every outgoing frame.
    pub gamma: Option<GammaTable>,
}

struct Core<S> {
    sink: S,
    gamma: Option<GammaTable>,
    state: LightingState,
    slot: AnimationSlot,
    /// Consecutive sink write failures of the frame loop.
    write_failures: u8,
}

/// One frame planned under the lock, rendered outside it.
pub(crate) struct FramePlan {
    pub(crate) handle: AnimationHandle,
    pub(crate) kind: AnimationKind,
    pub(crate) t_secs: f32,
    pub(crate) fraction: f32,
    pub(crate) duration: Duration,
    pub(crate) completing: bool,
}

/// The lighting engine.
///
/// `MAX_LEDS` bounds the frame buffers; the runtime pixel count comes from
/// [`EngineConfig`].
pub struct LightEngine<S: PixelSink, const MAX_LEDS: usize> {
    core: Mutex<RefCell<Core<S>>>,
    pixel_count: usize,
}

impl<S: PixelSink, const MAX_LEDS: usize> LightEngine<S, MAX_LEDS> {
    pub fn new(sink: S, config: EngineConfig) -> Self {
        Self {
            core: Mutex::new(RefCell::new(Core {
                sink,
                gamma: config.gamma,
                state: LightingState::new(),
                slot: AnimationSlot::new(),
                write_failures: 0,
            })),
            pixel_count: config.pixel_count.min(MAX_LEDS),
        }
    }

    pub const fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    /// Show a single solid color on the whole strip.
    ///
    /// Cancels any running animation and writes the frame immediately.
    pub fn set_solid(&self, color: Rgb, brightness: f32) -> Result<(), EngineError> {
        if !(0.0..=1.0).contains(&brightness) {
            return Err(ValidationError::BrightnessOutOfRange.into());
        }

        let mut frame = [color; MAX_LEDS];
        self.with_core(|core| {
            core.slot.cancel();
            write_with_retry(core, &mut frame[..self.pixel_count], brightness)?;
            core.state.mode = LightingMode::Solid;
            core.state.solid_color = color;
            core.state.brightness = brightness;
            core.state.gradient = None;
            Ok(())
        })
    }

    /// Show a static gradient.
    ///
    /// Animated configs are rendered at `t = 0`; their time-based behavior
    /// only takes effect through [`Self::begin_gradient_animated`].
    pub fn set_gradient_static(&self, config: &GradientConfig) -> Result<(), EngineError> {
        let mut frame = [Rgb::default(); MAX_LEDS];
        render_into(config, &mut frame[..self.pixel_count], 0.0);

        self.with_core(|core| {
            core.slot.cancel();
            write_with_retry(core, &mut frame[..self.pixel_count], 1.0)?;
            core.state.mode = LightingMode::GradientStatic;
            core.state.brightness = config.brightness();
            core.state.gradient = Some(config.clone());
            Ok(())
        })
    }

    /// Start a time-based gradient animation.
    ///
    /// `duration: None` runs until cancelled or superseded. The first frame
    /// is produced by the frame loop on its next tick.
    pub fn begin_gradient_animated(
        &self,
        config: &GradientConfig,
        duration: Option<Duration>,
        now: Instant,
    ) -> Result<AnimationHandle, EngineError> {
        if !config.is_animated() {
            return Err(ValidationError::MissingAnimation.into());
        }
        if duration == Some(Duration::from_ticks(0)) {
            return Err(ValidationError::ZeroDuration.into());
        }

        Ok(self.with_core(|core| {
            let handle = core.slot.begin(
                AnimationKind::Gradient(config.clone()),
                now,
                duration,
            );
            core.state.mode = LightingMode::GradientAnimated;
            core.state.brightness = config.brightness();
            core.state.gradient = Some(config.clone());
            #[cfg(feature = "esp32-log")]
            println!("animation started: gradient");
            handle
        }))
    }

    /// Start a sunrise over `duration` (scaled by the season's profile).
    pub fn begin_sunrise(
        &self,
        duration: Duration,
        season: Season,
        now: Instant,
    ) -> Result<AnimationHandle, EngineError> {
        self.begin_sun_cycle(duration, season, SunDirection::Sunrise, now)
    }

    /// Start a sunset over `duration` (scaled by the season's profile).
    pub fn begin_sunset(
        &self,
        duration: Duration,
        season: Season,
        now: Instant,
    ) -> Result<AnimationHandle, EngineError> {
        self.begin_sun_cycle(duration, season, SunDirection::Sunset, now)
    }

    fn begin_sun_cycle(
        &self,
        duration: Duration,
        season: Season,
        direction: SunDirection,
        now: Instant,
    ) -> Result<AnimationHandle, EngineError> {
        if duration.as_ticks() == 0 {
            return Err(ValidationError::ZeroDuration.into());
        }
        let scaled = season.profile().scaled_duration(duration);

        Ok(self.with_core(|core| {
            let handle = core.slot.begin(
                AnimationKind::SunCycle { season, direction },
                now,
                Some(scaled),
            );
            core.state.mode = match direction {
                SunDirection::Sunrise => LightingMode::Sunrise,
                SunDirection::Sunset => LightingMode::Sunset,
            };
            core.state.gradient = None;
            #[cfg(feature = "esp32-log")]
            println!("animation started: sun cycle, season={}", season.as_str());
            handle
        }))
    }

    /// Request cancellation of the active animation, if any.
    ///
    /// Cancellation is cooperative: the flag is observed by the frame loop
    /// at its next tick, and no further frame of that animation reaches the
    /// sink once this call has returned. The strip keeps showing the last
    /// written frame; the mode flips to the matching static mode.
    pub fn cancel_active_animation(&self) {
        self.with_core(|core| {
            let terminal = core.slot.active().map(|active| terminal_mode(&active.kind));
            if core.slot.request_cancel() {
                if let Some(mode) = terminal {
                    core.state.mode = mode;
                }
                #[cfg(feature = "esp32-log")]
                println!("animation cancel requested");
            }
        });
    }

    /// Cancel any animation and black out the strip with one all-zero frame.
    pub fn turn_off(&self) -> Result<(), EngineError> {
        let mut frame = [Rgb::default(); MAX_LEDS];
        self.with_core(|core| {
            core.slot.request_cancel();
            write_with_retry(core, &mut frame[..self.pixel_count], 0.0)?;
            core.state.mode = LightingMode::Off;
            core.state.gradient = None;
            Ok(())
        })
    }

    /// Deep, immutable copy of the current state for readers.
    pub fn snapshot(&self, now: Instant) -> LightingSnapshot {
        self.with_core(|core| LightingSnapshot {
            mode: core.state.mode,
            solid_color: core.state.solid_color,
            brightness: core.state.brightness,
            gradient: core.state.gradient.clone(),
            animation: core
                .slot
                .active()
                .filter(|active| !active.cancelled)
                .map(|active| AnimationProgress {
                    handle: active.handle,
                    fraction: active.progress(now),
                }),
        })
    }

    /// Status of a handle, if it is still known to the slot.
    pub fn animation_status(&self, handle: AnimationHandle) -> Option<AnimationStatus> {
        self.with_core(|core| core.slot.status(handle))
    }

    /// Plan the next frame of the active animation, retiring a cancelled
    /// one with no partial write. Called by the frame loop under the lock.
    pub(crate) fn plan_frame(&self, now: Instant) -> Option<FramePlan> {
        self.with_core(|core| {
            if core.slot.active().is_some_and(|active| active.cancelled) {
                core.slot.cancel();
                #[cfg(feature = "esp32-log")]
                println!("animation cancelled");
                return None;
            }
            let active = core.slot.active()?;

            let elapsed_ms = now.as_millis().saturating_sub(active.started.as_millis());
            let (t_ms, fraction, duration, completing) = match active.duration {
                Some(duration) => {
                    let total_ms = duration.as_millis();
                    let completing = elapsed_ms >= total_ms;
                    let t_ms = elapsed_ms.min(total_ms);
                    #[allow(clippy::cast_precision_loss)]
                    let fraction = if total_ms == 0 {
                        1.0
                    } else {
                        t_ms as f32 / total_ms as f32
                    };
                    (t_ms, fraction, duration, completing)
                }
                None => (elapsed_ms, 0.0, Duration::from_ticks(0), false),
            };

            #[allow(clippy::cast_precision_loss)]
            let t_secs = t_ms as f32 / 1000.0;
            Some(FramePlan {
                handle: active.handle,
                kind: active.kind.clone(),
                t_secs,
                fraction,
                duration,
                completing,
            })
        })
    }

    /// Commit a rendered frame: write it to the sink iff the planned
    /// animation is still the active one.
    ///
    /// A failed write is left for the next tick to retry (one frame
    /// interval later); a second consecutive failure cancels the animation
    /// and surfaces the error.
    pub(crate) fn commit_frame(
        &self,
        plan: &FramePlan,
        frame: &mut [Rgb],
        brightness: f32,
    ) -> Result<(), HardwareError> {
        self.with_core(|core| {
            let still_active = core
                .slot
                .active()
                .is_some_and(|active| active.handle == plan.handle && !active.cancelled);
            if !still_active {
                // Superseded between plan and commit; drop the frame.
                return Ok(());
            }

            let displayed = frame.first().copied();
            if let Some(gamma) = &core.gamma {
                gamma.apply(frame);
            }

            match core.sink.write(frame, brightness) {
                Ok(()) => {
                    core.write_failures = 0;
                    if let AnimationKind::SunCycle { .. } = plan.kind {
                        if let Some(color) = displayed {
                            core.state.solid_color = color;
                        }
                        core.state.brightness = brightness;
                    }
                    if plan.completing {
                        core.state.mode = terminal_mode(&plan.kind);
                        core.slot.complete();
                        #[cfg(feature = "esp32-log")]
                        println!("animation completed");
                    }
                    Ok(())
                }
                Err(err) => {
                    core.write_failures += 1;
                    if core.write_failures >= 2 {
                        core.state.mode = terminal_mode(&plan.kind);
                        core.slot.cancel();
                        core.write_failures = 0;
                        #[cfg(feature = "esp32-log")]
                        println!("animation cancelled: sink write failed twice");
                        return Err(err);
                    }
                    Ok(())
                }
            }
        })
    }

    fn with_core<R>(&self, f: impl FnOnce(&mut Core<S>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.core.borrow(cs).borrow_mut()))
    }
}

/// Static mode left behind when an animation ends.
fn terminal_mode(kind: &AnimationKind) -> LightingMode {
    match kind {
        AnimationKind::Gradient(_) => LightingMode::GradientStatic,
        // The strip stays at the last sun-cycle color, i.e. a solid frame.
        AnimationKind::SunCycle { .. } => LightingMode::Solid,
    }
}

/// Write a frame from a command entry point, retrying once on failure.
fn write_with_retry<S: PixelSink>(
    core: &mut Core<S>,
    frame: &mut [Rgb],
    brightness: f32,
) -> Result<(), HardwareError> {
    if let Some(gamma) = &core.gamma {
        gamma.apply(frame);
    }
    if core.sink.write(frame, brightness).is_ok() {
        return Ok(());
    }
    core.sink.write(frame, brightness)
}
