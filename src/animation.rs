//! Animation system module
//!
//! Handles time-driven value interpolation:
//! - Easing curves over normalized time
//! - Named animated values sampled on every tick
//! - A single timed run that hands back a pending completion action
//!
//! The animator never owns callbacks. Whatever should happen on completion is
//! stored as a value of the caller's action type and returned from
//! [`Animator::tick`] or [`Animator::stop`], so the caller's state machine stays
//! inspectable.

use std::time::{Duration, Instant};

use tracing::debug;

/// Default interval between animation ticks (~60 fps).
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Easing function type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EasingFunction {
    /// Linear interpolation
    Linear,
    /// Smooth ease-out (deceleration)
    EaseOut,
    /// Cubic ease-in-out, used for gallery page transitions
    EaseInOut,
    /// Bounce effect at the end
    EaseOutBack,
    /// Elastic bounce
    EaseOutElastic,
}

impl EasingFunction {
    /// Apply the easing function to a value t in [0, 1]
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,

            EasingFunction::EaseOut => {
                // Cubic ease-out: 1 - (1 - t)^3
                1.0 - (1.0 - t).powi(3)
            }

            EasingFunction::EaseInOut => ease_in_out_cubic(t),

            EasingFunction::EaseOutBack => {
                // Overshoot then settle
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
            }

            EasingFunction::EaseOutElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    let c4 = (2.0 * std::f32::consts::PI) / 3.0;
                    2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
                }
            }
        }
    }
}

/// `t < 0.5 ? 4t³ : 1 - (-2t + 2)³ / 2`
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// A named value interpolated from `start` to `end` over one animator run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedValue {
    pub name: &'static str,
    pub start: f32,
    pub end: f32,
    pub easing: EasingFunction,
}

impl AnimatedValue {
    pub fn new(name: &'static str, start: f32, end: f32, easing: EasingFunction) -> Self {
        Self {
            name,
            start,
            end,
            easing,
        }
    }

    /// Value at normalized time `t`. The endpoints are returned exactly.
    pub fn sample_at(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return self.start;
        }
        if t >= 1.0 {
            return self.end;
        }
        self.start + (self.end - self.start) * self.easing.apply(t)
    }
}

/// One value update produced by a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub name: &'static str,
    /// Normalized time in [0, 1]
    pub progress: f32,
    pub value: f32,
}

/// Outcome of advancing the animator to a point in time.
#[derive(Debug, PartialEq)]
pub enum Tick<A> {
    /// Nothing is running.
    Idle,
    /// Still in flight; the host should schedule another tick.
    Running { progress: f32, samples: Vec<Sample> },
    /// The run reached `t = 1`. Emitted exactly once per run.
    Finished {
        samples: Vec<Sample>,
        action: Option<A>,
    },
}

/// Drives a set of [`AnimatedValue`]s over a fixed duration.
///
/// `A` is the completion action the owner wants back when the run ends,
/// either naturally or through [`Animator::stop`].
#[derive(Debug)]
pub struct Animator<A> {
    values: Vec<AnimatedValue>,
    duration: Duration,
    /// `Some` while running
    started_at: Option<Instant>,
    on_stop: Option<A>,
    tick_interval: Duration,
}

impl<A> Animator<A> {
    /// Create an idle animator
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            duration: Duration::ZERO,
            started_at: None,
            on_stop: None,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Period the host should use when scheduling the next tick.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Replace the animated values. Rejected (returns `false`) while running.
    pub fn set_animated_values(&mut self, values: Vec<AnimatedValue>) -> bool {
        if self.is_running() {
            debug!("Animator: ignoring new values while running");
            return false;
        }
        self.values = values;
        true
    }

    pub fn animated_values(&self) -> &[AnimatedValue] {
        &self.values
    }

    /// Replace the completion action, returning the previous one.
    /// Allowed while running.
    pub fn set_on_stop(&mut self, action: A) -> Option<A> {
        self.on_stop.replace(action)
    }

    pub fn pending_action(&self) -> Option<&A> {
        self.on_stop.as_ref()
    }

    /// Begin a timed run. Returns `false` without touching state if a run is
    /// already in flight.
    pub fn start(&mut self, duration: Duration, now: Instant) -> bool {
        if self.is_running() {
            debug!("Animator: start ignored, already running");
            return false;
        }
        self.duration = duration;
        self.started_at = Some(now);
        debug!(
            "Animator: started {} value(s) for {:?}",
            self.values.len(),
            duration
        );
        true
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Normalized progress of the current run at `now`, 0 when idle.
    pub fn progress(&self, now: Instant) -> f32 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Advance to `now`, sampling every value.
    pub fn tick(&mut self, now: Instant) -> Tick<A> {
        if !self.is_running() {
            return Tick::Idle;
        }

        let progress = self.progress(now);
        let samples = self.samples(progress);

        if progress >= 1.0 {
            self.started_at = None;
            debug!("Animator: finished");
            return Tick::Finished {
                samples,
                action: self.on_stop.take(),
            };
        }

        Tick::Running { progress, samples }
    }

    /// Force the run to end now and hand back the pending action regardless
    /// of progress. Does nothing when idle.
    pub fn stop(&mut self) -> Option<A> {
        if self.started_at.take().is_none() {
            return None;
        }
        debug!("Animator: stopped early");
        self.on_stop.take()
    }

    fn samples(&self, progress: f32) -> Vec<Sample> {
        self.values
            .iter()
            .map(|v| Sample {
                name: v.name,
                progress,
                value: v.sample_at(progress),
            })
            .collect()
    }
}

impl<A> Default for Animator<A> {
    fn default() -> Self {
        Self::new()
    }
}
