//! Stateless damped-oscillator progress curves.
//!
//! Every function here is a pure function of `(frame, fps, config)`. Nothing is integrated
//! step by step, so frames can be sampled in any order, repeatedly, or from several threads.

use crate::{
    animation::interpolate::{InterpolateOptions, map_range},
    foundation::core::Fps,
    foundation::error::{ReelError, ReelResult},
};

const MIN_POSITIVE: f64 = 1e-6;
const CRITICAL_EPS: f64 = 1e-9;

/// Default settle threshold used by [`measure_spring`].
pub const DEFAULT_SETTLE_THRESHOLD: f64 = 0.005;

/// Frames a settled spring must stay inside the threshold before it counts as finished.
const SETTLE_CONFIRM_FRAMES: u64 = 20;

/// Upper bound on frames scanned by [`measure_spring`].
const MAX_MEASURE_FRAMES: u64 = 1_000_000;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Physical parameters of a spring animation.
pub struct SpringConfig {
    /// Viscous damping coefficient.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Spring constant.
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    /// Moving mass.
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Never report a value past the target.
    #[serde(default)]
    pub overshoot_clamping: bool,
}

fn default_damping() -> f64 {
    10.0
}

fn default_stiffness() -> f64 {
    100.0
}

fn default_mass() -> f64 {
    1.0
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            stiffness: default_stiffness(),
            mass: default_mass(),
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Heavily damped spring used by [`slide_in`](crate::slide_in).
    pub const SLIDE: SpringConfig = SpringConfig {
        damping: 100.0,
        stiffness: 200.0,
        mass: 1.0,
        overshoot_clamping: false,
    };

    /// Heavily damped spring used by [`scale_in`](crate::scale_in).
    pub const SCALE: SpringConfig = SpringConfig {
        damping: 150.0,
        stiffness: 300.0,
        mass: 1.0,
        overshoot_clamping: false,
    };

    /// Build a validated config.
    pub fn new(damping: f64, stiffness: f64, mass: f64) -> ReelResult<Self> {
        let cfg = Self {
            damping,
            stiffness,
            mass,
            overshoot_clamping: false,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that every parameter is finite and strictly positive.
    pub fn validate(&self) -> ReelResult<()> {
        for (name, v) in [
            ("damping", self.damping),
            ("stiffness", self.stiffness),
            ("mass", self.mass),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ReelError::config(format!(
                    "spring {name} must be finite and > 0, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Replace the damping coefficient.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Replace the spring constant.
    pub fn with_stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = stiffness;
        self
    }

    /// Replace the mass.
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Toggle overshoot clamping.
    pub fn with_overshoot_clamping(mut self, on: bool) -> Self {
        self.overshoot_clamping = on;
        self
    }

    /// Damping ratio ζ. Below 1 the spring oscillates.
    pub fn damping_ratio(&self) -> f64 {
        let (c, k, m) = self.sanitized();
        c / (2.0 * (k * m).sqrt())
    }

    fn sanitized(&self) -> (f64, f64, f64) {
        (
            self.damping.max(0.0),
            self.stiffness.max(MIN_POSITIVE),
            self.mass.max(MIN_POSITIVE),
        )
    }
}

/// Spring progress from 0 toward 1 at `frame`.
///
/// `frame <= 0` yields exactly `0.0`. Overshoot above 1 is preserved unless the config clamps it.
pub fn spring(frame: i64, fps: Fps, config: SpringConfig) -> f64 {
    let t = fps.secs_at(frame);
    let x = spring_at_secs(t, &config);
    if config.overshoot_clamping {
        x.min(1.0)
    } else {
        x
    }
}

fn spring_at_secs(t: f64, config: &SpringConfig) -> f64 {
    if t.is_nan() || t <= 0.0 {
        return 0.0;
    }
    let (c, k, m) = config.sanitized();
    let omega0 = (k / m).sqrt();
    let zeta = c / (2.0 * (k * m).sqrt());

    // Displacement from the target, starting at 1 with zero velocity.
    let displacement = if (zeta - 1.0).abs() < CRITICAL_EPS {
        (-omega0 * t).exp() * (1.0 + omega0 * t)
    } else if zeta < 1.0 {
        let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * omega0 * t).exp();
        envelope * ((omega1 * t).cos() + (zeta * omega0 / omega1) * (omega1 * t).sin())
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        // r1 * r2 = omega0^2; deriving the slow root from the fast one avoids cancellation.
        let r2 = -omega0 * (zeta + root);
        let r1 = -omega0 / (zeta + root);
        (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
    };
    1.0 - displacement
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Spring playback options layered over [`spring`].
pub struct SpringOptions {
    /// Physical parameters.
    #[serde(default)]
    pub config: SpringConfig,
    /// Value at rest before the spring starts.
    #[serde(default)]
    pub from: f64,
    /// Value the spring settles on.
    #[serde(default = "default_to")]
    pub to: f64,
    /// Frames to wait before starting.
    #[serde(default)]
    pub delay_frames: i64,
    /// Stretch or squeeze the natural settle time to this many frames.
    #[serde(default)]
    pub duration_frames: Option<u64>,
    /// Play backwards, from `to` toward `from`.
    #[serde(default)]
    pub reverse: bool,
}

fn default_to() -> f64 {
    1.0
}

impl Default for SpringOptions {
    fn default() -> Self {
        Self {
            config: SpringConfig::default(),
            from: 0.0,
            to: 1.0,
            delay_frames: 0,
            duration_frames: None,
            reverse: false,
        }
    }
}

/// Sample a spring with delay, value mapping, duration stretching and reversal.
///
/// Reversed playback runs over `duration_frames` when set, otherwise over the measured settle
/// time. A `duration_frames` of 0 is treated as a single frame.
pub fn spring_with(frame: i64, fps: Fps, opts: &SpringOptions) -> f64 {
    let local = (frame - opts.delay_frames) as f64;
    let t_frames = match opts.duration_frames {
        None if opts.reverse => {
            measure_spring(fps, opts.config, DEFAULT_SETTLE_THRESHOLD) as f64 - local
        }
        None => local,
        Some(duration) => {
            let duration = duration.max(1) as f64;
            let natural = measure_spring(fps, opts.config, DEFAULT_SETTLE_THRESHOLD) as f64;
            let played = if opts.reverse {
                duration - local
            } else {
                local
            };
            played * natural / duration
        }
    };

    let mut progress = spring_at_secs(t_frames * fps.frame_duration_secs(), &opts.config);
    if opts.config.overshoot_clamping {
        progress = progress.min(1.0);
    }
    map_range(
        progress,
        [0.0, 1.0],
        [opts.from, opts.to],
        InterpolateOptions::extend(),
    )
}

/// Frames until the spring stays within `threshold` of its target.
///
/// A settled value must hold for a confirmation window so late bounces of an under-damped
/// spring still count. The scan is capped, so pathological configs return a large but finite
/// number.
pub fn measure_spring(fps: Fps, config: SpringConfig, threshold: f64) -> u64 {
    let threshold = if threshold.is_finite() && threshold > 0.0 {
        threshold
    } else {
        DEFAULT_SETTLE_THRESHOLD
    };
    let off = |frame: u64| (1.0 - spring(frame as i64, fps, config)).abs() >= threshold;

    let mut frame = 0u64;
    while off(frame) && frame < MAX_MEASURE_FRAMES {
        frame += 1;
    }
    let mut finished = frame;

    let mut calm = 0u64;
    while calm < SETTLE_CONFIRM_FRAMES && frame < MAX_MEASURE_FRAMES {
        frame += 1;
        if off(frame) {
            calm = 0;
            finished = frame + 1;
        } else {
            calm += 1;
        }
    }
    finished
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
