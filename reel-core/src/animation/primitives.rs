//! Semantic animation helpers built on [`spring`] and range mapping.
//!
//! All helpers take the frame as a signed integer so callers can pass `frame - delay` without
//! worrying about underflow. Frames before the start or long after the end are always valid.

use std::str::FromStr;

use crate::{
    animation::interpolate::{InterpolateOptions, map_range},
    animation::spring::{SpringConfig, spring},
    foundation::core::{Affine, Fps, Transform2D, Vec2},
    foundation::error::{ReelError, ReelResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Edge an element slides in from.
pub enum Direction {
    /// Enters from the left (negative x travel).
    #[default]
    Left,
    /// Enters from the right.
    Right,
    /// Enters from the top (negative y travel).
    Top,
    /// Enters from the bottom.
    Bottom,
}

impl FromStr for Direction {
    type Err = ReelError;

    fn from_str(s: &str) -> ReelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            other => Err(ReelError::validation(format!(
                "unknown direction '{other}' (expected left|right|top|bottom)"
            ))),
        }
    }
}

impl Direction {
    /// Offset vector for a travel distance `v` along this direction.
    pub fn offset(self, v: f64) -> Vec2 {
        match self {
            Self::Left => Vec2::new(-v, 0.0),
            Self::Right => Vec2::new(v, 0.0),
            Self::Top => Vec2::new(0.0, -v),
            Self::Bottom => Vec2::new(0.0, v),
        }
    }
}

/// Translation that starts `distance` away and springs to rest at the origin.
pub fn slide_in(
    frame: i64,
    fps: Fps,
    direction: Direction,
    distance: f64,
    config: SpringConfig,
) -> Vec2 {
    let progress = spring(frame, fps, config);
    let v = map_range(
        progress,
        [0.0, 1.0],
        [distance, 0.0],
        InterpolateOptions::extend(),
    );
    direction.offset(v)
}

/// Opacity ramp 0 -> 1 over `[start_frame, start_frame + duration]`, clamped outside.
pub fn fade_in(frame: i64, start_frame: i64, duration: u64) -> f64 {
    let end = start_frame.saturating_add_unsigned(duration);
    map_range(
        frame as f64,
        [start_frame as f64, end as f64],
        [0.0, 1.0],
        InterpolateOptions::clamp(),
    )
}

/// Opacity ramp 1 -> 0 over `[start_frame, start_frame + duration]`, clamped outside.
pub fn fade_out(frame: i64, start_frame: i64, duration: u64) -> f64 {
    let end = start_frame.saturating_add_unsigned(duration);
    map_range(
        frame as f64,
        [start_frame as f64, end as f64],
        [1.0, 0.0],
        InterpolateOptions::clamp(),
    )
}

/// Scale factor springing from 0 to 1, starting at `start_frame`. Overshoot is kept.
pub fn scale_in(frame: i64, fps: Fps, start_frame: i64, config: SpringConfig) -> f64 {
    let progress = spring(frame.saturating_sub(start_frame), fps, config);
    map_range(
        progress,
        [0.0, 1.0],
        [0.0, 1.0],
        InterpolateOptions::extend(),
    )
}

/// Continuous rotation in degrees. Not wrapped.
pub fn rotate(frame: i64, fps: Fps, rotations_per_second: f64) -> f64 {
    fps.secs_at(frame) * rotations_per_second * 360.0
}

/// Periodic scale oscillating between `min_scale` and `max_scale` every `duration` frames.
///
/// The period is counted in frames, so the result is the same for every frame rate.
/// The phase uses a euclidean remainder so negative frames continue the same cycle.
pub fn pulse(frame: i64, _fps: Fps, min_scale: f64, max_scale: f64, duration: u64) -> f64 {
    let phase = if duration == 0 {
        0.0
    } else {
        let period = i64::try_from(duration).unwrap_or(i64::MAX);
        frame.rem_euclid(period) as f64 / period as f64
    };
    map_range(
        (phase * std::f64::consts::TAU).sin(),
        [-1.0, 1.0],
        [min_scale, max_scale],
        InterpolateOptions::extend(),
    )
}

/// Number of characters a typewriter has revealed at `frame`, clamped to `[0, char_count]`.
pub fn typewriter_len(frame: i64, char_count: usize, characters_per_second: f64, fps: Fps) -> usize {
    // frame * cps / fps, with fps = num / den.
    let shown = (frame as f64 * characters_per_second * f64::from(fps.den) / f64::from(fps.num))
        .floor();
    if shown.is_nan() || shown <= 0.0 {
        return 0;
    }
    if shown >= char_count as f64 {
        return char_count;
    }
    shown as usize
}

/// Prefix of `text` revealed by a typewriter at `frame`. Always ends on a char boundary.
pub fn typewriter(frame: i64, text: &str, characters_per_second: f64, fps: Fps) -> &str {
    let count = text.chars().count();
    let n = typewriter_len(frame, count, characters_per_second, fps);
    match text.char_indices().nth(n) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

/// Value counting from `from` to `to` over `[start_frame, start_frame + duration]`, formatted.
///
/// With `decimals == 0` the value is rounded to an integer; otherwise it keeps exactly
/// `decimals` fractional digits.
pub fn counter(
    frame: i64,
    from: f64,
    to: f64,
    start_frame: i64,
    duration: u64,
    decimals: usize,
) -> String {
    let end = start_frame.saturating_add_unsigned(duration);
    let v = map_range(
        frame as f64,
        [start_frame as f64, end as f64],
        [from, to],
        InterpolateOptions::clamp(),
    );
    if decimals == 0 {
        format!("{}", v.round() as i64)
    } else {
        format!("{v:.decimals$}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Bundle of visual values a presentation layer turns into styling.
pub struct Style {
    /// Translation in pixels.
    pub translate: Vec2,
    /// Uniform scale factor.
    pub scale: f64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: 1.0,
            rotation_deg: 0.0,
            opacity: 1.0,
        }
    }
}

impl Style {
    /// Add an offset to the current translation.
    pub fn with_translate(mut self, offset: Vec2) -> Self {
        self.translate += offset;
        self
    }

    /// Multiply the current scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale *= scale;
        self
    }

    /// Add to the current rotation.
    pub fn with_rotation_deg(mut self, deg: f64) -> Self {
        self.rotation_deg += deg;
        self
    }

    /// Multiply the current opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity *= opacity;
        self
    }

    /// Decompose into a transform pivoting around `anchor`.
    pub fn to_transform(self, anchor: Vec2) -> Transform2D {
        Transform2D {
            translate: self.translate,
            rotation_rad: self.rotation_deg.to_radians(),
            scale: Vec2::new(self.scale, self.scale),
            anchor,
        }
    }

    /// Affine matrix pivoting around `anchor`.
    pub fn to_affine(self, anchor: Vec2) -> Affine {
        self.to_transform(anchor).to_affine()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/primitives.rs"]
mod tests;
