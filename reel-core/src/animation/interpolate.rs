use crate::{
    animation::ease::Ease,
    foundation::error::{ReelError, ReelResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Behavior of an interpolation outside its input domain.
pub enum Extrapolate {
    /// Hold the boundary output.
    Clamp,
    /// Continue the boundary segment's slope.
    #[default]
    Extend,
    /// Return the input value unchanged.
    Identity,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Extrapolation policy per side plus the in-range easing curve.
pub struct InterpolateOptions {
    /// Policy below the first breakpoint.
    #[serde(default)]
    pub left: Extrapolate,
    /// Policy above the last breakpoint.
    #[serde(default)]
    pub right: Extrapolate,
    /// Curve applied to the segment parameter between breakpoints.
    #[serde(default)]
    pub easing: Ease,
}

impl InterpolateOptions {
    /// Clamp on both sides, linear in between.
    pub const fn clamp() -> Self {
        Self {
            left: Extrapolate::Clamp,
            right: Extrapolate::Clamp,
            easing: Ease::Linear,
        }
    }

    /// Extend on both sides, linear in between.
    pub const fn extend() -> Self {
        Self {
            left: Extrapolate::Extend,
            right: Extrapolate::Extend,
            easing: Ease::Linear,
        }
    }

    /// Same policy on both sides.
    pub const fn both(policy: Extrapolate) -> Self {
        Self {
            left: policy,
            right: policy,
            easing: Ease::Linear,
        }
    }

    /// Replace the in-range easing curve.
    pub const fn with_easing(mut self, easing: Ease) -> Self {
        self.easing = easing;
        self
    }
}

/// Validated breakpoint table mapping an input domain onto an output range.
#[derive(Clone, Copy, Debug)]
pub struct Interpolation<'a> {
    input: &'a [f64],
    output: &'a [f64],
    opts: InterpolateOptions,
}

impl<'a> Interpolation<'a> {
    /// Validate the table once; [`Interpolation::sample`] is infallible afterwards.
    pub fn new(
        input: &'a [f64],
        output: &'a [f64],
        opts: InterpolateOptions,
    ) -> ReelResult<Self> {
        if input.len() != output.len() {
            return Err(ReelError::config(format!(
                "interpolation input has {} breakpoints but output has {}",
                input.len(),
                output.len()
            )));
        }
        if input.len() < 2 {
            return Err(ReelError::config(
                "interpolation needs at least 2 breakpoints",
            ));
        }
        if input.iter().chain(output).any(|v| v.is_nan()) {
            return Err(ReelError::config("interpolation ranges must not contain NaN"));
        }
        if !input.windows(2).all(|w| w[0] <= w[1]) {
            return Err(ReelError::config(
                "interpolation input range must be non-decreasing",
            ));
        }
        Ok(Self {
            input,
            output,
            opts,
        })
    }

    /// Input breakpoints.
    pub fn input(&self) -> &'a [f64] {
        self.input
    }

    /// Output values.
    pub fn output(&self) -> &'a [f64] {
        self.output
    }

    /// Map `value` through the table.
    pub fn sample(&self, value: f64) -> f64 {
        sample_table(self.input, self.output, self.opts, value)
    }
}

/// Map `value` from `input` breakpoints onto `output` values.
///
/// Fails with [`ReelError::Config`] when the tables have different lengths, fewer than two
/// entries, contain NaN, or when `input` decreases anywhere.
pub fn interpolate(
    value: f64,
    input: &[f64],
    output: &[f64],
    opts: InterpolateOptions,
) -> ReelResult<f64> {
    Ok(Interpolation::new(input, output, opts)?.sample(value))
}

/// Two-point mapping for callers whose ranges are fixed-shape and therefore always valid.
pub(crate) fn map_range(
    value: f64,
    input: [f64; 2],
    output: [f64; 2],
    opts: InterpolateOptions,
) -> f64 {
    sample_table(&input, &output, opts, value)
}

fn sample_table(input: &[f64], output: &[f64], opts: InterpolateOptions, value: f64) -> f64 {
    let last = input.len() - 1;

    // Repeated breakpoints resolve to the last one, so steps are right-continuous.
    if let Some(i) = input.iter().rposition(|&x| x == value) {
        return output[i];
    }

    if value < input[0] {
        return match opts.left {
            Extrapolate::Clamp => output[0],
            Extrapolate::Identity => value,
            Extrapolate::Extend => extend_segment(input, output, 0, value),
        };
    }
    if value > input[last] {
        return match opts.right {
            Extrapolate::Clamp => output[last],
            Extrapolate::Identity => value,
            Extrapolate::Extend => extend_segment(input, output, last - 1, value),
        };
    }

    // First segment whose right edge reaches `value`.
    let seg = input[1..]
        .iter()
        .position(|&x| x >= value)
        .unwrap_or(last - 1);
    let (in0, in1) = (input[seg], input[seg + 1]);
    let (out0, out1) = (output[seg], output[seg + 1]);
    let width = in1 - in0;
    if width == 0.0 {
        return out0;
    }
    let t = opts.easing.apply((value - in0) / width);
    out0 + t * (out1 - out0)
}

fn extend_segment(input: &[f64], output: &[f64], seg: usize, value: f64) -> f64 {
    let (in0, in1) = (input[seg], input[seg + 1]);
    let (out0, out1) = (output[seg], output[seg + 1]);
    let width = in1 - in0;
    if width == 0.0 {
        return if value < in0 { out0 } else { out1 };
    }
    out0 + (value - in0) / width * (out1 - out0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
