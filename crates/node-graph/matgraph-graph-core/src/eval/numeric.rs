//! Scalar helpers with game-engine semantics (clamped interpolation, clamp that never panics).

#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

#[inline]
pub fn clamp01(value: f32) -> f32 {
    clamp(value, 0.0, 1.0)
}

/// Interpolate from `a` to `b`; `t` is clamped to `[0, 1]`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * clamp01(t)
}

/// Where `value` sits between `a` and `b`, clamped to `[0, 1]`. Zero when `a == b`.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a != b {
        clamp01((value - a) / (b - a))
    } else {
        0.0
    }
}

/// Hermite-eased interpolation from `from` to `to`.
#[inline]
pub fn smooth_step(from: f32, to: f32, t: f32) -> f32 {
    let t = clamp01(t);
    let t = -2.0 * t * t * t + 3.0 * t * t;
    to * t + from * (1.0 - t)
}

/// Wrap `t` into `[0, length]`.
#[inline]
pub fn repeat(t: f32, length: f32) -> f32 {
    clamp(t - (t / length).floor() * length, 0.0, length)
}

/// Bounce `t` back and forth between `0` and `length`.
#[inline]
pub fn ping_pong(t: f32, length: f32) -> f32 {
    let t = repeat(t, length * 2.0);
    length - (t - length).abs()
}

#[inline]
pub fn remap(value: f32, from_min: f32, from_max: f32, to_min: f32, to_max: f32) -> f32 {
    lerp(to_min, to_max, inverse_lerp(from_min, from_max, value))
}

#[inline]
pub fn fractional(value: f32) -> f32 {
    value - value.floor()
}

/// Weighted mix of `a` and `b`; the weight is clamped to `[0, 1]`.
#[inline]
pub fn blend(a: f32, b: f32, weight: f32) -> f32 {
    let w = clamp01(weight);
    a * (1.0 - w) + b * w
}
