//! Keyframed scalar curves evaluated by [`NodeType::AnimationCurve`](crate::types::NodeType).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    #[serde(default)]
    pub in_tangent: f32,
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }

    pub fn with_tangents(mut self, in_tangent: f32, out_tangent: f32) -> Self {
        self.in_tangent = in_tangent;
        self.out_tangent = out_tangent;
        self
    }
}

/// Cubic Hermite curve through a set of keyframes. Evaluation clamps to the first/last key
/// outside the keyed range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationCurve {
    keys: Vec<Keyframe>,
}

impl AnimationCurve {
    /// Build a curve; keys are sorted by time.
    pub fn new(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// S-shaped curve from `(t0, v0)` to `(t1, v1)` with flat tangents at both ends.
    pub fn ease_in_out(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        Self::new(vec![Keyframe::new(t0, v0), Keyframe::new(t1, v1)])
    }

    /// Straight line from `(t0, v0)` to `(t1, v1)`.
    pub fn linear(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        let slope = if t1 != t0 { (v1 - v0) / (t1 - t0) } else { 0.0 };
        Self::new(vec![
            Keyframe::new(t0, v0).with_tangents(0.0, slope),
            Keyframe::new(t1, v1).with_tangents(slope, 0.0),
        ])
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Restore key ordering after deserialization.
    pub(crate) fn normalized(self) -> Self {
        Self::new(self.keys)
    }

    pub fn evaluate(&self, t: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if t.is_nan() {
            return f32::NAN;
        }
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // First key strictly after t; t is inside the keyed range so 1 <= hi < len.
        let hi = self.keys.partition_point(|k| k.time <= t);
        let k0 = &self.keys[hi - 1];
        let k1 = &self.keys[hi];
        let dt = k1.time - k0.time;
        if dt <= 0.0 {
            return k1.value;
        }

        let s = (t - k0.time) / dt;
        let s2 = s * s;
        let s3 = s2 * s;
        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;
        h00 * k0.value + h10 * dt * k0.out_tangent + h01 * k1.value + h11 * dt * k1.in_tangent
    }
}

impl Default for AnimationCurve {
    fn default() -> Self {
        Self::ease_in_out(0.0, 0.0, 1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) {
        assert!((a - b).abs() <= 1e-5, "left={a} right={b}");
    }

    #[test]
    fn default_curve_eases_between_zero_and_one() {
        let curve = AnimationCurve::default();
        approx(curve.evaluate(0.0), 0.0);
        approx(curve.evaluate(0.25), 0.15625);
        approx(curve.evaluate(0.5), 0.5);
        approx(curve.evaluate(1.0), 1.0);
    }

    #[test]
    fn clamps_outside_keyed_range() {
        let curve = AnimationCurve::ease_in_out(1.0, 2.0, 3.0, 4.0);
        approx(curve.evaluate(-10.0), 2.0);
        approx(curve.evaluate(10.0), 4.0);
    }

    #[test]
    fn linear_curve_is_linear() {
        let curve = AnimationCurve::linear(0.0, 0.0, 2.0, 4.0);
        approx(curve.evaluate(0.5), 1.0);
        approx(curve.evaluate(1.5), 3.0);
    }

    #[test]
    fn unsorted_keys_are_ordered() {
        let curve = AnimationCurve::new(vec![Keyframe::new(1.0, 1.0), Keyframe::new(0.0, 0.0)]);
        assert_eq!(curve.keys()[0].time, 0.0);
        approx(curve.evaluate(0.5), 0.5);
    }

    #[test]
    fn empty_curve_evaluates_to_zero() {
        assert_eq!(AnimationCurve::new(Vec::new()).evaluate(0.3), 0.0);
    }
}
