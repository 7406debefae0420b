//! Interpolation (easing) functions.
//!
//! The set of curves and their YAML names follow the animation preferences of
//! Hyperspeedcube (`hyperprefs`), ported to `f64`. The bounce, overshoot and
//! underdamped curves are easeOut curves from <https://easings.net>.

use std::f64::consts::PI;

use crate::Float;

/// Function that maps a float from the range 0.0 to 1.0 to another float
/// from 0.0 to 1.0.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum InterpolateFn {
    /// Constant speed.
    Lerp,
    /// Cosine from 0 to PI.
    #[default]
    Cosine,
    /// Smoothstep.
    Cubic,
    /// Quarter circles at each end.
    Circular,
    /// Bounce at the end.
    Bounce,
    /// Overshoot and settle back.
    Overshoot,
    /// Exponentially decaying oscillation.
    Underdamped,
    /// Exponential approach without oscillation.
    CriticallyDamped,
}

impl InterpolateFn {
    /// Returns the interpolation value in the range [0, 1] for `t` in the
    /// range [0, 1].
    pub fn interpolate(self, t: Float) -> Float {
        let mut t = t.clamp(0.0, 1.0);
        match self {
            Self::Lerp => t,

            Self::Cosine => (1.0 - (t * PI).cos()) / 2.0,

            Self::Cubic => (3.0 - 2.0 * t) * t * t,

            Self::Circular => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) * 0.5
                } else {
                    (1.0 + (1.0 - (-2.0 * t + 2.0).powi(2)).sqrt()) * 0.5
                }
            }

            Self::Bounce => {
                // https://easings.net/#easeOutBounce
                let n1 = 7.5625;
                let d1 = 2.75;

                if t < 1.0 / d1 {
                    n1 * t * t
                } else if t < 2.0 / d1 {
                    t -= 1.5 / d1;
                    n1 * t * t + 0.75
                } else if t < 2.5 / d1 {
                    t -= 2.25 / d1;
                    n1 * t * t + 0.9375
                } else {
                    t -= 2.625 / d1;
                    n1 * t * t + 0.984375
                }
            }
            Self::Overshoot => {
                // https://easings.net/#easeOutBack
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
            }
            Self::Underdamped => {
                // https://easings.net/#easeOutElastic
                if t >= 1.0 {
                    return 1.0;
                }
                let c4 = (2.0 * PI) / 3.0;
                2.0_f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
            }
            Self::CriticallyDamped => {
                if t >= 1.0 {
                    return 1.0;
                }
                (-5.0 * t - 1.0) * (-8.0 * t).exp() + 1.0
            }
        }
    }
}
