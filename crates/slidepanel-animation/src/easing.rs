//! Easing curves used to shape settle trajectories.

/// Maps a linear time fraction in `[0, 1]` onto a progress fraction.
///
/// Implementations must be monotonic and satisfy `f(0) == 0`, `f(1) == 1`;
/// the settle engine relies on that to land exactly on its target.
pub trait Interpolator {
    fn interpolate(&self, fraction: f32) -> f32;
}

impl<F> Interpolator for F
where
    F: Fn(f32) -> f32,
{
    fn interpolate(&self, fraction: f32) -> f32 {
        self(fraction)
    }
}

/// Built-in easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    Linear,
    /// `(t - 1)^5 + 1`: fast start with a long, soft landing. Default for
    /// panel settles.
    #[default]
    QuinticEaseOut,
    Bezier(CubicBezier),
}

impl Easing {
    pub fn transform(&self, fraction: f32) -> f32 {
        let fraction = fraction.clamp(0.0, 1.0);
        match self {
            Easing::Linear => fraction,
            Easing::QuinticEaseOut => {
                let t = fraction - 1.0;
                t * t * t * t * t + 1.0
            }
            Easing::Bezier(curve) => curve.solve(fraction),
        }
    }
}

impl Interpolator for Easing {
    fn interpolate(&self, fraction: f32) -> f32 {
        self.transform(fraction)
    }
}

/// Unit cubic bezier through `(0, 0)` and `(1, 1)` with control points
/// `(x1, y1)` and `(x2, y2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

const SOLVE_EPSILON: f32 = 1e-5;
const BISECTION_STEPS: usize = 24;

impl CubicBezier {
    /// Material "standard" curve, quick to leave and slow to arrive.
    pub const STANDARD: Self = Self::new(0.4, 0.0, 0.2, 1.0);
    /// Material "decelerate" curve.
    pub const DECELERATE: Self = Self::new(0.0, 0.0, 0.2, 1.0);

    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Progress at time fraction `x`. The curve parameter is found by
    /// bisection, which stays stable where the x slope goes flat.
    pub fn solve(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        let kx = coefficients(self.x1, self.x2);
        let (mut low, mut high) = (0.0f32, 1.0f32);
        let mut t = x;
        for _ in 0..BISECTION_STEPS {
            let error = evaluate(&kx, t) - x;
            if error.abs() < SOLVE_EPSILON {
                break;
            }
            if error > 0.0 {
                high = t;
            } else {
                low = t;
            }
            t = (low + high) * 0.5;
        }
        evaluate(&coefficients(self.y1, self.y2), t)
    }
}

/// `[a, b, c]` of `a*t^3 + b*t^2 + c*t` for control values `p1`, `p2`.
fn coefficients(p1: f32, p2: f32) -> [f32; 3] {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    [1.0 - c - b, b, c]
}

fn evaluate(k: &[f32; 3], t: f32) -> f32 {
    ((k[0] * t + k[1]) * t + k[2]) * t
}
