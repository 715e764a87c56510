use crate::types::{Point, Value, Vector};

/// Substituted for a zero gradient length when normalizing.
pub const NORMAL_EPSILON: Value = 1e-8;

/// Result of asking a field for the exact zero crossing on an axis-aligned edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeRoot<const D: usize> {
    /// The field has no closed form; fall back to linear interpolation.
    Unsupported,
    /// The closed form has no valid root on the edge (negative radicand, or
    /// the root lies off the edge). The crossing is skipped.
    Degenerate,
    Root(Point<D>),
}

/// An implicit scalar field: negative inside, positive outside, zero on the
/// surface.
///
/// Only [`value`](ScalarField::value) is required. Primitives with an analytic
/// gradient or a closed-form edge root override the other two methods.
pub trait ScalarField<const D: usize>: Sync {
    fn value(&self, p: &Point<D>) -> Value;

    /// Gradient at `p`, not necessarily unit length.
    ///
    /// Defaults to central differences with step `step`.
    fn gradient(&self, p: &Point<D>, step: Value) -> Vector<D> {
        central_difference(|q| self.value(q), p, step)
    }

    /// Exact zero crossing on the edge from `a` to `b`, which differ only along
    /// `axis`. `epsilon` is added to any radicand to tolerate tangency.
    fn edge_root(&self, _a: &Point<D>, _b: &Point<D>, _axis: usize, _epsilon: Value) -> EdgeRoot<D> {
        EdgeRoot::Unsupported
    }
}

/// Estimates the gradient of `f` at `p` by central differences.
pub fn central_difference<const D: usize, F>(f: F, p: &Point<D>, step: Value) -> Vector<D>
where
    F: Fn(&Point<D>) -> Value,
{
    let mut gradient = Vector::<D>::zeros();
    for axis in 0..D {
        let mut forward = *p;
        let mut backward = *p;
        forward[axis] += step;
        backward[axis] -= step;
        gradient[axis] = (f(&forward) - f(&backward)) / (2.0 * step);
    }
    gradient
}

/// Normalizes `v`, dividing by [`NORMAL_EPSILON`] instead of a zero length.
///
/// Returns `None` if the result is not finite.
pub fn unit_normal<const D: usize>(v: Vector<D>) -> Option<Vector<D>> {
    let norm = v.norm();
    let norm = if norm == 0.0 { NORMAL_EPSILON } else { norm };
    let n = v / norm;
    n.iter().all(|c| c.is_finite()).then_some(n)
}

/// Signed distance to a `D`-sphere: a circle for `D = 2`, a sphere for `D = 3`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere<const D: usize> {
    pub center: Point<D>,
    pub radius: Value,
}

pub type Circle = Sphere<2>;

impl<const D: usize> Sphere<D> {
    pub fn new(center: Point<D>, radius: Value) -> Self {
        Self { center, radius }
    }

    pub fn at_origin(radius: Value) -> Self {
        Self::new(Point::origin(), radius)
    }
}

impl<const D: usize> ScalarField<D> for Sphere<D> {
    fn value(&self, p: &Point<D>) -> Value {
        (p - self.center).norm() - self.radius
    }

    fn gradient(&self, p: &Point<D>, _step: Value) -> Vector<D> {
        p - self.center
    }

    fn edge_root(&self, a: &Point<D>, b: &Point<D>, axis: usize, epsilon: Value) -> EdgeRoot<D> {
        let rest: Value = (0..D)
            .filter(|&i| i != axis)
            .map(|i| (a[i] - self.center[i]).powi(2))
            .sum();
        let radicand = self.radius * self.radius - rest + epsilon;
        if radicand < 0.0 {
            return EdgeRoot::Degenerate;
        }

        let offset = radicand.sqrt();
        let (lo, hi) = (a[axis].min(b[axis]), a[axis].max(b[axis]));
        // epsilon moves a root by at most sqrt(epsilon), so an endpoint lying on
        // the surface can come out just past the edge
        let tolerance = epsilon.sqrt() + Value::EPSILON * lo.abs().max(hi.abs()).max(1.0);
        let (root, miss) = [self.center[axis] + offset, self.center[axis] - offset]
            .into_iter()
            .map(|root| (root, (lo - root).max(root - hi).max(0.0)))
            .fold((Value::NAN, Value::INFINITY), |best, next| if next.1 < best.1 { next } else { best });
        if miss > tolerance {
            return EdgeRoot::Degenerate;
        }

        let mut p = *a;
        p[axis] = root.clamp(lo, hi);
        EdgeRoot::Root(p)
    }
}

/// Adapts a closure into a [`ScalarField`] with finite-difference gradients.
///
/// ```rust
/// use dual_contour::{field::{FnField, ScalarField}, types::Point2};
///
/// let line = FnField::new(|p: &Point2| p.y - 0.5);
/// assert_eq!(line.value(&Point2::new(3.0, 1.0)), 0.5);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FnField<F>(pub F);

impl<F> FnField<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<const D: usize, F> ScalarField<D> for FnField<F>
where
    F: Fn(&Point<D>) -> Value + Sync,
{
    fn value(&self, p: &Point<D>) -> Value {
        (self.0)(p)
    }
}
