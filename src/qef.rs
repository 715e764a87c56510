use crate::{
    config::QefMethod,
    sampling::Hermite,
    types::{Matrix, Point, Value, Vector},
};

/// Places one vertex for a cell by minimizing the quadratic error function
///
/// ```text
/// E(v) = Σᵢ (nᵢ · (v - pᵢ))²
/// ```
///
/// through its normal equations `A v = b` with `A = Σ nᵢnᵢᵀ` and
/// `b = Σ (nᵢ·pᵢ) nᵢ`. `regularization · I` is always added to `A`, so the
/// system stays symmetric positive definite (and is solved by Cholesky) when
/// the normals are parallel or there is a single sample.
///
/// Returns `None` for an empty sample set, and when the solve fails or is not
/// finite; the caller then omits the vertex.
pub fn solve_qef<const D: usize>(
    samples: &[Hermite<D>],
    regularization: Value,
    method: QefMethod,
) -> Option<Point<D>> {
    if samples.is_empty() {
        return None;
    }

    let anchor = match method {
        QefMethod::NormalEquations => Vector::<D>::zeros(),
        QefMethod::MassPoint => mass_point(samples),
    };

    let mut ata = Matrix::<D>::zeros();
    let mut atb = Vector::<D>::zeros();
    for s in samples {
        ata += s.normal * s.normal.transpose();
        atb += s.normal * s.normal.dot(&(s.point.coords - anchor));
    }
    ata += Matrix::<D>::identity() * regularization;

    let offset = ata.cholesky()?.solve(&atb);
    let v = anchor + offset;
    v.iter().all(|c| c.is_finite()).then(|| Point::from(v))
}

/// Centroid of the sample points.
fn mass_point<const D: usize>(samples: &[Hermite<D>]) -> Vector<D> {
    let sum = samples
        .iter()
        .fold(Vector::<D>::zeros(), |acc, s| acc + s.point.coords);
    sum / samples.len() as Value
}
